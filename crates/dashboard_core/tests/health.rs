use dashboard_core::{update, AppState, Effect, HealthStatus, Msg, RequestOutcome};

#[test]
fn startup_requests_health_exactly_once() {
    dashboard_logging::initialize_for_tests();

    let (state, effects) = update(AppState::new("http://api"), Msg::Startup);
    assert_eq!(effects, vec![Effect::CheckHealth]);

    let (_, effects) = update(state, Msg::Startup);
    assert!(effects.is_empty());
}

#[test]
fn failed_health_poll_stores_description() {
    let (state, _) = update(AppState::new("http://api"), Msg::Startup);
    let (state, _) = update(
        state,
        Msg::HealthChecked(HealthStatus::Failed("error sending request".into())),
    );

    assert_eq!(
        state.health(),
        &HealthStatus::Failed("error sending request".into())
    );
    assert_eq!(state.view().health, "error sending request");
    assert_eq!(state.outcome(), &RequestOutcome::Idle);
}

#[test]
fn reported_health_is_displayed_with_endpoint() {
    let (state, _) = update(
        AppState::new("http://localhost:8080"),
        Msg::HealthChecked(HealthStatus::Reported("UP".into())),
    );
    let view = state.view();
    assert_eq!(view.health, "UP");
    assert_eq!(view.endpoint, "http://localhost:8080");
}
