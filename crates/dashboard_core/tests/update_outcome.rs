use dashboard_core::{
    update, AppState, Effect, JobTrigger, Msg, ProgressSignal, RequestId, RequestOutcome,
    Settlement,
};
use pretty_assertions::assert_eq;

fn click(state: AppState, job: JobTrigger) -> (AppState, RequestId) {
    let (state, effects) = update(state, Msg::JobClicked(job));
    match effects.as_slice() {
        [Effect::InvokeJob {
            request_id,
            job: invoked,
            upload: None,
        }] => {
            assert_eq!(*invoked, job);
            (state, *request_id)
        }
        other => panic!("expected a single InvokeJob effect, got {other:?}"),
    }
}

fn settle(state: AppState, request_id: RequestId, settlement: Settlement) -> AppState {
    let (state, effects) = update(
        state,
        Msg::JobSettled {
            request_id,
            settlement,
        },
    );
    assert!(effects.is_empty());
    state
}

fn direct_jobs() -> impl Iterator<Item = JobTrigger> {
    JobTrigger::ALL.into_iter().filter(|job| !job.requires_file())
}

#[test]
fn success_message_is_shown_for_every_direct_job() {
    for job in direct_jobs() {
        let (state, id) = click(AppState::new("http://api"), job);
        let state = settle(state, id, Settlement::Success("X".into()));
        assert_eq!(state.outcome(), &RequestOutcome::Success("X".into()));
    }
}

#[test]
fn failure_message_is_shown_for_every_direct_job() {
    for job in direct_jobs() {
        let (state, id) = click(AppState::new("http://api"), job);
        let state = settle(state, id, Settlement::Failure("boom".into()));
        assert_eq!(state.outcome(), &RequestOutcome::Failure("boom".into()));
    }
}

#[test]
fn click_enters_in_progress_before_settlement() {
    let mut state = AppState::new("http://api");
    assert!(state.consume_dirty());
    assert_eq!(state.outcome(), &RequestOutcome::Idle);

    let (mut state, id) = click(state, JobTrigger::UpdateCashPosition);
    assert_eq!(id, 1);
    assert_eq!(state.outcome(), &RequestOutcome::InProgress);
    assert_eq!(state.view().outcome, RequestOutcome::InProgress);
    assert!(state.consume_dirty());
}

#[test]
fn new_click_clears_previous_result() {
    let (state, first) = click(AppState::new("http://api"), JobTrigger::SyncBankTransactions);
    let state = settle(state, first, Settlement::Failure("boom".into()));

    let (state, second) = click(state, JobTrigger::SyncBankTransactions);
    assert!(second > first);
    assert_eq!(state.outcome(), &RequestOutcome::InProgress);
}

#[test]
fn stale_settlement_never_clobbers_newer_result() {
    let (state, first) = click(AppState::new("http://api"), JobTrigger::UpdateCashPosition);
    let (state, second) = click(state, JobTrigger::PopulateRbgInvoices);
    assert_eq!(state.outcome(), &RequestOutcome::InProgress);

    let state = settle(state, second, Settlement::Success("second".into()));
    let mut state = settle(state, first, Settlement::Failure("first".into()));
    assert!(state.consume_dirty());

    // A stale settlement must not mark the view dirty.
    let mut state = settle(state, first, Settlement::Failure("first again".into()));
    assert!(!state.consume_dirty());
    assert_eq!(state.outcome(), &RequestOutcome::Success("second".into()));
}

#[test]
fn stale_settlement_before_newer_one_keeps_in_progress() {
    let (state, first) = click(AppState::new("http://api"), JobTrigger::UpdateCashPosition);
    let (state, second) = click(state, JobTrigger::UpdateCashPosition);

    let state = settle(state, first, Settlement::Success("first".into()));
    assert_eq!(state.outcome(), &RequestOutcome::InProgress);

    let state = settle(state, second, Settlement::Success("second".into()));
    assert_eq!(state.outcome(), &RequestOutcome::Success("second".into()));
    assert_eq!(state.latest_request(), second);
}

#[test]
fn progress_signals_track_in_flight_requests() {
    let (state, first) = click(AppState::new("http://api"), JobTrigger::UpdateCashPosition);
    let (state, second) = click(state, JobTrigger::SyncPlannedPayments);

    let progress = |state, request_id, signal| {
        update(state, Msg::Progress { request_id, signal }).0
    };
    let state = progress(state, first, ProgressSignal::Start);
    let state = progress(state, second, ProgressSignal::Start);
    assert_eq!(state.view().in_flight, 2);

    let state = progress(state, first, ProgressSignal::Done);
    let state = progress(state, second, ProgressSignal::Done);
    let state = progress(state, second, ProgressSignal::Done);
    assert_eq!(state.in_flight(), 0);
}
