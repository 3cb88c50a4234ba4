use std::sync::mpsc;

use anyhow::Context;
use chrono::Local;
use crossterm::event::KeyEvent;
use dashboard_core::{update, AppState, Msg};
use dashboard_engine::TransportSettings;
use dashboard_logging::{dashboard_debug, dashboard_info};

use super::config::DashboardConfig;
use super::effects::EffectRunner;
use super::logging;
use super::ui::{self, KeyAction, UiState};

/// Everything the main loop reacts to.
pub enum LoopEvent {
    /// Message produced by the engine.
    Msg(Msg),
    Key(KeyEvent),
    /// Terminal was resized.
    Redraw,
    /// Terminal input failed.
    InputClosed,
}

pub fn run_app() -> anyhow::Result<()> {
    let config = DashboardConfig::load().context("loading dashboard configuration")?;
    logging::initialize(config.log_destination);

    let endpoint = config.endpoint();
    dashboard_info!(
        "Starting dashboard endpoint={} log_destination={}",
        endpoint,
        config.log_destination
    );

    let (loop_tx, loop_rx) = mpsc::channel::<LoopEvent>();
    let runner = EffectRunner::new(TransportSettings::new(endpoint.clone()), loop_tx.clone())
        .context("starting request engine")?;

    let mut terminal = ui::setup_terminal().context("preparing terminal")?;
    ui::spawn_event_reader(loop_tx);

    let mut app = App::new(endpoint, runner);
    let result = app.run(&mut terminal, &loop_rx);
    app.runner.shutdown();
    ui::restore_terminal(&mut terminal)?;

    dashboard_info!("Dashboard exiting");
    result
}

struct App {
    state: AppState,
    ui: UiState,
    runner: EffectRunner,
}

impl App {
    fn new(endpoint: String, runner: EffectRunner) -> Self {
        Self {
            state: AppState::new(endpoint),
            ui: UiState::default(),
            runner,
        }
    }

    fn run(
        &mut self,
        terminal: &mut ui::terminal::DashboardTerminal,
        loop_rx: &mpsc::Receiver<LoopEvent>,
    ) -> anyhow::Result<()> {
        self.dispatch(Msg::Startup);
        loop {
            if self.state.consume_dirty() {
                self.ui.updated_at = Some(Local::now().format("%H:%M:%S").to_string());
            }
            let view = self.state.view();
            terminal.draw(|frame| ui::draw_ui(frame, &view, &self.ui))?;

            let Ok(event) = loop_rx.recv() else {
                return Ok(());
            };
            match event {
                LoopEvent::Msg(msg) => self.dispatch(msg),
                LoopEvent::Key(key) => {
                    match ui::handle_key_event(key, &view, &mut self.ui) {
                        KeyAction::Quit => return Ok(()),
                        KeyAction::Dispatch(msg) => {
                            dashboard_debug!("Key {:?} -> {:?}", key.code, msg);
                            self.dispatch(msg);
                        }
                        KeyAction::None => {}
                    }
                }
                LoopEvent::Redraw => {}
                LoopEvent::InputClosed => return Ok(()),
            }
        }
    }

    fn dispatch(&mut self, msg: Msg) {
        if let Msg::JobSettled { request_id, .. } = &msg {
            if *request_id != self.state.latest_request() {
                dashboard_info!(
                    "Discarding stale settlement request_id={} latest={}",
                    request_id,
                    self.state.latest_request()
                );
            }
        }
        let state = std::mem::take(&mut self.state);
        let (state, effects) = update(state, msg);
        self.state = state;
        self.runner.run(effects);
    }
}
