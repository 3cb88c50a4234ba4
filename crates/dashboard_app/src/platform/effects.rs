use std::sync::mpsc::{self, RecvTimeoutError};
use std::thread;
use std::time::Duration;

use dashboard_core::{Effect, HealthStatus, Msg, ProgressSignal, Settlement};
use dashboard_engine::{EngineError, EngineEvent, EngineHandle, JobResult, TransportSettings};
use dashboard_logging::{dashboard_info, dashboard_request, dashboard_warn};

use super::app::LoopEvent;

const EVENT_POLL: Duration = Duration::from_millis(100);

pub struct EffectRunner {
    engine: EngineHandle,
}

impl EffectRunner {
    pub fn new(
        settings: TransportSettings,
        loop_tx: mpsc::Sender<LoopEvent>,
    ) -> Result<Self, EngineError> {
        let engine = EngineHandle::new(settings)?;
        let runner = Self { engine };
        runner.spawn_event_loop(loop_tx);
        Ok(runner)
    }

    pub fn run(&self, effects: Vec<Effect>) {
        for effect in effects {
            match effect {
                Effect::CheckHealth => {
                    dashboard_info!("CheckHealth");
                    self.engine.check_health();
                }
                Effect::InvokeJob {
                    request_id,
                    job,
                    upload,
                } => {
                    dashboard_request!(
                        info,
                        request_id,
                        "InvokeJob job={:?} route={} upload={}",
                        job,
                        job.route(),
                        upload.as_ref().map_or("-", |file| file.name.as_str())
                    );
                    self.engine
                        .invoke_job(request_id, job.route(), upload.map(|file| file.path));
                }
            }
        }
    }

    /// Stops the engine; the event pump exits once the engine's stream closes.
    pub fn shutdown(&self) {
        self.engine.shutdown();
    }

    fn spawn_event_loop(&self, loop_tx: mpsc::Sender<LoopEvent>) {
        let engine = self.engine.clone();
        thread::spawn(move || loop {
            match engine.recv_timeout(EVENT_POLL) {
                Ok(event) => {
                    if loop_tx.send(LoopEvent::Msg(map_event(event))).is_err() {
                        engine.shutdown();
                        return;
                    }
                }
                Err(RecvTimeoutError::Timeout) => {}
                Err(RecvTimeoutError::Disconnected) => {
                    dashboard_info!("engine event stream closed");
                    return;
                }
            }
        });
    }
}

pub fn map_event(event: EngineEvent) -> Msg {
    match event {
        EngineEvent::Progress { request_id, signal } => Msg::Progress {
            request_id,
            signal: map_signal(signal),
        },
        EngineEvent::JobSettled { request_id, result } => Msg::JobSettled {
            request_id,
            settlement: map_result(result),
        },
        EngineEvent::HealthChecked(result) => Msg::HealthChecked(match result {
            Ok(status) => HealthStatus::Reported(status),
            Err(failure) => {
                dashboard_warn!("Health check failed: {}", failure);
                HealthStatus::Failed(failure.message)
            }
        }),
    }
}

fn map_result(result: JobResult) -> Settlement {
    match result {
        Ok(success) => Settlement::Success(success.message),
        Err(failure) => Settlement::Failure(failure.message),
    }
}

fn map_signal(signal: dashboard_engine::ProgressSignal) -> ProgressSignal {
    match signal {
        dashboard_engine::ProgressSignal::Start => ProgressSignal::Start,
        dashboard_engine::ProgressSignal::Done => ProgressSignal::Done,
    }
}
