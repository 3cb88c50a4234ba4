use std::io;
use std::path::PathBuf;
use std::sync::{mpsc, Arc, Mutex};
use std::thread;
use std::time::Duration;

use thiserror::Error;

use dashboard_logging::dashboard_info;

use crate::{
    run_job, ChannelProgressIndicator, EngineEvent, ProgressIndicator, RequestId,
    ReqwestTransport, Transport, TransportSettings,
};

#[derive(Debug, Error)]
pub enum EngineError {
    #[error("failed to start async runtime: {0}")]
    Runtime(#[from] io::Error),
    #[error("failed to build http client: {0}")]
    Client(#[from] reqwest::Error),
}

enum EngineCommand {
    InvokeJob {
        request_id: RequestId,
        route: &'static str,
        upload: Option<PathBuf>,
    },
    CheckHealth,
    Shutdown,
}

/// How long in-flight blocking work gets once the engine shuts down.
const SHUTDOWN_GRACE: Duration = Duration::from_secs(1);

/// Owns a background thread with a tokio runtime. Each command runs as its own
/// task so a slow request never blocks a newer one.
///
/// After [`EngineHandle::shutdown`] the runtime is torn down, pending requests
/// are dropped and [`EngineHandle::recv_timeout`] reports `Disconnected`.
#[derive(Clone)]
pub struct EngineHandle {
    cmd_tx: mpsc::Sender<EngineCommand>,
    event_rx: Arc<Mutex<mpsc::Receiver<EngineEvent>>>,
}

impl EngineHandle {
    pub fn new(settings: TransportSettings) -> Result<Self, EngineError> {
        let transport: Arc<dyn Transport> = Arc::new(ReqwestTransport::new(settings)?);
        Self::with_transport(transport)
    }

    pub fn with_transport(transport: Arc<dyn Transport>) -> Result<Self, EngineError> {
        let (cmd_tx, cmd_rx) = mpsc::channel();
        let (event_tx, event_rx) = mpsc::channel();
        let runtime = tokio::runtime::Runtime::new()?;
        let progress: Arc<dyn ProgressIndicator> =
            Arc::new(ChannelProgressIndicator::new(event_tx.clone()));

        thread::spawn(move || {
            while let Ok(command) = cmd_rx.recv() {
                if matches!(command, EngineCommand::Shutdown) {
                    break;
                }
                let transport = transport.clone();
                let progress = progress.clone();
                let event_tx = event_tx.clone();
                runtime.spawn(async move {
                    handle_command(transport, progress.as_ref(), command, event_tx).await;
                });
            }
            dashboard_info!("engine shutting down");
            runtime.shutdown_timeout(SHUTDOWN_GRACE);
        });

        Ok(Self {
            cmd_tx,
            event_rx: Arc::new(Mutex::new(event_rx)),
        })
    }

    pub fn invoke_job(&self, request_id: RequestId, route: &'static str, upload: Option<PathBuf>) {
        let _ = self.cmd_tx.send(EngineCommand::InvokeJob {
            request_id,
            route,
            upload,
        });
    }

    pub fn check_health(&self) {
        let _ = self.cmd_tx.send(EngineCommand::CheckHealth);
    }

    /// Stops accepting commands. Safe to call more than once.
    pub fn shutdown(&self) {
        let _ = self.cmd_tx.send(EngineCommand::Shutdown);
    }

    pub fn recv_timeout(
        &self,
        timeout: Duration,
    ) -> Result<EngineEvent, mpsc::RecvTimeoutError> {
        let event_rx = self
            .event_rx
            .lock()
            .map_err(|_| mpsc::RecvTimeoutError::Disconnected)?;
        event_rx.recv_timeout(timeout)
    }
}

async fn handle_command(
    transport: Arc<dyn Transport>,
    progress: &dyn ProgressIndicator,
    command: EngineCommand,
    event_tx: mpsc::Sender<EngineEvent>,
) {
    match command {
        EngineCommand::InvokeJob {
            request_id,
            route,
            upload,
        } => {
            let result = run_job(transport, progress, request_id, route, upload).await;
            let _ = event_tx.send(EngineEvent::JobSettled { request_id, result });
        }
        EngineCommand::CheckHealth => {
            let result = transport.health().await;
            let _ = event_tx.send(EngineEvent::HealthChecked(result));
        }
        EngineCommand::Shutdown => {}
    }
}
