//! Dashboard engine: HTTP transport and request execution.
mod engine;
mod lifecycle;
mod progress;
mod transport;
mod types;
mod upload;

pub use engine::{EngineError, EngineHandle};
pub use lifecycle::run_job;
pub use progress::{ChannelProgressIndicator, NoopProgressIndicator, ProgressIndicator};
pub use transport::{
    join_url, ReqwestTransport, Transport, TransportSettings, HEALTH_ROUTE, SERVER_ERROR_FALLBACK,
    UPLOAD_FIELD_NAME,
};
pub use types::{
    EngineEvent, FailureKind, JobFailure, JobResult, JobSuccess, ProgressSignal, RequestId,
};
pub use upload::{read_upload, UploadFile};
