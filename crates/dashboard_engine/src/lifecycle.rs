use std::path::PathBuf;
use std::sync::Arc;

use dashboard_logging::dashboard_request;

use crate::progress::ProgressGuard;
use crate::upload::read_upload;
use crate::{FailureKind, JobFailure, JobResult, ProgressIndicator, RequestId, Transport};

/// Runs one job request from start to settlement.
///
/// Progress `start` fires before the transport is touched and `done` fires
/// exactly once on every exit path. Transport panics become
/// [`FailureKind::Unexpected`] failures instead of unwinding into the caller.
pub async fn run_job(
    transport: Arc<dyn Transport>,
    progress: &dyn ProgressIndicator,
    request_id: RequestId,
    route: &'static str,
    upload: Option<PathBuf>,
) -> JobResult {
    let _guard = ProgressGuard::start(progress, request_id);
    dashboard_request!(info, request_id, "route={} upload={}", route, upload.is_some());

    let result = execute(transport, route, upload).await;

    match &result {
        Ok(_) => dashboard_request!(info, request_id, "route={} succeeded", route),
        Err(failure) => {
            dashboard_request!(warn, request_id, "route={} failed: {}", route, failure)
        }
    }
    result
}

async fn execute(
    transport: Arc<dyn Transport>,
    route: &'static str,
    upload: Option<PathBuf>,
) -> JobResult {
    let upload = match upload {
        Some(path) => Some(read_upload(&path).await?),
        None => None,
    };

    let call = tokio::spawn(async move { transport.invoke(route, upload).await });
    match call.await {
        Ok(result) => result,
        Err(join_err) => Err(JobFailure::new(
            FailureKind::Unexpected,
            join_error_message(join_err),
        )),
    }
}

fn join_error_message(err: tokio::task::JoinError) -> String {
    if !err.is_panic() {
        return err.to_string();
    }
    let payload = err.into_panic();
    if let Some(message) = payload.downcast_ref::<&str>() {
        (*message).to_string()
    } else if let Some(message) = payload.downcast_ref::<String>() {
        message.clone()
    } else {
        "request task panicked".to_string()
    }
}
