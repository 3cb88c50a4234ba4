use std::panic::{self, AssertUnwindSafe};
use std::sync::mpsc;

use dashboard_logging::dashboard_request;

use crate::{EngineEvent, ProgressSignal, RequestId};

/// External "working..." affordance. Signalling is fire-and-forget: an
/// indicator that cannot deliver a signal must not fail the request.
pub trait ProgressIndicator: Send + Sync {
    fn start(&self, request_id: RequestId);
    fn done(&self, request_id: RequestId);
}

#[derive(Debug, Clone, Copy, Default)]
pub struct NoopProgressIndicator;

impl ProgressIndicator for NoopProgressIndicator {
    fn start(&self, _request_id: RequestId) {}
    fn done(&self, _request_id: RequestId) {}
}

/// Forwards progress signals as [`EngineEvent::Progress`].
pub struct ChannelProgressIndicator {
    tx: mpsc::Sender<EngineEvent>,
}

impl ChannelProgressIndicator {
    pub fn new(tx: mpsc::Sender<EngineEvent>) -> Self {
        Self { tx }
    }

    fn emit(&self, request_id: RequestId, signal: ProgressSignal) {
        let _ = self.tx.send(EngineEvent::Progress { request_id, signal });
    }
}

impl ProgressIndicator for ChannelProgressIndicator {
    fn start(&self, request_id: RequestId) {
        self.emit(request_id, ProgressSignal::Start);
    }

    fn done(&self, request_id: RequestId) {
        self.emit(request_id, ProgressSignal::Done);
    }
}

/// Signals `start` on creation and `done` exactly once when dropped. A
/// panicking indicator is logged and otherwise ignored.
pub(crate) struct ProgressGuard<'a> {
    indicator: &'a dyn ProgressIndicator,
    request_id: RequestId,
}

impl<'a> ProgressGuard<'a> {
    pub(crate) fn start(indicator: &'a dyn ProgressIndicator, request_id: RequestId) -> Self {
        signal(request_id, ProgressSignal::Start, || indicator.start(request_id));
        Self {
            indicator,
            request_id,
        }
    }
}

impl Drop for ProgressGuard<'_> {
    fn drop(&mut self) {
        let (indicator, request_id) = (self.indicator, self.request_id);
        signal(request_id, ProgressSignal::Done, || indicator.done(request_id));
    }
}

fn signal(request_id: RequestId, which: ProgressSignal, call: impl FnOnce()) {
    if panic::catch_unwind(AssertUnwindSafe(call)).is_err() {
        dashboard_request!(warn, request_id, "progress indicator panicked on {:?}", which);
    }
}
