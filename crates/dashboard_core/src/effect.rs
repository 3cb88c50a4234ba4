use crate::{JobTrigger, RequestId, StagedFile};

/// Side effects requested by [`crate::update`]; executed by the app shell.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    /// Issue the one-off health GET.
    CheckHealth,
    /// POST the job's route, optionally attaching the staged file.
    InvokeJob {
        request_id: RequestId,
        job: JobTrigger,
        upload: Option<StagedFile>,
    },
}
