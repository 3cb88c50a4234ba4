use crate::{HealthStatus, JobTrigger, RequestId, StagedFile};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Msg {
    /// Dashboard finished starting; kicks off the health poll.
    Startup,
    /// Health poll finished.
    HealthChecked(HealthStatus),
    /// User clicked a job trigger.
    JobClicked(JobTrigger),
    /// User picked a file in the job's upload dialog.
    UploadFileSelected { job: JobTrigger, file: StagedFile },
    /// User clicked Upload in the job's dialog.
    UploadConfirmed(JobTrigger),
    /// User cancelled or dismissed the job's dialog.
    UploadDismissed(JobTrigger),
    /// Engine settled a job request.
    JobSettled {
        request_id: RequestId,
        settlement: Settlement,
    },
    /// External progress indicator changed for a request.
    Progress {
        request_id: RequestId,
        signal: ProgressSignal,
    },
    /// Fallback for placeholder wiring.
    NoOp,
}

/// Final result of a job request as seen by the view.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Settlement {
    Success(String),
    Failure(String),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProgressSignal {
    Start,
    Done,
}
