use std::fmt;

pub type RequestId = u64;

pub type JobResult = Result<JobSuccess, JobFailure>;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct JobSuccess {
    pub message: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct JobFailure {
    pub kind: FailureKind,
    pub message: String,
}

impl JobFailure {
    pub(crate) fn new(kind: FailureKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }
}

impl fmt::Display for JobFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.kind, self.message)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailureKind {
    InvalidUrl,
    HttpStatus(u16),
    MalformedResponse,
    UploadUnreadable,
    Unexpected,
    Network,
}

impl fmt::Display for FailureKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FailureKind::InvalidUrl => write!(f, "invalid url"),
            FailureKind::HttpStatus(code) => write!(f, "http status {code}"),
            FailureKind::MalformedResponse => write!(f, "malformed response"),
            FailureKind::UploadUnreadable => write!(f, "upload unreadable"),
            FailureKind::Unexpected => write!(f, "unexpected error"),
            FailureKind::Network => write!(f, "network error"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProgressSignal {
    Start,
    Done,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EngineEvent {
    Progress {
        request_id: RequestId,
        signal: ProgressSignal,
    },
    JobSettled {
        request_id: RequestId,
        result: JobResult,
    },
    HealthChecked(Result<String, JobFailure>),
}
