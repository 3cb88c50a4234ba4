use crate::{JobGroup, JobTrigger, RequestOutcome};

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct AppViewModel {
    pub endpoint: String,
    pub health: String,
    pub jobs: Vec<JobButtonView>,
    pub outcome: RequestOutcome,
    pub dialog: Option<DialogView>,
    pub in_flight: usize,
    pub dirty: bool,
}

impl AppViewModel {
    pub fn jobs_in(&self, group: JobGroup) -> impl Iterator<Item = &JobButtonView> {
        self.jobs.iter().filter(move |job| job.group == group)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct JobButtonView {
    /// 1-based catalog position, used as the number-key shortcut.
    pub position: usize,
    pub job: JobTrigger,
    pub label: &'static str,
    pub group: JobGroup,
    pub requires_file: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DialogView {
    pub job: JobTrigger,
    pub title: &'static str,
    pub selected: Option<String>,
    pub upload_enabled: bool,
}
