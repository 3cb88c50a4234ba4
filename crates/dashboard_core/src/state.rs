use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use crate::view_model::{AppViewModel, DialogView, JobButtonView};
use crate::{
    JobTrigger, OutcomeSlot, ProgressSignal, RequestId, RequestOutcome, Settlement, UploadDialog,
};

/// Result of the startup health poll.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum HealthStatus {
    #[default]
    Unknown,
    /// Status string reported by the backend, e.g. `UP`.
    Reported(String),
    /// Description of why the poll failed.
    Failed(String),
}

impl HealthStatus {
    pub fn display_text(&self) -> &str {
        match self {
            HealthStatus::Unknown => "",
            HealthStatus::Reported(state) => state.as_str(),
            HealthStatus::Failed(error) => error.as_str(),
        }
    }
}

/// A local file picked in an upload dialog. Contents are read only when the
/// request is executed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StagedFile {
    pub path: PathBuf,
    pub name: String,
}

impl StagedFile {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let name = display_name(&path);
        Self { path, name }
    }
}

fn display_name(path: &Path) -> String {
    path.file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.to_string_lossy().into_owned())
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppState {
    endpoint: String,
    slot: OutcomeSlot,
    health: HealthStatus,
    health_requested: bool,
    dialogs: BTreeMap<JobTrigger, UploadDialog>,
    in_flight: usize,
    dirty: bool,
}

impl Default for AppState {
    fn default() -> Self {
        Self::new(String::new())
    }
}

impl AppState {
    pub fn new(endpoint: impl Into<String>) -> Self {
        let dialogs = JobTrigger::ALL
            .into_iter()
            .filter(|job| job.requires_file())
            .map(|job| (job, UploadDialog::default()))
            .collect();
        Self {
            endpoint: endpoint.into(),
            slot: OutcomeSlot::new(),
            health: HealthStatus::Unknown,
            health_requested: false,
            dialogs,
            in_flight: 0,
            dirty: true,
        }
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    pub fn outcome(&self) -> &RequestOutcome {
        self.slot.outcome()
    }

    /// Id of the most recently started request; `0` before the first one.
    pub fn latest_request(&self) -> RequestId {
        self.slot.latest()
    }

    pub fn health(&self) -> &HealthStatus {
        &self.health
    }

    pub fn dialog(&self, job: JobTrigger) -> Option<&UploadDialog> {
        self.dialogs.get(&job)
    }

    /// The dialog currently shown, if any. Dialogs are modal so at most one is
    /// open.
    pub fn open_dialog(&self) -> Option<JobTrigger> {
        self.dialogs
            .iter()
            .find(|(_, dialog)| dialog.is_open())
            .map(|(job, _)| *job)
    }

    /// Number of requests whose progress indicator has started but not finished.
    pub fn in_flight(&self) -> usize {
        self.in_flight
    }

    pub fn view(&self) -> AppViewModel {
        let jobs = JobTrigger::ALL
            .into_iter()
            .map(|job| JobButtonView {
                position: job.position(),
                job,
                label: job.label(),
                group: job.group(),
                requires_file: job.requires_file(),
            })
            .collect();

        let dialog = self.open_dialog().and_then(|job| {
            self.dialogs.get(&job).map(|dialog| DialogView {
                job,
                title: job.label(),
                selected: dialog.staged().map(|file| file.name.clone()),
                upload_enabled: dialog.can_upload(),
            })
        });

        AppViewModel {
            endpoint: self.endpoint.clone(),
            health: self.health.display_text().to_string(),
            jobs,
            outcome: self.slot.outcome().clone(),
            dialog,
            in_flight: self.in_flight,
            dirty: self.dirty,
        }
    }

    /// Returns whether anything changed since the last call, and clears the flag.
    pub fn consume_dirty(&mut self) -> bool {
        std::mem::take(&mut self.dirty)
    }

    pub(crate) fn mark_dirty(&mut self) {
        self.dirty = true;
    }

    pub(crate) fn begin_request(&mut self) -> RequestId {
        self.mark_dirty();
        self.slot.begin()
    }

    pub(crate) fn settle_request(&mut self, request_id: RequestId, settlement: Settlement) -> bool {
        let applied = self.slot.settle(request_id, settlement);
        if applied {
            self.mark_dirty();
        }
        applied
    }

    /// Returns `true` only the first time, so the poll runs once per startup.
    pub(crate) fn request_health(&mut self) -> bool {
        !std::mem::replace(&mut self.health_requested, true)
    }

    pub(crate) fn set_health(&mut self, status: HealthStatus) {
        self.health = status;
        self.mark_dirty();
    }

    pub(crate) fn dialog_mut(&mut self, job: JobTrigger) -> Option<&mut UploadDialog> {
        self.dialogs.get_mut(&job)
    }

    pub(crate) fn apply_progress(&mut self, signal: ProgressSignal) {
        self.in_flight = match signal {
            ProgressSignal::Start => self.in_flight + 1,
            ProgressSignal::Done => self.in_flight.saturating_sub(1),
        };
        self.mark_dirty();
    }
}
