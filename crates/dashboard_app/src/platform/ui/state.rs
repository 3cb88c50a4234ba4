use dashboard_core::JobTrigger;

/// Terminal-only state the pure core never sees.
#[derive(Debug, Default)]
pub struct UiState {
    /// Zero-based index into the catalog.
    pub selected: usize,
    /// Path being typed in the upload dialog.
    pub path_input: String,
    pub notice: Option<String>,
    pub show_help: bool,
    /// Local time of the last state change, shown in the response pane.
    pub updated_at: Option<String>,
}

impl UiState {
    pub fn selected_job(&self) -> JobTrigger {
        JobTrigger::ALL[self.selected.min(JobTrigger::ALL.len() - 1)]
    }

    pub fn select(&mut self, job: JobTrigger) {
        if let Some(index) = JobTrigger::ALL.iter().position(|candidate| *candidate == job) {
            self.selected = index;
        }
    }

    pub fn select_next(&mut self) {
        self.selected = (self.selected + 1) % JobTrigger::ALL.len();
    }

    pub fn select_previous(&mut self) {
        self.selected = self
            .selected
            .checked_sub(1)
            .unwrap_or(JobTrigger::ALL.len() - 1);
    }
}
