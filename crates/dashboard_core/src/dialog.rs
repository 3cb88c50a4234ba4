use crate::StagedFile;

pub const UPLOAD_DIALOG_DESCRIPTION: &str =
    "Select a file and click upload to run the function.";

/// Staging state for one file-requiring job.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct UploadDialog {
    open: bool,
    staged: Option<StagedFile>,
}

impl UploadDialog {
    pub fn is_open(&self) -> bool {
        self.open
    }

    pub fn staged(&self) -> Option<&StagedFile> {
        self.staged.as_ref()
    }

    /// Upload stays disabled until a file is staged.
    pub fn can_upload(&self) -> bool {
        self.open && self.staged.is_some()
    }

    pub(crate) fn open(&mut self) {
        self.open = true;
    }

    /// Replaces any earlier selection. Ignored while the dialog is closed.
    pub(crate) fn select(&mut self, file: StagedFile) -> bool {
        if !self.open {
            return false;
        }
        self.staged = Some(file);
        true
    }

    /// Hands the staged file off and closes; `None` if nothing was staged.
    pub(crate) fn confirm(&mut self) -> Option<StagedFile> {
        if !self.open {
            return None;
        }
        let file = self.staged.take()?;
        self.open = false;
        Some(file)
    }

    /// Closes and discards the selection. Returns whether anything changed.
    pub(crate) fn dismiss(&mut self) -> bool {
        let changed = self.open || self.staged.is_some();
        self.open = false;
        self.staged = None;
        changed
    }
}
