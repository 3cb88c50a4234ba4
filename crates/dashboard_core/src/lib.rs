//! Dashboard core: pure request-lifecycle state machine and view-model helpers.
mod dialog;
mod effect;
mod job;
mod msg;
mod outcome;
mod state;
mod update;
mod view_model;

pub use dialog::{UploadDialog, UPLOAD_DIALOG_DESCRIPTION};
pub use effect::Effect;
pub use job::{JobGroup, JobTrigger};
pub use msg::{Msg, ProgressSignal, Settlement};
pub use outcome::{OutcomeSlot, RequestId, RequestOutcome};
pub use state::{AppState, HealthStatus, StagedFile};
pub use update::update;
pub use view_model::{AppViewModel, DialogView, JobButtonView};
