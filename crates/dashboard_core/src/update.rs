use crate::{AppState, Effect, JobTrigger, Msg, StagedFile};

/// Pure update function: applies a message to state and returns any effects.
pub fn update(mut state: AppState, msg: Msg) -> (AppState, Vec<Effect>) {
    let effects = match msg {
        Msg::Startup => {
            if state.request_health() {
                vec![Effect::CheckHealth]
            } else {
                Vec::new()
            }
        }
        Msg::HealthChecked(status) => {
            state.set_health(status);
            Vec::new()
        }
        Msg::JobClicked(job) => {
            // The open dialog's overlay blocks the rest of the catalog.
            if state.open_dialog().is_some() {
                return (state, Vec::new());
            }
            if job.requires_file() {
                if let Some(dialog) = state.dialog_mut(job) {
                    dialog.open();
                }
                state.mark_dirty();
                Vec::new()
            } else {
                vec![start_request(&mut state, job, None)]
            }
        }
        Msg::UploadFileSelected { job, file } => {
            let selected = state
                .dialog_mut(job)
                .is_some_and(|dialog| dialog.select(file));
            if selected {
                state.mark_dirty();
            }
            Vec::new()
        }
        Msg::UploadConfirmed(job) => {
            let staged = state.dialog_mut(job).and_then(|dialog| dialog.confirm());
            match staged {
                Some(file) => vec![start_request(&mut state, job, Some(file))],
                None => Vec::new(),
            }
        }
        Msg::UploadDismissed(job) => {
            let changed = state.dialog_mut(job).is_some_and(|dialog| dialog.dismiss());
            if changed {
                state.mark_dirty();
            }
            Vec::new()
        }
        Msg::JobSettled {
            request_id,
            settlement,
        } => {
            // Stale settlements are dropped by the slot.
            state.settle_request(request_id, settlement);
            Vec::new()
        }
        Msg::Progress { signal, .. } => {
            state.apply_progress(signal);
            Vec::new()
        }
        Msg::NoOp => Vec::new(),
    };

    (state, effects)
}

fn start_request(state: &mut AppState, job: JobTrigger, upload: Option<StagedFile>) -> Effect {
    let request_id = state.begin_request();
    Effect::InvokeJob {
        request_id,
        job,
        upload,
    }
}
