use std::sync::mpsc;
use std::thread;
use std::time::Duration;

use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use dashboard_core::{AppViewModel, DialogView, JobTrigger, Msg, StagedFile};
use dashboard_logging::dashboard_warn;

use super::UiState;
use crate::platform::app::LoopEvent;

const POLL_INTERVAL: Duration = Duration::from_millis(100);

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum KeyAction {
    None,
    Quit,
    Dispatch(Msg),
}

/// Forwards terminal key presses and resizes to the main loop until it hangs up.
pub fn spawn_event_reader(tx: mpsc::Sender<LoopEvent>) {
    thread::spawn(move || loop {
        let event = match event::poll(POLL_INTERVAL) {
            Ok(true) => match event::read() {
                Ok(Event::Key(key)) if key.kind == KeyEventKind::Press => LoopEvent::Key(key),
                Ok(Event::Resize(..)) => LoopEvent::Redraw,
                Ok(_) => continue,
                Err(err) => {
                    dashboard_warn!("terminal input failed: {}", err);
                    let _ = tx.send(LoopEvent::InputClosed);
                    return;
                }
            },
            Ok(false) => continue,
            Err(err) => {
                dashboard_warn!("terminal poll failed: {}", err);
                let _ = tx.send(LoopEvent::InputClosed);
                return;
            }
        };
        if tx.send(event).is_err() {
            return;
        }
    });
}

/// Maps a key press to a core message. Keys only ever touch `ui`, never the app state.
pub fn handle_key_event(key: KeyEvent, view: &AppViewModel, ui: &mut UiState) -> KeyAction {
    if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
        return KeyAction::Quit;
    }
    ui.notice = None;

    if let Some(dialog) = &view.dialog {
        return handle_dialog_key(key, dialog, ui);
    }

    match key.code {
        KeyCode::Char('q') | KeyCode::Char('Q') => KeyAction::Quit,
        KeyCode::Char('?') => {
            ui.show_help = !ui.show_help;
            KeyAction::None
        }
        KeyCode::Esc if ui.show_help => {
            ui.show_help = false;
            KeyAction::None
        }
        KeyCode::Up | KeyCode::Char('k') => {
            ui.select_previous();
            KeyAction::None
        }
        KeyCode::Down | KeyCode::Char('j') => {
            ui.select_next();
            KeyAction::None
        }
        KeyCode::Enter => KeyAction::Dispatch(Msg::JobClicked(ui.selected_job())),
        KeyCode::Char(digit) if digit.is_ascii_digit() => {
            let position = digit.to_digit(10).unwrap_or(0) as usize;
            match JobTrigger::from_position(position) {
                Some(job) => {
                    ui.select(job);
                    KeyAction::Dispatch(Msg::JobClicked(job))
                }
                None => {
                    ui.notice = Some(format!("No job {position}"));
                    KeyAction::None
                }
            }
        }
        _ => KeyAction::None,
    }
}

fn handle_dialog_key(key: KeyEvent, dialog: &DialogView, ui: &mut UiState) -> KeyAction {
    let job = dialog.job;
    match key.code {
        KeyCode::Esc => {
            ui.path_input.clear();
            KeyAction::Dispatch(Msg::UploadDismissed(job))
        }
        KeyCode::Enter => {
            let typed = ui.path_input.trim().to_string();
            if !typed.is_empty() {
                ui.path_input.clear();
                return KeyAction::Dispatch(Msg::UploadFileSelected {
                    job,
                    file: StagedFile::new(typed),
                });
            }
            if dialog.upload_enabled {
                KeyAction::Dispatch(Msg::UploadConfirmed(job))
            } else {
                ui.notice = Some("Type a file path first".to_string());
                KeyAction::None
            }
        }
        KeyCode::Backspace => {
            ui.path_input.pop();
            KeyAction::None
        }
        KeyCode::Char(c) => {
            ui.path_input.push(c);
            KeyAction::None
        }
        _ => KeyAction::None,
    }
}
