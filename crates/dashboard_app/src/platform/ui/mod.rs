pub mod constants;
pub mod input;
pub mod render;
pub mod state;
pub mod terminal;

pub use input::{handle_key_event, spawn_event_reader, KeyAction};
pub use render::draw_ui;
pub use state::UiState;
pub use terminal::{restore_terminal, setup_terminal};
