pub const TITLE: &str = "UI Dashboard";
pub const SUBTITLE: &str = "Pick a job and press Enter, or type its number.";
pub const RESPONSE_PANE: &str = "Response Pane";
pub const PROCESSING: &str = "Processing...";
pub const ERROR_PREFIX: &str = "Error: ";
pub const HELP_TITLE: &str = "Help";
pub const KEY_HINTS: &str = "Up/Down select  Enter run  1-6 run  ? help  q quit";
pub const DIALOG_HINTS: &str = "Enter select path / upload  Esc cancel";
pub const NO_FILE_SELECTED: &str = "No file selected";

pub const HELP: &str = "\
Up/Down, j/k   move the selection
Enter          run the selected job
1-6            run job n directly
?              show or hide this help
q, Ctrl-C      quit

Upload dialog:
  type a path, then Enter to select it
  Enter again  upload the selected file
  Esc          close without uploading";
