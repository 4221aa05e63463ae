// UI and formatting module

pub mod formatters;
pub mod panel;
pub mod progress;
pub mod prompts;
pub mod screen;

// Re-export commonly used items for cleaner imports
pub use formatters::{format_resolutions, format_size};
pub use progress::{ProgressReporter, Spinner};
pub use prompts::{show_error, show_failure, show_success, warn, Prompter, ScriptedPrompter, TerminalPrompter};
