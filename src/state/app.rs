//! Application state

use crate::state::input_mode::InputMode;

/// Transient message shown in the status bar
#[derive(Debug, Clone)]
pub struct StatusMessage {
    pub text: String,
    pub is_error: bool,
}

/// Global application state
#[derive(Debug, Default)]
pub struct AppState {
    /// Current input routing mode
    pub input_mode: InputMode,

    /// Set when the event loop should exit
    pub should_quit: bool,

    /// Message shown in the status bar, if any
    pub status_message: Option<StatusMessage>,
}

impl AppState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Request application exit
    pub fn quit(&mut self) {
        self.should_quit = true;
    }

    /// Show an informational status message
    pub fn info(&mut self, text: impl Into<String>) {
        self.status_message = Some(StatusMessage {
            text: text.into(),
            is_error: false,
        });
    }

    /// Show an error status message
    pub fn error(&mut self, text: impl Into<String>) {
        self.status_message = Some(StatusMessage {
            text: text.into(),
            is_error: true,
        });
    }

    /// Clear the status message
    pub fn clear_status(&mut self) {
        self.status_message = None;
    }
}
