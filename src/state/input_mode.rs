//! Input mode state machine

/// Where key events are routed
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InputMode {
    /// Keys go to the chat panel
    Normal,

    /// A modal owns the keyboard
    Modal { name: String },
}

impl InputMode {
    /// Return to normal mode
    pub fn to_normal(&mut self) {
        *self = InputMode::Normal;
    }

    /// Open a named modal
    pub fn open_modal(&mut self, name: &str) {
        *self = InputMode::Modal {
            name: name.to_string(),
        };
    }

    /// Check if a specific modal is open
    pub fn is_modal_open(&self, modal_name: &str) -> bool {
        matches!(self, InputMode::Modal { name } if name == modal_name)
    }
}

impl Default for InputMode {
    fn default() -> Self {
        InputMode::Normal
    }
}
