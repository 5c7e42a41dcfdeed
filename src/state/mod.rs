//! Application state module

mod app;
mod input_mode;

pub use app::{AppState, StatusMessage};
pub use input_mode::InputMode;
