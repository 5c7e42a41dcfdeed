//! Panel module
//!
//! The chat panel owns the transcript, the input buffer, and the send path.

mod chat;

pub use chat::ChatPanel;
