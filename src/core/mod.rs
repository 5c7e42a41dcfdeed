//! Core infrastructure module
//!
//! Foundational types used throughout the application: the unified error
//! types (`ChatError`, `LlmError`) and the crate-wide `Result`.

mod error;

pub use error::{ChatError, LlmError, Result};
