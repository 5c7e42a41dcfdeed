//! ochat - Terminal chat client for think-capable LLM endpoints
//!
//! A small TUI that posts messages to a chat endpoint and renders the
//! replies, splitting out `<think>…</think>` reasoning into collapsible
//! sections and applying a fixed set of markdown transforms (bold,
//! fenced code blocks, line breaks).
//!
//! # Architecture
//!
//! - `config` - TOML configuration with env expansion
//! - `core` - Error types
//! - `events` - Event bus (crossbeam channels)
//! - `llm` - Chat backend trait and HTTP implementation
//! - `panels` - Chat panel (transcript + input)
//! - `state` - Application state and input modes
//! - `transcript` - Message store, the source of truth for the history
//! - `ui` - Rendering, response parsing, markdown, model selector

pub mod config;
pub mod core;
pub mod events;
pub mod llm;
pub mod panels;
pub mod state;
pub mod transcript;
pub mod ui;

pub use core::{ChatError, Result};
pub use events::{Event, EventBus};
pub use panels::ChatPanel;
pub use state::AppState;
