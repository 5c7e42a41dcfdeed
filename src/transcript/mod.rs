//! In-memory transcript store
//!
//! The ordered sequence of chat messages is the source of truth; rendered
//! views are derived from it on every frame. Entries are immutable once
//! appended and are not persisted across sessions.

use crate::llm::Role;
use rand::distr::Alphanumeric;
use rand::Rng;

/// Length of a fragment id in characters
const FRAGMENT_ID_LEN: usize = 8;

/// A single transcript entry
#[derive(Debug, Clone)]
pub struct ChatMessage {
    pub role: Role,

    /// Model that produced the message (empty for user/notice entries)
    pub model: String,

    /// Raw message text as received, thinking delimiters included
    pub raw_text: String,

    /// Tokens reported by the server for this response
    pub tokens_used: u64,

    /// Keys the collapsible thinking toggle for this entry
    pub fragment_id: String,
}

impl ChatMessage {
    /// Create a user entry
    pub fn user(text: impl Into<String>) -> Self {
        Self {
            role: Role::User,
            model: String::new(),
            raw_text: text.into(),
            tokens_used: 0,
            fragment_id: fragment_id(),
        }
    }

    /// Create an assistant entry from a server response
    pub fn assistant(model: impl Into<String>, text: impl Into<String>, tokens_used: u64) -> Self {
        Self {
            role: Role::Assistant,
            model: model.into(),
            raw_text: text.into(),
            tokens_used,
            fragment_id: fragment_id(),
        }
    }

    /// Create an inline notice entry
    pub fn notice(text: impl Into<String>) -> Self {
        Self {
            role: Role::Notice,
            model: String::new(),
            raw_text: text.into(),
            tokens_used: 0,
            fragment_id: fragment_id(),
        }
    }
}

/// Ordered chat history; push-only during a session
#[derive(Debug, Default)]
pub struct Transcript {
    entries: Vec<ChatMessage>,
}

impl Transcript {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append an entry
    pub fn push(&mut self, entry: ChatMessage) {
        self.entries.push(entry);
    }

    /// All entries in order
    pub fn entries(&self) -> &[ChatMessage] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Most recent assistant entry, if any
    pub fn last_answer(&self) -> Option<&ChatMessage> {
        self.entries
            .iter()
            .rev()
            .find(|m| m.role == Role::Assistant)
    }
}

/// Generate a fresh fragment id: 8 random alphanumeric characters scoping
/// one response's collapsible toggle so entries never collide.
pub fn fragment_id() -> String {
    rand::rng()
        .sample_iter(Alphanumeric)
        .take(FRAGMENT_ID_LEN)
        .map(char::from)
        .collect()
}
