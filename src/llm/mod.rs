//! Chat backend integration
//!
//! Wire types for the chat endpoint and the transport trait the chat panel
//! talks through.

mod http;

pub use http::HttpBackend;

use crate::events::Event;
use crossbeam_channel::Sender;
use serde::Deserialize;

/// Author of a transcript entry
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Role {
    User,
    Assistant,
    /// Inline status or error text shown in the transcript
    Notice,
}

impl Role {
    pub fn as_str(&self) -> &str {
        match self {
            Role::User => "user",
            Role::Assistant => "assistant",
            Role::Notice => "notice",
        }
    }
}

/// Payload of the `response` envelope returned by the chat endpoint
#[derive(Debug, Clone, Deserialize)]
pub struct ModelResponse {
    pub model: String,

    /// Raw model output, possibly containing a `<think>...</think>` section
    pub message: String,

    /// The server has emitted both spellings across versions
    #[serde(default, alias = "tokens_used")]
    pub token_used: u64,
}

/// Transport for one chat round-trip
///
/// Implementations deliver the completion asynchronously on `event_tx` as
/// `Event::ChatResponse` or `Event::ChatError`, tagged with `generation` so
/// the panel can discard completions from superseded requests.
pub trait ChatBackend: Send + Sync {
    /// Submit `user_input` (and optional prior-exchange context) to the endpoint.
    fn send(
        &self,
        user_input: &str,
        context: Option<&str>,
        generation: u64,
        event_tx: Sender<Event>,
    );

    /// Display name of the model expected to answer
    fn model(&self) -> String;
}

/// Wrapper to make Box<dyn ChatBackend> cloneable via Arc
pub type SharedBackend = std::sync::Arc<dyn ChatBackend>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_role_as_str() {
        assert_eq!(Role::User.as_str(), "user");
        assert_eq!(Role::Assistant.as_str(), "assistant");
        assert_eq!(Role::Notice.as_str(), "notice");
    }

    #[test]
    fn test_model_response_deserialize() {
        let json = r#"{"model":"deepseek-r1:8b","message":"hi","token_used":42}"#;
        let response: ModelResponse = serde_json::from_str(json).unwrap();
        assert_eq!(response.model, "deepseek-r1:8b");
        assert_eq!(response.message, "hi");
        assert_eq!(response.token_used, 42);
    }

    #[test]
    fn test_model_response_tokens_used_alias() {
        // Older server builds spell the field "tokens_used"
        let json = r#"{"model":"m","message":"x","tokens_used":7}"#;
        let response: ModelResponse = serde_json::from_str(json).unwrap();
        assert_eq!(response.token_used, 7);
    }

    #[test]
    fn test_model_response_missing_tokens_defaults_to_zero() {
        let json = r#"{"model":"m","message":"x"}"#;
        let response: ModelResponse = serde_json::from_str(json).unwrap();
        assert_eq!(response.token_used, 0);
    }
}
