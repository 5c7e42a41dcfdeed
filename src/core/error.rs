//! Error types for ochat using thiserror
//!
//! All errors are typed - no .unwrap() or .expect() in production code.

use thiserror::Error;

/// Top-level application error
#[derive(Error, Debug)]
pub enum ChatError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Chat backend error: {0}")]
    Llm(#[from] LlmError),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Channel send error")]
    ChannelSend,
}

/// Chat backend errors
#[derive(Error, Debug, Clone)]
pub enum LlmError {
    #[error("Connection error: {0}")]
    Connection(String),

    #[error("API error ({status}): {message}")]
    Api { status: u16, message: String },

    #[error("Parse error: {0}")]
    Parse(String),

    #[error("Malformed response: {0}")]
    InvalidResponse(String),
}

/// Convenience Result type for ochat
pub type Result<T> = std::result::Result<T, ChatError>;

#[cfg(test)]
mod tests {
    use super::*;
    use std::error::Error;

    #[test]
    fn test_chat_error_io_conversion() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "file not found");
        let err: ChatError = io_err.into();
        assert!(matches!(err, ChatError::Io(_)));
        assert!(err.to_string().contains("IO error"));
    }

    #[test]
    fn test_chat_error_llm_conversion() {
        let llm_err = LlmError::Connection("refused".to_string());
        let err: ChatError = llm_err.into();
        assert!(matches!(err, ChatError::Llm(_)));
        assert!(err.to_string().contains("Chat backend error"));
    }

    #[test]
    fn test_chat_error_config_display() {
        let err = ChatError::Config("invalid endpoint".to_string());
        assert_eq!(err.to_string(), "Configuration error: invalid endpoint");
    }

    #[test]
    fn test_llm_error_variants() {
        let connection = LlmError::Connection("connection refused".to_string());
        assert_eq!(connection.to_string(), "Connection error: connection refused");

        let api = LlmError::Api {
            status: 500,
            message: "Error communicating with model".to_string(),
        };
        assert_eq!(api.to_string(), "API error (500): Error communicating with model");

        let parse = LlmError::Parse("invalid json".to_string());
        assert_eq!(parse.to_string(), "Parse error: invalid json");

        let invalid = LlmError::InvalidResponse("missing response field".to_string());
        assert_eq!(invalid.to_string(), "Malformed response: missing response field");
    }

    #[test]
    fn test_error_source_chain() {
        let llm_err = LlmError::Parse("bad payload".to_string());
        let err = ChatError::Llm(llm_err);
        assert!(err.source().is_some());
    }
}
