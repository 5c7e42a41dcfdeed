//! Configuration types
//!
//! Defines the structure of `.ochat.toml` configuration.

use serde::{Deserialize, Serialize};

/// Root configuration structure
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct OchatConfig {
    /// Chat endpoint configuration
    #[serde(default)]
    pub chat: ChatEndpointConfig,

    /// UI configuration
    #[serde(default)]
    pub ui: UiConfig,
}

/// Chat endpoint section
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatEndpointConfig {
    /// Chat endpoint URL
    #[serde(default = "default_endpoint")]
    pub endpoint: String,

    /// CSRF token sent as `X-CSRFToken` (supports ${ENV_VAR} syntax)
    #[serde(default)]
    pub csrf_token: Option<String>,

    /// Model name reported in the UI
    #[serde(default = "default_model")]
    pub model: String,

    /// Request timeout in seconds
    #[serde(default = "default_timeout")]
    pub timeout: u64,

    /// Send the previous answer as conversation context
    #[serde(default = "default_send_context")]
    pub send_context: bool,

    /// Models offered by the selector
    #[serde(default = "default_models")]
    pub models: Vec<String>,
}

fn default_endpoint() -> String {
    "http://localhost:8000/chat/".to_string()
}

fn default_model() -> String {
    "deepseek-r1:8b".to_string()
}

fn default_timeout() -> u64 {
    120
}

fn default_send_context() -> bool {
    true
}

fn default_models() -> Vec<String> {
    vec![
        "deepseek-r1:8b".to_string(),
        "gemma3:4b".to_string(),
        "llama3.1:8b".to_string(),
    ]
}

impl Default for ChatEndpointConfig {
    fn default() -> Self {
        Self {
            endpoint: default_endpoint(),
            csrf_token: None,
            model: default_model(),
            timeout: default_timeout(),
            send_context: default_send_context(),
            models: default_models(),
        }
    }
}

/// UI section
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UiConfig {
    /// Expand thinking sections as responses arrive instead of collapsing them
    #[serde(default)]
    pub expand_thinking: bool,
}
