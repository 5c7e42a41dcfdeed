//! Configuration loader with environment variable expansion
//!
//! Loads configuration from `.ochat.toml` in the project root or the user
//! config directory.

use super::types::OchatConfig;
use regex::Regex;
use std::path::{Path, PathBuf};

/// Configuration loading error
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    ReadError(#[from] std::io::Error),

    #[error("Failed to parse config: {0}")]
    ParseError(#[from] toml::de::Error),
}

/// Load configuration from various sources
///
/// Priority order:
/// 1. Project-level `.ochat.toml`
/// 2. User-level `~/.config/ochat/config.toml`
/// 3. Default configuration
pub fn load_config(project_dir: &Path) -> Result<OchatConfig, ConfigError> {
    // Try project-level config first
    let project_config = project_dir.join(".ochat.toml");
    if project_config.exists() {
        return load_from_file(&project_config);
    }

    // Try user-level config
    if let Some(user_config) = get_user_config_path() {
        if user_config.exists() {
            return load_from_file(&user_config);
        }
    }

    // Return default config with environment variable overrides
    Ok(apply_env_overrides(OchatConfig::default()))
}

/// Get user config directory path
fn get_user_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|d| d.join("ochat").join("config.toml"))
}

/// Load configuration from a specific file
fn load_from_file(path: &Path) -> Result<OchatConfig, ConfigError> {
    let content = std::fs::read_to_string(path)?;
    let mut config: OchatConfig = toml::from_str(&content)?;

    // Expand environment variables in the config
    expand_env_vars(&mut config);

    // Apply environment variable overrides
    config = apply_env_overrides(config);

    Ok(config)
}

/// Expand ${VAR} patterns in string values
fn expand_env_vars(config: &mut OchatConfig) {
    let env_regex = Regex::new(r"\$\{([^}]+)\}").unwrap();

    config.chat.endpoint = expand_string(&config.chat.endpoint, &env_regex);
    if let Some(ref token) = config.chat.csrf_token {
        config.chat.csrf_token = Some(expand_string(token, &env_regex));
    }
}

/// Expand environment variables in a single string
fn expand_string(s: &str, regex: &Regex) -> String {
    regex
        .replace_all(s, |caps: &regex::Captures| {
            let var_name = &caps[1];
            std::env::var(var_name).unwrap_or_else(|_| format!("${{{}}}", var_name))
        })
        .to_string()
}

/// Apply environment variable overrides for common settings
///
/// Supports direct environment variables:
/// - OCHAT_ENDPOINT -> chat.endpoint
/// - OCHAT_CSRF_TOKEN -> chat.csrf_token
/// - OCHAT_MODEL -> chat.model
fn apply_env_overrides(mut config: OchatConfig) -> OchatConfig {
    if let Ok(endpoint) = std::env::var("OCHAT_ENDPOINT") {
        if !endpoint.is_empty() {
            config.chat.endpoint = endpoint;
        }
    }

    if let Ok(token) = std::env::var("OCHAT_CSRF_TOKEN") {
        if !token.is_empty() {
            config.chat.csrf_token = Some(token);
        }
    }

    if let Ok(model) = std::env::var("OCHAT_MODEL") {
        if !model.is_empty() {
            config.chat.model = model;
        }
    }

    config
}

/// Create a sample configuration file content
pub fn sample_config() -> &'static str {
    r#"# ochat configuration
# Place this file in your project root as .ochat.toml
# or in ~/.config/ochat/config.toml for global settings

[chat]
# Chat endpoint URL
endpoint = "http://localhost:8000/chat/"

# CSRF token for the endpoint (supports ${ENV_VAR} expansion)
csrf_token = "${OCHAT_CSRF_TOKEN}"

# Model name shown in the UI
model = "deepseek-r1:8b"

# Request timeout in seconds
timeout = 120

# Send the previous answer as conversation context
send_context = true

# Models offered by the selector (Ctrl+M)
models = ["deepseek-r1:8b", "gemma3:4b", "llama3.1:8b"]

[ui]
# Expand thinking sections as responses arrive
expand_thinking = false
"#
}
