//! Configuration module

mod loader;
mod types;

pub use loader::{load_config, sample_config, ConfigError};
pub use types::{ChatEndpointConfig, OchatConfig, UiConfig};
