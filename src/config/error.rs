//! Configuration error types

use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    /// A required configuration file does not exist
    #[error("Configuration file not found: {}", .0.display())]
    FileNotFound(PathBuf),

    /// The merged sources could not be deserialized into settings
    #[error("Failed to parse configuration: {0}")]
    Parse(String),

    /// A loaded value violates a settings constraint
    #[error("Invalid configuration for {field}: {message}")]
    Invalid { field: String, message: String },

    /// `SENDER_APP_ENV` holds an unknown environment name
    #[error("Invalid environment: {0}")]
    Environment(String),

    /// Both a config directory and a single config file were requested
    #[error("SENDER_CONFIG_DIR and SENDER_CONFIG_FILE cannot both be set")]
    ConflictingSources,

    #[error("Configuration source error: {0}")]
    Source(#[from] config::ConfigError),
}

impl ConfigError {
    pub fn invalid(field: impl Into<String>, message: impl Into<String>) -> Self {
        ConfigError::Invalid {
            field: field.into(),
            message: message.into(),
        }
    }
}
