//! Errors raised while loading or validating settings

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    /// A required TOML file does not exist
    #[error("Configuration file not found: {0}")]
    FileNotFound(String),

    /// Sources merged but did not deserialize into `Settings`
    #[error("Failed to parse configuration: {0}")]
    ParseError(String),

    /// A value is present but not acceptable
    #[error("Validation error: {field} - {message}")]
    ValidationError {
        /// Dotted key of the offending value, e.g. `slack.webhook_url`
        field: String,
        message: String,
    },

    /// `SLACK_ERROR_APP_ENV` holds an unknown environment
    #[error("Environment variable error: {0}")]
    EnvVarError(String),

    /// Both the config directory and the single-file override are set
    #[error("Mutual exclusivity error: {0}")]
    MutualExclusivityError(String),

    #[error("Configuration error: {0}")]
    Other(#[from] config::ConfigError),
}

impl ConfigError {
    pub fn validation<S: Into<String>>(field: S, message: S) -> Self {
        ConfigError::ValidationError {
            field: field.into(),
            message: message.into(),
        }
    }

    pub fn file_not_found<S: Into<String>>(path: S) -> Self {
        ConfigError::FileNotFound(path.into())
    }

    pub fn mutual_exclusivity<S: Into<String>>(message: S) -> Self {
        ConfigError::MutualExclusivityError(message.into())
    }
}
