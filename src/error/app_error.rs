use thiserror::Error;

use crate::config::error::ConfigError;

/// Crate-wide error type.
///
/// None of these variants ever reach the host's own error pipeline: the
/// plugin hooks log delivery problems locally and carry on. Errors surface
/// only from construction-time validation and from the CLI.
#[derive(Error, Debug)]
pub enum PluginError {
    /// Validation error with field-specific details
    #[error("Validation failed for {field}: {reason}")]
    Validation { field: String, reason: String },

    /// Settings could not be loaded
    #[error("Configuration error: {key}")]
    Configuration {
        key: String,
        #[source]
        source: ConfigError,
    },
}

impl PluginError {
    pub fn validation(field: impl Into<String>, reason: impl Into<String>) -> Self {
        PluginError::Validation {
            field: field.into(),
            reason: reason.into(),
        }
    }
}

impl From<ConfigError> for PluginError {
    fn from(error: ConfigError) -> Self {
        match error {
            ConfigError::ValidationError { field, message } => {
                PluginError::validation(field, message)
            }
            other => PluginError::Configuration {
                key: "settings".to_string(),
                source: other,
            },
        }
    }
}

/// Type alias for Result with PluginError to simplify function signatures
pub type PluginResult<T> = Result<T, PluginError>;
