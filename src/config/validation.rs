//! Configuration validation logic
//!
//! This module provides validation methods for all configuration structures
//! to ensure configuration values are within acceptable ranges and formats.

use reqwest::Url;
use tracing::Level;

use crate::config::error::ConfigError;
use crate::config::settings::{FileSettings, LoggerSettings, PluginConfig, Settings};

/// Valid log levels
const VALID_LOG_LEVELS: &[&str] = &["trace", "debug", "info", "warn", "error"];

impl PluginConfig {
    /// Validate webhook configuration
    ///
    /// # Validation Rules
    /// - Webhook URL must not be empty
    /// - Webhook URL must parse and use http or https
    /// - Timeout must be greater than 0
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.webhook_url.trim().is_empty() {
            return Err(ConfigError::validation(
                "slack.webhook_url",
                "Webhook URL is required. Please specify the incoming webhook URL of your channel.",
            ));
        }

        let url = Url::parse(&self.webhook_url).map_err(|e| ConfigError::ValidationError {
            field: "slack.webhook_url".to_string(),
            message: format!("Invalid URL format: {}", e),
        })?;

        if url.scheme() != "https" && url.scheme() != "http" {
            return Err(ConfigError::validation(
                "slack.webhook_url",
                "URL must use http or https protocol.",
            ));
        }

        if self.timeout_seconds == 0 {
            return Err(ConfigError::validation(
                "slack.timeout_seconds",
                "Timeout must be greater than 0 seconds.",
            ));
        }

        Ok(())
    }
}

impl FileSettings {
    /// Validate file settings
    fn validate(&self) -> Result<(), ConfigError> {
        // If file logging is enabled, path must not be empty
        if self.enabled && self.path.trim().is_empty() {
            return Err(ConfigError::validation(
                "logger.file.path",
                "File path is required when file logging is enabled.",
            ));
        }

        self.parse_format()?;

        Ok(())
    }
}

impl LoggerSettings {
    /// Validate logger settings
    ///
    /// # Validation Rules
    /// - Level must be one of: trace, debug, info, warn, error
    /// - File path must not be empty when file logging is enabled
    /// - File format must be one of: full, compact, json
    /// - At least one output must be enabled
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.parse_level()?;

        self.file.validate()?;

        if !self.console.enabled && !self.file.enabled {
            return Err(ConfigError::validation(
                "logger",
                "At least one output (console or file) must be enabled.",
            ));
        }

        Ok(())
    }

    /// Parse the level string into a `tracing::Level`
    pub(crate) fn parse_level(&self) -> Result<Level, ConfigError> {
        match self.level.to_lowercase().as_str() {
            "trace" => Ok(Level::TRACE),
            "debug" => Ok(Level::DEBUG),
            "info" => Ok(Level::INFO),
            "warn" => Ok(Level::WARN),
            "error" => Ok(Level::ERROR),
            _ => Err(ConfigError::ValidationError {
                field: "logger.level".to_string(),
                message: format!(
                    "Invalid log level '{}'. Valid levels are: {}",
                    self.level,
                    VALID_LOG_LEVELS.join(", ")
                ),
            }),
        }
    }
}

impl Settings {
    /// Validate the complete settings tree
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.slack.validate()?;
        self.logger.validate()?;
        Ok(())
    }
}
