//! Configuration settings structures for slack-error-notifier
//!
//! This module defines all configuration structures that can be loaded from
//! TOML files and environment variables, or built in code by a host that
//! registers the plugin programmatically.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::config::error::ConfigError;
use crate::logger::{ConsoleConfig, FileConfig, LogFormat, LoggerConfig};

/// Footer icon used when none is configured
pub const DEFAULT_FOOTER_ICON: &str =
    "https://raw.githubusercontent.com/jovotech/jovo-framework-nodejs/master/docs/img/jovo-logo-16x16.png";

/// Default attachment title, spelled as existing channels already show it
pub const DEFAULT_TITLE: &str = "An error has occured!";

pub const DEFAULT_FOOTER: &str = "Jovo Plugin - Slack Error";

// ============================================================================
// Default value functions
// ============================================================================

fn default_app_name() -> String {
    "slack-error-notifier".to_string()
}

fn default_app_version() -> String {
    crate::pkg_version().to_string()
}

fn default_fallback() -> String {
    "Error Message".to_string()
}

fn default_color() -> String {
    "#ff0000".to_string()
}

fn default_title() -> String {
    DEFAULT_TITLE.to_string()
}

fn default_footer() -> String {
    DEFAULT_FOOTER.to_string()
}

fn default_footer_icon() -> String {
    DEFAULT_FOOTER_ICON.to_string()
}

fn default_timeout_seconds() -> u64 {
    10
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_true() -> bool {
    true
}

fn default_log_path() -> String {
    "logs/slack-error-notifier.log".to_string()
}

fn default_log_format() -> String {
    LogFormat::default().as_str().to_string()
}

// ============================================================================
// Application Configuration
// ============================================================================

/// Application basic information configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApplicationConfig {
    /// Application name
    #[serde(default = "default_app_name")]
    pub name: String,

    /// Application version
    #[serde(default = "default_app_version")]
    pub version: String,
}

impl Default for ApplicationConfig {
    fn default() -> Self {
        Self {
            name: default_app_name(),
            version: default_app_version(),
        }
    }
}

// ============================================================================
// Plugin Configuration
// ============================================================================

/// How a hook hands the message to the webhook
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum DeliveryMode {
    /// Spawn the POST on the current runtime and return immediately
    #[default]
    Background,
    /// Await the POST before returning from the hook
    Await,
}

/// Webhook target and message cosmetics.
///
/// Only `webhook_url` is required; every cosmetic falls back to a fixed
/// default or an empty string.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PluginConfig {
    /// Incoming webhook URL
    #[serde(default)]
    pub webhook_url: String,

    /// Channel override; the webhook's default channel is used when unset
    #[serde(default)]
    pub channel: Option<String>,

    #[serde(default = "default_fallback")]
    pub fallback: String,

    /// Accent color of the attachment bar
    #[serde(default = "default_color")]
    pub color: String,

    #[serde(default)]
    pub pretext: String,

    #[serde(default)]
    pub author_name: String,

    #[serde(default)]
    pub author_link: String,

    #[serde(default)]
    pub author_icon: String,

    #[serde(default = "default_title")]
    pub title: String,

    #[serde(default)]
    pub title_link: String,

    #[serde(default)]
    pub text: String,

    #[serde(default)]
    pub image_url: String,

    #[serde(default)]
    pub thumb_url: String,

    #[serde(default = "default_footer")]
    pub footer: String,

    #[serde(default = "default_footer_icon")]
    pub footer_icon: String,

    /// Background or awaited delivery
    #[serde(default)]
    pub delivery: DeliveryMode,

    /// Per-request timeout for the webhook call in seconds
    #[serde(default = "default_timeout_seconds")]
    pub timeout_seconds: u64,
}

impl PluginConfig {
    /// Configuration with the given webhook URL and every other field defaulted
    pub fn new(webhook_url: impl Into<String>) -> Self {
        Self {
            webhook_url: webhook_url.into(),
            ..Self::default()
        }
    }

    pub fn with_channel(mut self, channel: impl Into<String>) -> Self {
        self.channel = Some(channel.into());
        self
    }

    pub fn with_delivery(mut self, delivery: DeliveryMode) -> Self {
        self.delivery = delivery;
        self
    }

    /// Channel override, treating an empty string as unset
    pub fn channel_override(&self) -> Option<String> {
        self.channel
            .as_deref()
            .map(str::trim)
            .filter(|c| !c.is_empty())
            .map(str::to_string)
    }
}

impl Default for PluginConfig {
    fn default() -> Self {
        Self {
            webhook_url: String::new(),
            channel: None,
            fallback: default_fallback(),
            color: default_color(),
            pretext: String::new(),
            author_name: String::new(),
            author_link: String::new(),
            author_icon: String::new(),
            title: default_title(),
            title_link: String::new(),
            text: String::new(),
            image_url: String::new(),
            thumb_url: String::new(),
            footer: default_footer(),
            footer_icon: default_footer_icon(),
            delivery: DeliveryMode::default(),
            timeout_seconds: default_timeout_seconds(),
        }
    }
}

// ============================================================================
// Logger Settings (compatible with LoggerConfig)
// ============================================================================

/// Console output settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConsoleSettings {
    /// Whether console output is enabled
    #[serde(default = "default_true")]
    pub enabled: bool,

    /// Whether to use colored output
    #[serde(default = "default_true")]
    pub colored: bool,
}

impl Default for ConsoleSettings {
    fn default() -> Self {
        Self {
            enabled: default_true(),
            colored: default_true(),
        }
    }
}

/// File output settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FileSettings {
    /// Whether file output is enabled
    #[serde(default)]
    pub enabled: bool,

    /// Path to the log file
    #[serde(default = "default_log_path")]
    pub path: String,

    /// Whether to append to existing file
    #[serde(default = "default_true")]
    pub append: bool,

    /// Log format: "full", "compact", or "json"
    #[serde(default = "default_log_format")]
    pub format: String,
}

impl Default for FileSettings {
    fn default() -> Self {
        Self {
            enabled: false,
            path: default_log_path(),
            append: default_true(),
            format: default_log_format(),
        }
    }
}

/// Logger configuration settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoggerSettings {
    /// Log level: "trace", "debug", "info", "warn", "error"
    #[serde(default = "default_log_level")]
    pub level: String,

    /// Console output settings
    #[serde(default)]
    pub console: ConsoleSettings,

    /// File output settings
    #[serde(default)]
    pub file: FileSettings,
}

impl Default for LoggerSettings {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            console: ConsoleSettings::default(),
            file: FileSettings::default(),
        }
    }
}

impl LoggerSettings {
    /// Validate and convert into the runtime `LoggerConfig`
    ///
    /// All checks happen here; the logger module trusts what it receives.
    pub fn into_logger_config(self) -> Result<LoggerConfig, ConfigError> {
        self.validate()?;
        let level = self.parse_level()?;
        let console_config = self.console.into_console_config();
        let file_config = self.file.into_file_config()?;

        Ok(LoggerConfig::new(level, console_config, file_config))
    }
}

impl ConsoleSettings {
    /// Convert ConsoleSettings to ConsoleConfig
    pub fn into_console_config(self) -> ConsoleConfig {
        ConsoleConfig::new(self.enabled, self.colored)
    }
}

impl FileSettings {
    /// Convert FileSettings to FileConfig
    pub fn into_file_config(self) -> Result<FileConfig, ConfigError> {
        let format = self.parse_format()?;

        Ok(FileConfig::new(
            self.enabled,
            PathBuf::from(self.path),
            self.append,
            format,
        ))
    }

    /// Parse the format string into LogFormat enum
    pub(crate) fn parse_format(&self) -> Result<LogFormat, ConfigError> {
        self.format
            .parse::<LogFormat>()
            .map_err(|e| ConfigError::ValidationError {
                field: "logger.file.format".to_string(),
                message: e.to_string(),
            })
    }
}

// ============================================================================
// Root Settings
// ============================================================================

/// Root configuration structure
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct Settings {
    /// Application information
    #[serde(default)]
    pub application: ApplicationConfig,

    /// Webhook and message configuration
    #[serde(default)]
    pub slack: PluginConfig,

    /// Logger configuration
    #[serde(default)]
    pub logger: LoggerSettings,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plugin_config_defaults() {
        let config = PluginConfig::new("https://hooks.slack.com/services/T/B/X");
        assert_eq!(config.webhook_url, "https://hooks.slack.com/services/T/B/X");
        assert_eq!(config.channel, None);
        assert_eq!(config.fallback, "Error Message");
        assert_eq!(config.color, "#ff0000");
        assert_eq!(config.title, DEFAULT_TITLE);
        assert_eq!(config.footer, DEFAULT_FOOTER);
        assert_eq!(config.footer_icon, DEFAULT_FOOTER_ICON);
        assert_eq!(config.pretext, "");
        assert_eq!(config.thumb_url, "");
        assert_eq!(config.delivery, DeliveryMode::Background);
        assert_eq!(config.timeout_seconds, 10);
    }

    #[test]
    fn test_plugin_config_deserialize_minimal() {
        let config: PluginConfig =
            toml::from_str(r#"webhook_url = "https://hooks.slack.com/services/T/B/X""#).unwrap();
        assert_eq!(config, PluginConfig::new("https://hooks.slack.com/services/T/B/X"));
    }

    #[test]
    fn test_plugin_config_deserialize_overrides() {
        let config: PluginConfig = toml::from_str(
            r##"
            webhook_url = "https://hooks.slack.com/services/T/B/X"
            channel = "#alerts"
            color = "#00ff00"
            delivery = "await"
            "##,
        )
        .unwrap();
        assert_eq!(config.channel.as_deref(), Some("#alerts"));
        assert_eq!(config.color, "#00ff00");
        assert_eq!(config.delivery, DeliveryMode::Await);
        assert_eq!(config.title, DEFAULT_TITLE);
    }

    #[test]
    fn test_channel_override_ignores_blank() {
        assert_eq!(PluginConfig::new("u").channel_override(), None);
        assert_eq!(PluginConfig::new("u").with_channel("  ").channel_override(), None);
        assert_eq!(
            PluginConfig::new("u").with_channel("#ops").channel_override(),
            Some("#ops".to_string())
        );
    }

    #[test]
    fn test_logger_settings_into_config() {
        let settings = LoggerSettings {
            level: "debug".to_string(),
            console: ConsoleSettings {
                enabled: true,
                colored: false,
            },
            file: FileSettings {
                format: "compact".to_string(),
                ..Default::default()
            },
        };
        let config = settings.into_logger_config().unwrap();
        assert_eq!(config.level, tracing::Level::DEBUG);
        assert!(!config.console.colored);
        assert_eq!(config.file.format, LogFormat::Compact);
    }

    #[test]
    fn test_logger_settings_into_config_validates() {
        let settings = LoggerSettings {
            level: "verbose".to_string(),
            ..Default::default()
        };
        assert!(settings.into_logger_config().is_err());

        let settings = LoggerSettings {
            console: ConsoleSettings {
                enabled: false,
                colored: false,
            },
            ..Default::default()
        };
        assert!(settings.into_logger_config().is_err());
    }

    #[test]
    fn test_file_format_default_matches_logger_default() {
        let file = FileSettings::default().into_file_config().unwrap();
        assert_eq!(file.format, LogFormat::default());
        assert_eq!(file.format, crate::logger::FileConfig::default().format);
    }

    #[test]
    fn test_settings_default() {
        let settings = Settings::default();
        assert_eq!(settings.application.name, "slack-error-notifier");
        assert!(settings.slack.webhook_url.is_empty());
        assert_eq!(settings.logger.level, "info");
    }
}
