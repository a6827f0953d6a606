//! Runtime logger configuration.
//!
//! These types are already checked: the level is a `tracing::Level` and the
//! format an enum. String settings are validated once, in
//! `config::LoggerSettings`, before they are converted into a `LoggerConfig`.

use std::path::PathBuf;
use std::str::FromStr;

use tracing::Level;

use super::error::LoggerError;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoggerConfig {
    pub level: Level,
    pub console: ConsoleConfig,
    pub file: FileConfig,
}

impl LoggerConfig {
    pub fn new(level: Level, console: ConsoleConfig, file: FileConfig) -> Self {
        Self {
            level,
            console,
            file,
        }
    }

    /// Same configuration with a different level, e.g. from `--verbose`
    pub fn with_level(mut self, level: Level) -> Self {
        self.level = level;
        self
    }

    /// Directive for the `EnvFilter`, e.g. `"warn"`
    pub(crate) fn filter_directive(&self) -> String {
        self.level.as_str().to_lowercase()
    }
}

impl Default for LoggerConfig {
    fn default() -> Self {
        Self::new(Level::INFO, ConsoleConfig::default(), FileConfig::default())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConsoleConfig {
    pub enabled: bool,
    /// Only honoured when stdout is a terminal
    pub colored: bool,
}

impl ConsoleConfig {
    pub fn new(enabled: bool, colored: bool) -> Self {
        Self { enabled, colored }
    }
}

impl Default for ConsoleConfig {
    fn default() -> Self {
        Self::new(true, true)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileConfig {
    pub enabled: bool,
    pub path: PathBuf,
    pub append: bool,
    pub format: LogFormat,
}

impl FileConfig {
    pub fn new(enabled: bool, path: PathBuf, append: bool, format: LogFormat) -> Self {
        Self {
            enabled,
            path,
            append,
            format,
        }
    }
}

impl Default for FileConfig {
    fn default() -> Self {
        Self::new(
            false,
            PathBuf::from("logs/slack-error-notifier.log"),
            true,
            LogFormat::default(),
        )
    }
}

/// Output format of the file layer
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum LogFormat {
    Full,
    Compact,
    #[default]
    Json,
}

impl LogFormat {
    pub fn as_str(&self) -> &'static str {
        match self {
            LogFormat::Full => "full",
            LogFormat::Compact => "compact",
            LogFormat::Json => "json",
        }
    }
}

impl FromStr for LogFormat {
    type Err = LoggerError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "full" => Ok(LogFormat::Full),
            "compact" => Ok(LogFormat::Compact),
            "json" => Ok(LogFormat::Json),
            _ => Err(LoggerError::config(format!(
                "Invalid log format '{}'. Valid formats are: full, compact, json",
                s
            ))),
        }
    }
}
