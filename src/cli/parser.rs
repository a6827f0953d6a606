//! CLI argument parsing with clap

use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

use crate::build;

/// Send Slack error notifications for voice applications
#[derive(Parser, Debug)]
#[command(name = "slack-error-notifier")]
#[command(about = "Send Slack error notifications for voice applications")]
#[command(long_about = "
slack-error-notifier posts structured error reports for voice applications to
a Slack incoming webhook. The library is installed into the voice app as a
plugin; this binary checks a configuration and sends test notifications.

EXAMPLES:
    # Validate configuration without sending anything
    slack-error-notifier check

    # Send a plain text message to the configured channel
    slack-error-notifier message \"Deployment finished\"

    # Send an error report as the plugin would
    slack-error-notifier error \"Payment service unreachable\" --user-id test-user --locale en-US

    # Use a specific configuration file
    slack-error-notifier --config /etc/slack-error/production.toml check
")]
#[command(version = build::CLAP_LONG_VERSION)]
pub struct Cli {
    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Commands,

    /// Configuration file path
    ///
    /// Load settings from this TOML file only, instead of the layered
    /// `config/` directory. Environment variables still override it.
    #[arg(short, long, value_name = "FILE", value_parser = super::validation::validate_config_file_path)]
    pub config: Option<PathBuf>,

    /// Override environment detection
    ///
    /// Selects which `{environment}.toml` layer is loaded.
    #[arg(short, long, value_enum)]
    pub env: Option<Environment>,

    /// Enable debug logging
    #[arg(short, long)]
    pub verbose: bool,

    /// Only log errors
    #[arg(short, long, conflicts_with = "verbose")]
    pub quiet: bool,
}

/// Available subcommands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Validate configuration and print a summary
    Check,

    /// Send a plain text message
    Message {
        /// Message text
        #[arg(value_parser = super::validation::validate_text)]
        text: String,
    },

    /// Send an error report with request details
    Error {
        /// Error description shown in the `Error` field
        #[arg(value_parser = super::validation::validate_text)]
        text: String,

        /// Value of the `UserID` field
        #[arg(long)]
        user_id: Option<String>,

        /// Value of the `Locale` field
        #[arg(long)]
        locale: Option<String>,

        /// Value of the `Platform` field
        #[arg(long, default_value = "AlexaSkill")]
        platform: String,

        /// Value of the `Intent` field
        #[arg(long)]
        intent: Option<String>,

        /// Value of the `State` field
        #[arg(long)]
        state: Option<String>,

        /// Value of the `Timestamp` field
        #[arg(long)]
        timestamp: Option<String>,
    },
}

/// Environment options
#[derive(ValueEnum, Clone, Debug)]
pub enum Environment {
    #[value(name = "development", alias = "dev")]
    Development,
    #[value(name = "test")]
    Test,
    #[value(name = "staging", alias = "stage")]
    Staging,
    #[value(name = "production", alias = "prod")]
    Production,
}

impl From<Environment> for crate::config::Environment {
    fn from(env: Environment) -> Self {
        match env {
            Environment::Development => crate::config::Environment::Development,
            Environment::Test => crate::config::Environment::Test,
            Environment::Staging => crate::config::Environment::Staging,
            Environment::Production => crate::config::Environment::Production,
        }
    }
}
