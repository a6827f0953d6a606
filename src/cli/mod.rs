//! CLI module for slack-error-notifier
//!
//! An operational tool for checking a webhook setup outside the voice app:
//! - Argument parsing with clap
//! - Settings loading (layered files or a single `--config` file)
//! - Command handlers for `check`, `message` and `error`

pub mod executor;
pub mod handlers;
pub mod parser;
pub mod validation;

// Re-export public types for convenience
pub use executor::execute_command;
pub use parser::{Cli, Commands, Environment};

use crate::config::{ConfigLoader, Settings};
use crate::logger::init_logger;
use tracing::Level;

/// Load settings for the parsed CLI arguments
///
/// `--config` selects single-file mode; otherwise the layered loader reads
/// `SLACK_ERROR_CONFIG_DIR` (or `./config`). `--env` overrides
/// `SLACK_ERROR_APP_ENV`.
///
/// # Errors
/// Returns error if loading or validation fails
pub fn load_settings(cli: &Cli) -> anyhow::Result<Settings> {
    let loader = match cli.config {
        Some(ref path) => ConfigLoader::from_file(path),
        None => ConfigLoader::new()?,
    };

    let loader = match cli.env {
        Some(ref env) => loader.with_environment(env.clone().into()),
        None => loader,
    };

    Ok(loader.load()?)
}

/// Initialize logger from settings, applying `--verbose` / `--quiet`
///
/// # Errors
/// Returns error if logger initialization fails
pub fn init_logger_from_settings(cli: &Cli, settings: &Settings) -> anyhow::Result<()> {
    let logger_config = settings.logger.clone().into_logger_config()?;

    let logger_config = if cli.verbose {
        logger_config.with_level(Level::DEBUG)
    } else if cli.quiet {
        logger_config.with_level(Level::ERROR)
    } else {
        logger_config
    };

    init_logger(logger_config)
}
