//! Command executor for dispatching CLI commands
//!
//! This module provides the main entry point for executing CLI commands
//! after parsing and configuration loading.

use super::handlers::{CheckCommandHandler, ErrorArgs, NotifyCommandHandler};
use super::parser::{Cli, Commands};
use crate::config::settings::Settings;
use crate::error::PluginResult;

/// Execute a CLI command with the given settings
///
/// # Errors
/// Returns a configuration error when the `[slack]` settings are invalid.
/// Delivery failures are logged, not returned.
pub async fn execute_command(cli: &Cli, settings: Settings) -> PluginResult<()> {
    tracing::info!(
        app_name = %settings.application.name,
        app_version = %settings.application.version,
        command = command_name(&cli.command),
        "Executing command"
    );

    match &cli.command {
        Commands::Check => CheckCommandHandler::new(settings).execute(),
        Commands::Message { text } => {
            NotifyCommandHandler::new(settings.slack)?
                .send_message(text)
                .await;
            Ok(())
        }
        Commands::Error {
            text,
            user_id,
            locale,
            platform,
            intent,
            state,
            timestamp,
        } => {
            let args = ErrorArgs {
                user_id: user_id.clone(),
                locale: locale.clone(),
                platform: platform.clone(),
                intent: intent.clone(),
                state: state.clone(),
                timestamp: timestamp.clone(),
            };
            NotifyCommandHandler::new(settings.slack)?
                .send_error(text, &args)
                .await;
            Ok(())
        }
    }
}

fn command_name(command: &Commands) -> &'static str {
    match command {
        Commands::Check => "check",
        Commands::Message { .. } => "message",
        Commands::Error { .. } => "error",
    }
}
