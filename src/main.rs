use clap::Parser;
use slack_error_notifier::cli::{Cli, execute_command, init_logger_from_settings, load_settings};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let settings = load_settings(&cli)?;
    init_logger_from_settings(&cli, &settings)?;

    execute_command(&cli, settings).await?;

    Ok(())
}
