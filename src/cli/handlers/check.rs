//! Check command handler
//!
//! Validates the loaded configuration and prints what a notification would
//! be sent with. Nothing is posted to the webhook.

use crate::config::settings::Settings;
use crate::error::PluginResult;

/// Handler for the check command
pub struct CheckCommandHandler {
    config: Settings,
}

impl CheckCommandHandler {
    /// Create a new check command handler
    pub fn new(config: Settings) -> Self {
        Self { config }
    }

    /// Validate configuration and print a summary
    ///
    /// # Errors
    /// Returns a validation error for an invalid webhook URL, timeout or
    /// logger configuration
    pub fn execute(&self) -> PluginResult<()> {
        self.config.validate()?;

        for line in self.summary() {
            println!("✓ {}", line);
        }
        println!("Configuration is valid - no message was sent");
        Ok(())
    }

    /// Summary lines printed after a successful check
    pub fn summary(&self) -> Vec<String> {
        let slack = &self.config.slack;
        vec![
            format!("Webhook host: {}", webhook_host(&slack.webhook_url)),
            format!(
                "Channel: {}",
                slack
                    .channel_override()
                    .unwrap_or_else(|| "(webhook default)".to_string())
            ),
            format!("Delivery: {:?}", slack.delivery),
            format!("Timeout: {}s", slack.timeout_seconds),
            format!("Log level: {}", self.config.logger.level),
        ]
    }

    /// Get the configuration
    pub fn config(&self) -> &Settings {
        &self.config
    }
}

// The path of an incoming webhook URL is its secret; only the host is printed.
fn webhook_host(url: &str) -> String {
    reqwest::Url::parse(url)
        .ok()
        .and_then(|u| u.host_str().map(str::to_string))
        .unwrap_or_else(|| "(invalid)".to_string())
}
