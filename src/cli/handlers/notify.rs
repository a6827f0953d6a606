//! Notify command handler
//!
//! Sends `message` and `error` test notifications through the plugin. The
//! process exits right after, so delivery is always awaited.

use tracing::info;

use crate::config::{DeliveryMode, PluginConfig};
use crate::error::PluginResult;
use crate::host::{HostEnvironment, PlatformKind, RequestSnapshot};
use crate::notifications::SlackErrorPlugin;

/// Request details for the `error` command
#[derive(Debug, Clone, Default)]
pub struct ErrorArgs {
    pub user_id: Option<String>,
    pub locale: Option<String>,
    pub platform: String,
    pub intent: Option<String>,
    pub state: Option<String>,
    pub timestamp: Option<String>,
}

impl ErrorArgs {
    /// Static request context the error is reported for
    pub fn to_snapshot(&self) -> RequestSnapshot {
        RequestSnapshot {
            user_id: self.user_id.clone(),
            timestamp: self.timestamp.clone(),
            locale: self.locale.clone(),
            intent_name: self.intent.clone(),
            state: self.state.clone(),
            platform: PlatformKind::from(self.platform.as_str()),
            raw_payload: None,
        }
    }
}

/// Handler for the message and error commands
pub struct NotifyCommandHandler {
    plugin: SlackErrorPlugin,
}

impl NotifyCommandHandler {
    /// Create a handler from the `[slack]` settings
    ///
    /// # Errors
    /// Returns a configuration error if the webhook settings are invalid
    pub fn new(config: PluginConfig) -> PluginResult<Self> {
        let plugin = SlackErrorPlugin::new(config.with_delivery(DeliveryMode::Await))?;
        Ok(Self { plugin })
    }

    /// Send a plain text message
    pub async fn send_message(&self, text: &str) {
        info!("Sending text message to Slack");
        self.plugin.log_message(text).await;
    }

    /// Send an error report for a static request context
    pub async fn send_error(&self, text: &str, args: &ErrorArgs) {
        info!(platform = %args.platform, "Sending error report to Slack");
        let context = args.to_snapshot();
        self.plugin
            .log_error(&context, &HostEnvironment::Generic, text)
            .await;
    }

    pub fn plugin(&self) -> &SlackErrorPlugin {
        &self.plugin
    }
}
