//! The Slack error plugin: hook handlers wiring formatter and dispatcher.

use super::cloudwatch::enrich_with_execution_log_link;
use super::dispatcher::WebhookDispatcher;
use super::formatter::{
    build_error_log_message, build_message, build_session_ended_message, build_text_message,
};
use super::message::NotificationMessage;
use crate::config::PluginConfig;
use crate::error::PluginResult;
use crate::host::{
    ErrorReport, HandleRequest, HostEnvironment, Middleware, PlatformKind, Plugin,
    RawRequestEnvelope, RequestContext,
};
use async_trait::async_trait;
use std::sync::Arc;

/// Name the plugin registers under
pub const PLUGIN_NAME: &str = "SlackErrorPlugin";

const SUBSCRIBED_MIDDLEWARES: &[Middleware] = &[Middleware::Fail, Middleware::PlatformNlu];

/// Posts request failures and abnormal session ends to a Slack webhook.
///
/// Holds only immutable configuration and can be shared behind an `Arc`
/// across concurrent requests. None of its hooks ever fail: problems are
/// logged and the host carries on.
///
/// # Example
/// ```ignore
/// let plugin = SlackErrorPlugin::new(PluginConfig::new(webhook_url))?;
/// host.install(Arc::new(plugin));
/// ```
#[derive(Debug, Clone)]
pub struct SlackErrorPlugin {
    config: Arc<PluginConfig>,
    dispatcher: WebhookDispatcher,
}

impl SlackErrorPlugin {
    /// Creates the plugin after validating the configuration
    ///
    /// # Errors
    /// Returns a configuration error when the webhook URL is missing or invalid.
    pub fn new(config: PluginConfig) -> PluginResult<Self> {
        config.validate()?;

        let dispatcher = WebhookDispatcher::from_config(&config);
        Ok(Self {
            config: Arc::new(config),
            dispatcher,
        })
    }

    pub fn config(&self) -> &PluginConfig {
        &self.config
    }

    /// Handles the host's generic failure event.
    ///
    /// No-op when the host has no session for the request.
    pub async fn on_handling_failed(&self, request: &HandleRequest) {
        if let Some(message) = self.handling_failed_message(request) {
            self.dispatcher.deliver(message).await;
        }
    }

    /// Handles the session-ended signal of Alexa skills.
    ///
    /// Only a `SessionEndedRequest` whose reason is `ERROR` produces a
    /// message; everything else, including malformed payloads, is skipped.
    pub async fn on_abnormal_session_end(&self, request: &HandleRequest) {
        if let Some(message) = self.abnormal_session_end_message(request) {
            self.dispatcher.deliver(message).await;
        }
    }

    /// Reports an error from inside app code, outside the failure hook
    pub async fn log_error(
        &self,
        context: &dyn RequestContext,
        host: &HostEnvironment,
        error: impl Into<ErrorReport>,
    ) {
        let report = error.into();
        let message = build_error_log_message(&self.config, context, report.descriptive_text());
        let message = enrich_with_execution_log_link(message, host);
        self.dispatcher.deliver(message).await;
    }

    /// Sends a plain text message to the configured channel
    pub async fn log_message(&self, text: &str) {
        let message = build_text_message(&self.config, text);
        self.dispatcher.deliver(message).await;
    }

    /// Message the failure hook would send, if any
    pub fn handling_failed_message(&self, request: &HandleRequest) -> Option<NotificationMessage> {
        let Some(session) = request.session.as_deref() else {
            tracing::debug!("Failure event without a session, skipping Slack notification");
            return None;
        };

        let classification = request
            .error
            .as_ref()
            .map(|e| e.classification)
            .unwrap_or_default();
        let detail = request.error.as_ref().map(ErrorReport::descriptive_text);

        let message = build_message(&self.config, session, classification, detail);
        Some(enrich_with_execution_log_link(message, &request.host))
    }

    /// Message the session-end hook would send, if any
    pub fn abnormal_session_end_message(
        &self,
        request: &HandleRequest,
    ) -> Option<NotificationMessage> {
        let session = request.session.as_deref()?;

        let platform = session.platform();
        if platform != PlatformKind::AlexaSkill {
            tracing::trace!(%platform, "Session-end check only applies to Alexa skills");
            return None;
        }

        let payload = session.raw_payload()?;
        let envelope = RawRequestEnvelope::from_value(&payload)?;
        let body = envelope.abnormal_session_end()?;

        tracing::debug!(
            request_id = ?body.request_id,
            error_type = ?body.error_type(),
            "Session ended with an error"
        );

        let message = build_session_ended_message(&self.config, session, body);
        Some(enrich_with_execution_log_link(message, &request.host))
    }
}

#[async_trait]
impl Plugin for SlackErrorPlugin {
    fn name(&self) -> &'static str {
        PLUGIN_NAME
    }

    fn middlewares(&self) -> &'static [Middleware] {
        SUBSCRIBED_MIDDLEWARES
    }

    async fn handle(&self, middleware: Middleware, request: &HandleRequest) {
        match middleware {
            Middleware::Fail => self.on_handling_failed(request).await,
            Middleware::PlatformNlu => self.on_abnormal_session_end(request).await,
        }
    }
}
