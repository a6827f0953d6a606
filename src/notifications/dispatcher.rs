//! Best-effort webhook delivery.
//!
//! Sends the message as a JSON POST using the global `HTTP_CLIENT`. Delivery
//! outcomes are only logged: nothing here returns an error to the caller and
//! nothing is retried.

use super::message::NotificationMessage;
use crate::config::{DeliveryMode, PluginConfig};
use crate::external::client::HTTP_CLIENT;
use serde::{Deserialize, Serialize};
use std::time::{Duration, Instant};
use tokio::task::JoinHandle;

/// Per-request timeout when none is configured
const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

/// Result of a webhook delivery attempt
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DispatchResult {
    /// Whether the webhook answered with a 2xx status
    pub success: bool,
    /// HTTP status code, absent on transport failure
    pub status_code: Option<u16>,
    /// Response body or transport error message
    pub response: Option<String>,
    /// Time taken for the call in milliseconds
    pub duration_ms: u64,
}

/// Webhook sender bound to one URL
///
/// # Example
/// ```ignore
/// let dispatcher = WebhookDispatcher::from_config(&config);
/// let result = dispatcher.send(&message).await;
/// ```
#[derive(Debug, Clone)]
pub struct WebhookDispatcher {
    url: String,
    timeout: Duration,
    delivery: DeliveryMode,
}

impl WebhookDispatcher {
    pub fn new(url: impl Into<String>, timeout: Duration, delivery: DeliveryMode) -> Self {
        Self {
            url: url.into(),
            timeout,
            delivery,
        }
    }

    pub fn from_config(config: &PluginConfig) -> Self {
        Self::new(
            config.webhook_url.clone(),
            Duration::from_secs(config.timeout_seconds),
            config.delivery,
        )
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    pub fn delivery(&self) -> DeliveryMode {
        self.delivery
    }

    /// POSTs the message and reports the outcome.
    ///
    /// Transport failures are folded into an unsuccessful `DispatchResult`.
    pub async fn send(&self, message: &NotificationMessage) -> DispatchResult {
        let start = Instant::now();

        let response = HTTP_CLIENT
            .post(&self.url)
            .timeout(self.timeout)
            .header("Content-Type", "application/json")
            .json(message)
            .send()
            .await;

        let duration_ms = start.elapsed().as_millis() as u64;

        match response {
            Ok(resp) => {
                let status_code = resp.status().as_u16();
                let success = resp.status().is_success();
                let response_text = resp.text().await.ok();

                DispatchResult {
                    success,
                    status_code: Some(status_code),
                    response: response_text,
                    duration_ms,
                }
            }
            Err(e) => DispatchResult {
                success: false,
                status_code: None,
                response: Some(e.to_string()),
                duration_ms,
            },
        }
    }

    /// Sends and logs the outcome
    pub async fn send_and_log(&self, message: &NotificationMessage) -> DispatchResult {
        let result = self.send(message).await;
        log_outcome(&result);
        result
    }

    /// Fire-and-forget: spawns the send on the current Tokio runtime.
    ///
    /// Without a runtime the message is dropped with a warning and `None` is
    /// returned. The handle may be ignored; it exists for callers that want
    /// to wait during shutdown.
    pub fn dispatch(&self, message: NotificationMessage) -> Option<JoinHandle<DispatchResult>> {
        match tokio::runtime::Handle::try_current() {
            Ok(handle) => {
                let dispatcher = self.clone();
                Some(handle.spawn(async move { dispatcher.send_and_log(&message).await }))
            }
            Err(_) => {
                tracing::warn!("No Tokio runtime available, dropping Slack notification");
                None
            }
        }
    }

    /// Hands the message off according to the configured delivery mode
    pub async fn deliver(&self, message: NotificationMessage) {
        match self.delivery {
            DeliveryMode::Background => {
                self.dispatch(message);
            }
            DeliveryMode::Await => {
                self.send_and_log(&message).await;
            }
        }
    }
}

/// One-shot fire-and-forget POST of `message` to `url`
pub fn dispatch(url: &str, message: NotificationMessage) -> Option<JoinHandle<DispatchResult>> {
    WebhookDispatcher::new(url, DEFAULT_TIMEOUT, DeliveryMode::Background).dispatch(message)
}

fn log_outcome(result: &DispatchResult) {
    if result.success {
        tracing::debug!(
            status = ?result.status_code,
            duration_ms = result.duration_ms,
            "Slack notification delivered"
        );
    } else {
        tracing::warn!(
            status = ?result.status_code,
            response = ?result.response,
            duration_ms = result.duration_ms,
            "Slack notification delivery failed"
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::notifications::message::Attachment;
    use wiremock::matchers::{body_json, header, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn message(text: &str) -> NotificationMessage {
        NotificationMessage::new(Some("#alerts".to_string()), Attachment::text(text))
    }

    fn dispatcher_for(server: &MockServer, delivery: DeliveryMode) -> WebhookDispatcher {
        WebhookDispatcher::new(
            format!("{}/services/T/B/X", server.uri()),
            Duration::from_secs(5),
            delivery,
        )
    }

    #[tokio::test]
    async fn test_send_posts_json_body() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/services/T/B/X"))
            .and(header("content-type", "application/json"))
            .and(body_json(serde_json::json!({
                "channel": "#alerts",
                "attachments": [ { "text": "hello" } ]
            })))
            .respond_with(ResponseTemplate::new(200).set_body_string("ok"))
            .expect(1)
            .mount(&server)
            .await;

        let result = dispatcher_for(&server, DeliveryMode::Await)
            .send(&message("hello"))
            .await;

        assert!(result.success);
        assert_eq!(result.status_code, Some(200));
        assert_eq!(result.response.as_deref(), Some("ok"));
    }

    #[tokio::test]
    async fn test_send_reports_http_error() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(404).set_body_string("no_service"))
            .mount(&server)
            .await;

        let result = dispatcher_for(&server, DeliveryMode::Await)
            .send(&message("hello"))
            .await;

        assert!(!result.success);
        assert_eq!(result.status_code, Some(404));
        assert_eq!(result.response.as_deref(), Some("no_service"));
    }

    #[tokio::test]
    async fn test_send_transport_failure_is_not_an_error() {
        // Nothing listens on port 9 (discard) on CI machines
        let dispatcher = WebhookDispatcher::new(
            "http://127.0.0.1:9/hook",
            Duration::from_secs(2),
            DeliveryMode::Await,
        );

        let result = dispatcher.send(&message("hello")).await;

        assert!(!result.success);
        assert!(result.status_code.is_none());
        assert!(result.response.is_some());
    }

    #[tokio::test]
    async fn test_background_dispatch_delivers() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(200))
            .expect(1)
            .mount(&server)
            .await;

        let handle = dispatcher_for(&server, DeliveryMode::Background)
            .dispatch(message("background"))
            .expect("runtime is available");
        let result = handle.await.unwrap();

        assert!(result.success);
    }

    #[tokio::test]
    async fn test_free_dispatch_function() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(200))
            .expect(1)
            .mount(&server)
            .await;

        let handle = dispatch(&server.uri(), message("free")).unwrap();
        assert!(handle.await.unwrap().success);
    }

    #[test]
    fn test_dispatch_without_runtime_does_not_panic() {
        let dispatcher = WebhookDispatcher::new(
            "http://127.0.0.1:9/hook",
            Duration::from_secs(1),
            DeliveryMode::Background,
        );
        assert!(dispatcher.dispatch(message("dropped")).is_none());
    }

    #[test]
    fn test_from_config() {
        let config = PluginConfig::new("https://hooks.slack.com/services/T/B/X")
            .with_delivery(DeliveryMode::Await);
        let dispatcher = WebhookDispatcher::from_config(&config);
        assert_eq!(dispatcher.url(), "https://hooks.slack.com/services/T/B/X");
        assert_eq!(dispatcher.delivery(), DeliveryMode::Await);
    }
}
