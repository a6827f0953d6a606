//! Hook surface between the host framework and its plugins.

use super::context::RequestContext;
use super::environment::HostEnvironment;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::error::Error as StdError;
use std::fmt::Write as _;
use std::sync::Arc;

/// Lifecycle hooks a plugin can subscribe to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Middleware {
    /// Request handling failed
    Fail,
    /// Platform NLU step; session-ended signals pass through here
    PlatformNlu,
}

impl Middleware {
    pub fn as_str(&self) -> &'static str {
        match self {
            Middleware::Fail => "fail",
            Middleware::PlatformNlu => "platform.nlu",
        }
    }
}

/// Where in the host's pipeline the error was raised
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum ErrorClassification {
    /// Raised by an intent/state handler
    #[default]
    HandlerError,
    /// Raised while building or sending the response
    ResponseError,
}

impl ErrorClassification {
    /// Label shown in the `Error Type` display field
    pub fn label(&self) -> &'static str {
        match self {
            ErrorClassification::HandlerError => "Handler Error",
            ErrorClassification::ResponseError => "Response Error",
        }
    }
}

/// The triggering error, captured as text
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorReport {
    pub classification: ErrorClassification,
    pub message: String,
    /// Stack trace or cause chain, when the host has one
    pub stack: Option<String>,
}

impl ErrorReport {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            classification: ErrorClassification::default(),
            message: message.into(),
            stack: None,
        }
    }

    /// Captures an error together with its `source()` chain
    pub fn from_error(error: &(dyn StdError + 'static)) -> Self {
        let message = error.to_string();
        let mut stack = message.clone();
        let mut source = error.source();
        let mut has_cause = false;
        while let Some(cause) = source {
            let _ = write!(stack, "\n    caused by: {}", cause);
            has_cause = true;
            source = cause.source();
        }

        Self {
            classification: ErrorClassification::default(),
            message,
            stack: has_cause.then_some(stack),
        }
    }

    pub fn with_classification(mut self, classification: ErrorClassification) -> Self {
        self.classification = classification;
        self
    }

    pub fn with_stack(mut self, stack: impl Into<String>) -> Self {
        self.stack = Some(stack.into());
        self
    }

    /// Stack when available, otherwise the plain message
    pub fn descriptive_text(&self) -> &str {
        self.stack.as_deref().unwrap_or(&self.message)
    }
}

impl From<&str> for ErrorReport {
    fn from(message: &str) -> Self {
        ErrorReport::new(message)
    }
}

impl From<String> for ErrorReport {
    fn from(message: String) -> Self {
        ErrorReport::new(message)
    }
}

/// Context bundle the host passes to every hook invocation
#[derive(Clone, Default)]
pub struct HandleRequest {
    /// Current request/session/user, absent when the host failed before
    /// creating one
    pub session: Option<Arc<dyn RequestContext>>,
    pub host: HostEnvironment,
    pub error: Option<ErrorReport>,
}

impl HandleRequest {
    pub fn new(host: HostEnvironment) -> Self {
        Self {
            session: None,
            host,
            error: None,
        }
    }

    pub fn with_session(mut self, session: Arc<dyn RequestContext>) -> Self {
        self.session = Some(session);
        self
    }

    pub fn with_error(mut self, error: ErrorReport) -> Self {
        self.error = Some(error);
        self
    }
}

impl std::fmt::Debug for HandleRequest {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HandleRequest")
            .field("has_session", &self.session.is_some())
            .field("host", &self.host)
            .field("error", &self.error)
            .finish()
    }
}

/// A plugin the host installs into its middleware pipeline.
///
/// `handle` must not fail: plugins are called from the host's own error path.
#[async_trait]
pub trait Plugin: Send + Sync {
    /// Name the host registers the plugin under
    fn name(&self) -> &'static str;

    /// Hooks this plugin wants to be called for
    fn middlewares(&self) -> &'static [Middleware];

    async fn handle(&self, middleware: Middleware, request: &HandleRequest);
}
