//! Per-request accessors supplied by the host's platform adapters.

use serde::{Deserialize, Serialize};
use serde_json::Value as JsonValue;
use std::fmt;

/// Voice platform a request originates from.
///
/// Supplied by the platform adapter; the notifier never inspects concrete
/// adapter types.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum PlatformKind {
    AlexaSkill,
    GoogleAction,
    /// Any other platform, identified by the adapter's own name
    Other(String),
}

impl PlatformKind {
    /// Identifier shown in the `Platform` display field
    pub fn as_str(&self) -> &str {
        match self {
            PlatformKind::AlexaSkill => "AlexaSkill",
            PlatformKind::GoogleAction => "GoogleAction",
            PlatformKind::Other(name) => name,
        }
    }
}

impl From<&str> for PlatformKind {
    fn from(value: &str) -> Self {
        match value {
            "AlexaSkill" | "alexa" => PlatformKind::AlexaSkill,
            "GoogleAction" | "google" => PlatformKind::GoogleAction,
            other => PlatformKind::Other(other.to_string()),
        }
    }
}

impl fmt::Display for PlatformKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Capability interface over the host's current request, session and user.
///
/// Every accessor is optional: a platform that cannot answer returns `None`
/// and the corresponding display field is rendered without a value.
pub trait RequestContext: Send + Sync {
    fn user_id(&self) -> Option<String>;

    fn timestamp(&self) -> Option<String>;

    fn locale(&self) -> Option<String>;

    fn intent_name(&self) -> Option<String>;

    /// Current conversation state, if the app uses states
    fn state(&self) -> Option<String>;

    fn platform(&self) -> PlatformKind;

    /// Raw request body as received from the platform
    fn raw_payload(&self) -> Option<JsonValue>;
}

/// Plain-data `RequestContext`.
///
/// Useful for adapters that already hold the values, for manual logging
/// outside a request and for tests.
#[derive(Debug, Clone, PartialEq)]
pub struct RequestSnapshot {
    pub user_id: Option<String>,
    pub timestamp: Option<String>,
    pub locale: Option<String>,
    pub intent_name: Option<String>,
    pub state: Option<String>,
    pub platform: PlatformKind,
    pub raw_payload: Option<JsonValue>,
}

impl RequestSnapshot {
    pub fn new(platform: PlatformKind) -> Self {
        Self {
            user_id: None,
            timestamp: None,
            locale: None,
            intent_name: None,
            state: None,
            platform,
            raw_payload: None,
        }
    }

    pub fn with_user_id(mut self, user_id: impl Into<String>) -> Self {
        self.user_id = Some(user_id.into());
        self
    }

    pub fn with_timestamp(mut self, timestamp: impl Into<String>) -> Self {
        self.timestamp = Some(timestamp.into());
        self
    }

    pub fn with_locale(mut self, locale: impl Into<String>) -> Self {
        self.locale = Some(locale.into());
        self
    }

    pub fn with_intent_name(mut self, intent_name: impl Into<String>) -> Self {
        self.intent_name = Some(intent_name.into());
        self
    }

    pub fn with_state(mut self, state: impl Into<String>) -> Self {
        self.state = Some(state.into());
        self
    }

    pub fn with_raw_payload(mut self, raw_payload: JsonValue) -> Self {
        self.raw_payload = Some(raw_payload);
        self
    }
}

impl RequestContext for RequestSnapshot {
    fn user_id(&self) -> Option<String> {
        self.user_id.clone()
    }

    fn timestamp(&self) -> Option<String> {
        self.timestamp.clone()
    }

    fn locale(&self) -> Option<String> {
        self.locale.clone()
    }

    fn intent_name(&self) -> Option<String> {
        self.intent_name.clone()
    }

    fn state(&self) -> Option<String> {
        self.state.clone()
    }

    fn platform(&self) -> PlatformKind {
        self.platform.clone()
    }

    fn raw_payload(&self) -> Option<JsonValue> {
        self.raw_payload.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_platform_kind_as_str() {
        assert_eq!(PlatformKind::AlexaSkill.as_str(), "AlexaSkill");
        assert_eq!(PlatformKind::GoogleAction.as_str(), "GoogleAction");
        assert_eq!(PlatformKind::Other("Bixby".to_string()).as_str(), "Bixby");
    }

    #[test]
    fn test_platform_kind_from_str() {
        assert_eq!(PlatformKind::from("alexa"), PlatformKind::AlexaSkill);
        assert_eq!(PlatformKind::from("GoogleAction"), PlatformKind::GoogleAction);
        assert_eq!(
            PlatformKind::from("Messenger"),
            PlatformKind::Other("Messenger".to_string())
        );
    }

    #[test]
    fn test_snapshot_accessors() {
        let snapshot = RequestSnapshot::new(PlatformKind::AlexaSkill)
            .with_user_id("amzn1.account.XYZ")
            .with_locale("de-DE")
            .with_state("OrderState");

        assert_eq!(snapshot.user_id().as_deref(), Some("amzn1.account.XYZ"));
        assert_eq!(snapshot.locale().as_deref(), Some("de-DE"));
        assert_eq!(snapshot.state().as_deref(), Some("OrderState"));
        assert!(snapshot.timestamp().is_none());
        assert!(snapshot.raw_payload().is_none());
        assert_eq!(snapshot.platform(), PlatformKind::AlexaSkill);
    }
}
