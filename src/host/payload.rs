//! Typed partial view of a raw voice-platform request.
//!
//! Every field is optional so that any missing or unexpected piece of the
//! payload reads as "condition not met" instead of an error. Only `type`
//! and `reason` decide applicability; the display fields are read leniently
//! so a mistyped one never hides a real session failure.

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value as JsonValue;

/// Request type Alexa sends when a session ends
pub const SESSION_ENDED_REQUEST: &str = "SessionEndedRequest";

/// Session-end reason indicating a failure rather than a user-initiated end
pub const ERROR_REASON: &str = "ERROR";

/// Top level of the raw request body
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawRequestEnvelope {
    #[serde(default)]
    pub request: Option<RawRequestBody>,
}

/// The `request` object inside the envelope
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawRequestBody {
    #[serde(rename = "type", default)]
    pub kind: Option<String>,
    #[serde(rename = "requestId", default, deserialize_with = "lenient_text")]
    pub request_id: Option<String>,
    #[serde(default)]
    pub reason: Option<String>,
    #[serde(default, deserialize_with = "lenient_error")]
    pub error: Option<RawRequestError>,
}

/// Error details embedded in a session-ended request
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawRequestError {
    #[serde(rename = "type", default, deserialize_with = "lenient_text")]
    pub kind: Option<String>,
    #[serde(default, deserialize_with = "lenient_text")]
    pub message: Option<String>,
}

/// Display text for any JSON scalar; `null` and containers read as absent
fn lenient_text<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = JsonValue::deserialize(deserializer)?;
    Ok(match value {
        JsonValue::String(text) => Some(text),
        JsonValue::Number(number) => Some(number.to_string()),
        JsonValue::Bool(flag) => Some(flag.to_string()),
        JsonValue::Null | JsonValue::Array(_) | JsonValue::Object(_) => None,
    })
}

/// Embedded error object; anything that is not an object reads as absent
fn lenient_error<'de, D>(deserializer: D) -> Result<Option<RawRequestError>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = JsonValue::deserialize(deserializer)?;
    Ok(RawRequestError::deserialize(&value).ok())
}

impl RawRequestEnvelope {
    /// Reads the envelope out of an arbitrary JSON value.
    ///
    /// Returns `None` when a condition field has the wrong shape
    /// (e.g. `request.type` is not a string).
    pub fn from_value(value: &JsonValue) -> Option<Self> {
        match Self::deserialize(value) {
            Ok(envelope) => Some(envelope),
            Err(e) => {
                tracing::debug!(error = %e, "Raw request payload has an unexpected shape");
                None
            }
        }
    }

    /// The request body if this is a session end caused by an error
    pub fn abnormal_session_end(&self) -> Option<&RawRequestBody> {
        let body = self.request.as_ref()?;
        if body.kind.as_deref() != Some(SESSION_ENDED_REQUEST) {
            return None;
        }
        if body.reason.as_deref() != Some(ERROR_REASON) {
            return None;
        }
        Some(body)
    }
}

impl RawRequestBody {
    pub fn error_type(&self) -> Option<&str> {
        self.error.as_ref().and_then(|e| e.kind.as_deref())
    }

    pub fn error_message(&self) -> Option<&str> {
        self.error.as_ref().and_then(|e| e.message.as_deref())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn session_ended(reason: &str) -> JsonValue {
        json!({
            "version": "1.0",
            "request": {
                "type": "SessionEndedRequest",
                "requestId": "amzn1.echo-api.request.1234",
                "timestamp": "2020-01-01T00:00:00Z",
                "locale": "en-US",
                "reason": reason,
                "error": {
                    "type": "INVALID_RESPONSE",
                    "message": "An exception occurred while dispatching the request to the skill."
                }
            }
        })
    }

    #[test]
    fn test_error_session_end_detected() {
        let envelope = RawRequestEnvelope::from_value(&session_ended("ERROR")).unwrap();
        let body = envelope.abnormal_session_end().expect("should be abnormal");
        assert_eq!(body.request_id.as_deref(), Some("amzn1.echo-api.request.1234"));
        assert_eq!(body.error_type(), Some("INVALID_RESPONSE"));
        assert_eq!(
            body.error_message(),
            Some("An exception occurred while dispatching the request to the skill.")
        );
    }

    #[test]
    fn test_user_initiated_end_ignored() {
        let envelope = RawRequestEnvelope::from_value(&session_ended("USER_INITIATED")).unwrap();
        assert!(envelope.abnormal_session_end().is_none());
    }

    #[test]
    fn test_other_request_type_ignored() {
        let value = json!({ "request": { "type": "IntentRequest", "reason": "ERROR" } });
        let envelope = RawRequestEnvelope::from_value(&value).unwrap();
        assert!(envelope.abnormal_session_end().is_none());
    }

    #[test]
    fn test_missing_fields_are_not_applicable() {
        let envelope = RawRequestEnvelope::from_value(&json!({})).unwrap();
        assert!(envelope.abnormal_session_end().is_none());

        let envelope =
            RawRequestEnvelope::from_value(&json!({ "request": { "type": "SessionEndedRequest" } }))
                .unwrap();
        assert!(envelope.abnormal_session_end().is_none());
    }

    #[test]
    fn test_missing_embedded_error_is_tolerated() {
        let value = json!({ "request": { "type": "SessionEndedRequest", "reason": "ERROR" } });
        let envelope = RawRequestEnvelope::from_value(&value).unwrap();
        let body = envelope.abnormal_session_end().unwrap();
        assert!(body.error_type().is_none());
        assert!(body.error_message().is_none());
        assert!(body.request_id.is_none());
    }

    #[test]
    fn test_mistyped_display_fields_are_tolerated() {
        let value = json!({
            "request": {
                "type": "SessionEndedRequest",
                "reason": "ERROR",
                "requestId": ["unexpected"],
                "error": { "type": "INTERNAL_SERVICE_ERROR", "message": 500 }
            }
        });
        let envelope = RawRequestEnvelope::from_value(&value).unwrap();
        let body = envelope.abnormal_session_end().unwrap();
        assert!(body.request_id.is_none());
        assert_eq!(body.error_type(), Some("INTERNAL_SERVICE_ERROR"));
        assert_eq!(body.error_message(), Some("500"));
    }

    #[test]
    fn test_non_object_error_reads_as_absent() {
        let value = json!({
            "request": { "type": "SessionEndedRequest", "reason": "ERROR", "error": "boom" }
        });
        let envelope = RawRequestEnvelope::from_value(&value).unwrap();
        let body = envelope.abnormal_session_end().unwrap();
        assert!(body.error.is_none());
    }

    #[test]
    fn test_malformed_payload_rejected() {
        assert!(RawRequestEnvelope::from_value(&json!({ "request": { "type": 42 } })).is_none());
        assert!(RawRequestEnvelope::from_value(&json!("not an object")).is_none());
    }
}
