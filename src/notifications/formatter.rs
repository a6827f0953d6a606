//! Pure message construction.
//!
//! Every builder merges the configured cosmetics with a fixed, ordered list
//! of display fields. No I/O happens here.

use super::message::{Attachment, Field, NotificationMessage};
use crate::config::PluginConfig;
use crate::host::{ErrorClassification, RawRequestBody, RequestContext};

pub const FIELD_USER_ID: &str = "UserID";
pub const FIELD_TIMESTAMP: &str = "Timestamp";
pub const FIELD_LOCALE: &str = "Locale";
pub const FIELD_PLATFORM: &str = "Platform";
pub const FIELD_STATE: &str = "State";
pub const FIELD_INTENT: &str = "Intent";
pub const FIELD_REQUEST_ID: &str = "RequestId";
pub const FIELD_REASON: &str = "Reason";
pub const FIELD_ERROR_TYPE: &str = "Error Type";
pub const FIELD_ERROR_MESSAGE: &str = "Error Message";
pub const FIELD_ERROR: &str = "Error";

/// Shown in the `State` field when the conversation has no state
pub const NO_STATE: &str = "-";

/// Cosmetics plus the fields shared by every error message:
/// `UserID`, `Timestamp`, `Locale`, `Platform`
fn base_message(config: &PluginConfig, context: &dyn RequestContext) -> NotificationMessage {
    let mut attachment = Attachment::from_config(config);
    attachment.fields = vec![
        Field::long(FIELD_USER_ID, context.user_id()),
        Field::short(FIELD_TIMESTAMP, context.timestamp()),
        Field::short(FIELD_LOCALE, context.locale()),
        Field::long(FIELD_PLATFORM, Some(context.platform().to_string())),
    ];

    NotificationMessage::new(config.channel_override(), attachment)
}

/// Message for a failed request.
///
/// Fields after the base set: `State` (or `-`), `Intent`, `Error Type`
/// carrying the classification label, and `Error Message` carrying
/// `error_detail` as the last mandatory field.
pub fn build_message(
    config: &PluginConfig,
    context: &dyn RequestContext,
    classification: ErrorClassification,
    error_detail: Option<&str>,
) -> NotificationMessage {
    let mut message = base_message(config, context);

    let state = context
        .state()
        .filter(|s| !s.is_empty())
        .unwrap_or_else(|| NO_STATE.to_string());

    message.push_field(Field::short(FIELD_STATE, Some(state)));
    message.push_field(Field::short(FIELD_INTENT, context.intent_name()));
    message.push_field(Field::short(
        FIELD_ERROR_TYPE,
        Some(classification.label().to_string()),
    ));
    message.push_field(Field::long(
        FIELD_ERROR_MESSAGE,
        error_detail.map(str::to_string),
    ));

    message
}

/// Message for a session the platform ended because of an error.
///
/// Fields after the base set: `RequestId`, `Reason`, and the embedded
/// `Error Type` / `Error Message`.
pub fn build_session_ended_message(
    config: &PluginConfig,
    context: &dyn RequestContext,
    request: &RawRequestBody,
) -> NotificationMessage {
    let mut message = base_message(config, context);

    message.push_field(Field::long(FIELD_REQUEST_ID, request.request_id.clone()));
    message.push_field(Field::short(FIELD_REASON, request.reason.clone()));
    message.push_field(Field::short(
        FIELD_ERROR_TYPE,
        request.error_type().map(str::to_string),
    ));
    message.push_field(Field::short(
        FIELD_ERROR_MESSAGE,
        request.error_message().map(str::to_string),
    ));

    message
}

/// Message for an error reported manually from app code: base set plus `Error`
pub fn build_error_log_message(
    config: &PluginConfig,
    context: &dyn RequestContext,
    error_text: &str,
) -> NotificationMessage {
    let mut message = base_message(config, context);
    message.push_field(Field::long(FIELD_ERROR, Some(error_text.to_string())));
    message
}

/// Plain text message without cosmetics or fields
pub fn build_text_message(config: &PluginConfig, text: &str) -> NotificationMessage {
    NotificationMessage::new(config.channel_override(), Attachment::text(text))
}
