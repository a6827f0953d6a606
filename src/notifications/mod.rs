//! Slack error notifications.
//!
//! Builds Slack attachment messages from the host's request context and
//! delivers them to an incoming webhook:
//! - `message`: payload types
//! - `formatter`: pure builders with the fixed field sets
//! - `cloudwatch`: Lambda log deep links
//! - `dispatcher`: best-effort HTTP delivery
//! - `plugin`: `SlackErrorPlugin`, the hook handlers

pub mod cloudwatch;
pub mod dispatcher;
pub mod formatter;
pub mod message;
pub mod plugin;

pub use cloudwatch::{cloudwatch_url, enrich_with_execution_log_link};
pub use dispatcher::{DispatchResult, WebhookDispatcher, dispatch};
pub use formatter::{
    build_error_log_message, build_message, build_session_ended_message, build_text_message,
};
pub use message::{Attachment, Field, NotificationMessage};
pub use plugin::{PLUGIN_NAME, SlackErrorPlugin};
