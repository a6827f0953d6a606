//! Slack Error Notifier Library
//!
//! Slack webhook notifications for errors raised inside voice applications.
//! The host framework installs [`SlackErrorPlugin`] and calls it through the
//! [`host::Plugin`] trait; the plugin formats an attachment message and posts
//! it to an incoming webhook.

use shadow_rs::shadow;
shadow!(build);

pub mod cli;
pub mod config;
pub mod error;
pub mod external;
pub mod host;
pub mod logger;
pub mod notifications;

pub use config::{DeliveryMode, PluginConfig};
pub use error::{PluginError, PluginResult};
pub use notifications::SlackErrorPlugin;

pub fn pkg_version() -> &'static str {
    build::PKG_VERSION
}

pub fn clap_long_version() -> &'static str {
    build::CLAP_LONG_VERSION
}
