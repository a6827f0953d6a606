//! Chat message payload in Slack's attachment format.

use crate::config::PluginConfig;
use serde::{Deserialize, Serialize};

/// Body POSTed to the webhook
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NotificationMessage {
    /// Channel override; omitted so the webhook's own channel is used
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub channel: Option<String>,
    pub attachments: Vec<Attachment>,
}

/// Structured sub-object carrying the cosmetics and the display fields
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Attachment {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fallback: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pretext: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub author_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub author_link: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub author_icon: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title_link: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub thumb_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub footer: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub footer_icon: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub fields: Vec<Field>,
}

/// Title/value pair rendered inside an attachment
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Field {
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub value: Option<String>,
    /// Render half-width next to another short field
    pub short: bool,
}

impl Field {
    pub fn short(title: impl Into<String>, value: Option<String>) -> Self {
        Self {
            title: title.into(),
            value,
            short: true,
        }
    }

    pub fn long(title: impl Into<String>, value: Option<String>) -> Self {
        Self {
            title: title.into(),
            value,
            short: false,
        }
    }
}

impl Attachment {
    /// Attachment carrying every configured cosmetic and no fields yet
    pub fn from_config(config: &PluginConfig) -> Self {
        Self {
            fallback: Some(config.fallback.clone()),
            color: Some(config.color.clone()),
            pretext: Some(config.pretext.clone()),
            author_name: Some(config.author_name.clone()),
            author_link: Some(config.author_link.clone()),
            author_icon: Some(config.author_icon.clone()),
            title: Some(config.title.clone()),
            title_link: Some(config.title_link.clone()),
            text: Some(config.text.clone()),
            image_url: Some(config.image_url.clone()),
            thumb_url: Some(config.thumb_url.clone()),
            footer: Some(config.footer.clone()),
            footer_icon: Some(config.footer_icon.clone()),
            fields: Vec::new(),
        }
    }

    /// Text-only attachment
    pub fn text(text: impl Into<String>) -> Self {
        Self {
            text: Some(text.into()),
            ..Self::default()
        }
    }
}

impl NotificationMessage {
    pub fn new(channel: Option<String>, attachment: Attachment) -> Self {
        Self {
            channel,
            attachments: vec![attachment],
        }
    }

    /// Fields of the first attachment
    pub fn fields(&self) -> &[Field] {
        self.attachments
            .first()
            .map(|a| a.fields.as_slice())
            .unwrap_or_default()
    }

    /// Appends a field to the first attachment
    pub fn push_field(&mut self, field: Field) {
        if let Some(attachment) = self.attachments.first_mut() {
            attachment.fields.push(field);
        } else {
            self.attachments.push(Attachment {
                fields: vec![field],
                ..Attachment::default()
            });
        }
    }

    pub fn field(&self, title: &str) -> Option<&Field> {
        self.fields().iter().find(|f| f.title == title)
    }
}
