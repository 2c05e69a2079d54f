//! Rocket.Chat incoming-webhook message types.

use serde::{Deserialize, Serialize};

/// Title shown on every alert attachment.
pub const ATTACHMENT_TITLE: &str = "More info";

/// A chat message as accepted by an incoming-webhook integration script.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatMessage {
    /// Display name the message is posted under
    pub alias: String,
    /// Avatar shown next to the message
    pub icon_url: String,
    /// Message body
    #[serde(rename = "text")]
    pub body_text: String,
    pub attachments: Vec<Attachment>,
}

/// Colored content block below the message body.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Attachment {
    pub title: String,
    /// Omitted for recoveries of shapes that never linked anywhere
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title_link: Option<String>,
    pub text: String,
    /// Sidebar color as `#RRGGBB`
    pub color: String,
}

/// Value returned from the integration script's `process_incoming_request`.
///
/// Serializes as `{"content": {...}}` or `{"error": {...}}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WebhookResponse {
    /// Message to post
    Content(ChatMessage),
    /// Rejection reported back to the integration
    Error(WebhookError),
}

impl WebhookResponse {
    /// Build an error reply with the given message.
    #[must_use]
    pub fn error(message: impl Into<String>) -> Self {
        Self::Error(WebhookError {
            success: false,
            message: message.into(),
        })
    }

    /// Get the message to post, if any.
    #[must_use]
    pub const fn content(&self) -> Option<&ChatMessage> {
        match self {
            Self::Content(message) => Some(message),
            Self::Error(_) => None,
        }
    }

    #[must_use]
    pub const fn is_error(&self) -> bool {
        matches!(self, Self::Error(_))
    }
}

impl From<ChatMessage> for WebhookResponse {
    fn from(message: ChatMessage) -> Self {
        Self::Content(message)
    }
}

/// Error body understood by the integration runtime.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WebhookError {
    /// Always `false`
    pub success: bool,
    pub message: String,
}
