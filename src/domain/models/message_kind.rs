use std::fmt;

use serde::{Deserialize, Serialize};

/// WhatsApp message type tag as reported by the session provider.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum MessageKind {
    Chat,
    Ptt,
    Vcard,
    Location,
    Sticker,
    Image,
    Video,
    Document,
    Audio,
    Protocol,
    NotificationCode,
    Other(String),
}

/// How a message of a given kind travels to the webhooks.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeliveryClass {
    /// System traffic, never forwarded.
    Ignored,
    /// Forwarded right away with its body.
    Instant,
    /// Downloaded, then queued for throttled delivery.
    Media,
    /// Forwarded right away with a body or a placeholder text.
    Unclassified,
}

impl MessageKind {
    pub fn as_str(&self) -> &str {
        match self {
            MessageKind::Chat => "chat",
            MessageKind::Ptt => "ptt",
            MessageKind::Vcard => "vcard",
            MessageKind::Location => "location",
            MessageKind::Sticker => "sticker",
            MessageKind::Image => "image",
            MessageKind::Video => "video",
            MessageKind::Document => "document",
            MessageKind::Audio => "audio",
            MessageKind::Protocol => "protocol",
            MessageKind::NotificationCode => "notification_code",
            MessageKind::Other(value) => value,
        }
    }

    pub fn from_str(value: &str) -> Self {
        match value {
            "chat" => MessageKind::Chat,
            "ptt" => MessageKind::Ptt,
            "vcard" => MessageKind::Vcard,
            "location" => MessageKind::Location,
            "sticker" => MessageKind::Sticker,
            "image" => MessageKind::Image,
            "video" => MessageKind::Video,
            "document" => MessageKind::Document,
            "audio" => MessageKind::Audio,
            "protocol" => MessageKind::Protocol,
            "notification_code" => MessageKind::NotificationCode,
            other => MessageKind::Other(other.to_string()),
        }
    }

    pub fn delivery_class(&self) -> DeliveryClass {
        match self {
            MessageKind::Protocol | MessageKind::NotificationCode => DeliveryClass::Ignored,
            MessageKind::Chat
            | MessageKind::Ptt
            | MessageKind::Vcard
            | MessageKind::Location
            | MessageKind::Sticker => DeliveryClass::Instant,
            MessageKind::Image | MessageKind::Video | MessageKind::Document | MessageKind::Audio => {
                DeliveryClass::Media
            }
            MessageKind::Other(_) => DeliveryClass::Unclassified,
        }
    }
}

impl fmt::Display for MessageKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl From<String> for MessageKind {
    fn from(value: String) -> Self {
        match MessageKind::from_str(&value) {
            MessageKind::Other(_) => MessageKind::Other(value),
            known => known,
        }
    }
}

impl From<MessageKind> for String {
    fn from(value: MessageKind) -> Self {
        match value {
            MessageKind::Other(value) => value,
            known => known.as_str().to_string(),
        }
    }
}
