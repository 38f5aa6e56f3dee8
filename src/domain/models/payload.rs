use serde::Serialize;

use super::{inbound::InboundMessage, message_kind::MessageKind};

pub const MEDIA_DOWNLOAD_FAILED: &str = "Media download failed.";

/// JSON document posted to every webhook.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct OutboundPayload {
    pub from: String,
    pub id: String,
    #[serde(rename = "type")]
    pub kind: MessageKind,
    pub timestamp: i64,
    #[serde(flatten)]
    pub content: PayloadContent,
}

/// Exactly one payload shape per message.
///
/// A media message whose download failed is sent as `Fallback` while keeping
/// its media type tag, so receivers must look at the fields rather than the tag.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
#[serde(untagged)]
pub enum PayloadContent {
    Text { body: String },
    Media(MediaContent),
    Fallback { body: String },
}

#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct MediaContent {
    pub media_base64: String,
    pub media_mime_type: String,
    pub file_name: String,
    pub caption: String,
}

impl OutboundPayload {
    fn with_content(message: &InboundMessage, content: PayloadContent) -> Self {
        Self {
            from: message.from.clone(),
            id: message.id.clone(),
            kind: message.kind.clone(),
            timestamp: message.timestamp,
            content,
        }
    }

    pub fn text(message: &InboundMessage) -> Self {
        let body = message.body.clone().unwrap_or_default();
        Self::with_content(message, PayloadContent::Text { body })
    }

    pub fn media(message: &InboundMessage, media_base64: String) -> Self {
        let content = MediaContent {
            media_base64,
            media_mime_type: message.mimetype.clone().unwrap_or_default(),
            file_name: message.media_file_name(),
            caption: message.body.clone().unwrap_or_default(),
        };
        Self::with_content(message, PayloadContent::Media(content))
    }

    pub fn media_failed(message: &InboundMessage) -> Self {
        let body = non_empty_body(message).unwrap_or_else(|| MEDIA_DOWNLOAD_FAILED.to_string());
        Self::with_content(message, PayloadContent::Fallback { body })
    }

    pub fn unclassified(message: &InboundMessage) -> Self {
        let body = non_empty_body(message)
            .unwrap_or_else(|| format!("Unhandled message type: {}", message.kind));
        Self::with_content(message, PayloadContent::Fallback { body })
    }
}

/// Empty bodies count as missing; wppconnect sends `""` for caption-less media.
fn non_empty_body(message: &InboundMessage) -> Option<String> {
    message.body.clone().filter(|body| !body.is_empty())
}
