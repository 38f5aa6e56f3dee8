use super::message_kind::MessageKind;

/// A message event received from the session provider.
#[derive(Debug, Clone)]
pub struct InboundMessage {
    pub from: String,
    pub id: String,
    pub kind: MessageKind,
    pub body: Option<String>,
    pub mimetype: Option<String>,
    pub filename: Option<String>,
    pub caption: Option<String>,
    pub timestamp: i64,
    pub from_me: bool,
    pub is_group_msg: bool,
}

impl InboundMessage {
    /// Own messages, group traffic and protocol notices never leave the bridge.
    pub fn is_ignored(&self) -> bool {
        self.from_me
            || self.is_group_msg
            || matches!(
                self.kind,
                MessageKind::Protocol | MessageKind::NotificationCode
            )
    }

    /// File name sent along with decoded media.
    ///
    /// Falls back to `media_file.<subtype>` from the MIME type, or
    /// `media_file.dat` when no subtype can be read from it.
    pub fn media_file_name(&self) -> String {
        if let Some(name) = self.filename.as_deref().filter(|n| !n.is_empty()) {
            return name.to_string();
        }
        let extension = self
            .mimetype
            .as_deref()
            .and_then(|mime| mime.split('/').nth(1))
            .filter(|subtype| !subtype.is_empty())
            .unwrap_or("dat");
        format!("media_file.{extension}")
    }
}
