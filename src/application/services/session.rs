use async_trait::async_trait;

use crate::domain::models::InboundMessage;

/// WhatsApp Web session the bridge listens to.
#[async_trait]
pub trait SessionProvider: Send + Sync {
    async fn is_connected(&self) -> anyhow::Result<bool>;
    /// Downloads and decrypts the binary content attached to a media message.
    async fn decrypt_file(&self, message: &InboundMessage) -> anyhow::Result<Vec<u8>>;
}
