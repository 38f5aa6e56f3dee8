use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};

use crate::{application::services::session::SessionProvider, domain::models::InboundMessage};

/// HTTP client for the WhatsApp Web sidecar that owns the browser session.
pub struct SidecarSession {
    http: Client,
    base_url: String,
}

impl SidecarSession {
    pub fn new(base_url: &str, timeout: Duration) -> anyhow::Result<Arc<dyn SessionProvider>> {
        let http = Client::builder()
            .user_agent("wa-n8n-bridge/session")
            .timeout(timeout)
            .build()?;
        Ok(Arc::new(Self {
            http,
            base_url: base_url.trim_end_matches('/').to_string(),
        }) as Arc<dyn SessionProvider>)
    }

    fn build_url(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path)
    }
}

#[async_trait]
impl SessionProvider for SidecarSession {
    async fn is_connected(&self) -> anyhow::Result<bool> {
        let response = self.http.get(self.build_url("status")).send().await?;
        if !response.status().is_success() {
            anyhow::bail!("session sidecar returned {}", response.status());
        }
        let status: SidecarStatus = response.json().await?;
        Ok(status.connected)
    }

    async fn decrypt_file(&self, message: &InboundMessage) -> anyhow::Result<Vec<u8>> {
        let response = self
            .http
            .post(self.build_url("decrypt-file"))
            .json(&DecryptRequest { id: &message.id })
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let reason = response.text().await.unwrap_or_default();
            anyhow::bail!("session sidecar could not decrypt media ({status}): {reason}");
        }
        Ok(response.bytes().await?.to_vec())
    }
}

#[derive(Debug, Deserialize)]
struct SidecarStatus {
    connected: bool,
}

#[derive(Debug, Serialize)]
struct DecryptRequest<'a> {
    id: &'a str,
}
