use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, header::CONTENT_TYPE};

use crate::{
    application::services::webhook::{DispatchError, WebhookSink},
    domain::models::OutboundPayload,
};

/// Posts payloads as JSON over HTTP.
pub struct HttpWebhookSink {
    http: Client,
}

impl HttpWebhookSink {
    pub fn new(timeout: Duration) -> anyhow::Result<Arc<dyn WebhookSink>> {
        let http = Client::builder()
            .user_agent("wa-n8n-bridge/webhook")
            .timeout(timeout)
            .build()?;
        Ok(Arc::new(Self { http }) as Arc<dyn WebhookSink>)
    }
}

#[async_trait]
impl WebhookSink for HttpWebhookSink {
    async fn post(&self, url: &str, payload: &OutboundPayload) -> Result<(), DispatchError> {
        let body =
            serde_json::to_vec(payload).map_err(|err| DispatchError::Encode(err.to_string()))?;

        let response = self
            .http
            .post(url)
            .header(CONTENT_TYPE, "application/json")
            .body(body)
            .send()
            .await
            .map_err(|err| DispatchError::Transport(err.to_string()))?;

        let status = response.status();
        if status.is_success() {
            return Ok(());
        }
        let body = response.text().await.unwrap_or_default();
        Err(DispatchError::Status {
            status: status.as_u16(),
            body,
        })
    }
}

#[cfg(test)]
mod tests {
    use mockito::Matcher;
    use serde_json::json;

    use super::*;
    use crate::application::services::webhook::tests::chat_payload;

    #[tokio::test]
    async fn posts_json_with_content_type() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("POST", "/webhook/abc")
            .match_header("content-type", "application/json")
            .match_body(Matcher::PartialJson(json!({
                "from": "A",
                "id": "m1",
                "type": "chat",
                "body": "hello"
            })))
            .with_status(200)
            .create_async()
            .await;

        let sink = HttpWebhookSink::new(Duration::from_secs(5)).unwrap();
        let url = format!("{}/webhook/abc", server.url());
        sink.post(&url, &chat_payload("m1")).await.unwrap();

        mock.assert_async().await;
    }

    #[tokio::test]
    async fn non_success_status_is_reported_with_body() {
        let mut server = mockito::Server::new_async().await;
        let _mock = server
            .mock("POST", "/webhook/abc")
            .with_status(500)
            .with_body("workflow crashed")
            .create_async()
            .await;

        let sink = HttpWebhookSink::new(Duration::from_secs(5)).unwrap();
        let url = format!("{}/webhook/abc", server.url());
        let err = sink.post(&url, &chat_payload("m1")).await.unwrap_err();

        match err {
            DispatchError::Status { status, body } => {
                assert_eq!(status, 500);
                assert_eq!(body, "workflow crashed");
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[tokio::test]
    async fn unreachable_host_is_a_transport_error() {
        let sink = HttpWebhookSink::new(Duration::from_secs(2)).unwrap();
        let err = sink
            .post("http://127.0.0.1:1/webhook", &chat_payload("m1"))
            .await
            .unwrap_err();
        assert!(matches!(err, DispatchError::Transport(_)));
    }
}
