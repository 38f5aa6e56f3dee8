use std::sync::Arc;

use async_trait::async_trait;
use futures::future::join_all;
use thiserror::Error;
use tracing::{error, info};

use crate::domain::{models::OutboundPayload, value_objects::DestinationSet};

#[derive(Debug, Error)]
pub enum DispatchError {
    #[error("webhook answered {status}: {body}")]
    Status { status: u16, body: String },
    #[error("webhook request failed: {0}")]
    Transport(String),
    #[error("payload could not be encoded: {0}")]
    Encode(String),
}

/// HTTP endpoint set that accepts forwarded payloads.
#[async_trait]
pub trait WebhookSink: Send + Sync {
    async fn post(&self, url: &str, payload: &OutboundPayload) -> Result<(), DispatchError>;
}

#[derive(Debug)]
pub struct UrlOutcome {
    pub url: String,
    pub result: Result<(), DispatchError>,
}

#[derive(Debug, Default)]
pub struct DispatchReport {
    pub outcomes: Vec<UrlOutcome>,
}

impl DispatchReport {
    pub fn delivered(&self) -> usize {
        self.outcomes.iter().filter(|o| o.result.is_ok()).count()
    }

    pub fn failed(&self) -> usize {
        self.outcomes.len() - self.delivered()
    }

    pub fn failed_urls(&self) -> Vec<&str> {
        self.outcomes
            .iter()
            .filter(|o| o.result.is_err())
            .map(|o| o.url.as_str())
            .collect()
    }
}

/// Posts payloads to every destination, isolating failures per URL.
#[derive(Clone)]
pub struct WebhookDispatcher {
    sink: Arc<dyn WebhookSink>,
}

impl WebhookDispatcher {
    pub fn new(sink: Arc<dyn WebhookSink>) -> Self {
        Self { sink }
    }

    /// Issues every per-URL attempt at once and waits for all of them.
    pub async fn dispatch(
        &self,
        payload: &OutboundPayload,
        destinations: &DestinationSet,
    ) -> DispatchReport {
        let attempts = destinations
            .urls()
            .iter()
            .map(|url| self.attempt(url, payload));
        DispatchReport {
            outcomes: join_all(attempts).await,
        }
    }

    /// Attempts the URLs one after another in configured order.
    pub async fn dispatch_sequential(
        &self,
        payload: &OutboundPayload,
        destinations: &DestinationSet,
    ) -> DispatchReport {
        let mut outcomes = Vec::with_capacity(destinations.urls().len());
        for url in destinations.urls() {
            outcomes.push(self.attempt(url, payload).await);
        }
        DispatchReport { outcomes }
    }

    async fn attempt(&self, url: &str, payload: &OutboundPayload) -> UrlOutcome {
        let result = self.sink.post(url, payload).await;
        match &result {
            Ok(()) => info!(
                url,
                message_id = %payload.id,
                message_type = %payload.kind,
                "payload forwarded to webhook"
            ),
            Err(err) => error!(
                url,
                message_id = %payload.id,
                message_type = %payload.kind,
                error = %err,
                "failed to forward payload to webhook"
            ),
        }
        UrlOutcome {
            url: url.to_string(),
            result,
        }
    }
}
