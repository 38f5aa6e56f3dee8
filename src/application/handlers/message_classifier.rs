use std::sync::Arc;

use base64::{Engine, engine::general_purpose::STANDARD};
use tracing::{debug, error, info, warn};
use uuid::Uuid;

use crate::{
    application::{
        handlers::media_queue::MediaDeliveryQueue,
        services::{
            session::SessionProvider,
            webhook::{DispatchReport, WebhookDispatcher},
        },
    },
    domain::{
        errors::DomainError,
        models::{DeliveryClass, InboundMessage, OutboundPayload, QueueEntry},
        value_objects::DestinationSet,
    },
};

/// What happened to one inbound message.
#[derive(Debug)]
pub enum Delivery {
    Dropped,
    Forwarded(DispatchReport),
    Queued { entry_id: Uuid, pending: usize },
}

/// Routes inbound WhatsApp messages to the webhooks.
pub struct MessageClassifier {
    session: Arc<dyn SessionProvider>,
    dispatcher: WebhookDispatcher,
    queue: Arc<MediaDeliveryQueue>,
    destinations: DestinationSet,
}

impl MessageClassifier {
    pub fn new(
        session: Arc<dyn SessionProvider>,
        dispatcher: WebhookDispatcher,
        queue: Arc<MediaDeliveryQueue>,
        destinations: DestinationSet,
    ) -> Self {
        Self {
            session,
            dispatcher,
            queue,
            destinations,
        }
    }

    /// Entry point for message events; errors end here and are only logged.
    pub async fn handle(&self, message: InboundMessage) {
        let message_id = message.id.clone();
        match self.process(message).await {
            Ok(Delivery::Dropped) => {}
            Ok(Delivery::Forwarded(report)) => debug!(
                message_id = %message_id,
                delivered = report.delivered(),
                failed_urls = ?report.failed_urls(),
                "message forwarded"
            ),
            Ok(Delivery::Queued { entry_id, pending }) => info!(
                message_id = %message_id,
                entry_id = %entry_id,
                pending,
                "media waiting for delivery"
            ),
            Err(err) => {
                error!(message_id = %message_id, error = %err, "failed to process inbound message")
            }
        }
    }

    pub async fn process(&self, message: InboundMessage) -> Result<Delivery, DomainError> {
        info!(
            from = %message.from,
            message_id = %message.id,
            message_type = %message.kind,
            "received message from whatsapp"
        );

        if message.is_ignored() {
            debug!(message_id = %message.id, "ignoring own, group or protocol message");
            return Ok(Delivery::Dropped);
        }
        if message.id.is_empty() || message.from.is_empty() {
            return Err(DomainError::Validation(
                "message id and sender are required".to_string(),
            ));
        }

        match message.kind.delivery_class() {
            DeliveryClass::Ignored => Ok(Delivery::Dropped),
            DeliveryClass::Instant => {
                info!(message_id = %message.id, "sending non-media message instantly");
                Ok(self.forward(OutboundPayload::text(&message)).await)
            }
            DeliveryClass::Media => Ok(self.enqueue_media(&message).await),
            DeliveryClass::Unclassified => {
                info!(
                    message_id = %message.id,
                    message_type = %message.kind,
                    "unhandled message type, forwarding body"
                );
                Ok(self.forward(OutboundPayload::unclassified(&message)).await)
            }
        }
    }

    async fn forward(&self, payload: OutboundPayload) -> Delivery {
        Delivery::Forwarded(self.dispatcher.dispatch(&payload, &self.destinations).await)
    }

    async fn enqueue_media(&self, message: &InboundMessage) -> Delivery {
        info!(
            message_id = %message.id,
            message_type = %message.kind,
            has_caption = message.caption.is_some(),
            "downloading media"
        );
        let payload = match self.download(message).await {
            Ok(encoded) => {
                info!(
                    message_id = %message.id,
                    mimetype = message.mimetype.as_deref().unwrap_or_default(),
                    "media downloaded and queued for delayed sending"
                );
                OutboundPayload::media(message, encoded)
            }
            Err(err) => {
                warn!(message_id = %message.id, error = %err, "media download failed");
                OutboundPayload::media_failed(message)
            }
        };

        let entry = QueueEntry::new(payload, self.destinations.clone());
        let entry_id = entry.id;
        let pending = self.queue.enqueue(entry).await;
        self.queue.try_start_drain();
        Delivery::Queued { entry_id, pending }
    }

    async fn download(&self, message: &InboundMessage) -> Result<String, DomainError> {
        let bytes = self
            .session
            .decrypt_file(message)
            .await
            .map_err(|err| DomainError::Decode(err.to_string()))?;
        Ok(STANDARD.encode(bytes))
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use super::*;
    use crate::{
        application::services::{
            session::tests::StubSession,
            webhook::tests::{RecordingSink, destinations},
        },
        domain::models::{
            MessageKind,
            payload::{MEDIA_DOWNLOAD_FAILED, MediaContent, PayloadContent},
        },
    };

    const URLS: [&str; 2] = ["http://n8n/webhook-test/x", "http://n8n/webhook/x"];

    struct Harness {
        classifier: MessageClassifier,
        sink: Arc<RecordingSink>,
        queue: Arc<MediaDeliveryQueue>,
    }

    fn harness(media: Option<Vec<u8>>, failing: &[&str]) -> Harness {
        let sink = Arc::new(RecordingSink::failing(failing));
        let dispatcher = WebhookDispatcher::new(sink.clone());
        let queue = MediaDeliveryQueue::new(dispatcher.clone(), Duration::from_secs(15));
        let classifier = MessageClassifier::new(
            Arc::new(StubSession { media }),
            dispatcher,
            queue.clone(),
            destinations(&URLS),
        );
        Harness {
            classifier,
            sink,
            queue,
        }
    }

    fn message(kind: &str, body: Option<&str>) -> InboundMessage {
        InboundMessage {
            from: "A".to_string(),
            id: "msg-1".to_string(),
            kind: MessageKind::from_str(kind),
            body: body.map(str::to_string),
            mimetype: None,
            filename: None,
            caption: None,
            timestamp: 1_700_000_000,
            from_me: false,
            is_group_msg: false,
        }
    }

    #[tokio::test]
    async fn drops_own_group_and_protocol_messages() {
        let h = harness(None, &[]);

        let mut own = message("chat", Some("hi"));
        own.from_me = true;
        let mut group = message("chat", Some("hi"));
        group.is_group_msg = true;

        for msg in [
            own,
            group,
            message("protocol", None),
            message("notification_code", None),
        ] {
            assert!(matches!(
                h.classifier.process(msg).await.unwrap(),
                Delivery::Dropped
            ));
        }
        assert!(h.sink.calls.lock().await.is_empty());
        assert_eq!(h.queue.snapshot().await.pending, 0);
    }

    #[tokio::test]
    async fn text_like_messages_are_forwarded_to_every_url() {
        for kind in ["chat", "ptt", "vcard", "location", "sticker"] {
            let h = harness(None, &[]);
            let delivery = h
                .classifier
                .process(message(kind, Some("hello")))
                .await
                .unwrap();

            let Delivery::Forwarded(report) = delivery else {
                panic!("{kind} should be forwarded instantly");
            };
            assert_eq!(report.delivered(), 2);

            let calls = h.sink.calls.lock().await;
            assert_eq!(calls.len(), 2);
            for (_, payload, _) in calls.iter() {
                assert_eq!(payload.kind.as_str(), kind);
                assert_eq!(
                    payload.content,
                    PayloadContent::Text {
                        body: "hello".to_string()
                    }
                );
            }
            assert_eq!(h.queue.snapshot().await.pending, 0);
        }
    }

    #[tokio::test]
    async fn chat_payload_matches_webhook_shape() {
        let h = harness(None, &[]);
        h.classifier.process(message("chat", Some("hello"))).await.unwrap();

        let calls = h.sink.calls.lock().await;
        let value = serde_json::to_value(&calls[0].1).unwrap();
        assert_eq!(value["from"], "A");
        assert_eq!(value["type"], "chat");
        assert_eq!(value["body"], "hello");
    }

    #[tokio::test(start_paused = true)]
    async fn decoded_image_is_queued_not_forwarded() {
        let h = harness(Some(b"png-bytes".to_vec()), &[]);
        let mut msg = message("image", Some("caption text"));
        msg.mimetype = Some("image/png".to_string());

        let delivery = h.classifier.process(msg).await.unwrap();
        assert!(matches!(delivery, Delivery::Queued { pending: 1, .. }));
        assert!(h.sink.calls.lock().await.is_empty());
        assert!(h.queue.is_draining());

        tokio::time::sleep(Duration::from_secs(16)).await;
        let calls = h.sink.calls.lock().await;
        assert_eq!(calls.len(), 2);
        assert_eq!(
            calls[0].1.content,
            PayloadContent::Media(MediaContent {
                media_base64: STANDARD.encode(b"png-bytes"),
                media_mime_type: "image/png".to_string(),
                file_name: "media_file.png".to_string(),
                caption: "caption text".to_string(),
            })
        );
        assert_eq!(calls[0].0, URLS[0]);
        assert_eq!(calls[1].0, URLS[1]);
    }

    #[tokio::test(start_paused = true)]
    async fn failed_decode_falls_back_to_body_and_still_queues() {
        let h = harness(None, &[]);
        let mut msg = message("image", Some("caption text"));
        msg.mimetype = Some("image/png".to_string());

        let delivery = h.classifier.process(msg).await.unwrap();
        assert!(matches!(delivery, Delivery::Queued { .. }));

        tokio::time::sleep(Duration::from_secs(16)).await;
        let calls = h.sink.calls.lock().await;
        assert_eq!(calls.len(), 2);
        assert_eq!(calls[0].1.kind, MessageKind::Image);
        assert_eq!(
            calls[0].1.content,
            PayloadContent::Fallback {
                body: "caption text".to_string()
            }
        );
    }

    #[tokio::test(start_paused = true)]
    async fn failed_decode_without_body_uses_generic_text() {
        let h = harness(None, &[]);
        h.classifier.process(message("audio", None)).await.unwrap();

        tokio::time::sleep(Duration::from_secs(16)).await;
        let calls = h.sink.calls.lock().await;
        assert_eq!(
            calls[0].1.content,
            PayloadContent::Fallback {
                body: MEDIA_DOWNLOAD_FAILED.to_string()
            }
        );
    }

    #[tokio::test]
    async fn unclassified_type_is_forwarded_with_placeholder() {
        let h = harness(None, &[]);
        let delivery = h.classifier.process(message("xyz", None)).await.unwrap();
        assert!(matches!(delivery, Delivery::Forwarded(_)));

        let calls = h.sink.calls.lock().await;
        assert_eq!(calls.len(), 2);
        assert_eq!(
            calls[0].1.content,
            PayloadContent::Fallback {
                body: "Unhandled message type: xyz".to_string()
            }
        );
    }

    #[tokio::test]
    async fn server_error_on_one_url_still_reaches_the_other() {
        let h = harness(None, &[URLS[0]]);
        let delivery = h
            .classifier
            .process(message("chat", Some("hello")))
            .await
            .unwrap();

        let Delivery::Forwarded(report) = delivery else {
            panic!("chat should be forwarded instantly");
        };
        assert_eq!(report.failed(), 1);
        assert_eq!(report.delivered(), 1);
        assert_eq!(report.failed_urls(), vec![URLS[0]]);
        let mut urls = h.sink.urls().await;
        urls.sort();
        assert_eq!(urls, vec![URLS[0], URLS[1]]);
    }

    #[tokio::test]
    async fn handle_swallows_invalid_messages() {
        let h = harness(None, &[]);
        let mut msg = message("chat", Some("hello"));
        msg.id = String::new();

        assert!(matches!(
            h.classifier.process(msg.clone()).await,
            Err(DomainError::Validation(_))
        ));
        h.classifier.handle(msg).await;
        assert!(h.sink.calls.lock().await.is_empty());
    }
}
