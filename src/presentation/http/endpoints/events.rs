use std::sync::Arc;

use poem_openapi::{
    ApiResponse, OpenApi,
    payload::{Json, PlainText},
};
use tracing::debug;

use crate::presentation::{
    http::{
        endpoints::root::{ApiState, EndpointsTags},
        mappers::map_inbound,
        requests::InboundMessageDto,
        responses::EventAcceptedDto,
    },
    models::DeliveryRouteKind,
};

#[derive(ApiResponse)]
pub enum EventResponse {
    /// The event was accepted and is being handled in the background.
    #[oai(status = 202)]
    Accepted(Json<EventAcceptedDto>),
    /// A forwardable event without sender or id.
    #[oai(status = 400)]
    BadRequest(PlainText<String>),
}

#[derive(Clone)]
pub struct EventsEndpoints {
    state: Arc<ApiState>,
}

impl EventsEndpoints {
    pub fn new(state: Arc<ApiState>) -> Self {
        Self { state }
    }
}

#[OpenApi]
impl EventsEndpoints {
    /// Receives a message event from the WhatsApp Web sidecar.
    #[oai(path = "/events/messages", method = "post", tag = EndpointsTags::Events)]
    pub async fn message_received(&self, request: Json<InboundMessageDto>) -> EventResponse {
        let message = map_inbound(request.0);
        let route = DeliveryRouteKind::from(&message);
        // Dropped events are never forwarded, so their ids need not be valid.
        if route != DeliveryRouteKind::Dropped && (message.id.is_empty() || message.from.is_empty())
        {
            return EventResponse::BadRequest(PlainText(
                "from and id are required".to_string(),
            ));
        }
        let message_id = message.id.clone();
        debug!(message_id = %message_id, ?route, "message event accepted");

        let classifier = Arc::clone(&self.state.classifier);
        tokio::spawn(async move { classifier.handle(message).await });

        EventResponse::Accepted(Json(EventAcceptedDto { message_id, route }))
    }
}
