use std::sync::Arc;

use poem_openapi::{OpenApi, payload::Json};

use crate::presentation::http::{
    endpoints::root::{ApiState, EndpointsTags},
    mappers::map_queue,
    responses::{QueueStatusDto, WebhookDestinationsDto},
};

#[derive(Clone)]
pub struct QueueEndpoints {
    state: Arc<ApiState>,
}

impl QueueEndpoints {
    pub fn new(state: Arc<ApiState>) -> Self {
        Self { state }
    }
}

#[OpenApi]
impl QueueEndpoints {
    #[oai(path = "/queue", method = "get", tag = EndpointsTags::Queue)]
    pub async fn queue_status(&self) -> Json<QueueStatusDto> {
        Json(map_queue(&self.state.queue.snapshot().await))
    }

    #[oai(path = "/webhooks", method = "get", tag = EndpointsTags::Queue)]
    pub async fn webhooks(&self) -> Json<WebhookDestinationsDto> {
        Json(WebhookDestinationsDto {
            urls: self.state.destinations.urls().to_vec(),
        })
    }
}
