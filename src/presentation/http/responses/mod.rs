use poem_openapi::Object;

use crate::presentation::models::DeliveryRouteKind;

#[derive(Object)]
pub struct EventAcceptedDto {
    pub message_id: String,
    pub route: DeliveryRouteKind,
}

#[derive(Object)]
pub struct SessionStatusDto {
    pub connected: bool,
    pub error: Option<String>,
}

#[derive(Object)]
pub struct QueueStatusDto {
    pub pending: u64,
    pub draining: bool,
    pub oldest_enqueued_at: Option<String>,
    pub cooldown_seconds: u64,
}

#[derive(Object)]
pub struct WebhookDestinationsDto {
    pub urls: Vec<String>,
}
