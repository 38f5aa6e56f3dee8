use std::sync::Arc;

use poem_openapi::Tags;

use crate::{
    application::{
        handlers::{media_queue::MediaDeliveryQueue, message_classifier::MessageClassifier},
        services::session::SessionProvider,
    },
    domain::value_objects::DestinationSet,
};

#[derive(Clone)]
pub struct ApiState {
    pub classifier: Arc<MessageClassifier>,
    pub queue: Arc<MediaDeliveryQueue>,
    pub session: Arc<dyn SessionProvider>,
    pub destinations: DestinationSet,
}

/// Enum of API sections (tags)
#[derive(Tags)]
pub enum EndpointsTags {
    Health,
    Events,
    Queue,
}
