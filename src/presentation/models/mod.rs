use poem_openapi::Enum;

use crate::domain::models::{DeliveryClass, InboundMessage};

/// Path an accepted message event will take.
#[derive(Enum, Copy, Clone, Debug, Eq, PartialEq)]
pub enum DeliveryRouteKind {
    #[oai(rename = "dropped")]
    Dropped,
    #[oai(rename = "instant")]
    Instant,
    #[oai(rename = "queued")]
    Queued,
}

impl From<&InboundMessage> for DeliveryRouteKind {
    fn from(value: &InboundMessage) -> Self {
        if value.is_ignored() {
            return DeliveryRouteKind::Dropped;
        }
        match value.kind.delivery_class() {
            DeliveryClass::Ignored => DeliveryRouteKind::Dropped,
            DeliveryClass::Instant | DeliveryClass::Unclassified => DeliveryRouteKind::Instant,
            DeliveryClass::Media => DeliveryRouteKind::Queued,
        }
    }
}
