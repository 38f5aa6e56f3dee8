use chrono::{DateTime, Utc};
use uuid::Uuid;

use super::payload::OutboundPayload;
use crate::domain::value_objects::DestinationSet;

/// A media payload waiting for throttled delivery.
#[derive(Debug, Clone)]
pub struct QueueEntry {
    pub id: Uuid,
    pub payload: OutboundPayload,
    pub destinations: DestinationSet,
    pub enqueued_at: DateTime<Utc>,
}

impl QueueEntry {
    pub fn new(payload: OutboundPayload, destinations: DestinationSet) -> Self {
        Self {
            id: Uuid::new_v4(),
            payload,
            destinations,
            enqueued_at: Utc::now(),
        }
    }
}
