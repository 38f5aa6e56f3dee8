pub mod inbound;
pub mod message_kind;
pub mod payload;
pub mod queue;

pub use inbound::InboundMessage;
pub use message_kind::{DeliveryClass, MessageKind};
pub use payload::OutboundPayload;
pub use queue::QueueEntry;
