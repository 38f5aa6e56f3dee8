pub mod media_queue;
pub mod message_classifier;
