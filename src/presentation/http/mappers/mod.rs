use crate::{
    application::handlers::media_queue::QueueSnapshot,
    domain::models::{InboundMessage, MessageKind},
    presentation::http::{requests::InboundMessageDto, responses::QueueStatusDto},
};

pub fn map_inbound(dto: InboundMessageDto) -> InboundMessage {
    InboundMessage {
        from: dto.from,
        id: dto.id,
        kind: MessageKind::from(dto.message_type),
        body: dto.body,
        mimetype: dto.mimetype,
        filename: dto.filename,
        caption: dto.caption,
        timestamp: dto.timestamp,
        from_me: dto.from_me,
        is_group_msg: dto.is_group_msg,
    }
}

pub fn map_queue(snapshot: &QueueSnapshot) -> QueueStatusDto {
    QueueStatusDto {
        pending: u64::try_from(snapshot.pending).unwrap_or(u64::MAX),
        draining: snapshot.draining,
        oldest_enqueued_at: snapshot.oldest_enqueued_at.map(|at| at.to_rfc3339()),
        cooldown_seconds: snapshot.cooldown.as_secs(),
    }
}
