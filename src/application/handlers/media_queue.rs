use std::collections::VecDeque;
use std::sync::{
    Arc,
    atomic::{AtomicBool, Ordering},
};
use std::time::Duration;

use chrono::{DateTime, Utc};
use tokio::{sync::Mutex, task::JoinHandle};
use tracing::{debug, info};

use crate::{
    application::services::{delay, webhook::WebhookDispatcher},
    domain::models::QueueEntry,
};

pub const DEFAULT_MEDIA_COOLDOWN: Duration = Duration::from_secs(15);

#[derive(Debug, Clone)]
pub struct QueueSnapshot {
    pub pending: usize,
    pub draining: bool,
    pub oldest_enqueued_at: Option<DateTime<Utc>>,
    pub cooldown: Duration,
}

/// FIFO of media payloads delivered one entry at a time, with a cooldown
/// between entries. Only one drain task runs at any moment.
pub struct MediaDeliveryQueue {
    entries: Mutex<VecDeque<QueueEntry>>,
    draining: AtomicBool,
    dispatcher: WebhookDispatcher,
    cooldown: Duration,
}

impl MediaDeliveryQueue {
    pub fn new(dispatcher: WebhookDispatcher, cooldown: Duration) -> Arc<Self> {
        Arc::new(Self {
            entries: Mutex::new(VecDeque::new()),
            draining: AtomicBool::new(false),
            dispatcher,
            cooldown,
        })
    }

    /// Appends an entry and returns the number of entries now waiting.
    pub async fn enqueue(&self, entry: QueueEntry) -> usize {
        let mut entries = self.entries.lock().await;
        debug!(entry_id = %entry.id, message_id = %entry.payload.id, "media entry queued");
        entries.push_back(entry);
        entries.len()
    }

    /// Spawns the drain task unless one is already running.
    pub fn try_start_drain(self: &Arc<Self>) -> Option<JoinHandle<()>> {
        if !self.claim() {
            return None;
        }
        let queue = Arc::clone(self);
        Some(tokio::spawn(queue.drain()))
    }

    pub fn is_draining(&self) -> bool {
        self.draining.load(Ordering::Acquire)
    }

    pub async fn snapshot(&self) -> QueueSnapshot {
        let entries = self.entries.lock().await;
        QueueSnapshot {
            pending: entries.len(),
            draining: self.is_draining(),
            oldest_enqueued_at: entries.front().map(|e| e.enqueued_at),
            cooldown: self.cooldown,
        }
    }

    fn claim(&self) -> bool {
        self.draining
            .compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .is_ok()
    }

    async fn pop_front(&self) -> Option<QueueEntry> {
        self.entries.lock().await.pop_front()
    }

    async fn drain(self: Arc<Self>) {
        info!("media queue drain started");
        loop {
            while let Some(entry) = self.pop_front().await {
                let report = self
                    .dispatcher
                    .dispatch_sequential(&entry.payload, &entry.destinations)
                    .await;
                info!(
                    entry_id = %entry.id,
                    message_id = %entry.payload.id,
                    delivered = report.delivered(),
                    failed = report.failed(),
                    "media entry processed"
                );
                info!(
                    cooldown_secs = self.cooldown.as_secs(),
                    "waiting before sending next media"
                );
                delay::sleep(self.cooldown).await;
            }

            if !self.release_or_reclaim().await {
                break;
            }
        }
        info!("media queue drained");
    }

    /// Gives up drain ownership, taking it back when an entry landed between
    /// the last empty check and the release. Returns whether draining goes on.
    async fn release_or_reclaim(&self) -> bool {
        self.draining.store(false, Ordering::Release);
        let has_pending = !self.entries.lock().await.is_empty();
        has_pending && self.claim()
    }

    #[cfg(test)]
    async fn pending_message_ids(&self) -> Vec<String> {
        self.entries
            .lock()
            .await
            .iter()
            .map(|e| e.payload.id.clone())
            .collect()
    }
}
