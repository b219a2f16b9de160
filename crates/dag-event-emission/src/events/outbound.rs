//! Outbound notifications (published)

use crate::domain::{Event, EventHash, LogicalClock, PeerId};
use chrono::{DateTime, Utc};
use serde::Serialize;
use std::sync::Arc;
use uuid::Uuid;

/// Notification: an event was signed and persisted
///
/// Gossip subscribes to these to disseminate the event; the full event is
/// shared rather than copied per subscriber.
#[derive(Clone, Debug, Serialize)]
pub struct EventEmitted {
    /// Notification version
    pub version: u16,

    /// Correlates log lines of one emission
    pub correlation_id: Uuid,

    /// Hash of the emitted event
    pub event_hash: EventHash,

    /// Creator (the local node)
    pub creator: PeerId,

    /// Event index
    pub index: u64,

    /// Event logical clock
    pub logical_clock: LogicalClock,

    /// Number of parents referenced
    pub parent_count: usize,

    /// Number of client transactions carried
    pub transaction_count: usize,

    /// Wall-clock emission time
    pub emitted_at: DateTime<Utc>,

    /// The event
    #[serde(skip)]
    pub event: Arc<Event>,
}

impl EventEmitted {
    /// Describe a freshly persisted event.
    pub fn new(event: Arc<Event>, event_hash: EventHash) -> Self {
        Self {
            version: 1,
            correlation_id: Uuid::new_v4(),
            event_hash,
            creator: event.creator(),
            index: event.index(),
            logical_clock: event.logical_clock(),
            parent_count: event.parents().len(),
            transaction_count: event.external_transactions().len(),
            emitted_at: Utc::now(),
            event,
        }
    }

    /// Single-line JSON record for structured logs.
    pub fn to_log_json(&self) -> serde_json::Value {
        serde_json::json!({
            "timestamp": self.emitted_at.to_rfc3339_opts(chrono::SecondsFormat::Micros, true),
            "event_type": "EventEmitted",
            "correlation_id": self.correlation_id.to_string(),
            "event_hash": hex::encode(self.event_hash.as_bytes()),
            "creator": hex::encode(self.creator.as_bytes()),
            "index": self.index,
            "logical_clock": self.logical_clock,
            "parent_count": self.parent_count,
            "transaction_count": self.transaction_count,
        })
    }
}
