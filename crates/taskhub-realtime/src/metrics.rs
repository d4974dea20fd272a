//! Cumulative counters for the stats route.

use std::sync::atomic::{AtomicU64, Ordering};

use serde::{Deserialize, Serialize};

/// Counters the engine bumps as it works.
#[derive(Debug, Default)]
pub struct RealtimeMetrics {
    /// Total connections established.
    connections_opened: AtomicU64,
    /// Total connections closed.
    connections_closed: AtomicU64,
    /// Total inbound client messages processed.
    messages_received: AtomicU64,
    /// Total events published to rooms.
    events_published: AtomicU64,
    /// Total frames queued for delivery.
    frames_delivered: AtomicU64,
    /// Total frames dropped (full queue or dead connection).
    frames_dropped: AtomicU64,
}

impl RealtimeMetrics {
    /// Create new zeroed metrics.
    pub fn new() -> Self {
        Self::default()
    }

    /// Record an established connection.
    pub fn connection_opened(&self) {
        self.connections_opened.fetch_add(1, Ordering::Relaxed);
    }

    /// Record a closed connection.
    pub fn connection_closed(&self) {
        self.connections_closed.fetch_add(1, Ordering::Relaxed);
    }

    /// Record a processed inbound message.
    pub fn message_received(&self) {
        self.messages_received.fetch_add(1, Ordering::Relaxed);
    }

    /// Record a published event.
    pub fn event_published(&self) {
        self.events_published.fetch_add(1, Ordering::Relaxed);
    }

    /// Record `count` frames queued for delivery.
    pub fn frames_delivered(&self, count: u64) {
        self.frames_delivered.fetch_add(count, Ordering::Relaxed);
    }

    /// Record a dropped frame.
    pub fn frame_dropped(&self) {
        self.frames_dropped.fetch_add(1, Ordering::Relaxed);
    }

    /// Get a snapshot of all counters.
    pub fn snapshot(&self) -> MetricsSnapshot {
        MetricsSnapshot {
            connections_opened: self.connections_opened.load(Ordering::Relaxed),
            connections_closed: self.connections_closed.load(Ordering::Relaxed),
            messages_received: self.messages_received.load(Ordering::Relaxed),
            events_published: self.events_published.load(Ordering::Relaxed),
            frames_delivered: self.frames_delivered.load(Ordering::Relaxed),
            frames_dropped: self.frames_dropped.load(Ordering::Relaxed),
        }
    }
}

/// Serializable metrics snapshot.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MetricsSnapshot {
    /// Total connections ever established.
    pub connections_opened: u64,
    /// Total connections closed.
    pub connections_closed: u64,
    /// Total inbound client messages processed.
    pub messages_received: u64,
    /// Total events published to rooms.
    pub events_published: u64,
    /// Total frames queued for delivery.
    pub frames_delivered: u64,
    /// Total frames dropped.
    pub frames_dropped: u64,
}
