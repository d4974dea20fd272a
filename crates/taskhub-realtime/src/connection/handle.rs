//! Per-connection send handle.

use std::sync::atomic::{AtomicBool, Ordering};

use chrono::{DateTime, Utc};
use tokio::sync::mpsc;
use uuid::Uuid;

/// Unique connection identifier.
pub type ConnectionId = Uuid;

/// Send side of one client connection.
///
/// Holds the bounded sender for the connection's outbound frame queue.
/// A forwarder task owned by the transport layer drains the matching
/// receiver onto the socket, so publishing to a slow client never
/// blocks the caller.
#[derive(Debug)]
pub struct ConnectionHandle {
    pub id: ConnectionId,
    sender: mpsc::Sender<String>,
    pub connected_at: DateTime<Utc>,
    alive: AtomicBool,
}

impl ConnectionHandle {
    /// Create a new connection handle with a fresh ID.
    pub fn new(sender: mpsc::Sender<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            sender,
            connected_at: Utc::now(),
            alive: AtomicBool::new(true),
        }
    }

    /// Queue a frame for delivery to this connection.
    ///
    /// Non-blocking: a full queue drops the frame for this connection
    /// only, and a closed queue marks the connection dead. Returns
    /// whether the frame was queued.
    pub fn send(&self, frame: String) -> bool {
        if !self.is_alive() {
            return false;
        }
        match self.sender.try_send(frame) {
            Ok(()) => true,
            Err(mpsc::error::TrySendError::Full(_)) => {
                tracing::warn!(conn_id = %self.id, "Outbound queue full, dropping frame");
                false
            }
            Err(mpsc::error::TrySendError::Closed(_)) => {
                self.mark_closed();
                false
            }
        }
    }

    /// Check if the connection is alive.
    pub fn is_alive(&self) -> bool {
        self.alive.load(Ordering::SeqCst)
    }

    /// Mark the connection as closed; later sends become no-ops.
    pub fn mark_closed(&self) {
        self.alive.store(false, Ordering::SeqCst);
    }
}
