//! Event publisher that fans a typed event out to every live room member.

use std::sync::Arc;

use tracing::{debug, error};

use taskhub_core::types::WorkspaceKey;

use crate::channel::registry::ChannelRegistry;
use crate::connection::pool::ConnectionPool;
use crate::message::types::WorkspaceEvent;
use crate::metrics::RealtimeMetrics;

/// Publishes workspace events to room members.
///
/// `publish` serializes the event once, snapshots the room's member
/// set at call time, and attempts one non-blocking queue push per
/// member. A member that disconnects or overflows its queue loses that
/// frame only; the loop never retries and never blocks, so the caller
/// returns as soon as every snapshotted member has had its attempt.
#[derive(Debug)]
pub struct EventPublisher {
    channels: Arc<ChannelRegistry>,
    pool: Arc<ConnectionPool>,
    metrics: Arc<RealtimeMetrics>,
}

impl EventPublisher {
    /// Creates a new publisher.
    pub fn new(
        channels: Arc<ChannelRegistry>,
        pool: Arc<ConnectionPool>,
        metrics: Arc<RealtimeMetrics>,
    ) -> Self {
        Self {
            channels,
            pool,
            metrics,
        }
    }

    /// Broadcasts an event to every member of a workspace room.
    ///
    /// Publishing to a workspace with no room is a no-op. Returns the
    /// number of members whose queue accepted the frame.
    pub fn publish(&self, key: WorkspaceKey, event: &WorkspaceEvent) -> usize {
        let frame = match serde_json::to_string(event) {
            Ok(f) => f,
            Err(e) => {
                error!(error = %e, kind = event.kind(), "Failed to serialize event");
                return 0;
            }
        };

        let members = self.channels.members_of(key);
        let mut delivered = 0usize;

        for conn_id in &members {
            let Some(handle) = self.pool.get(conn_id) else {
                // Disconnected between snapshot and send.
                self.metrics.frame_dropped();
                continue;
            };
            if handle.send(frame.clone()) {
                delivered += 1;
            } else {
                self.metrics.frame_dropped();
            }
        }

        self.metrics.event_published();
        self.metrics.frames_delivered(delivered as u64);

        debug!(
            workspace = %key,
            kind = event.kind(),
            members = members.len(),
            delivered,
            "Event published"
        );

        delivered
    }
}

#[cfg(test)]
mod tests {
    use tokio::sync::mpsc;

    use taskhub_core::config::realtime::RealtimeConfig;
    use taskhub_core::types::TaskId;

    use crate::connection::authorizer::AllowAll;
    use crate::connection::handle::ConnectionHandle;
    use crate::connection::manager::ConnectionManager;
    use crate::message::record::TaskStatus;

    use super::*;

    const WS: WorkspaceKey = WorkspaceKey(1001);

    fn status_event() -> WorkspaceEvent {
        WorkspaceEvent::TaskStatusChanged {
            task_id: TaskId::new(),
            status: TaskStatus::Completed,
        }
    }

    fn setup() -> (ConnectionManager, EventPublisher, Arc<ChannelRegistry>) {
        let channels = Arc::new(ChannelRegistry::new());
        let metrics = Arc::new(RealtimeMetrics::new());
        let manager = ConnectionManager::new(
            RealtimeConfig::default(),
            channels.clone(),
            Arc::new(AllowAll),
            metrics.clone(),
        );
        let publisher = EventPublisher::new(channels.clone(), manager.pool().clone(), metrics);
        (manager, publisher, channels)
    }

    #[tokio::test]
    async fn test_publish_reaches_each_member_once() {
        let (manager, publisher, channels) = setup();
        let (a, mut rx_a) = manager.register();
        let (b, mut rx_b) = manager.register();

        channels.join(a.id, WS);
        channels.join(b.id, WS);

        let delivered = publisher.publish(WS, &status_event());
        assert_eq!(delivered, 2);

        for rx in [&mut rx_a, &mut rx_b] {
            let frame = rx.try_recv().expect("one frame queued");
            assert!(frame.contains("task:status"));
            assert!(rx.try_recv().is_err());
        }
    }

    #[tokio::test]
    async fn test_non_member_receives_nothing() {
        let (manager, publisher, channels) = setup();
        let (member, mut rx_member) = manager.register();
        let (outsider, mut rx_outsider) = manager.register();

        channels.join(member.id, WS);
        channels.join(outsider.id, WorkspaceKey(1002));

        publisher.publish(WS, &status_event());

        assert!(rx_member.try_recv().is_ok());
        assert!(rx_outsider.try_recv().is_err());
    }

    #[tokio::test]
    async fn test_publish_to_empty_room_is_noop() {
        let (_manager, publisher, _channels) = setup();
        assert_eq!(publisher.publish(WS, &status_event()), 0);
    }

    #[tokio::test]
    async fn test_one_dead_member_does_not_block_the_rest() {
        let (manager, publisher, channels) = setup();
        let (alive, mut rx_alive) = manager.register();
        let (dead, rx_dead) = manager.register();

        channels.join(alive.id, WS);
        channels.join(dead.id, WS);
        drop(rx_dead);

        let delivered = publisher.publish(WS, &status_event());

        assert_eq!(delivered, 1);
        assert!(rx_alive.try_recv().is_ok());
        assert!(!dead.is_alive());
    }

    #[tokio::test]
    async fn test_full_queue_drops_frame_for_that_member_only() {
        let (manager, publisher, channels) = setup();
        let (fast, mut rx_fast) = manager.register();

        // A one-slot queue that is never drained.
        let (tx, _rx_slow) = mpsc::channel(1);
        let slow = Arc::new(ConnectionHandle::new(tx));
        manager.pool().add(slow.clone());
        assert!(slow.send("backlog".to_string()));

        channels.join(fast.id, WS);
        channels.join(slow.id, WS);

        let delivered = publisher.publish(WS, &status_event());

        assert_eq!(delivered, 1);
        assert!(rx_fast.try_recv().is_ok());
        assert!(slow.is_alive());
    }

    #[tokio::test]
    async fn test_publish_after_disconnect_is_noop() {
        let (manager, publisher, channels) = setup();
        let (conn, mut rx) = manager.register();

        channels.join(conn.id, WS);
        manager.unregister(&conn.id);

        assert_eq!(publisher.publish(WS, &status_event()), 0);
        assert!(rx.try_recv().is_err());
    }

    #[tokio::test]
    async fn test_frames_arrive_in_publish_order() {
        let (manager, publisher, channels) = setup();
        let (conn, mut rx) = manager.register();
        channels.join(conn.id, WS);

        let first = WorkspaceEvent::TaskDeleted {
            task_id: TaskId::new(),
        };
        publisher.publish(WS, &first);
        publisher.publish(WS, &status_event());

        let frame1 = rx.try_recv().expect("first frame");
        let frame2 = rx.try_recv().expect("second frame");
        assert!(frame1.contains("task:deleted"));
        assert!(frame2.contains("task:status"));
    }
}
