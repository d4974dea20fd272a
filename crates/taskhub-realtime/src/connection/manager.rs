//! Connection manager for the connection lifecycle and inbound routing.

use std::sync::Arc;

use tokio::sync::mpsc;
use tracing::{debug, info, warn};

use taskhub_core::config::realtime::RealtimeConfig;
use taskhub_core::types::WorkspaceKey;

use crate::channel::registry::ChannelRegistry;
use crate::message::types::{ClientMessage, error_frame};
use crate::metrics::RealtimeMetrics;

use super::authorizer::JoinAuthorizer;
use super::handle::{ConnectionHandle, ConnectionId};
use super::pool::ConnectionPool;

/// Lifecycle owner for every open connection.
///
/// Owns the pool of connection handles and applies the room membership
/// effects of inbound client messages. Disconnection is idempotent:
/// the pool removal is the linearization point, and only the winner of
/// a duplicate unregister performs room cleanup.
pub struct ConnectionManager {
    pool: Arc<ConnectionPool>,
    channels: Arc<ChannelRegistry>,
    authorizer: Arc<dyn JoinAuthorizer>,
    metrics: Arc<RealtimeMetrics>,
    config: RealtimeConfig,
}

impl std::fmt::Debug for ConnectionManager {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ConnectionManager")
            .field("connections", &self.pool.connection_count())
            .finish()
    }
}

impl ConnectionManager {
    pub fn new(
        config: RealtimeConfig,
        channels: Arc<ChannelRegistry>,
        authorizer: Arc<dyn JoinAuthorizer>,
        metrics: Arc<RealtimeMetrics>,
    ) -> Self {
        Self {
            pool: Arc::new(ConnectionPool::new()),
            channels,
            authorizer,
            metrics,
            config,
        }
    }

    /// Registers a new connection with no room memberships.
    ///
    /// Returns the connection handle and the receiver for its outbound
    /// frame queue; the transport layer drains the receiver onto the
    /// socket.
    pub fn register(&self) -> (Arc<ConnectionHandle>, mpsc::Receiver<String>) {
        let (tx, rx) = mpsc::channel(self.config.channel_buffer_size);
        let handle = Arc::new(ConnectionHandle::new(tx));

        self.pool.add(handle.clone());
        self.metrics.connection_opened();

        info!(conn_id = %handle.id, "Connection opened");

        (handle, rx)
    }

    /// Unregisters a connection and clears its room memberships.
    ///
    /// Safe to call more than once; duplicate calls are no-ops.
    pub fn unregister(&self, conn_id: &ConnectionId) {
        if let Some(handle) = self.pool.remove(conn_id) {
            handle.mark_closed();
            let rooms_left = self.channels.drop_connection(*conn_id);
            self.metrics.connection_closed();

            info!(conn_id = %conn_id, rooms_left, "Connection closed");
        }
    }

    /// Applies one raw inbound frame from a client socket.
    pub async fn handle_inbound(&self, conn_id: &ConnectionId, raw_message: &str) {
        let Some(handle) = self.pool.get(conn_id) else {
            warn!(conn_id = %conn_id, "Frame from unregistered connection");
            return;
        };

        let msg: ClientMessage = match serde_json::from_str(raw_message) {
            Ok(m) => m,
            Err(e) => {
                warn!(conn_id = %conn_id, error = %e, "Malformed client message");
                handle.send(error_frame(
                    "INVALID_MESSAGE",
                    &format!("Cannot parse message: {e}"),
                ));
                return;
            }
        };

        match msg {
            ClientMessage::JoinWorkspace { workspace } => {
                self.handle_join(&handle, workspace).await;
            }
        }

        self.metrics.message_received();
    }

    /// Handles a workspace join request through the admission policy.
    async fn handle_join(&self, handle: &ConnectionHandle, workspace: WorkspaceKey) {
        if !self.authorizer.can_join(handle.id, workspace).await {
            warn!(
                conn_id = %handle.id,
                workspace = %workspace,
                "Join rejected by admission policy"
            );
            handle.send(error_frame(
                "FORBIDDEN",
                &format!("Not authorized to join workspace: {workspace}"),
            ));
            return;
        }

        self.channels.join(handle.id, workspace);

        debug!(
            conn_id = %handle.id,
            workspace = %workspace,
            "Joined workspace room"
        );
    }

    /// Closes all connections and clears their memberships.
    pub fn close_all(&self) {
        let all = self.pool.all_connections();
        for conn in &all {
            conn.mark_closed();
            self.pool.remove(&conn.id);
            self.channels.drop_connection(conn.id);
        }
        info!(count = all.len(), "Closed every connection");
    }

    /// Number of open connections.
    pub fn connection_count(&self) -> usize {
        self.pool.connection_count()
    }

    /// Shared pool, for wiring the publisher.
    pub fn pool(&self) -> &Arc<ConnectionPool> {
        &self.pool
    }
}
