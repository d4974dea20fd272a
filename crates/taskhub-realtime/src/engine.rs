//! Assembly point for the broadcast subsystems.

use std::sync::Arc;

use tokio::sync::broadcast;
use tracing::info;

use taskhub_core::config::realtime::RealtimeConfig;

use crate::channel::registry::ChannelRegistry;
use crate::connection::authorizer::{AllowAll, JoinAuthorizer};
use crate::connection::manager::ConnectionManager;
use crate::feed::ChangeFeed;
use crate::metrics::RealtimeMetrics;
use crate::publish::EventPublisher;

/// Central real-time engine that coordinates the broadcast subsystems.
///
/// Constructed once at startup; consumers receive the shared `Arc`s by
/// injection. There is no global instance, so using the engine before
/// it exists is unrepresentable.
#[derive(Clone)]
pub struct RealtimeEngine {
    pub connections: Arc<ConnectionManager>,
    pub channels: Arc<ChannelRegistry>,
    pub publisher: Arc<EventPublisher>,
    /// Entry point for the mutation layer.
    pub feed: Arc<ChangeFeed>,
    pub metrics: Arc<RealtimeMetrics>,
    shutdown_tx: broadcast::Sender<()>,
}

impl std::fmt::Debug for RealtimeEngine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RealtimeEngine").finish()
    }
}

impl RealtimeEngine {
    /// Engine with the default allow-all join policy.
    pub fn new(config: RealtimeConfig) -> Self {
        Self::with_authorizer(config, Arc::new(AllowAll))
    }

    /// Engine with an injected join admission policy.
    pub fn with_authorizer(config: RealtimeConfig, authorizer: Arc<dyn JoinAuthorizer>) -> Self {
        let (shutdown_tx, _) = broadcast::channel(1);

        let metrics = Arc::new(RealtimeMetrics::new());
        let channels = Arc::new(ChannelRegistry::new());
        let connections = Arc::new(ConnectionManager::new(
            config,
            channels.clone(),
            authorizer,
            metrics.clone(),
        ));
        let publisher = Arc::new(EventPublisher::new(
            channels.clone(),
            connections.pool().clone(),
            metrics.clone(),
        ));
        let feed = Arc::new(ChangeFeed::new(publisher.clone()));

        info!("Realtime subsystems wired");

        Self {
            connections,
            channels,
            publisher,
            feed,
            metrics,
            shutdown_tx,
        }
    }

    /// Fresh receiver on the shutdown channel. Connection tasks select
    /// on it alongside their sockets.
    pub fn shutdown_receiver(&self) -> broadcast::Receiver<()> {
        self.shutdown_tx.subscribe()
    }

    /// Shuts the engine down: signals every connection task, then
    /// closes all connections and clears their memberships.
    pub fn shutdown(&self) {
        info!("Realtime engine stopping");
        let _ = self.shutdown_tx.send(());
        self.connections.close_all();
        info!("Realtime engine stopped");
    }
}
