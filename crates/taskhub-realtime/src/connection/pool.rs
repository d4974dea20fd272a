//! Pool of live connection handles, keyed by connection ID.

use std::sync::Arc;

use dashmap::DashMap;

use super::handle::{ConnectionHandle, ConnectionId};

/// Lock-free map of every open connection.
///
/// Shared by the manager, which owns the lifecycle, and the publisher,
/// which resolves registry membership to handles at delivery time.
#[derive(Debug, Default)]
pub struct ConnectionPool {
    connections: DashMap<ConnectionId, Arc<ConnectionHandle>>,
}

impl ConnectionPool {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&self, handle: Arc<ConnectionHandle>) {
        self.connections.insert(handle.id, handle);
    }

    /// Removes and returns the handle, or `None` if another caller got
    /// there first. Idempotent unregistration hinges on this.
    pub fn remove(&self, conn_id: &ConnectionId) -> Option<Arc<ConnectionHandle>> {
        self.connections.remove(conn_id).map(|(_, handle)| handle)
    }

    pub fn get(&self, conn_id: &ConnectionId) -> Option<Arc<ConnectionHandle>> {
        self.connections
            .get(conn_id)
            .map(|found| Arc::clone(found.value()))
    }

    pub fn connection_count(&self) -> usize {
        self.connections.len()
    }

    /// Snapshot of every live handle.
    pub fn all_connections(&self) -> Vec<Arc<ConnectionHandle>> {
        self.connections
            .iter()
            .map(|entry| Arc::clone(entry.value()))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tokio::sync::mpsc;

    fn pooled_handle() -> Arc<ConnectionHandle> {
        let (tx, _rx) = mpsc::channel(1);
        Arc::new(ConnectionHandle::new(tx))
    }

    #[test]
    fn test_add_then_get() {
        let pool = ConnectionPool::new();
        let handle = pooled_handle();
        pool.add(Arc::clone(&handle));

        assert_eq!(pool.connection_count(), 1);
        let found = pool.get(&handle.id).expect("handle in pool");
        assert_eq!(found.id, handle.id);
    }

    #[test]
    fn test_first_remove_wins() {
        let pool = ConnectionPool::new();
        let handle = pooled_handle();
        pool.add(Arc::clone(&handle));

        assert!(pool.remove(&handle.id).is_some());
        assert!(pool.remove(&handle.id).is_none());
        assert_eq!(pool.connection_count(), 0);
    }
}
