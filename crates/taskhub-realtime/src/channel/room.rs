//! Single workspace room with member tracking.

use std::collections::HashSet;

use taskhub_core::types::WorkspaceKey;

use crate::connection::handle::ConnectionId;

/// A single workspace room with a set of member connections.
#[derive(Debug, Clone)]
pub struct Room {
    /// Public workspace number this room broadcasts for.
    pub key: WorkspaceKey,
    /// Set of member connection IDs.
    pub members: HashSet<ConnectionId>,
}

impl Room {
    /// Creates a new empty room.
    pub fn new(key: WorkspaceKey) -> Self {
        Self {
            key,
            members: HashSet::new(),
        }
    }

    /// Adds a member.
    pub fn insert(&mut self, conn_id: ConnectionId) {
        self.members.insert(conn_id);
    }

    /// Removes a member.
    pub fn remove(&mut self, conn_id: ConnectionId) {
        self.members.remove(&conn_id);
    }

    /// Returns member count.
    pub fn member_count(&self) -> usize {
        self.members.len()
    }

    /// Returns whether the room has any members.
    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }

    /// Returns all member connection IDs.
    pub fn snapshot(&self) -> Vec<ConnectionId> {
        self.members.iter().copied().collect()
    }
}
