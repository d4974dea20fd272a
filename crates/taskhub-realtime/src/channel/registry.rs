//! Channel registry mapping workspace keys to member connections.

use std::collections::{HashMap, HashSet};
use std::sync::{Mutex, MutexGuard, PoisonError};

use taskhub_core::types::WorkspaceKey;

use crate::connection::handle::ConnectionId;

use super::room::Room;

/// Dual-index membership table guarded by the registry mutex.
///
/// The forward index (`rooms`) answers "who is in workspace K" during
/// fan-out; the reverse index (`memberships`) answers "which rooms does
/// connection C hold" during disconnect. Both indexes are updated inside
/// the same critical section, so a connection appears in a room's member
/// set exactly when the room's key appears in the connection's
/// membership set.
#[derive(Debug, Default)]
struct RoomTable {
    /// Workspace key → room.
    rooms: HashMap<WorkspaceKey, Room>,
    /// Connection ID → joined workspace keys (reverse index).
    memberships: HashMap<ConnectionId, HashSet<WorkspaceKey>>,
}

/// Registry of all active workspace rooms.
///
/// Rooms are created lazily on first join and dropped when their last
/// member leaves. All operations are total: joining twice, leaving a
/// room never joined, or reading an absent key are no-ops or empty
/// results, never errors.
#[derive(Debug, Default)]
pub struct ChannelRegistry {
    table: Mutex<RoomTable>,
}

impl ChannelRegistry {
    /// Creates a new empty registry.
    pub fn new() -> Self {
        Self {
            table: Mutex::new(RoomTable::default()),
        }
    }

    /// Mutations never panic while holding the lock, so a poisoned
    /// mutex still guards a consistent table.
    fn table(&self) -> MutexGuard<'_, RoomTable> {
        self.table.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Adds a connection to a workspace room, creating the room if needed.
    pub fn join(&self, conn_id: ConnectionId, key: WorkspaceKey) {
        let mut table = self.table();
        table
            .rooms
            .entry(key)
            .or_insert_with(|| Room::new(key))
            .insert(conn_id);
        table.memberships.entry(conn_id).or_default().insert(key);
    }

    /// Removes a connection from a workspace room.
    pub fn leave(&self, conn_id: ConnectionId, key: WorkspaceKey) {
        let mut table = self.table();
        if let Some(room) = table.rooms.get_mut(&key) {
            room.remove(conn_id);
            if room.is_empty() {
                table.rooms.remove(&key);
            }
        }
        if let Some(keys) = table.memberships.get_mut(&conn_id) {
            keys.remove(&key);
            if keys.is_empty() {
                table.memberships.remove(&conn_id);
            }
        }
    }

    /// Removes a connection from every room it has joined.
    ///
    /// Returns the number of rooms the connection was removed from.
    pub fn drop_connection(&self, conn_id: ConnectionId) -> usize {
        let mut table = self.table();
        let Some(keys) = table.memberships.remove(&conn_id) else {
            return 0;
        };
        for key in &keys {
            if let Some(room) = table.rooms.get_mut(key) {
                room.remove(conn_id);
                if room.is_empty() {
                    table.rooms.remove(key);
                }
            }
        }
        keys.len()
    }

    /// Returns a snapshot of all member connection IDs for a workspace.
    ///
    /// The snapshot is taken under the lock; concurrent joins or leaves
    /// land strictly before or strictly after it.
    pub fn members_of(&self, key: WorkspaceKey) -> Vec<ConnectionId> {
        self.table()
            .rooms
            .get(&key)
            .map(|room| room.snapshot())
            .unwrap_or_default()
    }

    /// Returns all workspace keys a connection has joined.
    pub fn memberships_of(&self, conn_id: ConnectionId) -> Vec<WorkspaceKey> {
        self.table()
            .memberships
            .get(&conn_id)
            .map(|keys| keys.iter().copied().collect())
            .unwrap_or_default()
    }

    /// Returns whether a connection is a member of a workspace room.
    pub fn is_member(&self, conn_id: ConnectionId, key: WorkspaceKey) -> bool {
        self.table()
            .rooms
            .get(&key)
            .is_some_and(|room| room.members.contains(&conn_id))
    }

    /// Returns member count for a workspace room.
    pub fn member_count(&self, key: WorkspaceKey) -> usize {
        self.table()
            .rooms
            .get(&key)
            .map(|room| room.member_count())
            .unwrap_or(0)
    }

    /// Returns total number of active rooms.
    pub fn room_count(&self) -> usize {
        self.table().rooms.len()
    }
}

#[cfg(test)]
mod tests {
    use uuid::Uuid;

    use super::*;

    const WS: WorkspaceKey = WorkspaceKey(1001);
    const OTHER: WorkspaceKey = WorkspaceKey(1002);

    #[test]
    fn test_join_creates_room_lazily() {
        let registry = ChannelRegistry::new();
        assert_eq!(registry.room_count(), 0);

        let conn = Uuid::new_v4();
        registry.join(conn, WS);

        assert_eq!(registry.room_count(), 1);
        assert_eq!(registry.members_of(WS), vec![conn]);
        assert_eq!(registry.memberships_of(conn), vec![WS]);
    }

    #[test]
    fn test_join_is_idempotent() {
        let registry = ChannelRegistry::new();
        let conn = Uuid::new_v4();

        registry.join(conn, WS);
        registry.join(conn, WS);

        assert_eq!(registry.member_count(WS), 1);
        assert_eq!(registry.memberships_of(conn).len(), 1);
    }

    #[test]
    fn test_leave_removes_both_indexes() {
        let registry = ChannelRegistry::new();
        let conn = Uuid::new_v4();

        registry.join(conn, WS);
        registry.leave(conn, WS);

        assert!(!registry.is_member(conn, WS));
        assert!(registry.memberships_of(conn).is_empty());
    }

    #[test]
    fn test_leave_without_join_is_noop() {
        let registry = ChannelRegistry::new();
        let conn = Uuid::new_v4();

        registry.leave(conn, WS);
        registry.leave(conn, WS);

        assert_eq!(registry.room_count(), 0);
        assert!(registry.memberships_of(conn).is_empty());
    }

    #[test]
    fn test_empty_room_is_dropped() {
        let registry = ChannelRegistry::new();
        let a = Uuid::new_v4();
        let b = Uuid::new_v4();

        registry.join(a, WS);
        registry.join(b, WS);
        registry.leave(a, WS);
        assert_eq!(registry.room_count(), 1);

        registry.leave(b, WS);
        assert_eq!(registry.room_count(), 0);
    }

    #[test]
    fn test_drop_connection_clears_all_memberships() {
        let registry = ChannelRegistry::new();
        let conn = Uuid::new_v4();
        let stays = Uuid::new_v4();

        registry.join(conn, WS);
        registry.join(conn, OTHER);
        registry.join(stays, WS);

        let removed = registry.drop_connection(conn);

        assert_eq!(removed, 2);
        assert!(registry.memberships_of(conn).is_empty());
        assert!(!registry.is_member(conn, WS));
        assert!(!registry.is_member(conn, OTHER));
        assert_eq!(registry.members_of(WS), vec![stays]);
        assert_eq!(registry.room_count(), 1);
    }

    #[test]
    fn test_drop_connection_twice_is_noop() {
        let registry = ChannelRegistry::new();
        let conn = Uuid::new_v4();

        registry.join(conn, WS);
        assert_eq!(registry.drop_connection(conn), 1);
        assert_eq!(registry.drop_connection(conn), 0);
    }

    #[test]
    fn test_members_of_absent_key_is_empty() {
        let registry = ChannelRegistry::new();
        assert!(registry.members_of(WS).is_empty());
        assert_eq!(registry.member_count(WS), 0);
    }

    #[test]
    fn test_members_of_returns_independent_snapshot() {
        let registry = ChannelRegistry::new();
        let conn = Uuid::new_v4();

        registry.join(conn, WS);
        let snapshot = registry.members_of(WS);
        registry.leave(conn, WS);

        assert_eq!(snapshot, vec![conn]);
        assert!(registry.members_of(WS).is_empty());
    }

    #[test]
    fn test_membership_symmetry_under_interleaving() {
        let registry = ChannelRegistry::new();
        let a = Uuid::new_v4();
        let b = Uuid::new_v4();

        registry.join(a, WS);
        registry.join(b, WS);
        registry.join(a, OTHER);
        registry.leave(b, WS);
        registry.join(b, OTHER);

        for conn in [a, b] {
            for key in [WS, OTHER] {
                let forward = registry.members_of(key).contains(&conn);
                let reverse = registry.memberships_of(conn).contains(&key);
                assert_eq!(forward, reverse);
            }
        }
    }
}
