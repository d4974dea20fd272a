//! Join admission policy for workspace rooms.

use async_trait::async_trait;

use taskhub_core::types::WorkspaceKey;

use super::handle::ConnectionId;

/// Decides whether a connection may join a workspace room.
///
/// The decision point is injectable so a deployment can back it with a
/// real membership lookup. Room joins carry no credentials of their
/// own; whatever identity a policy needs must come from state it holds.
#[async_trait]
pub trait JoinAuthorizer: Send + Sync {
    /// Returns whether `conn_id` may join the room for `workspace`.
    async fn can_join(&self, conn_id: ConnectionId, workspace: WorkspaceKey) -> bool;
}

/// Default policy: every connection may join every workspace room.
///
/// Mirrors the trust model of the upstream REST layer, which checks
/// membership before handing out workspace numbers.
#[derive(Debug, Clone, Copy, Default)]
pub struct AllowAll;

#[async_trait]
impl JoinAuthorizer for AllowAll {
    async fn can_join(&self, _conn_id: ConnectionId, _workspace: WorkspaceKey) -> bool {
        true
    }
}
