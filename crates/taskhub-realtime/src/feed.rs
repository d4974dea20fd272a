//! Change feed that maps committed mutations to broadcast events.
//!
//! The mutation layer calls one method here after each successful
//! write, before answering its HTTP request. Every method derives the
//! room key from the mutation's workspace and builds the sanitized
//! payload; persistence never leaks through this seam.

use std::sync::Arc;

use taskhub_core::types::{TaskId, UserId, WorkspaceKey};

use crate::message::record::{MemberRecord, NoteRecord, TaskRecord, TaskStatus, WorkspaceRecord};
use crate::message::types::WorkspaceEvent;
use crate::publish::EventPublisher;

/// Stateless adapter from mutations to workspace events.
///
/// Delivery is fire-and-forget: methods return once the publisher has
/// attempted every member, and a missed frame is recovered by the
/// client's next REST fetch.
#[derive(Debug)]
pub struct ChangeFeed {
    /// Publisher.
    publisher: Arc<EventPublisher>,
}

impl ChangeFeed {
    /// Create a new change feed.
    pub fn new(publisher: Arc<EventPublisher>) -> Self {
        Self { publisher }
    }

    /// Broadcast a newly created task to its workspace.
    pub fn task_created(&self, workspace: WorkspaceKey, task: TaskRecord) {
        self.publisher
            .publish(workspace, &WorkspaceEvent::TaskCreated(task));
    }

    /// Broadcast updated task fields to the workspace.
    pub fn task_updated(&self, workspace: WorkspaceKey, task: TaskRecord) {
        self.publisher
            .publish(workspace, &WorkspaceEvent::TaskUpdated(task));
    }

    /// Broadcast a task removal.
    pub fn task_deleted(&self, workspace: WorkspaceKey, task_id: TaskId) {
        self.publisher
            .publish(workspace, &WorkspaceEvent::TaskDeleted { task_id });
    }

    /// Broadcast a task status change.
    pub fn task_status_changed(&self, workspace: WorkspaceKey, task_id: TaskId, status: TaskStatus) {
        self.publisher
            .publish(workspace, &WorkspaceEvent::TaskStatusChanged { task_id, status });
    }

    /// Broadcast a new progress note on a task.
    pub fn note_added(&self, workspace: WorkspaceKey, task_id: TaskId, note: NoteRecord) {
        self.publisher
            .publish(workspace, &WorkspaceEvent::NoteAdded { task_id, note });
    }

    /// Broadcast a member joining the workspace.
    pub fn member_joined(&self, workspace: WorkspaceKey, member: MemberRecord) {
        self.publisher
            .publish(workspace, &WorkspaceEvent::MemberJoined(member));
    }

    /// Broadcast a member leaving or being removed from the workspace.
    pub fn member_removed(&self, workspace: WorkspaceKey, user_id: UserId, user_name: &str) {
        self.publisher.publish(
            workspace,
            &WorkspaceEvent::MemberRemoved {
                user_id,
                user_name: user_name.to_string(),
            },
        );
    }

    /// Broadcast changed workspace fields to the workspace's own room.
    pub fn workspace_updated(&self, workspace: WorkspaceRecord) {
        let key = workspace.workspace_number;
        self.publisher
            .publish(key, &WorkspaceEvent::WorkspaceUpdated(workspace));
    }
}
