//! The frame vocabulary spoken over `/ws`.

use serde::{Deserialize, Serialize};

use taskhub_core::types::{TaskId, UserId, WorkspaceKey};

use super::record::{MemberRecord, NoteRecord, TaskRecord, TaskStatus, WorkspaceRecord};

/// Everything a client may send after the upgrade.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum ClientMessage {
    /// Join a workspace room. The workspace number arrives as a JSON
    /// string or number; both forms are accepted.
    #[serde(rename = "joinWorkspace")]
    JoinWorkspace {
        /// Public workspace number.
        workspace: WorkspaceKey,
    },
}

/// Events pushed to every member of a workspace room.
///
/// The wire envelope is `{"event": <kind>, "data": <payload>}` with
/// camelCase payload fields, matching what the frontend subscribes to.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "event", content = "data")]
pub enum WorkspaceEvent {
    /// A task was created.
    #[serde(rename = "task:created")]
    TaskCreated(TaskRecord),
    /// Task fields changed.
    #[serde(rename = "task:updated")]
    TaskUpdated(TaskRecord),
    /// A task was removed.
    #[serde(rename = "task:deleted", rename_all = "camelCase")]
    TaskDeleted {
        /// Removed task ID.
        task_id: TaskId,
    },
    /// A task's status changed.
    #[serde(rename = "task:status", rename_all = "camelCase")]
    TaskStatusChanged {
        /// Task ID.
        task_id: TaskId,
        /// Status it moved to.
        status: TaskStatus,
    },
    /// A progress note was added to a task.
    #[serde(rename = "task:note", rename_all = "camelCase")]
    NoteAdded {
        /// Task ID.
        task_id: TaskId,
        /// The new note.
        note: NoteRecord,
    },
    /// A user joined the workspace.
    #[serde(rename = "workspace:memberJoined")]
    MemberJoined(MemberRecord),
    /// A user left or was removed from the workspace.
    #[serde(rename = "workspace:memberRemoved", rename_all = "camelCase")]
    MemberRemoved {
        /// Removed user ID.
        user_id: UserId,
        /// Removed user display name.
        user_name: String,
    },
    /// Workspace fields changed.
    #[serde(rename = "workspace:updated")]
    WorkspaceUpdated(WorkspaceRecord),
}

impl WorkspaceEvent {
    /// Wire name of this event kind.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::TaskCreated(_) => "task:created",
            Self::TaskUpdated(_) => "task:updated",
            Self::TaskDeleted { .. } => "task:deleted",
            Self::TaskStatusChanged { .. } => "task:status",
            Self::NoteAdded { .. } => "task:note",
            Self::MemberJoined(_) => "workspace:memberJoined",
            Self::MemberRemoved { .. } => "workspace:memberRemoved",
            Self::WorkspaceUpdated(_) => "workspace:updated",
        }
    }
}

/// Builds the protocol error frame sent back on a malformed or
/// rejected inbound message. Uses the same envelope as events so
/// clients need one frame parser.
pub fn error_frame(code: &str, message: &str) -> String {
    serde_json::json!({
        "event": "error",
        "data": { "code": code, "message": message },
    })
    .to_string()
}
