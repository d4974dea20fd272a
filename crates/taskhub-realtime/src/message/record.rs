//! Sanitized payload records carried by broadcast events.
//!
//! These are the wire shapes the frontend consumes. They are built by
//! the mutation layer from its own entities; nothing here touches
//! persistence, and credential fields have no representation at all.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use taskhub_core::types::{NoteId, TaskId, UserId, WorkspaceId, WorkspaceKey};

/// Lifecycle status of a task.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TaskStatus {
    Pending,
    InProgress,
    Completed,
}

/// Role of a workspace member.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum MemberRole {
    Manager,
    Team,
}

/// The user a task is assigned to.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TaskAssignee {
    /// Assignee user ID.
    pub id: UserId,
    /// Assignee display name.
    pub name: String,
}

/// Full task record as broadcast on create and update.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TaskRecord {
    /// Task ID.
    pub id: TaskId,
    /// Task title.
    pub title: String,
    /// Task description.
    pub description: String,
    /// Where the task sits in its lifecycle.
    pub status: TaskStatus,
    /// Assigned user.
    pub assigned_to: TaskAssignee,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Optional due date.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub due_date: Option<DateTime<Utc>>,
}

/// Workspace member record as broadcast when a member joins.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MemberRecord {
    /// Member user ID.
    pub id: UserId,
    /// Member display name.
    pub name: String,
    /// Member email.
    pub email: String,
    /// Member role.
    pub role: MemberRole,
}

/// Progress note record as broadcast when a note is added.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NoteRecord {
    /// Note ID.
    pub id: NoteId,
    /// Task the note belongs to.
    pub task_id: TaskId,
    /// Author user ID.
    pub user_id: UserId,
    /// Note text.
    pub note: String,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
}

/// Workspace manager summary embedded in the workspace record.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WorkspaceManager {
    /// Manager display name.
    pub name: String,
}

/// Workspace record as broadcast when workspace fields change.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WorkspaceRecord {
    /// Internal workspace ID.
    pub id: WorkspaceId,
    /// Workspace name.
    pub name: String,
    /// Public workspace number (the broadcast channel key).
    pub workspace_number: WorkspaceKey,
    /// Managing user summary.
    pub manager: WorkspaceManager,
    /// Current members.
    pub members: Vec<MemberRecord>,
}
