//! Wire message and payload type definitions.

pub mod record;
pub mod types;

pub use record::{
    MemberRecord, MemberRole, NoteRecord, TaskAssignee, TaskRecord, TaskStatus, WorkspaceManager,
    WorkspaceRecord,
};
pub use types::{ClientMessage, WorkspaceEvent, error_frame};
