//! Core type definitions used across the TaskHub workspace.

pub mod id;
pub mod key;

pub use id::*;
pub use key::WorkspaceKey;
