//! Foundation crate for TaskHub.
//!
//! Home of the pieces every other crate leans on: typed identifiers,
//! the workspace key, configuration loading, and the application error
//! type. Nothing here depends on the rest of the workspace.

pub mod config;
pub mod error;
pub mod result;
pub mod types;

pub use error::{AppError, ErrorKind};
pub use result::AppResult;
