//! Shared result alias.

use crate::error::AppError;

/// `Result` with the error side fixed to [`AppError`].
pub type AppResult<T> = Result<T, AppError>;
