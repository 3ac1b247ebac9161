//! Convenience result type alias for Resolution.

use crate::error::AppError;

/// A specialized `Result` type for Resolution operations.
pub type AppResult<T> = Result<T, AppError>;
