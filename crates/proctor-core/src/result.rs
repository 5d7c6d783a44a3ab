//! Convenience result type alias for Proctor.

use crate::error::AppError;

/// A specialized `Result` type for Proctor operations.
pub type AppResult<T> = Result<T, AppError>;
