//! Convenience result type alias for PixelHub.

use crate::error::AppError;

/// A specialized `Result` type for PixelHub operations.
pub type AppResult<T> = Result<T, AppError>;
