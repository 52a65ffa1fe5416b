//! Convenience result type alias for the RDM console.

use crate::error::AppError;

/// A specialized `Result` type for RDM console operations.
pub type AppResult<T> = Result<T, AppError>;
