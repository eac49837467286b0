//! Result type alias for MultiDB operations

use crate::domain::errors::DbError;

/// Result type used throughout the crate
pub type Result<T> = std::result::Result<T, DbError>;
