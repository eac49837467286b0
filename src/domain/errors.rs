//! Domain error types
//!
//! This module defines the error taxonomy for MultiDB. Adapters catch only
//! the driver error relevant to the operation being performed, wrap it with
//! backend context and re-raise; driver error types are never exposed.

use thiserror::Error;

/// Main MultiDB error type
///
/// Each CRUD operation fails with its own variant so callers can match on
/// the operation that went wrong without inspecting message text.
#[derive(Debug, Error)]
pub enum DbError {
    /// Configuration-related errors
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// Connect-time failures (bad host, auth failure, timeout)
    #[error("Connection error: {0}")]
    Connection(String),

    /// Insert failures (constraint violation, driver error)
    #[error("Insertion error: {0}")]
    Insertion(String),

    /// Fetch failures (malformed query, driver error)
    #[error("Fetch error: {0}")]
    Fetch(String),

    /// Update failures
    #[error("Update error: {0}")]
    Update(String),

    /// Delete failures
    #[error("Deletion error: {0}")]
    Deletion(String),

    /// Uncategorized driver faults
    #[error("Operational error: {0}")]
    Operational(String),

    /// Serialization/deserialization errors
    #[error("Serialization error: {0}")]
    Serialization(String),

    /// I/O errors
    #[error("I/O error: {0}")]
    Io(String),
}

impl DbError {
    /// Error for an operation issued against a session-oriented adapter
    /// before `connect()` (or after `close()`).
    pub fn not_connected(backend: &str) -> Self {
        DbError::Connection(format!(
            "{backend} adapter is not connected; call connect() first"
        ))
    }
}

impl From<std::io::Error> for DbError {
    fn from(err: std::io::Error) -> Self {
        DbError::Io(err.to_string())
    }
}

impl From<serde_json::Error> for DbError {
    fn from(err: serde_json::Error) -> Self {
        DbError::Serialization(err.to_string())
    }
}

impl From<toml::de::Error> for DbError {
    fn from(err: toml::de::Error) -> Self {
        DbError::Configuration(format!("TOML parse error: {err}"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_db_error_display() {
        let err = DbError::Connection("refused".to_string());
        assert_eq!(err.to_string(), "Connection error: refused");

        let err = DbError::Insertion("duplicate key".to_string());
        assert_eq!(err.to_string(), "Insertion error: duplicate key");
    }

    #[test]
    fn test_not_connected_names_backend() {
        let err = DbError::not_connected("PostgreSQL");
        assert!(err.to_string().contains("PostgreSQL"));
        assert!(matches!(err, DbError::Connection(_)));
    }

    #[test]
    fn test_io_error_conversion() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "missing");
        let err: DbError = io_err.into();
        assert!(matches!(err, DbError::Io(_)));
    }

    #[test]
    fn test_serde_json_error_conversion() {
        let json_err = serde_json::from_str::<serde_json::Value>("not json").unwrap_err();
        let err: DbError = json_err.into();
        assert!(matches!(err, DbError::Serialization(_)));
    }

    #[test]
    fn test_toml_error_conversion() {
        let toml_err = toml::from_str::<toml::Value>("a = b = c").unwrap_err();
        let err: DbError = toml_err.into();
        assert!(matches!(err, DbError::Configuration(_)));
        assert!(err.to_string().contains("TOML parse error"));
    }

    #[test]
    fn test_db_error_implements_std_error() {
        let err = DbError::Operational("fault".to_string());
        let _: &dyn std::error::Error = &err;
    }
}
