//! Database abstraction traits
//!
//! This module defines the capability trait that every backend adapter must
//! implement to work with MultiDB.

use crate::domain::Result;
use async_trait::async_trait;

/// Result of an insert operation
///
/// The document backend reports the identifier of the inserted document;
/// relational backends report the driver's affected-row count.
#[derive(Debug, Clone, PartialEq)]
pub enum InsertOutcome {
    /// Identifier assigned to the inserted document
    InsertedId(String),

    /// Number of rows the statement affected
    RowsAffected(u64),
}

impl InsertOutcome {
    /// Affected-record count, treating a single inserted document as 1
    pub fn rows_affected(&self) -> u64 {
        match self {
            InsertOutcome::InsertedId(_) => 1,
            InsertOutcome::RowsAffected(n) => *n,
        }
    }

    /// Inserted identifier, if the backend assigns one
    pub fn inserted_id(&self) -> Option<&str> {
        match self {
            InsertOutcome::InsertedId(id) => Some(id),
            InsertOutcome::RowsAffected(_) => None,
        }
    }
}

/// Capability trait every backend adapter must satisfy
///
/// The operation set is uniform; the argument shapes are backend specific and
/// expressed through the associated types: filter documents for the document
/// store, parameterized SQL for the relational backends. The bound
/// `D: Database` on [`crate::facade::DbConnect`] replaces any runtime
/// capability check.
///
/// Receivers are `&mut self`: an adapter owns at most one native connection,
/// and `connect`/`close` mutate that handle without a lock. A single adapter
/// instance is therefore not for unsynchronized concurrent use; callers
/// needing concurrency create one instance per task.
///
/// Session discipline varies per adapter and is documented on each client:
/// session-oriented adapters require an explicit `connect()` and fail
/// operations with a `Connection` error otherwise, while connect-per-call
/// adapters acquire and release a connection inside every operation.
#[async_trait]
pub trait Database: Send {
    /// Record written by [`Database::insert`]
    type Record: Send + Sync + 'static;

    /// Filter or statement selecting the records an operation applies to
    type Query: Send + Sync + 'static;

    /// Payload applied by [`Database::update`]
    type Changes: Send + Sync + 'static;

    /// Row shape returned by [`Database::fetch`]
    type Row: Send + Sync + 'static;

    /// Establish a connection to the backend
    ///
    /// Idempotent: a no-op when already connected.
    ///
    /// # Errors
    ///
    /// Returns `DbError::Connection` if the underlying driver cannot reach
    /// the server (bad host, auth failure, timeout).
    async fn connect(&mut self) -> Result<()>;

    /// Release the connection
    ///
    /// Safe to call when not connected (no-op).
    async fn close(&mut self) -> Result<()>;

    /// Write one record
    ///
    /// # Errors
    ///
    /// Returns `DbError::Insertion` on constraint violation or driver error.
    async fn insert(&mut self, record: Self::Record) -> Result<InsertOutcome>;

    /// Return the sequence of matching records (possibly empty)
    ///
    /// A query matching nothing returns an empty vector, never an error.
    ///
    /// # Errors
    ///
    /// Returns `DbError::Fetch` on malformed query or driver error.
    async fn fetch(&mut self, query: Self::Query) -> Result<Vec<Self::Row>>;

    /// Apply `changes` to every matching record
    ///
    /// # Returns
    ///
    /// The count of affected records; 0 when nothing matches.
    ///
    /// # Errors
    ///
    /// Returns `DbError::Update` on driver error.
    async fn update(&mut self, query: Self::Query, changes: Self::Changes) -> Result<u64>;

    /// Delete every matching record
    ///
    /// # Returns
    ///
    /// The count of affected records; 0 when nothing matches.
    ///
    /// # Errors
    ///
    /// Returns `DbError::Deletion` on driver error.
    async fn delete(&mut self, query: Self::Query) -> Result<u64>;

    /// Remove every record in the named collection/table
    ///
    /// Relational adapters take the table name; the document adapter operates
    /// on its configured collection and ignores `target`.
    async fn delete_all(&mut self, target: &str) -> Result<u64>;

    /// Human-readable backend name for log context
    fn backend_name(&self) -> &'static str;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_insert_outcome_rows_affected() {
        assert_eq!(InsertOutcome::InsertedId("abc".to_string()).rows_affected(), 1);
        assert_eq!(InsertOutcome::RowsAffected(3).rows_affected(), 3);
    }

    #[test]
    fn test_insert_outcome_inserted_id() {
        let outcome = InsertOutcome::InsertedId("652f7".to_string());
        assert_eq!(outcome.inserted_id(), Some("652f7"));
        assert_eq!(InsertOutcome::RowsAffected(1).inserted_id(), None);
    }
}
