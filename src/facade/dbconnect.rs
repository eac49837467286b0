//! Delegator over one backend adapter
//!
//! `DbConnect` holds a single adapter and forwards each of the seven
//! operations unchanged, returning the adapter's result or propagating its
//! error without translation. The `D: Database` bound is the capability
//! check; an adapter that does not implement the full operation set fails
//! to compile, so there is no construction-time validation.

use crate::adapters::database::traits::{Database, InsertOutcome};
use crate::domain::Result;

/// Thin delegator over one backend adapter
///
/// ```rust,no_run
/// use multidb::adapters::mongodb::MongoDbClient;
/// use multidb::facade::DbConnect;
/// use mongodb::bson::doc;
///
/// # async fn example(config: multidb::config::MongoDbConfig) -> multidb::domain::Result<()> {
/// let mut db = DbConnect::new(MongoDbClient::new(config));
/// db.connect().await?;
/// db.insert(doc! { "name": "Shri", "age": 20 }).await?;
/// db.close().await?;
/// # Ok(())
/// # }
/// ```
pub struct DbConnect<D: Database> {
    db: D,
}

impl<D: Database> DbConnect<D> {
    /// Wrap an adapter
    pub fn new(db: D) -> Self {
        Self { db }
    }

    /// Establish a connection; see [`Database::connect`]
    pub async fn connect(&mut self) -> Result<()> {
        self.db.connect().await
    }

    /// Release the connection; see [`Database::close`]
    pub async fn close(&mut self) -> Result<()> {
        self.db.close().await
    }

    /// Write one record; see [`Database::insert`]
    pub async fn insert(&mut self, record: D::Record) -> Result<InsertOutcome> {
        self.db.insert(record).await
    }

    /// Fetch matching records; see [`Database::fetch`]
    pub async fn fetch(&mut self, query: D::Query) -> Result<Vec<D::Row>> {
        self.db.fetch(query).await
    }

    /// Update matching records; see [`Database::update`]
    pub async fn update(&mut self, query: D::Query, changes: D::Changes) -> Result<u64> {
        self.db.update(query, changes).await
    }

    /// Delete matching records; see [`Database::delete`]
    pub async fn delete(&mut self, query: D::Query) -> Result<u64> {
        self.db.delete(query).await
    }

    /// Remove every record in the named target; see [`Database::delete_all`]
    pub async fn delete_all(&mut self, target: &str) -> Result<u64> {
        self.db.delete_all(target).await
    }

    /// Name of the wrapped backend
    pub fn backend_name(&self) -> &'static str {
        self.db.backend_name()
    }

    /// Borrow the wrapped adapter
    pub fn inner(&self) -> &D {
        &self.db
    }

    /// Mutably borrow the wrapped adapter
    pub fn inner_mut(&mut self) -> &mut D {
        &mut self.db
    }

    /// Unwrap the adapter
    pub fn into_inner(self) -> D {
        self.db
    }
}
