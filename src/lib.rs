// MultiDB - Uniform async facade over multiple database engines
// Licensed under the MIT License

//! # MultiDB
//!
//! MultiDB is a uniform asynchronous facade over several unrelated database
//! engines: MongoDB (document store), PostgreSQL, MySQL and SQL Server
//! (relational). A caller issues connect/insert/fetch/update/delete operations
//! through one capability trait regardless of backend.
//!
//! ## Architecture
//!
//! - [`adapters`] - The capability trait and one client per backend
//! - [`facade`] - The [`facade::DbConnect`] delegator that forwards calls
//! - [`domain`] - Error taxonomy, result alias and the SQL value model
//! - [`config`] - Configuration loading and credential protection
//! - [`logging`] - Structured logging setup
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use multidb::adapters::mongodb::MongoDbClient;
//! use multidb::config::MongoDbConfig;
//! use multidb::facade::DbConnect;
//! use mongodb::bson::doc;
//!
//! # async fn example(config: MongoDbConfig) -> multidb::domain::Result<()> {
//! let mut db = DbConnect::new(MongoDbClient::new(config));
//!
//! db.connect().await?;
//! db.insert(doc! { "name": "Shri", "age": 20 }).await?;
//! let matching = db.fetch(doc! { "name": "Shri" }).await?;
//! db.update(doc! { "name": "Shri" }, doc! { "age": 21 }).await?;
//! db.delete_all("").await?;
//! db.close().await?;
//! # Ok(())
//! # }
//! ```
//!
//! Relational backends take parameterized SQL instead of filter documents:
//!
//! ```rust,no_run
//! use multidb::adapters::postgres::PostgresClient;
//! use multidb::config::PostgresConfig;
//! use multidb::domain::Statement;
//! use multidb::facade::DbConnect;
//!
//! # async fn example(config: PostgresConfig) -> multidb::domain::Result<()> {
//! let mut db = DbConnect::new(PostgresClient::new(config));
//!
//! db.connect().await?;
//! let outcome = db
//!     .insert(Statement::new("INSERT INTO t (name, age) VALUES ($1, $2)")
//!         .bind("Shri")
//!         .bind(20))
//!     .await?;
//! assert_eq!(outcome.rows_affected(), 1);
//! db.close().await?;
//! # Ok(())
//! # }
//! ```
//!
//! ## Error Handling
//!
//! All fallible operations return [`domain::Result<T>`] with the
//! [`domain::DbError`] taxonomy: connection failures surface as
//! `DbError::Connection`, operation failures as `Insertion`/`Fetch`/
//! `Update`/`Deletion`. Driver error types are never exposed; adapters wrap
//! them with context and re-raise.
//!
//! ## Concurrency Model
//!
//! Every operation blocks the calling task until the driver call returns.
//! An adapter owns at most one native connection, mutated by `connect`/`close`
//! through `&mut self`; callers needing concurrency use one adapter instance
//! per task.

pub mod adapters;
pub mod config;
pub mod domain;
pub mod facade;
pub mod logging;
