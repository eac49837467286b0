//! PostgreSQL adapter
//!
//! Session-oriented relational implementation of the
//! [`crate::adapters::Database`] trait over `tokio-postgres`.

pub mod client;
pub mod convert;

pub use client::PostgresClient;
