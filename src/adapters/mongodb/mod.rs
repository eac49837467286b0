//! MongoDB adapter
//!
//! Document-store implementation of the [`crate::adapters::Database`] trait.

pub mod client;

pub use client::MongoDbClient;
