//! MySQL adapter
//!
//! Connect-per-call relational implementation of the
//! [`crate::adapters::Database`] trait over `mysql_async`.

pub mod client;
pub mod convert;

pub use client::MySqlClient;
