//! SQL Server adapter
//!
//! Driver-string relational implementation of the
//! [`crate::adapters::Database`] trait over `tiberius`.

pub mod client;
pub mod convert;

pub use client::MssqlClient;
