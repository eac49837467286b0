//! Database abstraction layer
//!
//! This module defines the trait-based abstraction for database operations,
//! allowing MultiDB to present one interface over MongoDB, PostgreSQL, MySQL
//! and SQL Server.

pub mod traits;

pub use traits::{Database, InsertOutcome};
