//! Backend adapters
//!
//! This module provides the capability trait every adapter implements and
//! one concrete client per backend. Adapters are mutually independent and
//! interchangeable behind the [`Database`] trait.

pub mod database;
pub mod mongodb;
pub mod mssql;
pub mod mysql;
pub mod postgres;

pub use database::{Database, InsertOutcome};
