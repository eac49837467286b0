//! Domain types for MultiDB.
//!
//! This module contains the error taxonomy, the result alias and the
//! backend-neutral SQL value model shared by the relational adapters.

pub mod errors;
pub mod result;
pub mod value;

pub use errors::DbError;
pub use result::Result;
pub use value::{SqlRow, SqlValue, Statement};
