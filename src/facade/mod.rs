//! Facade layer
//!
//! [`DbConnect`] wraps one adapter and forwards every operation unchanged.

pub mod dbconnect;

pub use dbconnect::DbConnect;
