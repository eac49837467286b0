//! Logging and observability
//!
//! Structured logging with configurable log levels, console output and
//! optional JSON file logging with rotation.
//!
//! # Example
//!
//! ```no_run
//! use multidb::config::LoggingConfig;
//! use multidb::logging::init_logging;
//!
//! let config = LoggingConfig::default();
//! let _guard = init_logging("info", &config).expect("Failed to initialize logging");
//!
//! tracing::info!("Facade initialized");
//! ```

pub mod structured;

pub use structured::{init_logging, LoggingGuard};
