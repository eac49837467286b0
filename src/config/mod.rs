//! Configuration management
//!
//! Connection parameters for every backend are supplied by the caller,
//! either constructed directly or loaded from a TOML file with environment
//! variable substitution and `MULTIDB_*` overrides. Passwords are held as
//! [`SecretString`] so they are zeroed on drop and redacted in Debug output.

pub mod loader;
pub mod schema;
pub mod secret;

pub use loader::load_config;
pub use schema::{
    ApplicationConfig, BackendTarget, LoggingConfig, MongoDbConfig, MssqlConfig, MultiDbConfig,
    MySqlConfig, PostgresConfig,
};
pub use secret::{secret_string, SecretString, SecretValue};
