//! Configuration schema
//!
//! This module defines the TOML-backed configuration structures: one section
//! per backend plus application and logging settings. Connection parameters
//! are immutable once an adapter is constructed from them.

use crate::config::secret::SecretString;
use serde::{Deserialize, Serialize};

/// Which backend adapter the configuration selects
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BackendTarget {
    /// MongoDB document store
    MongoDb,
    /// PostgreSQL
    Postgres,
    /// MySQL
    MySql,
    /// Microsoft SQL Server
    Mssql,
}

impl std::fmt::Display for BackendTarget {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            BackendTarget::MongoDb => "mongodb",
            BackendTarget::Postgres => "postgres",
            BackendTarget::MySql => "mysql",
            BackendTarget::Mssql => "mssql",
        };
        write!(f, "{name}")
    }
}

/// Top-level MultiDB configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MultiDbConfig {
    /// Application settings
    #[serde(default)]
    pub application: ApplicationConfig,

    /// Selected backend
    pub backend: BackendTarget,

    /// MongoDB settings (required when backend = "mongodb")
    #[serde(default)]
    pub mongodb: Option<MongoDbConfig>,

    /// PostgreSQL settings (required when backend = "postgres")
    #[serde(default)]
    pub postgres: Option<PostgresConfig>,

    /// MySQL settings (required when backend = "mysql")
    #[serde(default)]
    pub mysql: Option<MySqlConfig>,

    /// SQL Server settings (required when backend = "mssql")
    #[serde(default)]
    pub mssql: Option<MssqlConfig>,

    /// Logging settings
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl MultiDbConfig {
    /// Validate that the section for the selected backend is present
    ///
    /// # Errors
    ///
    /// Returns a message naming the missing section.
    pub fn validate(&self) -> Result<(), String> {
        let present = match self.backend {
            BackendTarget::MongoDb => self.mongodb.is_some(),
            BackendTarget::Postgres => self.postgres.is_some(),
            BackendTarget::MySql => self.mysql.is_some(),
            BackendTarget::Mssql => self.mssql.is_some(),
        };

        if present {
            Ok(())
        } else {
            Err(format!(
                "backend is '{}' but the [{}] section is missing",
                self.backend, self.backend
            ))
        }
    }
}

/// Application settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApplicationConfig {
    /// Application name used in log context
    #[serde(default = "default_app_name")]
    pub name: String,

    /// Log level (trace, debug, info, warn, error)
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

impl Default for ApplicationConfig {
    fn default() -> Self {
        Self {
            name: default_app_name(),
            log_level: default_log_level(),
        }
    }
}

/// MongoDB connection parameters
///
/// The target collection is fixed at construction; `delete_all` clears it
/// regardless of the `target` argument.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MongoDbConfig {
    /// Hostname or IP address of the MongoDB server
    pub host: String,

    /// Port the server listens on
    #[serde(default = "default_mongodb_port")]
    pub port: u16,

    /// Username for authentication, if the deployment requires one
    #[serde(default)]
    pub username: Option<String>,

    /// Password for authentication
    #[serde(default)]
    pub password: Option<SecretString>,

    /// Database name
    pub database: String,

    /// Default collection operations apply to
    pub collection: String,
}

/// PostgreSQL connection parameters
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PostgresConfig {
    /// Hostname or IP address of the PostgreSQL server
    pub host: String,

    /// Port the server listens on
    #[serde(default = "default_postgres_port")]
    pub port: u16,

    /// Username for authentication
    pub user: String,

    /// Password for authentication
    pub password: SecretString,

    /// Database name
    pub database: String,
}

/// MySQL connection parameters
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MySqlConfig {
    /// Hostname or IP address of the MySQL server
    pub host: String,

    /// Port the server listens on
    #[serde(default = "default_mysql_port")]
    pub port: u16,

    /// Username for authentication
    pub user: String,

    /// Password for authentication
    pub password: SecretString,

    /// Database name
    pub database: String,
}

/// SQL Server connection parameters
///
/// Assembled into a single ADO connection string at connect time, the
/// driver-string discipline of ODBC-style clients.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MssqlConfig {
    /// Hostname or IP address of the SQL Server instance
    pub host: String,

    /// Port the instance listens on
    #[serde(default = "default_mssql_port")]
    pub port: u16,

    /// Username for SQL authentication
    pub user: String,

    /// Password for SQL authentication
    pub password: SecretString,

    /// Database name
    pub database: String,

    /// Accept the server certificate without validation (dev/test setups)
    #[serde(default = "default_true")]
    pub trust_server_certificate: bool,
}

/// Logging settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Write logs to a local file in addition to the console
    #[serde(default)]
    pub local_enabled: bool,

    /// Directory for local log files
    #[serde(default = "default_local_path")]
    pub local_path: String,

    /// Rotation policy: "daily" or "hourly"
    #[serde(default = "default_local_rotation")]
    pub local_rotation: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            local_enabled: false,
            local_path: default_local_path(),
            local_rotation: default_local_rotation(),
        }
    }
}

fn default_app_name() -> String {
    "multidb".to_string()
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_mongodb_port() -> u16 {
    27017
}

fn default_postgres_port() -> u16 {
    5432
}

fn default_mysql_port() -> u16 {
    3306
}

fn default_mssql_port() -> u16 {
    1433
}

fn default_true() -> bool {
    true
}

fn default_local_path() -> String {
    "./logs".to_string()
}

fn default_local_rotation() -> String {
    "daily".to_string()
}
