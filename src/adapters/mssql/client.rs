//! SQL Server client implementation
//!
//! Session-oriented adapter over `tiberius`. Connection parameters are
//! assembled into a single ADO connection string, the driver-string
//! discipline of ODBC-style clients. Write operations are bracketed by
//! `BEGIN TRAN` / `COMMIT TRAN`, with `ROLLBACK TRAN` before an error is
//! surfaced.

use crate::adapters::database::traits::{Database, InsertOutcome};
use crate::adapters::mssql::convert::{borrow_params, row_to_sql_row};
use crate::config::schema::MssqlConfig;
use crate::domain::{DbError, Result, SqlRow, SqlValue, Statement};
use async_trait::async_trait;
use secrecy::ExposeSecret;
use tiberius::Config;
use tokio::net::TcpStream;
use tokio_util::compat::{Compat, TokioAsyncWriteCompatExt};

type MssqlConnection = tiberius::Client<Compat<TcpStream>>;

/// SQL Server adapter
///
/// Statements use `@P1`-style positional placeholders:
///
/// ```rust,no_run
/// use multidb::adapters::mssql::MssqlClient;
/// use multidb::adapters::Database;
/// use multidb::domain::Statement;
///
/// # async fn example(config: multidb::config::MssqlConfig) -> multidb::domain::Result<()> {
/// let mut db = MssqlClient::new(config);
/// db.connect().await?;
/// let outcome = db
///     .insert(Statement::new("INSERT INTO t (name, age) VALUES (@P1, @P2)")
///         .bind("Shri")
///         .bind(20))
///     .await?;
/// db.close().await?;
/// # Ok(())
/// # }
/// ```
pub struct MssqlClient {
    config: MssqlConfig,
    connection: Option<MssqlConnection>,
}

impl MssqlClient {
    /// Create a new SQL Server adapter; no connection is opened until
    /// [`Database::connect`].
    pub fn new(config: MssqlConfig) -> Self {
        Self {
            config,
            connection: None,
        }
    }

    /// Assemble the ADO connection string from the configured parameters
    fn connection_string(&self) -> String {
        format!(
            "Server=tcp:{},{};Database={};User Id={};Password={};TrustServerCertificate={}",
            self.config.host,
            self.config.port,
            self.config.database,
            self.config.user,
            self.config.password.expose_secret().as_ref(),
            self.config.trust_server_certificate
        )
    }

    /// Connection string with the password redacted, for log output
    fn connection_string_safe(&self) -> String {
        format!(
            "Server=tcp:{},{};Database={};User Id={};Password=***",
            self.config.host, self.config.port, self.config.database, self.config.user
        )
    }

    fn connection_mut(&mut self) -> Result<&mut MssqlConnection> {
        self.connection
            .as_mut()
            .ok_or_else(|| DbError::not_connected("SQL Server"))
    }

    /// Run a transaction-control statement, draining its result stream
    async fn run_control(
        conn: &mut MssqlConnection,
        sql: &str,
    ) -> std::result::Result<(), tiberius::error::Error> {
        conn.simple_query(sql).await?.into_results().await?;
        Ok(())
    }

    /// Execute a write statement inside an explicit transaction
    async fn execute_write(
        &mut self,
        statement: &Statement,
        wrap: fn(String) -> DbError,
    ) -> Result<u64> {
        let conn = self.connection_mut()?;

        Self::run_control(conn, "BEGIN TRAN")
            .await
            .map_err(|e| wrap(format!("Failed to begin transaction: {e}")))?;

        let params = borrow_params(&statement.params);
        match conn.execute(statement.text.as_str(), &params).await {
            Ok(result) => {
                let count = result.total();
                Self::run_control(conn, "COMMIT TRAN")
                    .await
                    .map_err(|e| wrap(format!("Failed to commit: {e}")))?;
                Ok(count)
            }
            Err(e) => {
                if let Err(rollback_err) = Self::run_control(conn, "ROLLBACK TRAN").await {
                    tracing::warn!(error = %rollback_err, "Rollback failed");
                }
                Err(wrap(format!("Database operation failed: {e}")))
            }
        }
    }
}

#[async_trait]
impl Database for MssqlClient {
    type Record = Statement;
    type Query = Statement;
    type Changes = Vec<SqlValue>;
    type Row = SqlRow;

    async fn connect(&mut self) -> Result<()> {
        if self.connection.is_some() {
            tracing::debug!("SQL Server adapter already connected");
            return Ok(());
        }

        let config = Config::from_ado_string(&self.connection_string()).map_err(|e| {
            DbError::Connection(format!("Invalid SQL Server connection string: {e}"))
        })?;

        let tcp = TcpStream::connect(config.get_addr()).await.map_err(|e| {
            DbError::Connection(format!(
                "Could not reach SQL Server at {}: {e}",
                config.get_addr()
            ))
        })?;
        tcp.set_nodelay(true).map_err(|e| {
            DbError::Connection(format!("Failed to configure SQL Server socket: {e}"))
        })?;

        let connection = tiberius::Client::connect(config, tcp.compat_write())
            .await
            .map_err(|e| {
                DbError::Connection(format!(
                    "Could not connect to SQL Server ({}): {e}",
                    self.connection_string_safe()
                ))
            })?;

        self.connection = Some(connection);

        tracing::info!(
            host = %self.config.host,
            port = self.config.port,
            database = %self.config.database,
            "Connected to SQL Server"
        );
        Ok(())
    }

    async fn close(&mut self) -> Result<()> {
        if let Some(connection) = self.connection.take() {
            connection
                .close()
                .await
                .map_err(|e| DbError::Operational(format!("Failed to close connection: {e}")))?;
            tracing::info!("SQL Server connection closed");
        }
        Ok(())
    }

    async fn insert(&mut self, record: Statement) -> Result<InsertOutcome> {
        let count = self.execute_write(&record, DbError::Insertion).await?;
        tracing::info!(rows = count, "Inserted rows");
        Ok(InsertOutcome::RowsAffected(count))
    }

    async fn fetch(&mut self, query: Statement) -> Result<Vec<SqlRow>> {
        let conn = self.connection_mut()?;
        let params = borrow_params(&query.params);

        let stream = conn
            .query(query.text.as_str(), &params)
            .await
            .map_err(|e| DbError::Fetch(format!("Failed to fetch data: {e}")))?;

        // Fully drain the stream before returning on every path
        let rows = stream
            .into_first_result()
            .await
            .map_err(|e| DbError::Fetch(format!("Failed to fetch data: {e}")))?;

        let rows = rows
            .into_iter()
            .map(row_to_sql_row)
            .collect::<Result<Vec<_>>>()?;

        tracing::info!(count = rows.len(), "Fetched rows");
        Ok(rows)
    }

    async fn update(&mut self, query: Statement, changes: Vec<SqlValue>) -> Result<u64> {
        let statement = query.prepend_params(changes);
        let count = self.execute_write(&statement, DbError::Update).await?;
        tracing::info!(rows = count, "Updated rows");
        Ok(count)
    }

    async fn delete(&mut self, query: Statement) -> Result<u64> {
        let count = self.execute_write(&query, DbError::Deletion).await?;
        tracing::info!(rows = count, "Deleted rows");
        Ok(count)
    }

    async fn delete_all(&mut self, target: &str) -> Result<u64> {
        // Table name comes from the caller and is not escaped by the facade
        let statement = Statement::new(format!("DELETE FROM {target}"));
        let count = self.execute_write(&statement, DbError::Deletion).await?;
        tracing::info!(table = %target, rows = count, "Deleted all rows");
        Ok(count)
    }

    fn backend_name(&self) -> &'static str {
        "mssql"
    }
}
