//! MySQL client implementation
//!
//! Connect-per-call adapter over `mysql_async`: every operation acquires a
//! fresh connection, runs its statement and disconnects on all exit paths.
//! `connect()` is a reachability probe and `close()` is a no-op, since no
//! handle outlives an operation.

use crate::adapters::database::traits::{Database, InsertOutcome};
use crate::adapters::mysql::convert::{row_to_sql_row, to_params};
use crate::config::schema::MySqlConfig;
use crate::domain::{DbError, Result, SqlRow, SqlValue, Statement};
use async_trait::async_trait;
use mysql_async::prelude::*;
use mysql_async::{Conn, Opts, OptsBuilder, Row, TxOpts};
use secrecy::ExposeSecret;

/// MySQL adapter
///
/// Statements use `?`-style positional placeholders:
///
/// ```rust,no_run
/// use multidb::adapters::mysql::MySqlClient;
/// use multidb::adapters::Database;
/// use multidb::domain::Statement;
///
/// # async fn example(config: multidb::config::MySqlConfig) -> multidb::domain::Result<()> {
/// let mut db = MySqlClient::new(config);
/// let outcome = db
///     .insert(Statement::new("INSERT INTO t (name, age) VALUES (?, ?)")
///         .bind("Shri")
///         .bind(20))
///     .await?;
/// assert_eq!(outcome.rows_affected(), 1);
/// # Ok(())
/// # }
/// ```
pub struct MySqlClient {
    config: MySqlConfig,
}

impl MySqlClient {
    /// Create a new MySQL adapter
    pub fn new(config: MySqlConfig) -> Self {
        Self { config }
    }

    fn opts(&self) -> Opts {
        OptsBuilder::default()
            .ip_or_hostname(self.config.host.clone())
            .tcp_port(self.config.port)
            .user(Some(self.config.user.clone()))
            .pass(Some(self.config.password.expose_secret().as_ref().to_string()))
            .db_name(Some(self.config.database.clone()))
            .into()
    }

    /// Open a fresh connection for one operation
    async fn acquire(&self) -> Result<Conn> {
        Conn::new(self.opts()).await.map_err(|e| {
            DbError::Connection(format!(
                "Could not connect to MySQL at {}:{}: {e}",
                self.config.host, self.config.port
            ))
        })
    }

    /// Close a per-operation connection; failures are logged, not surfaced,
    /// so they cannot mask the operation's own result
    async fn release(conn: Conn) {
        if let Err(e) = conn.disconnect().await {
            tracing::warn!(error = %e, "Failed to close MySQL connection");
        }
    }

    /// Execute a write statement inside a transaction on a scoped connection
    async fn execute_write(
        &self,
        statement: &Statement,
        wrap: fn(String) -> DbError,
    ) -> Result<u64> {
        let mut conn = self.acquire().await?;
        let outcome = Self::run_write(&mut conn, statement, wrap).await;
        Self::release(conn).await;
        outcome
    }

    async fn run_write(
        conn: &mut Conn,
        statement: &Statement,
        wrap: fn(String) -> DbError,
    ) -> Result<u64> {
        let params = to_params(&statement.params);

        let mut tx = conn
            .start_transaction(TxOpts::default())
            .await
            .map_err(|e| wrap(format!("Failed to begin transaction: {e}")))?;

        match tx.exec_drop(statement.text.as_str(), params).await {
            Ok(()) => {
                let count = tx.affected_rows();
                tx.commit()
                    .await
                    .map_err(|e| wrap(format!("Failed to commit: {e}")))?;
                Ok(count)
            }
            Err(e) => {
                if let Err(rollback_err) = tx.rollback().await {
                    tracing::warn!(error = %rollback_err, "Rollback failed");
                }
                Err(wrap(format!("Database operation failed: {e}")))
            }
        }
    }
}

#[async_trait]
impl Database for MySqlClient {
    type Record = Statement;
    type Query = Statement;
    type Changes = Vec<SqlValue>;
    type Row = SqlRow;

    async fn connect(&mut self) -> Result<()> {
        // Reachability probe; the connection is not kept
        let conn = self.acquire().await?;
        Self::release(conn).await;

        tracing::info!(
            host = %self.config.host,
            port = self.config.port,
            database = %self.config.database,
            "Connected to MySQL"
        );
        Ok(())
    }

    async fn close(&mut self) -> Result<()> {
        // Connect-per-call: nothing is held between operations
        tracing::debug!("MySQL adapter holds no connection; close is a no-op");
        Ok(())
    }

    async fn insert(&mut self, record: Statement) -> Result<InsertOutcome> {
        let count = self.execute_write(&record, DbError::Insertion).await?;
        tracing::info!(rows = count, "Inserted rows");
        Ok(InsertOutcome::RowsAffected(count))
    }

    async fn fetch(&mut self, query: Statement) -> Result<Vec<SqlRow>> {
        let mut conn = self.acquire().await?;

        let outcome = conn
            .exec::<Row, _, _>(query.text.as_str(), to_params(&query.params))
            .await
            .map_err(|e| DbError::Fetch(format!("Failed to fetch data: {e}")));
        Self::release(conn).await;

        let rows: Vec<SqlRow> = outcome?.into_iter().map(row_to_sql_row).collect();
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
        "mysql"
    }
}
