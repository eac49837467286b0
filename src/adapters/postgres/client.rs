//! PostgreSQL client implementation
//!
//! Session-oriented adapter over `tokio-postgres`: one connection opened by
//! `connect()`, held across calls, released by `close()`. Write operations
//! run in an explicit transaction that commits on success and rolls back
//! before surfacing an error.

use crate::adapters::database::traits::{Database, InsertOutcome};
use crate::adapters::postgres::convert::{borrow_params, row_to_sql_row};
use crate::config::schema::PostgresConfig;
use crate::domain::{DbError, Result, SqlRow, SqlValue, Statement};
use async_trait::async_trait;
use secrecy::ExposeSecret;
use tokio::task::JoinHandle;
use tokio_postgres::NoTls;

/// Open handles for one PostgreSQL session
#[derive(Debug)]
struct PgSession {
    client: tokio_postgres::Client,
    /// Drives the wire protocol; ends once the client is dropped
    driver: JoinHandle<()>,
}

/// PostgreSQL adapter
///
/// Statements use `$1`-style positional placeholders:
///
/// ```rust,no_run
/// use multidb::adapters::postgres::PostgresClient;
/// use multidb::adapters::Database;
/// use multidb::domain::Statement;
///
/// # async fn example(config: multidb::config::PostgresConfig) -> multidb::domain::Result<()> {
/// let mut db = PostgresClient::new(config);
/// db.connect().await?;
/// let rows = db
///     .fetch(Statement::new("SELECT * FROM t WHERE name = $1").bind("Shri"))
///     .await?;
/// db.close().await?;
/// # Ok(())
/// # }
/// ```
pub struct PostgresClient {
    config: PostgresConfig,
    session: Option<PgSession>,
}

impl PostgresClient {
    /// Create a new PostgreSQL adapter; no connection is opened until
    /// [`Database::connect`].
    pub fn new(config: PostgresConfig) -> Self {
        Self {
            config,
            session: None,
        }
    }

    fn session_mut(&mut self) -> Result<&mut PgSession> {
        self.session
            .as_mut()
            .ok_or_else(|| DbError::not_connected("PostgreSQL"))
    }

    /// Execute a write statement inside a transaction
    ///
    /// Commits and reports the affected-row count on success; rolls back
    /// before propagating the error on failure. `wrap` selects the error
    /// variant for the operation being performed.
    async fn execute_write(
        &mut self,
        statement: &Statement,
        wrap: fn(String) -> DbError,
    ) -> Result<u64> {
        let session = self.session_mut()?;
        let params = borrow_params(&statement.params);

        let tx = session
            .client
            .transaction()
            .await
            .map_err(|e| wrap(format!("Failed to begin transaction: {e}")))?;

        match tx.execute(statement.text.as_str(), &params).await {
            Ok(count) => {
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
impl Database for PostgresClient {
    type Record = Statement;
    type Query = Statement;
    type Changes = Vec<SqlValue>;
    type Row = SqlRow;

    async fn connect(&mut self) -> Result<()> {
        if self.session.is_some() {
            tracing::debug!("PostgreSQL adapter already connected");
            return Ok(());
        }

        let mut pg_config = tokio_postgres::Config::new();
        pg_config
            .host(&self.config.host)
            .port(self.config.port)
            .user(&self.config.user)
            .password(self.config.password.expose_secret().as_ref())
            .dbname(&self.config.database);

        let (client, connection) = pg_config.connect(NoTls).await.map_err(|e| {
            DbError::Connection(format!(
                "Could not connect to PostgreSQL at {}:{}: {e}",
                self.config.host, self.config.port
            ))
        })?;

        let driver = tokio::spawn(async move {
            if let Err(e) = connection.await {
                tracing::error!(error = %e, "PostgreSQL connection task ended with error");
            }
        });

        self.session = Some(PgSession { client, driver });

        tracing::info!(
            host = %self.config.host,
            port = self.config.port,
            database = %self.config.database,
            "Connected to PostgreSQL"
        );
        Ok(())
    }

    async fn close(&mut self) -> Result<()> {
        if let Some(PgSession { client, driver }) = self.session.take() {
            // Dropping the client terminates the connection task
            drop(client);
            let _ = driver.await;
            tracing::info!("PostgreSQL connection closed");
        }
        Ok(())
    }

    async fn insert(&mut self, record: Statement) -> Result<InsertOutcome> {
        let count = self.execute_write(&record, DbError::Insertion).await?;
        tracing::info!(rows = count, "Inserted rows");
        Ok(InsertOutcome::RowsAffected(count))
    }

    async fn fetch(&mut self, query: Statement) -> Result<Vec<SqlRow>> {
        let session = self.session_mut()?;
        let params = borrow_params(&query.params);

        let rows = session
            .client
            .query(query.text.as_str(), &params)
            .await
            .map_err(|e| DbError::Fetch(format!("Failed to fetch data: {e}")))?;

        let rows = rows
            .iter()
            .map(row_to_sql_row)
            .collect::<Result<Vec<_>>>()?;

        tracing::info!(count = rows.len(), "Fetched rows");
        Ok(rows)
    }

    async fn update(&mut self, query: Statement, changes: Vec<SqlValue>) -> Result<u64> {
        // SET values precede WHERE predicates in placeholder order; callers
        // that pre-bind everything on the statement pass an empty vector
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
        // The table name comes from the caller and is not escaped by the
        // facade; it cannot be bound as a parameter
        let statement = Statement::new(format!("DELETE FROM {target}"));
        let count = self.execute_write(&statement, DbError::Deletion).await?;
        tracing::info!(table = %target, rows = count, "Deleted all rows");
        Ok(count)
    }

    fn backend_name(&self) -> &'static str {
        "postgres"
    }
}
