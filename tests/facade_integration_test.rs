//! Integration tests for the facade layer
//!
//! These tests drive `DbConnect` through a small in-memory adapter so the
//! full operation surface can be exercised without a live database server.

use async_trait::async_trait;
use multidb::adapters::database::{Database, InsertOutcome};
use multidb::domain::{DbError, Result};
use multidb::facade::DbConnect;
use serde_json::{json, Map, Value};

/// In-memory adapter used as a stand-in backend
///
/// Records are JSON objects. A query is a JSON object whose fields must all
/// match a record for it to be selected, and changes are a JSON object whose
/// fields are merged into every matching record.
#[derive(Default)]
struct MemoryBackend {
    connected: bool,
    records: Vec<Map<String, Value>>,
    next_id: u64,
}

impl MemoryBackend {
    fn matches(record: &Map<String, Value>, query: &Map<String, Value>) -> bool {
        query.iter().all(|(k, v)| record.get(k) == Some(v))
    }

    fn as_object(value: Value, what: &str) -> Result<Map<String, Value>> {
        match value {
            Value::Object(map) => Ok(map),
            other => Err(DbError::Operational(format!(
                "{what} must be a JSON object, got {other}"
            ))),
        }
    }

    fn ensure_connected(&self) -> Result<()> {
        if self.connected {
            Ok(())
        } else {
            Err(DbError::not_connected("memory"))
        }
    }
}

#[async_trait]
impl Database for MemoryBackend {
    type Record = Value;
    type Query = Value;
    type Changes = Value;
    type Row = Value;

    async fn connect(&mut self) -> Result<()> {
        self.connected = true;
        Ok(())
    }

    async fn close(&mut self) -> Result<()> {
        self.connected = false;
        Ok(())
    }

    async fn insert(&mut self, record: Value) -> Result<InsertOutcome> {
        self.ensure_connected()?;
        let record = Self::as_object(record, "record")?;
        self.next_id += 1;
        let id = self.next_id.to_string();
        self.records.push(record);
        Ok(InsertOutcome::InsertedId(id))
    }

    async fn fetch(&mut self, query: Value) -> Result<Vec<Value>> {
        self.ensure_connected()?;
        let query = Self::as_object(query, "query")?;
        Ok(self
            .records
            .iter()
            .filter(|r| Self::matches(r, &query))
            .cloned()
            .map(Value::Object)
            .collect())
    }

    async fn update(&mut self, query: Value, changes: Value) -> Result<u64> {
        self.ensure_connected()?;
        let query = Self::as_object(query, "query")?;
        let changes = Self::as_object(changes, "changes")?;
        let mut count = 0;
        for record in &mut self.records {
            if Self::matches(record, &query) {
                for (k, v) in &changes {
                    record.insert(k.clone(), v.clone());
                }
                count += 1;
            }
        }
        Ok(count)
    }

    async fn delete(&mut self, query: Value) -> Result<u64> {
        self.ensure_connected()?;
        let query = Self::as_object(query, "query")?;
        let before = self.records.len();
        self.records.retain(|r| !Self::matches(r, &query));
        Ok((before - self.records.len()) as u64)
    }

    async fn delete_all(&mut self, _target: &str) -> Result<u64> {
        self.ensure_connected()?;
        let count = self.records.len() as u64;
        self.records.clear();
        Ok(count)
    }

    fn backend_name(&self) -> &'static str {
        "memory"
    }
}

#[tokio::test]
async fn test_insert_then_fetch_round_trip() {
    let mut db = DbConnect::new(MemoryBackend::default());
    db.connect().await.unwrap();

    let outcome = db.insert(json!({"name": "Shri", "age": 20})).await.unwrap();
    assert_eq!(outcome.rows_affected(), 1);
    assert!(outcome.inserted_id().is_some());

    let rows = db.fetch(json!({"name": "Shri"})).await.unwrap();
    assert_eq!(rows, vec![json!({"name": "Shri", "age": 20})]);

    db.close().await.unwrap();
}

#[tokio::test]
async fn test_update_changes_matching_records() {
    let mut db = DbConnect::new(MemoryBackend::default());
    db.connect().await.unwrap();
    db.insert(json!({"name": "Shri", "age": 20})).await.unwrap();

    let updated = db
        .update(json!({"name": "Shri"}), json!({"age": 21}))
        .await
        .unwrap();
    assert_eq!(updated, 1);

    let rows = db.fetch(json!({"name": "Shri"})).await.unwrap();
    assert_eq!(rows, vec![json!({"name": "Shri", "age": 21})]);
}

#[tokio::test]
async fn test_fetch_with_no_matches_returns_empty() {
    let mut db = DbConnect::new(MemoryBackend::default());
    db.connect().await.unwrap();
    db.insert(json!({"name": "Shri", "age": 20})).await.unwrap();

    let rows = db.fetch(json!({"name": "nobody"})).await.unwrap();
    assert!(rows.is_empty());
}

#[tokio::test]
async fn test_update_and_delete_with_no_matches_report_zero() {
    let mut db = DbConnect::new(MemoryBackend::default());
    db.connect().await.unwrap();
    db.insert(json!({"name": "Shri", "age": 20})).await.unwrap();

    let updated = db
        .update(json!({"name": "nobody"}), json!({"age": 99}))
        .await
        .unwrap();
    assert_eq!(updated, 0);

    let deleted = db.delete(json!({"name": "nobody"})).await.unwrap();
    assert_eq!(deleted, 0);

    // The original record is untouched
    let rows = db.fetch(json!({"name": "Shri"})).await.unwrap();
    assert_eq!(rows, vec![json!({"name": "Shri", "age": 20})]);
}

#[tokio::test]
async fn test_delete_removes_matching_records() {
    let mut db = DbConnect::new(MemoryBackend::default());
    db.connect().await.unwrap();
    db.insert(json!({"name": "Shri", "age": 20})).await.unwrap();
    db.insert(json!({"name": "Asha", "age": 30})).await.unwrap();

    let deleted = db.delete(json!({"name": "Shri"})).await.unwrap();
    assert_eq!(deleted, 1);

    let remaining = db.fetch(json!({})).await.unwrap();
    assert_eq!(remaining, vec![json!({"name": "Asha", "age": 30})]);
}

#[tokio::test]
async fn test_delete_all_empties_the_target() {
    let mut db = DbConnect::new(MemoryBackend::default());
    db.connect().await.unwrap();
    db.insert(json!({"name": "Shri", "age": 20})).await.unwrap();
    db.insert(json!({"name": "Asha", "age": 30})).await.unwrap();

    let deleted = db.delete_all("users").await.unwrap();
    assert_eq!(deleted, 2);

    let rows = db.fetch(json!({})).await.unwrap();
    assert!(rows.is_empty());
}

#[tokio::test]
async fn test_close_before_connect_is_allowed() {
    let mut db = DbConnect::new(MemoryBackend::default());
    assert!(db.close().await.is_ok());
}

#[tokio::test]
async fn test_double_connect_is_idempotent() {
    let mut db = DbConnect::new(MemoryBackend::default());
    db.connect().await.unwrap();
    db.insert(json!({"name": "Shri", "age": 20})).await.unwrap();

    db.connect().await.unwrap();

    // Records survive the second connect
    let rows = db.fetch(json!({})).await.unwrap();
    assert_eq!(rows.len(), 1);
}

#[tokio::test]
async fn test_operations_after_close_fail_with_connection_error() {
    let mut db = DbConnect::new(MemoryBackend::default());
    db.connect().await.unwrap();
    db.close().await.unwrap();

    let err = db.insert(json!({"name": "Shri"})).await.unwrap_err();
    assert!(matches!(err, DbError::Connection(_)));
}

#[tokio::test]
async fn test_delegator_exposes_the_wrapped_adapter() {
    let mut db = DbConnect::new(MemoryBackend::default());
    assert_eq!(db.backend_name(), "memory");

    db.connect().await.unwrap();
    assert!(db.inner().connected);

    db.inner_mut().connected = false;
    let backend = db.into_inner();
    assert!(!backend.connected);
}
