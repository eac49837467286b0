//! Backend-neutral SQL value model
//!
//! The relational adapters all speak in terms of [`Statement`] (SQL text plus
//! positional parameters) and [`SqlRow`] (positional fetched cells). The
//! facade never interpolates parameters into statement text; the caller uses
//! the placeholder syntax of the target backend (`$1` for PostgreSQL, `?` for
//! MySQL, `@P1` for SQL Server).

use serde::{Deserialize, Serialize};

/// A single scalar value exchanged with a relational backend.
///
/// Used both as a statement parameter and as a fetched cell. The shape is
/// deliberately small; columns of a type outside this set fail the fetch with
/// a `Fetch` error rather than being silently coerced.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum SqlValue {
    /// SQL NULL
    Null,
    /// Boolean / BIT
    Bool(bool),
    /// Any integer width, widened to 64 bits
    Int(i64),
    /// Any float width, widened to 64 bits
    Float(f64),
    /// Character data, including formatted temporal values
    Text(String),
    /// JSON / JSONB columns
    Json(serde_json::Value),
    /// Raw binary data
    Bytes(Vec<u8>),
}

impl From<bool> for SqlValue {
    fn from(v: bool) -> Self {
        SqlValue::Bool(v)
    }
}

impl From<i32> for SqlValue {
    fn from(v: i32) -> Self {
        SqlValue::Int(i64::from(v))
    }
}

impl From<i64> for SqlValue {
    fn from(v: i64) -> Self {
        SqlValue::Int(v)
    }
}

impl From<f64> for SqlValue {
    fn from(v: f64) -> Self {
        SqlValue::Float(v)
    }
}

impl From<&str> for SqlValue {
    fn from(v: &str) -> Self {
        SqlValue::Text(v.to_string())
    }
}

impl From<String> for SqlValue {
    fn from(v: String) -> Self {
        SqlValue::Text(v)
    }
}

impl From<serde_json::Value> for SqlValue {
    fn from(v: serde_json::Value) -> Self {
        SqlValue::Json(v)
    }
}

impl From<Vec<u8>> for SqlValue {
    fn from(v: Vec<u8>) -> Self {
        SqlValue::Bytes(v)
    }
}

impl<T> From<Option<T>> for SqlValue
where
    T: Into<SqlValue>,
{
    fn from(v: Option<T>) -> Self {
        match v {
            Some(v) => v.into(),
            None => SqlValue::Null,
        }
    }
}

/// A parameterized SQL statement.
///
/// Built with [`Statement::new`] and [`Statement::bind`]; parameters are
/// positional and forwarded verbatim to the driver.
///
/// # Example
///
/// ```rust
/// use multidb::domain::Statement;
///
/// let stmt = Statement::new("INSERT INTO t (name, age) VALUES ($1, $2)")
///     .bind("Shri")
///     .bind(20);
/// assert_eq!(stmt.params.len(), 2);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct Statement {
    /// SQL text with backend-specific placeholders
    pub text: String,

    /// Positional parameters
    pub params: Vec<SqlValue>,
}

impl Statement {
    /// Create a statement with no parameters
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            params: Vec::new(),
        }
    }

    /// Append one positional parameter
    #[must_use]
    pub fn bind(mut self, value: impl Into<SqlValue>) -> Self {
        self.params.push(value.into());
        self
    }

    /// Place `leading` ahead of the already-bound parameters
    ///
    /// Used by `update`, where SET values precede WHERE predicates in
    /// placeholder order.
    #[must_use]
    pub fn prepend_params(mut self, leading: Vec<SqlValue>) -> Self {
        if !leading.is_empty() {
            let mut params = leading;
            params.append(&mut self.params);
            self.params = params;
        }
        self
    }
}

impl From<&str> for Statement {
    fn from(text: &str) -> Self {
        Statement::new(text)
    }
}

impl From<String> for Statement {
    fn from(text: String) -> Self {
        Statement::new(text)
    }
}

/// One fetched row, cells in column order.
///
/// Mirrors the positional tuples the native drivers return; no schema is
/// imposed by the facade.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct SqlRow {
    values: Vec<SqlValue>,
}

impl SqlRow {
    /// Build a row from cells in column order
    pub fn new(values: Vec<SqlValue>) -> Self {
        Self { values }
    }

    /// Cell at `index`, if present
    pub fn get(&self, index: usize) -> Option<&SqlValue> {
        self.values.get(index)
    }

    /// Number of cells
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// True when the row has no cells
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Iterate over cells in column order
    pub fn iter(&self) -> std::slice::Iter<'_, SqlValue> {
        self.values.iter()
    }

    /// Consume the row, yielding its cells
    pub fn into_values(self) -> Vec<SqlValue> {
        self.values
    }
}

impl IntoIterator for SqlRow {
    type Item = SqlValue;
    type IntoIter = std::vec::IntoIter<SqlValue>;

    fn into_iter(self) -> Self::IntoIter {
        self.values.into_iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use test_case::test_case;

    #[test]
    fn test_statement_builder() {
        let stmt = Statement::new("UPDATE t SET age = $1 WHERE name = $2")
            .bind(21)
            .bind("Shri");

        assert_eq!(stmt.text, "UPDATE t SET age = $1 WHERE name = $2");
        assert_eq!(
            stmt.params,
            vec![SqlValue::Int(21), SqlValue::Text("Shri".to_string())]
        );
    }

    #[test]
    fn test_statement_prepend_params() {
        let stmt = Statement::new("UPDATE t SET age = $1 WHERE name = $2")
            .bind("Shri")
            .prepend_params(vec![SqlValue::Int(21)]);

        assert_eq!(
            stmt.params,
            vec![SqlValue::Int(21), SqlValue::Text("Shri".to_string())]
        );
    }

    #[test]
    fn test_statement_prepend_params_empty_is_noop() {
        let stmt = Statement::new("DELETE FROM t WHERE age = $1")
            .bind(20)
            .prepend_params(Vec::new());

        assert_eq!(stmt.params, vec![SqlValue::Int(20)]);
    }

    #[test]
    fn test_statement_from_str() {
        let stmt: Statement = "SELECT * FROM t".into();
        assert_eq!(stmt.text, "SELECT * FROM t");
        assert!(stmt.params.is_empty());
    }

    #[test_case(SqlValue::from(true), SqlValue::Bool(true); "bool")]
    #[test_case(SqlValue::from(42i32), SqlValue::Int(42); "i32 widens")]
    #[test_case(SqlValue::from(42i64), SqlValue::Int(42); "i64")]
    #[test_case(SqlValue::from(1.5f64), SqlValue::Float(1.5); "f64")]
    #[test_case(SqlValue::from("x"), SqlValue::Text("x".to_string()); "str")]
    fn test_sql_value_from(value: SqlValue, expected: SqlValue) {
        assert_eq!(value, expected);
    }

    #[test]
    fn test_sql_value_from_option() {
        assert_eq!(SqlValue::from(None::<i64>), SqlValue::Null);
        assert_eq!(SqlValue::from(Some(7i64)), SqlValue::Int(7));
    }

    #[test]
    fn test_sql_row_access() {
        let row = SqlRow::new(vec![
            SqlValue::Text("Shri".to_string()),
            SqlValue::Int(20),
        ]);

        assert_eq!(row.len(), 2);
        assert!(!row.is_empty());
        assert_eq!(row.get(0), Some(&SqlValue::Text("Shri".to_string())));
        assert_eq!(row.get(1), Some(&SqlValue::Int(20)));
        assert_eq!(row.get(2), None);
    }

    #[test]
    fn test_sql_row_into_values() {
        let row = SqlRow::new(vec![SqlValue::Null, SqlValue::Bool(false)]);
        let values = row.into_values();
        assert_eq!(values, vec![SqlValue::Null, SqlValue::Bool(false)]);
    }
}
