//! Conversions between the facade value model and tokio-postgres types

use crate::domain::{DbError, Result, SqlRow, SqlValue};
use bytes::BytesMut;
use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use tokio_postgres::types::{to_sql_checked, IsNull, ToSql, Type};
use tokio_postgres::Row;

impl ToSql for SqlValue {
    fn to_sql(
        &self,
        ty: &Type,
        out: &mut BytesMut,
    ) -> std::result::Result<IsNull, Box<dyn std::error::Error + Sync + Send>> {
        match self {
            SqlValue::Null => Ok(IsNull::Yes),
            SqlValue::Bool(v) => v.to_sql(ty, out),
            SqlValue::Int(v) => {
                // Narrow to the column's declared width
                if *ty == Type::INT2 {
                    i16::try_from(*v)?.to_sql(ty, out)
                } else if *ty == Type::INT4 {
                    i32::try_from(*v)?.to_sql(ty, out)
                } else {
                    v.to_sql(ty, out)
                }
            }
            SqlValue::Float(v) => {
                if *ty == Type::FLOAT4 {
                    (*v as f32).to_sql(ty, out)
                } else {
                    v.to_sql(ty, out)
                }
            }
            SqlValue::Text(v) => v.to_sql(ty, out),
            SqlValue::Json(v) => v.to_sql(ty, out),
            SqlValue::Bytes(v) => v.to_sql(ty, out),
        }
    }

    fn accepts(_ty: &Type) -> bool {
        // The parameter value decides its own encoding; type mismatches
        // surface as driver errors
        true
    }

    to_sql_checked!();
}

/// Borrow statement parameters in the form `tokio-postgres` expects
pub(crate) fn borrow_params(params: &[SqlValue]) -> Vec<&(dyn ToSql + Sync)> {
    params.iter().map(|p| p as &(dyn ToSql + Sync)).collect()
}

/// Convert one driver row into the facade row shape
///
/// # Errors
///
/// Returns `DbError::Fetch` for a column type outside the supported set.
pub(crate) fn row_to_sql_row(row: &Row) -> Result<SqlRow> {
    let mut values = Vec::with_capacity(row.len());

    for (idx, column) in row.columns().iter().enumerate() {
        let ty = column.type_();
        let value = if *ty == Type::BOOL {
            cell(row, idx, SqlValue::Bool)?
        } else if *ty == Type::INT2 {
            cell(row, idx, |v: i16| SqlValue::Int(i64::from(v)))?
        } else if *ty == Type::INT4 {
            cell(row, idx, |v: i32| SqlValue::Int(i64::from(v)))?
        } else if *ty == Type::INT8 {
            cell(row, idx, SqlValue::Int)?
        } else if *ty == Type::FLOAT4 {
            cell(row, idx, |v: f32| SqlValue::Float(f64::from(v)))?
        } else if *ty == Type::FLOAT8 {
            cell(row, idx, SqlValue::Float)?
        } else if *ty == Type::TEXT
            || *ty == Type::VARCHAR
            || *ty == Type::BPCHAR
            || *ty == Type::NAME
        {
            cell(row, idx, SqlValue::Text)?
        } else if *ty == Type::JSON || *ty == Type::JSONB {
            cell(row, idx, SqlValue::Json)?
        } else if *ty == Type::BYTEA {
            cell(row, idx, SqlValue::Bytes)?
        } else if *ty == Type::TIMESTAMP {
            cell(row, idx, |v: NaiveDateTime| SqlValue::Text(v.to_string()))?
        } else if *ty == Type::TIMESTAMPTZ {
            cell(row, idx, |v: DateTime<Utc>| SqlValue::Text(v.to_rfc3339()))?
        } else if *ty == Type::DATE {
            cell(row, idx, |v: NaiveDate| SqlValue::Text(v.to_string()))?
        } else {
            return Err(DbError::Fetch(format!(
                "Unsupported PostgreSQL column type '{}' in column '{}'",
                ty,
                column.name()
            )));
        };

        values.push(value);
    }

    Ok(SqlRow::new(values))
}

fn cell<'a, T>(row: &'a Row, idx: usize, wrap: impl Fn(T) -> SqlValue) -> Result<SqlValue>
where
    T: tokio_postgres::types::FromSql<'a>,
{
    let value: Option<T> = row
        .try_get(idx)
        .map_err(|e| DbError::Fetch(format!("Failed to decode column {idx}: {e}")))?;

    Ok(value.map_or(SqlValue::Null, wrap))
}
