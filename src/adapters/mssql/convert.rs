//! Conversions between the facade value model and tiberius types

use crate::domain::{DbError, Result, SqlRow, SqlValue};
use tiberius::{ColumnData, Row, ToSql};

impl ToSql for SqlValue {
    fn to_sql(&self) -> ColumnData<'_> {
        match self {
            SqlValue::Null => ColumnData::String(None),
            SqlValue::Bool(v) => ColumnData::Bit(Some(*v)),
            SqlValue::Int(v) => ColumnData::I64(Some(*v)),
            SqlValue::Float(v) => ColumnData::F64(Some(*v)),
            SqlValue::Text(v) => ColumnData::String(Some(v.as_str().into())),
            SqlValue::Json(v) => ColumnData::String(Some(v.to_string().into())),
            SqlValue::Bytes(v) => ColumnData::Binary(Some(v.as_slice().into())),
        }
    }
}

/// Borrow statement parameters in the form `tiberius` expects
pub(crate) fn borrow_params(params: &[SqlValue]) -> Vec<&dyn ToSql> {
    params.iter().map(|p| p as &dyn ToSql).collect()
}

/// Convert one driver row into the facade row shape
///
/// # Errors
///
/// Returns `DbError::Fetch` for a column type outside the supported set.
pub(crate) fn row_to_sql_row(row: Row) -> Result<SqlRow> {
    let column_names: Vec<String> = row
        .columns()
        .iter()
        .map(|c| c.name().to_string())
        .collect();

    let mut values = Vec::with_capacity(column_names.len());
    for (name, cell) in column_names.iter().zip(row.into_iter()) {
        values.push(from_column_data(cell, name)?);
    }

    Ok(SqlRow::new(values))
}

fn from_column_data(data: ColumnData<'_>, column: &str) -> Result<SqlValue> {
    let value = match data {
        ColumnData::Bit(v) => v.map(SqlValue::Bool),
        ColumnData::U8(v) => v.map(|v| SqlValue::Int(i64::from(v))),
        ColumnData::I16(v) => v.map(|v| SqlValue::Int(i64::from(v))),
        ColumnData::I32(v) => v.map(|v| SqlValue::Int(i64::from(v))),
        ColumnData::I64(v) => v.map(SqlValue::Int),
        ColumnData::F32(v) => v.map(|v| SqlValue::Float(f64::from(v))),
        ColumnData::F64(v) => v.map(SqlValue::Float),
        ColumnData::String(v) => v.map(|v| SqlValue::Text(v.into_owned())),
        ColumnData::Binary(v) => v.map(|v| SqlValue::Bytes(v.into_owned())),
        ColumnData::Numeric(v) => v.map(|v| SqlValue::Text(v.to_string())),
        ColumnData::Guid(v) => v.map(|v| SqlValue::Text(v.to_string())),
        other => {
            return Err(DbError::Fetch(format!(
                "Unsupported SQL Server column type in column '{column}': {other:?}"
            )))
        }
    };

    Ok(value.unwrap_or(SqlValue::Null))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_to_sql_scalars() {
        assert!(matches!(
            SqlValue::Int(20).to_sql(),
            ColumnData::I64(Some(20))
        ));
        assert!(matches!(
            SqlValue::Bool(true).to_sql(),
            ColumnData::Bit(Some(true))
        ));
        assert!(matches!(SqlValue::Null.to_sql(), ColumnData::String(None)));
    }

    #[test]
    fn test_to_sql_text_borrows() {
        let value = SqlValue::Text("Shri".to_string());
        match value.to_sql() {
            ColumnData::String(Some(s)) => assert_eq!(s.as_ref(), "Shri"),
            other => panic!("expected string column data, got {other:?}"),
        }
    }

    #[test]
    fn test_from_column_data_scalars() {
        assert_eq!(
            from_column_data(ColumnData::I32(Some(21)), "age").unwrap(),
            SqlValue::Int(21)
        );
        assert_eq!(
            from_column_data(ColumnData::String(Some("Shri".into())), "name").unwrap(),
            SqlValue::Text("Shri".to_string())
        );
        assert_eq!(
            from_column_data(ColumnData::I32(None), "age").unwrap(),
            SqlValue::Null
        );
    }

    #[test]
    fn test_borrow_params_preserves_arity() {
        let params = vec![SqlValue::Text("Shri".to_string()), SqlValue::Int(20)];
        assert_eq!(borrow_params(&params).len(), 2);
    }
}
