//! Conversions between the facade value model and mysql_async types

use crate::domain::{SqlRow, SqlValue};
use mysql_async::{Params, Row, Value};

/// Convert statement parameters into the driver's positional form
pub(crate) fn to_params(params: &[SqlValue]) -> Params {
    if params.is_empty() {
        Params::Empty
    } else {
        Params::Positional(params.iter().map(to_mysql_value).collect())
    }
}

fn to_mysql_value(value: &SqlValue) -> Value {
    match value {
        SqlValue::Null => Value::NULL,
        SqlValue::Bool(v) => Value::Int(i64::from(*v)),
        SqlValue::Int(v) => Value::Int(*v),
        SqlValue::Float(v) => Value::Double(*v),
        SqlValue::Text(v) => Value::Bytes(v.clone().into_bytes()),
        SqlValue::Json(v) => Value::Bytes(v.to_string().into_bytes()),
        SqlValue::Bytes(v) => Value::Bytes(v.clone()),
    }
}

/// Convert one driver row into the facade row shape
///
/// MySQL reports character data as raw bytes; valid UTF-8 becomes `Text`,
/// anything else stays `Bytes`.
pub(crate) fn row_to_sql_row(row: Row) -> SqlRow {
    let values = row.unwrap().into_iter().map(from_mysql_value).collect();
    SqlRow::new(values)
}

fn from_mysql_value(value: Value) -> SqlValue {
    match value {
        Value::NULL => SqlValue::Null,
        Value::Int(v) => SqlValue::Int(v),
        Value::UInt(v) => match i64::try_from(v) {
            Ok(v) => SqlValue::Int(v),
            Err(_) => SqlValue::Text(v.to_string()),
        },
        Value::Float(v) => SqlValue::Float(f64::from(v)),
        Value::Double(v) => SqlValue::Float(v),
        Value::Bytes(bytes) => match String::from_utf8(bytes) {
            Ok(text) => SqlValue::Text(text),
            Err(e) => SqlValue::Bytes(e.into_bytes()),
        },
        Value::Date(year, month, day, hour, minute, second, micros) => {
            if hour == 0 && minute == 0 && second == 0 && micros == 0 {
                SqlValue::Text(format!("{year:04}-{month:02}-{day:02}"))
            } else {
                SqlValue::Text(format!(
                    "{year:04}-{month:02}-{day:02} {hour:02}:{minute:02}:{second:02}"
                ))
            }
        }
        Value::Time(negative, days, hours, minutes, seconds, _micros) => {
            let sign = if negative { "-" } else { "" };
            let total_hours = u32::from(hours) + days * 24;
            SqlValue::Text(format!("{sign}{total_hours:02}:{minutes:02}:{seconds:02}"))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_to_params_empty() {
        assert!(matches!(to_params(&[]), Params::Empty));
    }

    #[test]
    fn test_to_params_positional() {
        let params = to_params(&[SqlValue::Text("Shri".to_string()), SqlValue::Int(20)]);
        match params {
            Params::Positional(values) => {
                assert_eq!(values.len(), 2);
                assert_eq!(values[0], Value::Bytes(b"Shri".to_vec()));
                assert_eq!(values[1], Value::Int(20));
            }
            other => panic!("expected positional params, got {other:?}"),
        }
    }

    #[test]
    fn test_from_mysql_value_scalars() {
        assert_eq!(from_mysql_value(Value::NULL), SqlValue::Null);
        assert_eq!(from_mysql_value(Value::Int(-3)), SqlValue::Int(-3));
        assert_eq!(from_mysql_value(Value::UInt(7)), SqlValue::Int(7));
        assert_eq!(from_mysql_value(Value::Double(1.5)), SqlValue::Float(1.5));
    }

    #[test]
    fn test_from_mysql_value_utf8_bytes_become_text() {
        assert_eq!(
            from_mysql_value(Value::Bytes(b"Shri".to_vec())),
            SqlValue::Text("Shri".to_string())
        );
    }

    #[test]
    fn test_from_mysql_value_non_utf8_bytes_stay_bytes() {
        assert_eq!(
            from_mysql_value(Value::Bytes(vec![0xff, 0xfe])),
            SqlValue::Bytes(vec![0xff, 0xfe])
        );
    }

    #[test]
    fn test_from_mysql_value_date() {
        assert_eq!(
            from_mysql_value(Value::Date(2024, 5, 17, 0, 0, 0, 0)),
            SqlValue::Text("2024-05-17".to_string())
        );
        assert_eq!(
            from_mysql_value(Value::Date(2024, 5, 17, 9, 30, 1, 0)),
            SqlValue::Text("2024-05-17 09:30:01".to_string())
        );
    }

    #[test]
    fn test_uint_overflow_falls_back_to_text() {
        assert_eq!(
            from_mysql_value(Value::UInt(u64::MAX)),
            SqlValue::Text(u64::MAX.to_string())
        );
    }
}
