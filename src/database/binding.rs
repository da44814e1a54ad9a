//! Native value binding
//!
//! Converts raw JSON values into SQLite values and SQLite column values back
//! into JSON. Binding follows the hosted service's conversion table: nulls,
//! numbers and strings map directly, booleans become 0/1, and composite
//! values are refused.

use rusqlite::types::Value as SqlValue;
use serde_json::{Number, Value};

use super::errors::{DbError, DbResult};

/// Convert one raw JSON value into something SQLite can bind
pub fn bind_value(value: &Value) -> DbResult<SqlValue> {
    match value {
        Value::Null => Ok(SqlValue::Null),
        Value::Bool(b) => Ok(SqlValue::Integer(i64::from(*b))),
        Value::Number(n) => Ok(number_to_sql(n)),
        Value::String(s) => Ok(SqlValue::Text(s.clone())),
        Value::Array(_) => Err(DbError::UnsupportedType {
            kind: "array",
            value: value.to_string(),
        }),
        Value::Object(_) => Err(DbError::UnsupportedType {
            kind: "object",
            value: value.to_string(),
        }),
    }
}

/// Convert a whole parameter list, failing on the first unsupported value
pub fn bind_values(values: &[Value]) -> DbResult<Vec<SqlValue>> {
    values.iter().map(bind_value).collect()
}

fn number_to_sql(n: &Number) -> SqlValue {
    if let Some(i) = n.as_i64() {
        SqlValue::Integer(i)
    } else {
        // u64 above i64::MAX and all floats
        SqlValue::Real(n.as_f64().unwrap_or(f64::NAN))
    }
}

/// Convert a column value read from SQLite into JSON
pub fn column_to_json(value: SqlValue) -> Value {
    match value {
        SqlValue::Null => Value::Null,
        SqlValue::Integer(i) => Value::from(i),
        SqlValue::Real(f) => Number::from_f64(f).map(Value::Number).unwrap_or(Value::Null),
        SqlValue::Text(s) => Value::String(s),
        SqlValue::Blob(bytes) => Value::Array(bytes.into_iter().map(Value::from).collect()),
    }
}
