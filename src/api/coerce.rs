//! Parameter coercion
//!
//! Normalizes loosely typed JSON parameters into the primitives every
//! binding accepts. Coercion is total: each input lands in exactly one
//! [`CoercedParam`] variant and nothing here can fail.

use serde_json::{Number, Value};

/// A parameter value safe to bind
#[derive(Debug, Clone, PartialEq)]
pub enum CoercedParam {
    Null,
    Integer(i64),
    Real(f64),
    Text(String),
}

/// Coerce one raw parameter
///
/// - null stays null
/// - numbers and strings pass through
/// - booleans become 1 or 0
/// - arrays and objects become their JSON text
pub fn coerce(value: &Value) -> CoercedParam {
    match value {
        Value::Null => CoercedParam::Null,
        Value::Number(n) => coerce_number(n),
        Value::String(s) => CoercedParam::Text(s.clone()),
        Value::Bool(b) => CoercedParam::Integer(i64::from(*b)),
        Value::Array(_) | Value::Object(_) => CoercedParam::Text(value.to_string()),
    }
}

/// Coerce a parameter list, preserving positions
pub fn coerce_all(values: &[Value]) -> Vec<CoercedParam> {
    values.iter().map(coerce).collect()
}

fn coerce_number(n: &Number) -> CoercedParam {
    match n.as_i64() {
        Some(i) => CoercedParam::Integer(i),
        None => CoercedParam::Real(n.as_f64().unwrap_or(f64::NAN)),
    }
}

impl From<CoercedParam> for Value {
    fn from(param: CoercedParam) -> Self {
        match param {
            CoercedParam::Null => Value::Null,
            CoercedParam::Integer(i) => Value::from(i),
            CoercedParam::Real(f) => Number::from_f64(f).map(Value::Number).unwrap_or(Value::Null),
            CoercedParam::Text(s) => Value::String(s),
        }
    }
}
