//! Convert serde_json::Value to values that can be bound to a MySQL statement.

use serde_json::Value;
use sqlx::mysql::{MySql, MySqlArguments};
use sqlx::query::Query;

/// A statement parameter. Built from the JSON form of a request payload so every
/// resource binds through the same path.
#[derive(Clone, Debug, PartialEq)]
pub enum SqlValue {
    Null,
    Bool(bool),
    Int(i64),
    UInt(u64),
    Float(f64),
    Text(String),
}

impl SqlValue {
    pub fn from_json(v: &Value) -> Self {
        match v {
            Value::Null => SqlValue::Null,
            Value::Bool(b) => SqlValue::Bool(*b),
            Value::Number(n) => {
                if let Some(i) = n.as_i64() {
                    SqlValue::Int(i)
                } else if let Some(u) = n.as_u64() {
                    SqlValue::UInt(u)
                } else {
                    SqlValue::Float(n.as_f64().unwrap_or_default())
                }
            }
            Value::String(s) => SqlValue::Text(s.clone()),
            // Nested values land in a text column as their JSON encoding.
            Value::Array(_) | Value::Object(_) => SqlValue::Text(v.to_string()),
        }
    }

    /// JSON form of the value as a stored cell.
    pub fn to_json(&self) -> Value {
        match self {
            SqlValue::Null => Value::Null,
            SqlValue::Bool(b) => Value::Bool(*b),
            SqlValue::Int(n) => Value::Number((*n).into()),
            SqlValue::UInt(n) => Value::Number((*n).into()),
            SqlValue::Float(f) => serde_json::Number::from_f64(*f)
                .map(Value::Number)
                .unwrap_or(Value::Null),
            SqlValue::Text(s) => Value::String(s.clone()),
        }
    }

    pub fn bind<'q>(
        &'q self,
        query: Query<'q, MySql, MySqlArguments>,
    ) -> Query<'q, MySql, MySqlArguments> {
        match self {
            SqlValue::Null => query.bind(None::<String>),
            SqlValue::Bool(b) => query.bind(*b),
            SqlValue::Int(n) => query.bind(*n),
            SqlValue::UInt(n) => query.bind(*n),
            SqlValue::Float(f) => query.bind(*f),
            SqlValue::Text(s) => query.bind(s.as_str()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn numbers_keep_their_kind() {
        assert_eq!(SqlValue::from_json(&json!(3)), SqlValue::Int(3));
        assert_eq!(SqlValue::from_json(&json!(u64::MAX)), SqlValue::UInt(u64::MAX));
        assert_eq!(SqlValue::from_json(&json!(9.99)), SqlValue::Float(9.99));
    }

    #[test]
    fn absent_and_nested_values() {
        assert_eq!(SqlValue::from_json(&Value::Null), SqlValue::Null);
        assert_eq!(
            SqlValue::from_json(&json!({"a": 1})),
            SqlValue::Text("{\"a\":1}".into())
        );
    }

    #[test]
    fn non_finite_float_is_stored_as_null() {
        assert_eq!(SqlValue::Float(f64::NAN).to_json(), Value::Null);
        assert_eq!(SqlValue::Float(1.5).to_json(), json!(1.5));
    }
}
