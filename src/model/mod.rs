//! Resource definitions: table layout plus typed payload per entity.

pub mod product;
pub mod user;

pub use product::{Product, ProductResource};
pub use user::{User, UserResource};

use crate::sql::SqlValue;
use serde::{de::DeserializeOwned, Deserialize, Deserializer, Serialize};
use serde_json::Value;
use utoipa::ToSchema;

/// One stored row keyed by column name.
pub type Row = serde_json::Map<String, Value>;

/// Static table layout for one resource. `columns` excludes the primary key.
#[derive(Clone, Copy, Debug)]
pub struct TableSpec {
    pub name: &'static str,
    pub primary_key: &'static str,
    pub columns: &'static [&'static str],
}

impl TableSpec {
    /// Statement params in column order from the JSON form of a payload.
    /// Columns the payload leaves out are bound as NULL.
    pub fn values_from(&self, body: &Value) -> Vec<SqlValue> {
        self.columns
            .iter()
            .map(|c| body.get(*c).map(SqlValue::from_json).unwrap_or(SqlValue::Null))
            .collect()
    }

    /// Row restricted to the non-key columns, in column order.
    pub fn project(&self, row: &Row) -> Row {
        self.columns
            .iter()
            .map(|c| (c.to_string(), row.get(*c).cloned().unwrap_or(Value::Null)))
            .collect()
    }
}

/// An entity exposed through the generic CRUD handlers and routes.
pub trait Resource: Send + Sync + 'static {
    /// Lower-case name used for the route segment and in not-found messages.
    const NAME: &'static str;
    /// Tag grouping the operations in the API document.
    const TAG: &'static str;
    /// Key carrying the id in create and update responses.
    const ID_KEY: &'static str;
    const TABLE: TableSpec;

    /// Request body for create and update: every non-key column, each optional.
    type Payload: Serialize + DeserializeOwned + ToSchema + Send + Sync + 'static;

    fn not_found_message() -> String {
        format!("No {} found", Self::NAME)
    }
}

/// Accepts a string, number or boolean and keeps it as text.
pub(crate) fn lenient_text<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Option::<Value>::deserialize(deserializer)? {
        None | Some(Value::Null) => None,
        Some(Value::String(s)) => Some(s),
        Some(other) => Some(other.to_string()),
    })
}

/// Accepts a number or numeric text for a numeric column. Text that is not a
/// number is kept as is and left for the database to coerce or reject.
pub(crate) fn lenient_number<'de, D>(deserializer: D) -> Result<Option<Value>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Option::<Value>::deserialize(deserializer)? {
        None | Some(Value::Null) => None,
        Some(Value::String(s)) => Some(number_from_text(&s).unwrap_or(Value::String(s))),
        Some(other) => Some(other),
    })
}

fn number_from_text(s: &str) -> Option<Value> {
    let s = s.trim();
    if let Ok(i) = s.parse::<i64>() {
        return Some(Value::from(i));
    }
    s.parse::<f64>()
        .ok()
        .and_then(serde_json::Number::from_f64)
        .map(Value::Number)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    const PETS: TableSpec = TableSpec {
        name: "pet",
        primary_key: "id",
        columns: &["name", "age"],
    };

    #[test]
    fn missing_columns_bind_null() {
        let values = PETS.values_from(&json!({"name": "rex", "color": "brown"}));
        assert_eq!(values, vec![SqlValue::Text("rex".into()), SqlValue::Null]);
    }

    #[derive(Deserialize)]
    struct Priced {
        #[serde(default, deserialize_with = "lenient_number")]
        price: Option<Value>,
    }

    fn price_of(body: Value) -> Option<Value> {
        serde_json::from_value::<Priced>(body).unwrap().price
    }

    #[test]
    fn numeric_text_becomes_a_number() {
        assert_eq!(price_of(json!({"price": "19.99"})), Some(json!(19.99)));
        assert_eq!(price_of(json!({"price": " 2 "})), Some(json!(2)));
        assert_eq!(price_of(json!({"price": 4.5})), Some(json!(4.5)));
        assert_eq!(price_of(json!({"price": null})), None);
        assert_eq!(price_of(json!({})), None);
    }

    #[test]
    fn other_values_are_passed_through() {
        assert_eq!(price_of(json!({"price": "abc"})), Some(json!("abc")));
        assert_eq!(price_of(json!({"price": "NaN"})), Some(json!("NaN")));
        assert_eq!(price_of(json!({"price": true})), Some(json!(true)));
    }

    #[test]
    fn projection_drops_key_and_extras() {
        let row = json!({"id": 4, "name": "rex", "age": 2, "extra": true});
        let row = row.as_object().cloned().unwrap_or_default();
        let projected = PETS.project(&row);
        assert_eq!(Value::Object(projected), json!({"name": "rex", "age": 2}));
    }
}
