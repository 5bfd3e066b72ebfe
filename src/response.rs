//! Response body helpers.

use crate::model::{Row, TableSpec};
use serde_json::Value;

/// Submitted fields prefixed with the id under `id_key`, as returned by create and update.
pub fn with_id(id_key: &str, id: u64, fields: Value) -> Value {
    let mut body = Row::new();
    body.insert(id_key.to_string(), Value::from(id));
    if let Value::Object(fields) = fields {
        body.extend(fields);
    }
    Value::Object(body)
}

/// Rows as returned by read-by-id: a list even for one match, without the key.
pub fn projected(table: &TableSpec, rows: &[Row]) -> Vec<Row> {
    rows.iter().map(|row| table.project(row)).collect()
}
