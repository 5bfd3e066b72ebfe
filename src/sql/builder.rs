//! Builds parameterized SELECT, INSERT, UPDATE, DELETE for a resource table.

use crate::model::TableSpec;
use crate::sql::SqlValue;

/// Quote identifier for MySQL (safe: only from static table specs).
fn quoted(s: &str) -> String {
    format!("`{}`", s.replace('`', "``"))
}

#[derive(Debug)]
pub struct QueryBuf {
    pub sql: String,
    pub params: Vec<SqlValue>,
}

impl QueryBuf {
    fn new(sql: String) -> Self {
        QueryBuf {
            sql,
            params: Vec::new(),
        }
    }

    fn push_param(&mut self, v: SqlValue) {
        self.params.push(v);
    }
}

/// SELECT every column of every row.
pub fn select_all(table: &TableSpec) -> QueryBuf {
    QueryBuf::new(format!("SELECT * FROM {}", quoted(table.name)))
}

/// SELECT by primary key; id is the sole param.
pub fn select_by_id(table: &TableSpec, id: u64) -> QueryBuf {
    let mut q = QueryBuf::new(format!(
        "SELECT * FROM {} WHERE {} = ?",
        quoted(table.name),
        quoted(table.primary_key)
    ));
    q.push_param(SqlValue::UInt(id));
    q
}

/// INSERT all non-key columns. `values` follow `table.columns` order.
pub fn insert(table: &TableSpec, values: Vec<SqlValue>) -> QueryBuf {
    let cols = table
        .columns
        .iter()
        .map(|c| quoted(c))
        .collect::<Vec<_>>()
        .join(", ");
    let placeholders = vec!["?"; table.columns.len()].join(", ");
    let mut q = QueryBuf::new(format!(
        "INSERT INTO {} ({}) VALUES ({})",
        quoted(table.name),
        cols,
        placeholders
    ));
    for v in values {
        q.push_param(v);
    }
    q
}

/// UPDATE every non-key column by primary key. Key is bound last.
pub fn update(table: &TableSpec, id: u64, values: Vec<SqlValue>) -> QueryBuf {
    let set = table
        .columns
        .iter()
        .map(|c| format!("{} = ?", quoted(c)))
        .collect::<Vec<_>>()
        .join(", ");
    let mut q = QueryBuf::new(format!(
        "UPDATE {} SET {} WHERE {} = ?",
        quoted(table.name),
        set,
        quoted(table.primary_key)
    ));
    for v in values {
        q.push_param(v);
    }
    q.push_param(SqlValue::UInt(id));
    q
}

pub fn delete(table: &TableSpec, id: u64) -> QueryBuf {
    let mut q = QueryBuf::new(format!(
        "DELETE FROM {} WHERE {} = ?",
        quoted(table.name),
        quoted(table.primary_key)
    ));
    q.push_param(SqlValue::UInt(id));
    q
}

#[cfg(test)]
mod tests {
    use super::*;

    const PETS: TableSpec = TableSpec {
        name: "pet",
        primary_key: "id",
        columns: &["name", "age"],
    };

    #[test]
    fn select_statements() {
        assert_eq!(select_all(&PETS).sql, "SELECT * FROM `pet`");
        let q = select_by_id(&PETS, 7);
        assert_eq!(q.sql, "SELECT * FROM `pet` WHERE `id` = ?");
        assert_eq!(q.params, vec![SqlValue::UInt(7)]);
    }

    #[test]
    fn insert_lists_every_column() {
        let q = insert(&PETS, vec![SqlValue::Text("rex".into()), SqlValue::Null]);
        assert_eq!(q.sql, "INSERT INTO `pet` (`name`, `age`) VALUES (?, ?)");
        assert_eq!(q.params.len(), 2);
    }

    #[test]
    fn update_binds_key_last() {
        let q = update(&PETS, 3, vec![SqlValue::Text("rex".into()), SqlValue::Int(4)]);
        assert_eq!(q.sql, "UPDATE `pet` SET `name` = ?, `age` = ? WHERE `id` = ?");
        assert_eq!(q.params.last(), Some(&SqlValue::UInt(3)));
    }

    #[test]
    fn delete_by_key() {
        let q = delete(&PETS, 1);
        assert_eq!(q.sql, "DELETE FROM `pet` WHERE `id` = ?");
        assert_eq!(q.params, vec![SqlValue::UInt(1)]);
    }

    #[test]
    fn identifiers_are_escaped() {
        assert_eq!(quoted("we`ird"), "`we``ird`");
    }
}
