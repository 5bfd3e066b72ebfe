//! In-process store with auto-increment keys. Used by tests and local runs
//! without a database.

use crate::error::StoreError;
use crate::model::{Row, TableSpec};
use crate::sql::SqlValue;
use crate::store::Store;
use async_trait::async_trait;
use serde_json::Value;
use std::collections::{BTreeMap, HashMap};
use std::sync::{RwLock, RwLockReadGuard, RwLockWriteGuard};

#[derive(Default)]
struct Table {
    last_id: u64,
    rows: BTreeMap<u64, Row>,
}

#[derive(Default)]
pub struct MemoryStore {
    tables: RwLock<HashMap<&'static str, Table>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn read(&self) -> Result<RwLockReadGuard<'_, HashMap<&'static str, Table>>, StoreError> {
        self.tables
            .read()
            .map_err(|_| StoreError::Unavailable("memory store lock poisoned".into()))
    }

    fn write(&self) -> Result<RwLockWriteGuard<'_, HashMap<&'static str, Table>>, StoreError> {
        self.tables
            .write()
            .map_err(|_| StoreError::Unavailable("memory store lock poisoned".into()))
    }
}

fn build_row(table: &TableSpec, id: u64, values: &[SqlValue]) -> Row {
    let mut row = Row::new();
    row.insert(table.primary_key.to_string(), Value::from(id));
    for (col, v) in table.columns.iter().zip(values) {
        row.insert(col.to_string(), v.to_json());
    }
    row
}

#[async_trait]
impl Store for MemoryStore {
    async fn fetch_all(&self, table: &TableSpec) -> Result<Vec<Row>, StoreError> {
        let tables = self.read()?;
        Ok(tables
            .get(table.name)
            .map(|t| t.rows.values().cloned().collect())
            .unwrap_or_default())
    }

    async fn fetch_by_id(&self, table: &TableSpec, id: u64) -> Result<Vec<Row>, StoreError> {
        let tables = self.read()?;
        Ok(tables
            .get(table.name)
            .and_then(|t| t.rows.get(&id))
            .cloned()
            .into_iter()
            .collect())
    }

    async fn insert(&self, table: &TableSpec, values: Vec<SqlValue>) -> Result<u64, StoreError> {
        let mut tables = self.write()?;
        let t = tables.entry(table.name).or_default();
        t.last_id += 1;
        let id = t.last_id;
        t.rows.insert(id, build_row(table, id, &values));
        Ok(id)
    }

    async fn update(
        &self,
        table: &TableSpec,
        id: u64,
        values: Vec<SqlValue>,
    ) -> Result<u64, StoreError> {
        let mut tables = self.write()?;
        let Some(row) = tables.get_mut(table.name).and_then(|t| t.rows.get_mut(&id)) else {
            return Ok(0);
        };
        *row = build_row(table, id, &values);
        Ok(1)
    }

    async fn delete(&self, table: &TableSpec, id: u64) -> Result<u64, StoreError> {
        let mut tables = self.write()?;
        let removed = tables
            .get_mut(table.name)
            .and_then(|t| t.rows.remove(&id))
            .is_some();
        Ok(u64::from(removed))
    }

    async fn ping(&self) -> Result<(), StoreError> {
        self.read().map(|_| ())
    }
}
