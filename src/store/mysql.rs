//! Store backed by the pooled MySQL connection.

use crate::error::StoreError;
use crate::model::{Row, TableSpec};
use crate::sql::{self, QueryBuf, SqlValue};
use crate::store::Store;
use async_trait::async_trait;
use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;
use serde_json::Value;
use sqlx::mysql::{MySqlPool, MySqlQueryResult, MySqlRow};

#[derive(Clone)]
pub struct MySqlStore {
    pool: MySqlPool,
}

impl MySqlStore {
    pub fn new(pool: MySqlPool) -> Self {
        MySqlStore { pool }
    }

    pub fn pool(&self) -> &MySqlPool {
        &self.pool
    }

    async fn query_many(&self, q: &QueryBuf) -> Result<Vec<Row>, StoreError> {
        tracing::debug!(sql = %q.sql, params = ?q.params, "query");
        let mut query = sqlx::query(&q.sql);
        for p in &q.params {
            query = p.bind(query);
        }
        let rows = query.fetch_all(&self.pool).await?;
        Ok(rows.iter().map(row_to_json).collect())
    }

    async fn execute(&self, q: &QueryBuf) -> Result<MySqlQueryResult, StoreError> {
        tracing::debug!(sql = %q.sql, params = ?q.params, "execute");
        let mut query = sqlx::query(&q.sql);
        for p in &q.params {
            query = p.bind(query);
        }
        Ok(query.execute(&self.pool).await?)
    }
}

#[async_trait]
impl Store for MySqlStore {
    async fn fetch_all(&self, table: &TableSpec) -> Result<Vec<Row>, StoreError> {
        self.query_many(&sql::select_all(table)).await
    }

    async fn fetch_by_id(&self, table: &TableSpec, id: u64) -> Result<Vec<Row>, StoreError> {
        self.query_many(&sql::select_by_id(table, id)).await
    }

    async fn insert(&self, table: &TableSpec, values: Vec<SqlValue>) -> Result<u64, StoreError> {
        let result = self.execute(&sql::insert(table, values)).await?;
        Ok(result.last_insert_id())
    }

    // The driver connects with CLIENT_FOUND_ROWS, so an update that leaves a
    // row unchanged still counts it.
    async fn update(
        &self,
        table: &TableSpec,
        id: u64,
        values: Vec<SqlValue>,
    ) -> Result<u64, StoreError> {
        let result = self.execute(&sql::update(table, id, values)).await?;
        Ok(result.rows_affected())
    }

    async fn delete(&self, table: &TableSpec, id: u64) -> Result<u64, StoreError> {
        let result = self.execute(&sql::delete(table, id)).await?;
        Ok(result.rows_affected())
    }

    async fn ping(&self) -> Result<(), StoreError> {
        sqlx::query("SELECT 1").fetch_optional(&self.pool).await?;
        Ok(())
    }
}

fn row_to_json(row: &MySqlRow) -> Row {
    use sqlx::Column;
    use sqlx::Row as _;
    row.columns()
        .iter()
        .map(|col| (col.name().to_string(), cell_to_value(row, col.ordinal())))
        .collect()
}

fn cell_to_value(row: &MySqlRow, idx: usize) -> Value {
    use sqlx::Row as _;
    if let Ok(v) = row.try_get::<Option<i64>, _>(idx) {
        return v.map(Value::from).unwrap_or(Value::Null);
    }
    if let Ok(v) = row.try_get::<Option<u64>, _>(idx) {
        return v.map(Value::from).unwrap_or(Value::Null);
    }
    if let Ok(v) = row.try_get::<Option<Decimal>, _>(idx) {
        return v
            .and_then(|d| d.to_f64())
            .and_then(serde_json::Number::from_f64)
            .map(Value::Number)
            .unwrap_or(Value::Null);
    }
    if let Ok(v) = row.try_get::<Option<f64>, _>(idx) {
        return v
            .and_then(serde_json::Number::from_f64)
            .map(Value::Number)
            .unwrap_or(Value::Null);
    }
    if let Ok(v) = row.try_get::<Option<f32>, _>(idx) {
        return v
            .and_then(|f| serde_json::Number::from_f64(f as f64))
            .map(Value::Number)
            .unwrap_or(Value::Null);
    }
    if let Ok(v) = row.try_get::<Option<String>, _>(idx) {
        return v.map(Value::String).unwrap_or(Value::Null);
    }
    if let Ok(Some(bytes)) = row.try_get::<Option<Vec<u8>>, _>(idx) {
        return Value::String(String::from_utf8_lossy(&bytes).into_owned());
    }
    Value::Null
}
