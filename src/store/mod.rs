//! Storage seam between the handlers and the database.
//!
//! Every method issues exactly one statement. Handlers only see rows as JSON
//! objects, so [`MySqlStore`] and [`MemoryStore`] are interchangeable.

mod memory;
mod mysql;

pub use memory::MemoryStore;
pub use mysql::MySqlStore;

use crate::error::StoreError;
use crate::model::{Row, TableSpec};
use crate::sql::SqlValue;
use async_trait::async_trait;

#[async_trait]
pub trait Store: Send + Sync {
    /// Every row with every column, including the primary key.
    async fn fetch_all(&self, table: &TableSpec) -> Result<Vec<Row>, StoreError>;

    /// Rows whose primary key equals `id` (zero or one).
    async fn fetch_by_id(&self, table: &TableSpec, id: u64) -> Result<Vec<Row>, StoreError>;

    /// Inserts one row; `values` follow `table.columns`. Returns the generated id.
    async fn insert(&self, table: &TableSpec, values: Vec<SqlValue>) -> Result<u64, StoreError>;

    /// Overwrites every non-key column of row `id`. Returns the number of rows matched.
    async fn update(
        &self,
        table: &TableSpec,
        id: u64,
        values: Vec<SqlValue>,
    ) -> Result<u64, StoreError>;

    /// Returns the number of rows removed.
    async fn delete(&self, table: &TableSpec, id: u64) -> Result<u64, StoreError>;

    /// Cheap round-trip used by the readiness check.
    async fn ping(&self) -> Result<(), StoreError>;
}
