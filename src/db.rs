//! Connection pool provider. The pool is built once at startup and lives as
//! long as the process; there is no shutdown path.

use crate::config::DbConfig;
use crate::error::StoreError;
use sqlx::mysql::{MySqlPool, MySqlPoolOptions};

/// Opens the pool and establishes a first connection. Callers treat an error
/// as fatal.
pub async fn connect(config: &DbConfig) -> Result<MySqlPool, Box<dyn std::error::Error>> {
    let options = config.connect_options()?;
    let pool = MySqlPoolOptions::new()
        .max_connections(config.pool_size)
        .acquire_timeout(config.acquire_timeout)
        .connect_with(options)
        .await
        .map_err(StoreError::Db)?;
    tracing::info!(max_connections = config.pool_size, "database pool ready");
    Ok(pool)
}
