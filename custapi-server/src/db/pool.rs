//! Database connection pool management
//!
//! Uses sqlx MySqlPool with explicit connection limits and a bounded acquire
//! wait, so exhaustion surfaces as an error instead of an unbounded queue.
//! Connections go back to the pool when their guard is dropped.

use serde::Serialize;
use sqlx::mysql::MySqlPoolOptions;
use sqlx::MySqlPool;

use super::DbError;
use crate::config::DatabaseConfig;

/// Create a MySQL connection pool from configuration.
///
/// # Errors
///
/// Returns [`DbError::Connection`] if the options are invalid or the store
/// cannot be reached.
///
/// # Example
///
/// ```ignore
/// let pool = create_pool(&DatabaseConfig::default()).await?;
/// ```
pub async fn create_pool(config: &DatabaseConfig) -> Result<MySqlPool, DbError> {
    let options = config.connect_options().map_err(DbError::Connection)?;
    let pool_config = &config.pool;

    tracing::info!(
        db = %config.describe(),
        max_connections = pool_config.max_connections,
        acquire_timeout_secs = pool_config.acquire_timeout_secs,
        "Connecting database pool"
    );

    MySqlPoolOptions::new()
        .max_connections(pool_config.max_connections)
        .min_connections(pool_config.min_connections)
        .acquire_timeout(pool_config.acquire_timeout())
        .idle_timeout(Some(pool_config.idle_timeout()))
        .connect_with(options)
        .await
        .map_err(DbError::Connection)
}

/// Point-in-time view of pool occupancy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct PoolStatus {
    /// Open connections, idle or in use
    pub size: u32,
    /// Open connections not checked out
    pub idle: usize,
    pub max_connections: u32,
}

impl PoolStatus {
    pub fn of(pool: &MySqlPool) -> Self {
        Self {
            size: pool.size(),
            idle: pool.num_idle(),
            max_connections: pool.options().get_max_connections(),
        }
    }

    /// Connections currently checked out.
    pub fn in_use(&self) -> usize {
        (self.size as usize).saturating_sub(self.idle)
    }
}
