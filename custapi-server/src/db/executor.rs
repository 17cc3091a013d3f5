//! Query executor trait and MySQL implementation
//!
//! One call runs one parameterized statement on one connection. The
//! connection is acquired at the top of the call and held by a guard, so it
//! returns to the pool on every exit path: success, driver error, or the
//! caller dropping the future.

use async_trait::async_trait;
use sqlx::MySqlPool;

use super::pool::PoolStatus;
use super::value::{bind_all, placeholder_count, row_to_record, Param, Record};
use super::DbError;

/// Runs parameterized statements against the store (testable).
#[async_trait]
pub trait QueryExecutor: Send + Sync {
    /// Run a read statement and return its rows in store order.
    async fn fetch(&self, statement: &str, params: &[Param]) -> Result<Vec<Record>, DbError>;

    /// Run a write statement and return the affected row count.
    async fn execute(&self, statement: &str, params: &[Param]) -> Result<u64, DbError>;

    /// Pool occupancy, if this executor is backed by a pool.
    fn pool_status(&self) -> Option<PoolStatus> {
        None
    }
}

/// Placeholder and parameter counts must agree before anything is sent.
pub fn check_arity(statement: &str, params: &[Param]) -> Result<(), DbError> {
    let expected = placeholder_count(statement);
    if expected != params.len() {
        return Err(DbError::ParamCount {
            expected,
            actual: params.len(),
        });
    }
    Ok(())
}

/// Executor backed by a sqlx MySQL pool.
#[derive(Clone)]
pub struct MySqlExecutor {
    pool: MySqlPool,
}

impl MySqlExecutor {
    pub fn new(pool: MySqlPool) -> Self {
        Self { pool }
    }

    pub fn pool(&self) -> &MySqlPool {
        &self.pool
    }
}

#[async_trait]
impl QueryExecutor for MySqlExecutor {
    async fn fetch(&self, statement: &str, params: &[Param]) -> Result<Vec<Record>, DbError> {
        check_arity(statement, params)?;
        tracing::debug!(statement, params = params.len(), "fetch");

        let mut conn = self.pool.acquire().await.map_err(DbError::Connection)?;
        let rows = bind_all(sqlx::query(statement), params)
            .fetch_all(&mut *conn)
            .await
            .map_err(DbError::Query)?;

        Ok(rows.iter().map(row_to_record).collect())
    }

    async fn execute(&self, statement: &str, params: &[Param]) -> Result<u64, DbError> {
        check_arity(statement, params)?;
        tracing::debug!(statement, params = params.len(), "execute");

        let mut conn = self.pool.acquire().await.map_err(DbError::Connection)?;
        let result = bind_all(sqlx::query(statement), params)
            .execute(&mut *conn)
            .await
            .map_err(DbError::Query)?;

        Ok(result.rows_affected())
    }

    fn pool_status(&self) -> Option<PoolStatus> {
        Some(PoolStatus::of(&self.pool))
    }
}
