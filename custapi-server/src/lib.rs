//! custapi-server: customer records over HTTP
//!
//! Translates CRUD requests on `/customers` into parameterized statements
//! run against a shared MySQL connection pool.

pub mod config;
pub mod db;
pub mod http;
pub mod models;

pub use config::{DatabaseConfig, PoolConfig};
pub use db::{create_pool, DbError, MySqlExecutor, PoolStatus, QueryExecutor};
pub use http::{build_router, run_server, AppState, ServerConfig};
