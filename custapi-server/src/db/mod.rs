//! Database layer - connection pool, executor, statements
//!
//! # Design Principles
//!
//! - Connection pool (default 5 connections), the only shared state
//! - One connection per statement, released by guard drop
//! - Values are always bound, never spliced into statement text
//! - Rely on DB constraints, no check-then-insert

pub mod error;
pub mod executor;
pub mod pool;
pub mod statements;
pub mod update;
pub mod value;

pub use error::DbError;
pub use executor::{check_arity, MySqlExecutor, QueryExecutor};
pub use pool::{create_pool, PoolStatus};
pub use update::UpdateClause;
pub use value::{Param, Record};
