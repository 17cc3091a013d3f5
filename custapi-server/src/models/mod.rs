//! Domain models with validation at construction
//!
//! Request payloads are checked here, before anything reaches the store.
//! Invalid input returns ValidationError, not panic.

pub mod column;
pub mod customer;
pub mod validation;

pub use column::{Column, ColumnKind};
pub use customer::{check_key, CustomerRecord};
pub use validation::ValidationError;
