//! Validation error types

use std::fmt;

/// Validation error for request payloads.
///
/// Every variant maps to a 400 response and is raised before the store is
/// touched.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    /// One of CUST_CODE, CUST_NAME, CUST_CITY is absent, null or empty
    MissingRequired,

    /// Update or replace payload names no fields
    EmptyUpdate,

    /// Field name is not a customer column
    UnknownField { field: String },

    /// Field value has the wrong JSON type for its column
    InvalidType { field: &'static str, expected: &'static str },

    /// Required column set to null
    NullRequired { field: &'static str },

    /// Required column set to an empty string
    EmptyRequired { field: &'static str },

    /// Body CUST_CODE disagrees with the addressed key
    KeyMismatch { path: String, body: String },

    /// Body could not be read as a JSON object
    Malformed { reason: String },

    /// Path key is blank
    EmptyKey,

    /// Path segment could not be decoded
    InvalidPath { reason: String },
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MissingRequired => write!(f, "Required fields missing"),
            Self::EmptyUpdate => write!(f, "No fields to update"),
            Self::UnknownField { field } => write!(f, "Unknown field: {}", field),
            Self::InvalidType { field, expected } => {
                write!(f, "{} must be {}", field, expected)
            }
            Self::NullRequired { field } => write!(f, "{} cannot be null", field),
            Self::EmptyRequired { field } => write!(f, "{} cannot be empty", field),
            Self::KeyMismatch { path, body } => write!(
                f,
                "CUST_CODE '{}' in body does not match '{}' in path",
                body, path
            ),
            Self::Malformed { reason } => write!(f, "Invalid JSON body: {}", reason),
            Self::EmptyKey => write!(f, "cust_code cannot be empty"),
            Self::InvalidPath { reason } => write!(f, "Invalid path: {}", reason),
        }
    }
}

impl std::error::Error for ValidationError {}
