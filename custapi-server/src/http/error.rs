//! API error types with IntoResponse
//!
//! Errors are converted to `{"error": message}` JSON responses with the
//! matching status code. Store messages are passed through unchanged.

use axum::extract::rejection::{JsonRejection, PathRejection};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::json;

use crate::db::DbError;
use crate::models::ValidationError;

/// API error type with automatic HTTP status mapping
#[derive(Debug)]
pub enum ApiError {
    /// Validation failed (400)
    Validation(ValidationError),

    /// No row matched the key (404)
    NotFound { resource: &'static str, id: String },

    /// Store failure, connection or query (500, logged)
    Database(DbError),
}

impl ApiError {
    pub fn customer_not_found(id: impl Into<String>) -> Self {
        Self::NotFound {
            resource: "Customer",
            id: id.into(),
        }
    }

    pub fn status(&self) -> StatusCode {
        match self {
            Self::Validation(_) => StatusCode::BAD_REQUEST,
            Self::NotFound { .. } => StatusCode::NOT_FOUND,
            Self::Database(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        let message = match &self {
            Self::Validation(e) => {
                tracing::warn!(error = %e, "Rejected request");
                e.to_string()
            }
            Self::NotFound { resource, id } => {
                tracing::debug!(resource, id = %id, "Not found");
                format!("{} not found", resource)
            }
            Self::Database(e) => {
                if e.is_connection() {
                    tracing::error!("Connection error: {}", e);
                } else {
                    tracing::error!("Query error: {}", e);
                }
                e.to_string()
            }
        };

        (status, Json(json!({ "error": message }))).into_response()
    }
}

impl From<ValidationError> for ApiError {
    fn from(e: ValidationError) -> Self {
        Self::Validation(e)
    }
}

impl From<DbError> for ApiError {
    fn from(e: DbError) -> Self {
        Self::Database(e)
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        Self::Validation(ValidationError::Malformed {
            reason: rejection.body_text(),
        })
    }
}

impl From<PathRejection> for ApiError {
    fn from(rejection: PathRejection) -> Self {
        Self::Validation(ValidationError::InvalidPath {
            reason: rejection.body_text(),
        })
    }
}
