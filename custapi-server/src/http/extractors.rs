//! Custom Axum extractors

use axum::extract::{FromRequest, FromRequestParts, Path};
use axum::http::request::Parts;

use super::error::ApiError;
use crate::models::ValidationError;

/// JSON body whose rejections render as `{"error": ...}` 400s.
#[derive(Debug, FromRequest)]
#[from_request(via(axum::Json), rejection(ApiError))]
pub struct JsonBody<T>(pub T);

/// Extract and validate the `{cust_code}` path segment
pub struct CustomerKey(pub String);

impl<S> FromRequestParts<S> for CustomerKey
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Path(code): Path<String> = Path::from_request_parts(parts, state).await?;

        if code.trim().is_empty() {
            return Err(ApiError::Validation(ValidationError::EmptyKey));
        }
        Ok(Self(code))
    }
}
