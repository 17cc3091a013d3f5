//! Customer endpoints
//!
//! Each handler validates its input, runs exactly one statement through the
//! executor, and maps the outcome to a response. Nothing is retried. The
//! statement runs on a detached task, so an abandoned request still
//! completes its write.

use axum::{
    extract::State,
    http::StatusCode,
    routing::get,
    Json, Router,
};
use serde::Serialize;
use serde_json::{Map, Value};
use tracing::instrument;

use crate::db::{statements, Param, Record, UpdateClause};
use crate::http::error::ApiError;
use crate::http::extractors::{CustomerKey, JsonBody};
use crate::http::server::AppState;
use crate::models::{check_key, CustomerRecord};

/// Plain `{message}` acknowledgement
#[derive(Debug, Serialize)]
pub struct MessageResponse {
    pub message: &'static str,
}

/// Create acknowledgement, echoes the new key
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CreatedResponse {
    pub message: &'static str,
    pub customer_id: String,
}

/// GET /customers - all rows, store order
#[instrument(skip_all)]
async fn list_customers(State(state): State<AppState>) -> Result<Json<Vec<Record>>, ApiError> {
    let rows = state.fetch(statements::SELECT_ALL, Vec::new()).await?;
    Ok(Json(rows))
}

/// GET /customers/{cust_code} - matching rows, 404 when none
#[instrument(skip_all, fields(cust_code = %code))]
async fn get_customer(
    State(state): State<AppState>,
    CustomerKey(code): CustomerKey,
) -> Result<Json<Vec<Record>>, ApiError> {
    let rows = state
        .fetch(statements::SELECT_BY_CODE, vec![Param::from(code.as_str())])
        .await?;

    if rows.is_empty() {
        return Err(ApiError::customer_not_found(code));
    }
    Ok(Json(rows))
}

/// POST /customers - insert a new row
#[instrument(skip_all)]
async fn create_customer(
    State(state): State<AppState>,
    JsonBody(body): JsonBody<Map<String, Value>>,
) -> Result<(StatusCode, Json<CreatedResponse>), ApiError> {
    let record = CustomerRecord::from_body(&body)?;
    let customer_id = record.code().to_owned();

    state
        .execute(statements::INSERT, record.into_params())
        .await?;

    tracing::info!(cust_code = %customer_id, "Customer created");
    Ok((
        StatusCode::CREATED,
        Json(CreatedResponse {
            message: "Customer added successfully",
            customer_id,
        }),
    ))
}

/// PATCH /customers/{cust_code} - update the submitted columns only
#[instrument(skip_all, fields(cust_code = %code))]
async fn update_customer(
    State(state): State<AppState>,
    CustomerKey(code): CustomerKey,
    JsonBody(body): JsonBody<Map<String, Value>>,
) -> Result<Json<MessageResponse>, ApiError> {
    check_key(&code, &body)?;
    let (statement, params) = UpdateClause::build(&body)?.into_statement(&code);

    let affected = state.execute(statement, params).await?;
    if affected == 0 {
        return Err(ApiError::customer_not_found(code));
    }

    Ok(Json(MessageResponse {
        message: "Customer updated successfully",
    }))
}

/// PUT /customers/{cust_code} - overwrite the row, creating it if absent
#[instrument(skip_all, fields(cust_code = %code))]
async fn replace_customer(
    State(state): State<AppState>,
    CustomerKey(code): CustomerKey,
    JsonBody(body): JsonBody<Map<String, Value>>,
) -> Result<Json<MessageResponse>, ApiError> {
    let record = CustomerRecord::for_replace(&code, &body)?;

    state
        .execute(statements::REPLACE, record.into_params())
        .await?;

    Ok(Json(MessageResponse {
        message: "Customer replaced successfully",
    }))
}

/// DELETE /customers/{cust_code}
#[instrument(skip_all, fields(cust_code = %code))]
async fn delete_customer(
    State(state): State<AppState>,
    CustomerKey(code): CustomerKey,
) -> Result<Json<MessageResponse>, ApiError> {
    let affected = state
        .execute(statements::DELETE_BY_CODE, vec![Param::from(code.as_str())])
        .await?;

    if affected == 0 {
        return Err(ApiError::customer_not_found(code));
    }

    tracing::info!(cust_code = %code, "Customer deleted");
    Ok(Json(MessageResponse {
        message: "Customer deleted successfully",
    }))
}

/// Customer routes
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/customers", get(list_customers).post(create_customer))
        .route(
            "/customers/{cust_code}",
            get(get_customer)
                .patch(update_customer)
                .put(replace_customer)
                .delete(delete_customer),
        )
}
