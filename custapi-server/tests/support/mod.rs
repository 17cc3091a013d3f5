//! In-memory executor for router tests
//!
//! Understands exactly the statements the handlers issue and keeps rows in
//! insertion order, the way a table scan without ORDER BY usually comes back.

#![allow(dead_code)]

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex, MutexGuard};
use std::time::Duration;

use async_trait::async_trait;
use axum::body::{to_bytes, Body};
use axum::http::{Method, Request, StatusCode};
use axum::Router;
use rust_decimal::prelude::ToPrimitive;
use serde_json::{Number, Value};
use tokio::sync::{OwnedSemaphorePermit, Semaphore};
use tower::ServiceExt;

use custapi_server::db::statements::{
    DELETE_BY_CODE, INSERT, REPLACE, SELECT_ALL, SELECT_BY_CODE, UPDATE_PREFIX, UPDATE_SUFFIX,
};
use custapi_server::db::{check_arity, DbError, Param, QueryExecutor, Record};
use custapi_server::models::Column;
use custapi_server::{build_router, AppState, ServerConfig};

/// Failure to inject on every call
#[derive(Debug, Clone)]
pub enum Failure {
    Connection,
    Query(String),
}

#[derive(Default)]
struct Inner {
    rows: Vec<Record>,
    calls: Vec<(String, Vec<Param>)>,
    failure: Option<Failure>,
}

/// Stand-in for pool capacity: one permit per connection.
struct Slots {
    permits: Arc<Semaphore>,
    in_use: AtomicUsize,
    peak: AtomicUsize,
}

/// Held for the duration of one statement, like a checked-out connection.
struct Slot {
    slots: Arc<Slots>,
    _permit: OwnedSemaphorePermit,
}

impl Drop for Slot {
    fn drop(&mut self) {
        self.slots.in_use.fetch_sub(1, Ordering::SeqCst);
    }
}

/// Shared-handle in-memory store. Clones see the same rows.
#[derive(Clone, Default)]
pub struct MemoryExecutor {
    inner: Arc<Mutex<Inner>>,
    latency: Option<Duration>,
    slots: Option<Arc<Slots>>,
}

impl MemoryExecutor {
    pub fn new() -> Self {
        Self::default()
    }

    /// Every statement waits `latency` before touching the rows.
    pub fn with_latency(mut self, latency: Duration) -> Self {
        self.latency = Some(latency);
        self
    }

    /// At most `capacity` statements run at once; the rest queue.
    pub fn with_capacity(mut self, capacity: usize) -> Self {
        self.slots = Some(Arc::new(Slots {
            permits: Arc::new(Semaphore::new(capacity)),
            in_use: AtomicUsize::new(0),
            peak: AtomicUsize::new(0),
        }));
        self
    }

    /// Highest number of statements seen running at once.
    pub fn peak_in_use(&self) -> usize {
        self.slots
            .as_ref()
            .map_or(0, |s| s.peak.load(Ordering::SeqCst))
    }

    pub fn in_use(&self) -> usize {
        self.slots
            .as_ref()
            .map_or(0, |s| s.in_use.load(Ordering::SeqCst))
    }

    async fn checkout(&self) -> Option<Slot> {
        let slot = match &self.slots {
            Some(slots) => {
                let permit = Arc::clone(&slots.permits)
                    .acquire_owned()
                    .await
                    .expect("semaphore closed");
                let now = slots.in_use.fetch_add(1, Ordering::SeqCst) + 1;
                slots.peak.fetch_max(now, Ordering::SeqCst);
                Some(Slot {
                    slots: Arc::clone(slots),
                    _permit: permit,
                })
            }
            None => None,
        };
        if let Some(latency) = self.latency {
            tokio::time::sleep(latency).await;
        }
        slot
    }

    fn lock(&self) -> MutexGuard<'_, Inner> {
        self.inner.lock().unwrap()
    }

    pub fn fail_with(&self, failure: Failure) {
        self.lock().failure = Some(failure);
    }

    /// Statements run so far, with their parameters.
    pub fn calls(&self) -> Vec<(String, Vec<Param>)> {
        self.lock().calls.clone()
    }

    pub fn rows(&self) -> Vec<Record> {
        self.lock().rows.clone()
    }

    fn begin(&self, statement: &str, params: &[Param]) -> Result<MutexGuard<'_, Inner>, DbError> {
        let mut inner = self.lock();
        if let Some(failure) = inner.failure.clone() {
            return Err(match failure {
                Failure::Connection => DbError::Connection(sqlx::Error::PoolTimedOut),
                Failure::Query(msg) => DbError::Query(sqlx::Error::Protocol(msg)),
            });
        }
        check_arity(statement, params)?;
        inner.calls.push((statement.to_owned(), params.to_vec()));
        Ok(inner)
    }
}

fn to_json(param: &Param) -> Value {
    match param {
        Param::Null => Value::Null,
        Param::Int(i) => Value::from(*i),
        Param::Decimal(d) => d
            .to_f64()
            .and_then(Number::from_f64)
            .map(Value::Number)
            .unwrap_or(Value::Null),
        Param::Text(s) => Value::String(s.clone()),
    }
}

fn key_of(param: &Param) -> &str {
    match param {
        Param::Text(s) => s,
        other => panic!("key must be text, got {:?}", other),
    }
}

fn full_row(params: &[Param]) -> Record {
    Column::ALL
        .iter()
        .zip(params)
        .map(|(c, p)| (c.name().to_owned(), to_json(p)))
        .collect()
}

fn matches_key(row: &Record, key: &str) -> bool {
    row.get(Column::KEY.name()).and_then(Value::as_str) == Some(key)
}

#[async_trait]
impl QueryExecutor for MemoryExecutor {
    async fn fetch(&self, statement: &str, params: &[Param]) -> Result<Vec<Record>, DbError> {
        let _slot = self.checkout().await;
        let inner = self.begin(statement, params)?;
        match statement {
            SELECT_ALL => Ok(inner.rows.clone()),
            SELECT_BY_CODE => {
                let key = key_of(&params[0]);
                Ok(inner
                    .rows
                    .iter()
                    .filter(|r| matches_key(r, key))
                    .cloned()
                    .collect())
            }
            other => panic!("unexpected read statement: {}", other),
        }
    }

    async fn execute(&self, statement: &str, params: &[Param]) -> Result<u64, DbError> {
        let _slot = self.checkout().await;
        let mut inner = self.begin(statement, params)?;
        match statement {
            INSERT => {
                let key = key_of(&params[0]).to_owned();
                if inner.rows.iter().any(|r| matches_key(r, &key)) {
                    return Err(DbError::Query(sqlx::Error::Protocol(format!(
                        "Duplicate entry '{}' for key 'PRIMARY'",
                        key
                    ))));
                }
                inner.rows.push(full_row(params));
                Ok(1)
            }
            REPLACE => {
                let key = key_of(&params[0]).to_owned();
                let before = inner.rows.len();
                inner.rows.retain(|r| !matches_key(r, &key));
                let removed = (before - inner.rows.len()) as u64;
                inner.rows.push(full_row(params));
                Ok(1 + removed)
            }
            DELETE_BY_CODE => {
                let key = key_of(&params[0]).to_owned();
                let before = inner.rows.len();
                inner.rows.retain(|r| !matches_key(r, &key));
                Ok((before - inner.rows.len()) as u64)
            }
            update => {
                let assignments = update
                    .strip_prefix(UPDATE_PREFIX)
                    .and_then(|s| s.strip_suffix(UPDATE_SUFFIX))
                    .unwrap_or_else(|| panic!("unexpected write statement: {}", update));
                let columns: Vec<&str> = assignments
                    .split(", ")
                    .map(|a| a.strip_suffix(" = ?").expect("assignment shape"))
                    .collect();
                let key = key_of(&params[columns.len()]).to_owned();

                let mut affected = 0;
                for row in inner.rows.iter_mut().filter(|r| matches_key(r, &key)) {
                    for (column, param) in columns.iter().zip(params) {
                        row.insert((*column).to_owned(), to_json(param));
                    }
                    affected += 1;
                }
                Ok(affected)
            }
        }
    }
}

/// Router over a fresh in-memory store.
pub fn app(store: &MemoryExecutor) -> Router {
    build_router(AppState::new(store.clone()), &ServerConfig::default())
}

/// Send one request, return status and parsed JSON body.
pub async fn send(app: &Router, method: Method, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
    let mut builder = Request::builder().method(method).uri(uri);
    let body = match body {
        Some(json) => {
            builder = builder.header("content-type", "application/json");
            Body::from(json.to_string())
        }
        None => Body::empty(),
    };

    let response = app
        .clone()
        .oneshot(builder.body(body).unwrap())
        .await
        .unwrap();
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let json = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap()
    };
    (status, json)
}

/// Send a raw body with a JSON content type.
pub async fn send_raw(app: &Router, method: Method, uri: &str, raw: &str) -> (StatusCode, Value) {
    let request = Request::builder()
        .method(method)
        .uri(uri)
        .header("content-type", "application/json")
        .body(Body::from(raw.to_owned()))
        .unwrap();
    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    (status, serde_json::from_slice(&bytes).unwrap_or(Value::Null))
}
