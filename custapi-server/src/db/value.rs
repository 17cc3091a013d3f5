//! Bind parameters and row decoding
//!
//! Values cross the SQL boundary only through [`Param`]. Rows come back as
//! ordered JSON objects keyed by column name.

use std::str::FromStr;

use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;
use serde_json::{Map, Number, Value};
use sqlx::mysql::{MySqlArguments, MySqlRow};
use sqlx::query::Query;
use sqlx::{Column as _, MySql, Row, TypeInfo as _};

use crate::models::{Column, ColumnKind, ValidationError};

/// One row as returned by the store, column order preserved.
pub type Record = Map<String, Value>;

/// A positional bind parameter.
#[derive(Debug, Clone, PartialEq)]
pub enum Param {
    Null,
    Int(i64),
    Decimal(Decimal),
    Text(String),
}

impl Param {
    /// Convert a submitted JSON value for `column`, checking it fits the
    /// column kind.
    pub fn for_column(column: Column, value: &Value) -> Result<Self, ValidationError> {
        let field = column.name();
        match (column.kind(), value) {
            (_, Value::Null) if column.is_required() => {
                Err(ValidationError::NullRequired { field })
            }
            (_, Value::Null) => Ok(Param::Null),
            (_, Value::String(s)) if s.is_empty() && column.is_required() => {
                Err(ValidationError::EmptyRequired { field })
            }
            (ColumnKind::Text, Value::String(s)) => Ok(Param::Text(s.clone())),
            (ColumnKind::Text, _) => Err(ValidationError::InvalidType {
                field,
                expected: "a string",
            }),
            (ColumnKind::Integer, Value::Number(n)) => {
                n.as_i64().map(Param::Int).ok_or(ValidationError::InvalidType {
                    field,
                    expected: "an integer",
                })
            }
            (ColumnKind::Integer, Value::String(s)) => {
                s.trim().parse::<i64>().map(Param::Int).map_err(|_| {
                    ValidationError::InvalidType {
                        field,
                        expected: "an integer",
                    }
                })
            }
            (ColumnKind::Integer, _) => Err(ValidationError::InvalidType {
                field,
                expected: "an integer",
            }),
            (ColumnKind::Decimal, Value::Number(n)) => parse_decimal(&n.to_string())
                .map(Param::Decimal)
                .ok_or(ValidationError::InvalidType {
                    field,
                    expected: "a number",
                }),
            (ColumnKind::Decimal, Value::String(s)) => parse_decimal(s.trim())
                .map(Param::Decimal)
                .ok_or(ValidationError::InvalidType {
                    field,
                    expected: "a number",
                }),
            (ColumnKind::Decimal, _) => Err(ValidationError::InvalidType {
                field,
                expected: "a number",
            }),
        }
    }
}

impl From<&str> for Param {
    fn from(s: &str) -> Self {
        Param::Text(s.to_owned())
    }
}

impl From<String> for Param {
    fn from(s: String) -> Self {
        Param::Text(s)
    }
}

fn parse_decimal(s: &str) -> Option<Decimal> {
    Decimal::from_str(s)
        .or_else(|_| Decimal::from_scientific(s))
        .ok()
}

/// Bind `params` in order onto a prepared query.
pub(crate) fn bind_all<'q>(
    mut query: Query<'q, MySql, MySqlArguments>,
    params: &'q [Param],
) -> Query<'q, MySql, MySqlArguments> {
    for param in params {
        query = match param {
            Param::Null => query.bind(None::<String>),
            Param::Int(v) => query.bind(*v),
            Param::Decimal(d) => query.bind(*d),
            Param::Text(s) => query.bind(s.as_str()),
        };
    }
    query
}

/// Count `?` placeholders outside quoted literals.
pub(crate) fn placeholder_count(statement: &str) -> usize {
    let mut quote: Option<char> = None;
    let mut count = 0;
    for ch in statement.chars() {
        match (quote, ch) {
            (None, '\'' | '"' | '`') => quote = Some(ch),
            (Some(q), c) if c == q => quote = None,
            (None, '?') => count += 1,
            _ => {}
        }
    }
    count
}

/// Decode a row into column name → JSON value, in store column order.
pub(crate) fn row_to_record(row: &MySqlRow) -> Record {
    let mut record = Map::with_capacity(row.len());
    for column in row.columns() {
        let idx = column.ordinal();
        record.insert(column.name().to_owned(), decode_cell(row, idx));
    }
    record
}

// sqlx refuses to decode into incompatible types, so the first accepted
// type wins.
fn decode_cell(row: &MySqlRow, idx: usize) -> Value {
    if let Ok(v) = row.try_get::<Option<String>, _>(idx) {
        return v.map(Value::String).unwrap_or(Value::Null);
    }
    if let Ok(v) = row.try_get::<Option<i64>, _>(idx) {
        return v.map(Value::from).unwrap_or(Value::Null);
    }
    if let Ok(v) = row.try_get::<Option<u64>, _>(idx) {
        return v.map(Value::from).unwrap_or(Value::Null);
    }
    if let Ok(v) = row.try_get::<Option<Decimal>, _>(idx) {
        return v.and_then(decimal_to_json).unwrap_or(Value::Null);
    }
    if let Ok(v) = row.try_get::<Option<f64>, _>(idx) {
        return v
            .and_then(Number::from_f64)
            .map(Value::Number)
            .unwrap_or(Value::Null);
    }
    if let Ok(v) = row.try_get::<Option<Vec<u8>>, _>(idx) {
        return v
            .map(|bytes| Value::String(String::from_utf8_lossy(&bytes).into_owned()))
            .unwrap_or(Value::Null);
    }

    let column = &row.columns()[idx];
    tracing::warn!(
        column = column.name(),
        sql_type = column.type_info().name(),
        "Undecodable column value returned as null"
    );
    Value::Null
}

fn decimal_to_json(d: Decimal) -> Option<Value> {
    if d.fract().is_zero() {
        if let Some(i) = d.to_i64() {
            return Some(Value::from(i));
        }
    }
    d.to_f64().and_then(Number::from_f64).map(Value::Number)
}
