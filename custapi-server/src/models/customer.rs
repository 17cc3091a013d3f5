//! Full-row customer payloads for create and replace

use serde_json::{Map, Value};

use super::{Column, ValidationError};
use crate::db::Param;

/// A complete customer row, one bind parameter per column in
/// [`Column::ALL`] order. Omitted optional columns are bound as NULL.
#[derive(Debug, Clone, PartialEq)]
pub struct CustomerRecord {
    code: String,
    params: Vec<Param>,
}

impl CustomerRecord {
    /// Build a record for creation. CUST_CODE, CUST_NAME and CUST_CITY must
    /// be present and non-empty. Keys that are not customer columns are
    /// ignored; only whitelisted names ever reach a statement.
    pub fn from_body(body: &Map<String, Value>) -> Result<Self, ValidationError> {
        let required_missing = Column::ALL
            .into_iter()
            .filter(|c| c.is_required())
            .any(|c| is_missing(body.get(c.name())));
        if required_missing {
            return Err(ValidationError::MissingRequired);
        }

        let mut params = Vec::with_capacity(Column::ALL.len());
        for column in Column::ALL {
            let param = match body.get(column.name()) {
                Some(value) => Param::for_column(column, value)?,
                None => Param::Null,
            };
            params.push(param);
        }

        let code = match &params[0] {
            Param::Text(code) => code.clone(),
            _ => {
                return Err(ValidationError::InvalidType {
                    field: Column::KEY.name(),
                    expected: "a string",
                })
            }
        };

        Ok(Self { code, params })
    }

    /// Build a record that replaces the row addressed by `key`.
    ///
    /// The path key wins: a body CUST_CODE must agree with it, and an absent
    /// one is filled in from it.
    pub fn for_replace(key: &str, body: &Map<String, Value>) -> Result<Self, ValidationError> {
        if body.is_empty() {
            return Err(ValidationError::EmptyUpdate);
        }
        check_key(key, body)?;

        let mut body = body.clone();
        body.insert(Column::KEY.name().to_owned(), Value::String(key.to_owned()));
        Self::from_body(&body)
    }

    /// The primary key this record is written under.
    pub fn code(&self) -> &str {
        &self.code
    }

    pub fn params(&self) -> &[Param] {
        &self.params
    }

    pub fn into_params(self) -> Vec<Param> {
        self.params
    }
}

/// Reject a body CUST_CODE that would move the row to another key.
pub fn check_key(key: &str, body: &Map<String, Value>) -> Result<(), ValidationError> {
    match body.get(Column::KEY.name()) {
        None => Ok(()),
        Some(Value::String(s)) if s == key => Ok(()),
        Some(other) => Err(ValidationError::KeyMismatch {
            path: key.to_owned(),
            body: match other {
                Value::String(s) => s.clone(),
                v => v.to_string(),
            },
        }),
    }
}

fn is_missing(value: Option<&Value>) -> bool {
    match value {
        None | Some(Value::Null) => true,
        Some(Value::String(s)) => s.is_empty(),
        Some(_) => false,
    }
}
