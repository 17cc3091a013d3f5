//! Update clause builder
//!
//! Turns a submitted field map into `COL = ?, COL = ?` plus the matching
//! parameter list. Column names come from the whitelist only; values only
//! ever become placeholders.

use serde_json::{Map, Value};

use super::statements;
use super::value::Param;
use crate::models::{Column, ValidationError};

/// A SET clause and its parameters, in submission order.
#[derive(Debug, Clone, PartialEq)]
pub struct UpdateClause {
    assignments: String,
    params: Vec<Param>,
}

impl UpdateClause {
    /// Build from a non-empty field map.
    ///
    /// Fields are taken in the order they appear in `fields`. The primary key
    /// gets no special handling here; callers decide whether it may appear.
    pub fn build(fields: &Map<String, Value>) -> Result<Self, ValidationError> {
        if fields.is_empty() {
            return Err(ValidationError::EmptyUpdate);
        }

        let mut assignments = Vec::with_capacity(fields.len());
        let mut params = Vec::with_capacity(fields.len() + 1);
        for (name, value) in fields {
            let column = Column::from_name(name).ok_or_else(|| ValidationError::UnknownField {
                field: name.clone(),
            })?;
            params.push(Param::for_column(column, value)?);
            assignments.push(format!("{} = ?", column.name()));
        }

        Ok(Self {
            assignments: assignments.join(", "),
            params,
        })
    }

    /// The `col = ?, ...` fragment.
    pub fn assignments(&self) -> &str {
        &self.assignments
    }

    pub fn params(&self) -> &[Param] {
        &self.params
    }

    /// Complete UPDATE statement keyed on `key`, with the key appended as
    /// the final parameter.
    pub fn into_statement(self, key: &str) -> (String, Vec<Param>) {
        let statement = statements::update(&self.assignments);
        let mut params = self.params;
        params.push(Param::from(key));
        (statement, params)
    }
}
