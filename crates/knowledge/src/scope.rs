//! Search scope and query types.
//!
//! A [`Scope`] names the compound and department a request may search, and
//! optionally narrows it to an explicit set of documents. Scopes are built
//! per request by the record-management layer and never outlive it.

use deptrag_core::{AppError, AppResult};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// The tenancy restriction applied to one search.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Scope {
    compound_id: i64,
    department_id: i64,
    allowed_document_ids: BTreeSet<i64>,
}

impl Scope {
    /// Create a scope covering a whole department.
    pub fn new(compound_id: i64, department_id: i64) -> AppResult<Self> {
        if compound_id <= 0 {
            return Err(AppError::Scope(format!(
                "Invalid compound id: {}",
                compound_id
            )));
        }
        if department_id <= 0 {
            return Err(AppError::Scope(format!(
                "Invalid department id: {}",
                department_id
            )));
        }

        Ok(Self {
            compound_id,
            department_id,
            allowed_document_ids: BTreeSet::new(),
        })
    }

    /// Restrict the scope to an explicit document allow-list.
    ///
    /// Duplicates collapse. An empty iterator leaves the scope unrestricted.
    pub fn with_documents<I>(mut self, document_ids: I) -> AppResult<Self>
    where
        I: IntoIterator<Item = i64>,
    {
        for id in document_ids {
            if id <= 0 {
                return Err(AppError::Scope(format!("Invalid document id: {}", id)));
            }
            self.allowed_document_ids.insert(id);
        }
        Ok(self)
    }

    pub fn compound_id(&self) -> i64 {
        self.compound_id
    }

    pub fn department_id(&self) -> i64 {
        self.department_id
    }

    /// Allowed document ids in ascending order; empty means unrestricted.
    pub fn allowed_document_ids(&self) -> &BTreeSet<i64> {
        &self.allowed_document_ids
    }

    pub fn has_allow_list(&self) -> bool {
        !self.allowed_document_ids.is_empty()
    }
}

/// A natural-language question.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Query(String);

impl Query {
    /// Wrap question text. Text that is empty or only whitespace is rejected;
    /// anything else is kept verbatim.
    pub fn new(text: impl Into<String>) -> AppResult<Self> {
        let text = text.into();
        if text.trim().is_empty() {
            return Err(AppError::Scope("Query cannot be empty".to_string()));
        }
        Ok(Self(text))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl TryFrom<String> for Query {
    type Error = AppError;

    fn try_from(value: String) -> AppResult<Self> {
        Self::new(value)
    }
}

impl From<Query> for String {
    fn from(query: Query) -> Self {
        query.0
    }
}

impl std::fmt::Display for Query {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}
