//! Catalog record types.

use serde::{Deserialize, Serialize};

/// A tenant. Departments and documents belong to exactly one compound.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Compound {
    pub id: i64,
    pub title: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Department {
    pub id: i64,
    pub compound_id: i64,
    pub title: String,
}

/// A document registered with the search index.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Document {
    /// Same id the search index stores in its `id` field
    pub id: i64,
    pub compound_id: i64,
    pub title: String,
    pub url: Option<String>,

    /// Size in bytes
    pub size: i64,
    pub sha256: Option<String>,
    pub status: Option<String>,
    pub index_name: Option<String>,
    pub indexer_name: Option<String>,
}

/// Fields supplied when registering a document.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewDocument {
    pub id: i64,
    pub title: String,
    pub url: Option<String>,
    pub size: i64,
    pub sha256: Option<String>,
    pub status: Option<String>,
    pub index_name: Option<String>,
    pub indexer_name: Option<String>,
}

impl NewDocument {
    pub fn new(id: i64, title: impl Into<String>) -> Self {
        Self {
            id,
            title: title.into(),
            ..Default::default()
        }
    }
}
