//! External search index abstraction.
//!
//! The index is built and maintained elsewhere; this crate only queries it.

pub mod azure;
pub mod filter;

pub use azure::AzureSearchClient;
pub use filter::{DocumentFilter, DOCUMENT_ID_FIELD};

use deptrag_core::AppResult;
use serde::{Deserialize, Serialize};

/// Field of a hit holding the fragment text.
pub const CONTENT_FIELD: &str = "content";

/// A query against the search index.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SearchRequest {
    /// Free-text query
    pub text: String,

    /// Maximum number of hits to return
    pub top: usize,

    /// Optional document-id restriction
    #[serde(skip_serializing_if = "Option::is_none")]
    pub filter: Option<DocumentFilter>,
}

/// One ranked hit as returned by the index.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct SearchHit {
    /// Engine relevance score, if reported
    pub score: Option<f64>,

    /// Stored fields of the hit
    pub fields: serde_json::Map<String, serde_json::Value>,
}

impl SearchHit {
    /// Build a hit carrying only a content field.
    pub fn with_content(content: impl Into<String>) -> Self {
        let mut fields = serde_json::Map::new();
        fields.insert(
            CONTENT_FIELD.to_string(),
            serde_json::Value::String(content.into()),
        );
        Self {
            score: None,
            fields,
        }
    }

    /// The content field as text; absent, null or non-string values yield `None`.
    pub fn content(&self) -> Option<&str> {
        self.fields.get(CONTENT_FIELD).and_then(|v| v.as_str())
    }
}

/// Trait for search index backends.
///
/// Implementations return hits in descending relevance order and are shared
/// across concurrent requests.
#[async_trait::async_trait]
pub trait SearchIndex: Send + Sync {
    /// Name of the queried index, for logging.
    fn index_name(&self) -> &str;

    /// Run a query. Any failure is an `AppError::Retrieval`.
    async fn query(&self, request: &SearchRequest) -> AppResult<Vec<SearchHit>>;
}
