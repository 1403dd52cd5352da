//! Answer types.

use serde::{Deserialize, Serialize};

/// Provenance of an answer. Reserved: answers do not carry sources yet.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SourceRef {
    /// Document the evidence came from
    pub document_id: i64,

    /// Short snippet of the evidence
    pub snippet: String,
}

/// Result of one department search.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnswerResult {
    /// Model-generated answer
    pub answer: String,

    /// Always `None` for now; serialized as `null`
    pub sources: Option<Vec<SourceRef>>,
}

impl AnswerResult {
    /// An answer without provenance.
    pub fn new(answer: impl Into<String>) -> Self {
        Self {
            answer: answer.into(),
            sources: None,
        }
    }
}
