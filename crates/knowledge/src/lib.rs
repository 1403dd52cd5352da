//! Department-scoped question answering.
//!
//! Retrieves ranked fragments from an external search index, restricted to
//! a compound and department, and asks a chat model to answer from them.

pub mod context;
pub mod rag;
pub mod retrieval;
pub mod scope;
pub mod search;

#[cfg(test)]
mod tests;

// Re-export commonly used types
pub use context::{assemble_context, FRAGMENT_SEPARATOR};
pub use rag::{AnswerGenerator, AnswerResult, SearchOrchestrator, SourceRef, MAX_ANSWER_TOKENS};
pub use retrieval::{RetrievalGateway, RetrievedFragment, RESULT_LIMIT};
pub use scope::{Query, Scope};
pub use search::{AzureSearchClient, DocumentFilter, SearchHit, SearchIndex, SearchRequest};
