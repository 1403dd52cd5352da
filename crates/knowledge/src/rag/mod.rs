//! Retrieval-augmented answering for department search.
//!
//! Retrieved fragments are assembled into a context and handed to the
//! generative model together with the user's question.

pub mod generate;
pub mod orchestrator;
pub mod types;

pub use generate::{AnswerGenerator, MAX_ANSWER_TOKENS};
pub use orchestrator::SearchOrchestrator;
pub use types::{AnswerResult, SourceRef};
