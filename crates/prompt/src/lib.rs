//! Prompt system for deptrag.
//!
//! This crate provides:
//! - Handlebars template rendering (plain text, strict variables)
//! - The grounded-answer prompt used by department search

pub mod builder;
pub mod grounded;
pub mod types;

// Re-export main types
pub use builder::build_prompt;
pub use grounded::{
    build_grounded_prompt, grounded_answer_definition, GROUNDED_ANSWER_SYSTEM,
    GROUNDED_ANSWER_TEMPLATE,
};
pub use types::{BuiltPrompt, BuiltPromptMetadata, PromptDefinition};
