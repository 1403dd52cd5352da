//! The grounded-answer prompt.
//!
//! Two turns: a fixed system instruction and a user turn carrying the
//! retrieved information followed by the question.

use crate::builder::build_prompt;
use crate::types::{BuiltPrompt, PromptDefinition};
use deptrag_core::AppResult;
use std::collections::HashMap;

/// Identifier of the grounded-answer prompt.
pub const GROUNDED_ANSWER_ID: &str = "search.grounded-answer";

/// System instruction sent with every grounded answer request.
pub const GROUNDED_ANSWER_SYSTEM: &str =
    "You are an AI assistant that helps people find information.";

/// User-turn template.
pub const GROUNDED_ANSWER_TEMPLATE: &str = "Information:\n{{context}}\nQuestion: {{query}}";

/// The grounded-answer prompt definition.
pub fn grounded_answer_definition() -> PromptDefinition {
    PromptDefinition {
        id: GROUNDED_ANSWER_ID.to_string(),
        system: Some(GROUNDED_ANSWER_SYSTEM.to_string()),
        template: GROUNDED_ANSWER_TEMPLATE.to_string(),
    }
}

/// Build the grounded-answer prompt for an assembled context and a question.
///
/// `context` may be empty; the template is rendered the same way.
pub fn build_grounded_prompt(context: &str, query: &str) -> AppResult<BuiltPrompt> {
    let mut variables = HashMap::new();
    variables.insert("context".to_string(), context.to_string());
    variables.insert("query".to_string(), query.to_string());

    build_prompt(&grounded_answer_definition(), variables)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_user_turn_layout() {
        let built = build_grounded_prompt("Refunds within 30 days.", "refund policy").unwrap();
        assert_eq!(
            built.user,
            "Information:\nRefunds within 30 days.\nQuestion: refund policy"
        );
        assert_eq!(
            built.system.as_deref(),
            Some("You are an AI assistant that helps people find information.")
        );
        assert_eq!(built.metadata.source_prompt_id, GROUNDED_ANSWER_ID);
    }

    #[test]
    fn test_empty_context() {
        let built = build_grounded_prompt("", "who approves leave?").unwrap();
        assert_eq!(built.user, "Information:\n\nQuestion: who approves leave?");
    }

    #[test]
    fn test_multiline_context_is_verbatim() {
        let built = build_grounded_prompt("A\n\nB <b>&", "q").unwrap();
        assert_eq!(built.user, "Information:\nA\n\nB <b>&\nQuestion: q");
    }
}
