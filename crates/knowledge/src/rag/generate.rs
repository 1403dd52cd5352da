//! Answer generation from an assembled context.

use crate::scope::Query;
use deptrag_core::{AppError, AppResult};
use deptrag_llm::{LlmClient, LlmRequest};
use deptrag_prompt::build_grounded_prompt;
use std::sync::Arc;

/// Upper bound on generated tokens per answer.
pub const MAX_ANSWER_TOKENS: u32 = 800;

/// Produces one grounded answer per call.
#[derive(Clone)]
pub struct AnswerGenerator {
    client: Arc<dyn LlmClient>,

    /// Model or deployment identifier
    model: String,
}

impl AnswerGenerator {
    pub fn new(client: Arc<dyn LlmClient>, model: impl Into<String>) -> Self {
        Self {
            client,
            model: model.into(),
        }
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    /// Build the two-turn completion request (system instruction, then the
    /// user turn with context and question).
    pub fn build_request(&self, query: &Query, context: &str) -> AppResult<LlmRequest> {
        let prompt = build_grounded_prompt(context, query.as_str())
            .map_err(|e| AppError::Generation(format!("Failed to build prompt: {}", e)))?;

        let mut request = LlmRequest::new(&self.model);
        if let Some(system) = prompt.system {
            request = request.with_system(system);
        }

        Ok(request
            .with_user(prompt.user)
            .with_max_tokens(MAX_ANSWER_TOKENS))
    }

    /// Generate an answer from the first choice the model returns.
    ///
    /// Client failures, an empty choice list, and a first choice without
    /// content are all `AppError::Generation`.
    pub async fn generate(&self, query: &Query, context: &str) -> AppResult<String> {
        let request = self.build_request(query, context)?;

        tracing::debug!(
            provider = self.client.provider_name(),
            model = %self.model,
            context_bytes = context.len(),
            "Generating answer"
        );

        let response = self
            .client
            .complete(&request)
            .await
            .map_err(|e| match e {
                AppError::Generation(_) => e,
                other => AppError::Generation(other.to_string()),
            })?;

        let choice = response
            .first_choice()
            .ok_or_else(|| AppError::Generation("Model returned no choices".to_string()))?;

        let answer = choice.content.clone().ok_or_else(|| {
            AppError::Generation(format!(
                "First choice carried no content (finish reason: {})",
                choice.finish_reason.as_deref().unwrap_or("unknown")
            ))
        })?;

        tracing::info!(
            completion_tokens = response.usage.completion_tokens,
            "Answer generated"
        );

        Ok(answer)
    }
}
