//! LLM client abstraction and request/response types.
//!
//! This module defines the core abstractions for interacting with chat
//! completion providers.

use crate::types::ChatMessage;
use deptrag_core::AppResult;
use serde::{Deserialize, Serialize};

/// Chat completion request.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LlmRequest {
    /// Model or deployment identifier (e.g., "gpt-4o", "llama3.2")
    pub model: String,

    /// Ordered conversation turns
    pub messages: Vec<ChatMessage>,

    /// Maximum tokens to generate
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_tokens: Option<u32>,
}

impl LlmRequest {
    /// Create an empty request for a model.
    pub fn new(model: impl Into<String>) -> Self {
        Self {
            model: model.into(),
            messages: Vec::new(),
            max_tokens: None,
        }
    }

    /// Append a message.
    pub fn with_message(mut self, message: ChatMessage) -> Self {
        self.messages.push(message);
        self
    }

    /// Append a system turn.
    pub fn with_system(self, content: impl Into<String>) -> Self {
        self.with_message(ChatMessage::system(content))
    }

    /// Append a user turn.
    pub fn with_user(self, content: impl Into<String>) -> Self {
        self.with_message(ChatMessage::user(content))
    }

    /// Set the maximum tokens to generate.
    pub fn with_max_tokens(mut self, max_tokens: u32) -> Self {
        self.max_tokens = Some(max_tokens);
        self
    }
}

/// Chat completion response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LlmResponse {
    /// Candidate completions in provider order
    pub choices: Vec<LlmChoice>,

    /// Model that generated the response
    pub model: String,

    /// Usage statistics
    pub usage: LlmUsage,
}

impl LlmResponse {
    /// The first choice, if the provider returned any.
    pub fn first_choice(&self) -> Option<&LlmChoice> {
        self.choices.first()
    }
}

/// One candidate completion.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LlmChoice {
    /// Position in the provider's choice list
    pub index: u32,

    /// Message content; providers may send null (e.g. content filtering)
    pub content: Option<String>,

    /// Why generation stopped ("stop", "length", ...)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub finish_reason: Option<String>,
}

/// Token usage statistics.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct LlmUsage {
    /// Tokens in the prompt
    #[serde(default)]
    pub prompt_tokens: u32,

    /// Tokens in the completion
    #[serde(default)]
    pub completion_tokens: u32,

    /// Total tokens used
    #[serde(default)]
    pub total_tokens: u32,
}

impl LlmUsage {
    /// Create usage stats from prompt and completion token counts.
    pub fn new(prompt_tokens: u32, completion_tokens: u32) -> Self {
        Self {
            prompt_tokens,
            completion_tokens,
            total_tokens: prompt_tokens + completion_tokens,
        }
    }
}

/// Trait for chat completion providers.
///
/// Implementations are built once at startup and shared across concurrent
/// requests, hence `Send + Sync` and `&self` receivers.
#[async_trait::async_trait]
pub trait LlmClient: Send + Sync {
    /// Get the provider name (e.g., "azure-openai", "ollama").
    fn provider_name(&self) -> &str;

    /// Perform a non-streaming chat completion.
    ///
    /// Transport, status and decoding failures are returned as `AppError::Llm`.
    async fn complete(&self, request: &LlmRequest) -> AppResult<LlmResponse>;
}
