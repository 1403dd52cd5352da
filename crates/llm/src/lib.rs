//! LLM integration crate for deptrag.
//!
//! Provides a provider-agnostic abstraction over chat completion endpoints.
//!
//! # Providers
//! - **Azure OpenAI**: deployment-addressed chat completions (default)
//! - **OpenAI**: public API or any compatible server
//! - **Ollama**: local runtime
//!
//! # Example
//! ```no_run
//! use deptrag_llm::{LlmClient, LlmRequest, providers::OllamaClient};
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let client = OllamaClient::new();
//! let request = LlmRequest::new("llama3.2").with_user("Hello, world!");
//! let response = client.complete(&request).await?;
//! println!("{:?}", response.first_choice());
//! # Ok(())
//! # }
//! ```

pub mod client;
pub mod factory;
pub mod providers;
pub mod types;

// Re-export main types
pub use client::{LlmChoice, LlmClient, LlmRequest, LlmResponse, LlmUsage};
pub use factory::{create_client, ClientOptions};
pub use providers::{OllamaClient, OpenAiClient};
pub use types::{ChatMessage, ChatRole, ProviderType};
