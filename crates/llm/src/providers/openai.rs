//! OpenAI-compatible chat completion provider.
//!
//! Serves both Azure OpenAI (deployment in the URL, `api-key` header) and
//! the public OpenAI API (model in the body, bearer token). The wire format
//! of the request and response bodies is shared.

use crate::client::{LlmChoice, LlmClient, LlmRequest, LlmResponse, LlmUsage};
use crate::types::ChatMessage;
use deptrag_core::{AppError, AppResult};
use serde::{Deserialize, Serialize};

/// Azure OpenAI API version used when none is configured.
pub const DEFAULT_AZURE_API_VERSION: &str = "2024-02-01";

/// Public OpenAI API base URL.
pub const DEFAULT_OPENAI_ENDPOINT: &str = "https://api.openai.com";

/// Chat completion request body.
#[derive(Debug, Serialize)]
struct ChatCompletionRequest<'a> {
    #[serde(skip_serializing_if = "Option::is_none")]
    model: Option<&'a str>,
    messages: &'a [ChatMessage],
    #[serde(skip_serializing_if = "Option::is_none")]
    max_tokens: Option<u32>,
}

/// Chat completion response body.
#[derive(Debug, Deserialize)]
struct ChatCompletionResponse {
    #[serde(default)]
    model: Option<String>,
    #[serde(default)]
    choices: Vec<WireChoice>,
    #[serde(default)]
    usage: Option<WireUsage>,
}

#[derive(Debug, Deserialize)]
struct WireChoice {
    #[serde(default)]
    index: u32,
    #[serde(default)]
    message: Option<WireMessage>,
    #[serde(default)]
    finish_reason: Option<String>,
}

#[derive(Debug, Deserialize)]
struct WireMessage {
    #[serde(default)]
    content: Option<String>,
}

#[derive(Debug, Deserialize)]
struct WireUsage {
    #[serde(default)]
    prompt_tokens: u32,
    #[serde(default)]
    completion_tokens: u32,
}

/// How requests are addressed and authenticated.
#[derive(Debug, Clone, PartialEq, Eq)]
enum Flavor {
    Azure { api_version: String },
    OpenAi,
}

/// OpenAI-compatible chat client.
pub struct OpenAiClient {
    /// Base URL, without trailing slash
    base_url: String,

    /// API key sent with every request
    api_key: String,

    flavor: Flavor,

    /// HTTP client
    client: reqwest::Client,
}

impl OpenAiClient {
    /// Create a client for an Azure OpenAI resource.
    pub fn azure(
        endpoint: impl Into<String>,
        api_key: impl Into<String>,
        api_version: Option<&str>,
    ) -> Self {
        Self {
            base_url: trim_base_url(endpoint.into()),
            api_key: api_key.into(),
            flavor: Flavor::Azure {
                api_version: api_version.unwrap_or(DEFAULT_AZURE_API_VERSION).to_string(),
            },
            client: reqwest::Client::new(),
        }
    }

    /// Create a client for the public OpenAI API (or a compatible server).
    pub fn openai(endpoint: Option<&str>, api_key: impl Into<String>) -> Self {
        Self {
            base_url: trim_base_url(endpoint.unwrap_or(DEFAULT_OPENAI_ENDPOINT).to_string()),
            api_key: api_key.into(),
            flavor: Flavor::OpenAi,
            client: reqwest::Client::new(),
        }
    }

    /// URL of the chat completions endpoint for a model/deployment.
    fn completions_url(&self, model: &str) -> String {
        match &self.flavor {
            Flavor::Azure { api_version } => format!(
                "{}/openai/deployments/{}/chat/completions?api-version={}",
                self.base_url, model, api_version
            ),
            Flavor::OpenAi => format!("{}/v1/chat/completions", self.base_url),
        }
    }

    /// Convert LlmRequest to the wire format.
    ///
    /// Azure addresses the deployment through the URL, so the body omits `model`.
    fn to_chat_request<'a>(&self, request: &'a LlmRequest) -> ChatCompletionRequest<'a> {
        let model = match self.flavor {
            Flavor::Azure { .. } => None,
            Flavor::OpenAi => Some(request.model.as_str()),
        };

        ChatCompletionRequest {
            model,
            messages: &request.messages,
            max_tokens: request.max_tokens,
        }
    }

    /// Convert the wire response to LlmResponse.
    fn convert_response(response: ChatCompletionResponse, requested_model: &str) -> LlmResponse {
        let usage = response
            .usage
            .map(|u| LlmUsage::new(u.prompt_tokens, u.completion_tokens))
            .unwrap_or_default();

        let choices = response
            .choices
            .into_iter()
            .map(|choice| LlmChoice {
                index: choice.index,
                content: choice.message.and_then(|m| m.content),
                finish_reason: choice.finish_reason,
            })
            .collect();

        LlmResponse {
            choices,
            model: response
                .model
                .unwrap_or_else(|| requested_model.to_string()),
            usage,
        }
    }
}

fn trim_base_url(url: String) -> String {
    url.trim_end_matches('/').to_string()
}

#[async_trait::async_trait]
impl LlmClient for OpenAiClient {
    fn provider_name(&self) -> &str {
        match self.flavor {
            Flavor::Azure { .. } => "azure-openai",
            Flavor::OpenAi => "openai",
        }
    }

    async fn complete(&self, request: &LlmRequest) -> AppResult<LlmResponse> {
        tracing::info!(
            provider = self.provider_name(),
            model = %request.model,
            "Sending chat completion request"
        );
        tracing::debug!("Request: {:?}", request);

        let url = self.completions_url(&request.model);
        let body = self.to_chat_request(request);

        let builder = self.client.post(&url).json(&body);
        let builder = match self.flavor {
            Flavor::Azure { .. } => builder.header("api-key", &self.api_key),
            Flavor::OpenAi => builder.bearer_auth(&self.api_key),
        };

        let response = builder.send().await.map_err(|e| {
            AppError::Llm(format!(
                "Failed to send request to {}: {}",
                self.provider_name(),
                e
            ))
        })?;

        if !response.status().is_success() {
            let status = response.status();
            let error_text = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".to_string());
            return Err(AppError::Llm(format!(
                "{} API error ({}): {}",
                self.provider_name(),
                status,
                error_text
            )));
        }

        let wire: ChatCompletionResponse = response.json().await.map_err(|e| {
            AppError::Llm(format!(
                "Failed to parse {} response: {}",
                self.provider_name(),
                e
            ))
        })?;

        tracing::info!(choices = wire.choices.len(), "Received chat completion");

        Ok(Self::convert_response(wire, &request.model))
    }
}
