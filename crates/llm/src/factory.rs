//! LLM provider factory.
//!
//! Builds a chat client from a provider name and the connection details
//! resolved from application configuration.

use crate::client::LlmClient;
use crate::providers::{OllamaClient, OpenAiClient};
use crate::types::ProviderType;
use std::sync::Arc;
use std::time::Duration;

/// Connection details for a provider.
#[derive(Debug, Clone, Default)]
pub struct ClientOptions {
    /// Custom endpoint URL (required for Azure)
    pub endpoint: Option<String>,

    /// API key (required for Azure and OpenAI)
    pub api_key: Option<String>,

    /// Azure REST API version
    pub api_version: Option<String>,

    /// Per-request timeout in seconds (Ollama)
    pub timeout_secs: Option<u64>,
}

/// Create an LLM client based on the provider name.
///
/// # Arguments
/// * `provider` - Provider identifier ("azure-openai", "openai", "ollama")
/// * `options` - Endpoint, secret and transport settings
///
/// # Errors
/// Returns error if:
/// - Provider is unknown
/// - Required secrets or endpoints are missing
/// - Client initialization fails
pub fn create_client(
    provider: &str,
    options: &ClientOptions,
) -> Result<Arc<dyn LlmClient>, String> {
    let provider_type =
        ProviderType::parse(provider).ok_or_else(|| format!("Unknown provider: {}", provider))?;

    let api_key = if provider_type.requires_api_key() {
        let key = options
            .api_key
            .as_deref()
            .ok_or_else(|| format!("{} provider requires API key", provider_type.as_str()))?;
        Some(key)
    } else {
        None
    };

    match (provider_type, api_key) {
        (ProviderType::AzureOpenAI, Some(api_key)) => {
            let endpoint = options
                .endpoint
                .as_deref()
                .ok_or_else(|| "azure-openai provider requires an endpoint".to_string())?;
            Ok(Arc::new(OpenAiClient::azure(
                endpoint,
                api_key,
                options.api_version.as_deref(),
            )))
        }
        (ProviderType::OpenAI, Some(api_key)) => Ok(Arc::new(OpenAiClient::openai(
            options.endpoint.as_deref(),
            api_key,
        ))),
        (ProviderType::Ollama, _) => {
            let base_url = options
                .endpoint
                .as_deref()
                .unwrap_or("http://localhost:11434");
            let mut client = OllamaClient::with_base_url(base_url);
            if let Some(secs) = options.timeout_secs {
                client = client
                    .with_timeout(Duration::from_secs(secs))
                    .map_err(|e| e.to_string())?;
            }
            Ok(Arc::new(client))
        }
        (provider_type, None) => Err(format!(
            "{} provider requires API key",
            provider_type.as_str()
        )),
    }
}
