//! Azure AI Search client.
//!
//! REST API: `POST {endpoint}/indexes/{index}/docs/search?api-version=...`
//! with the admin or query key in the `api-key` header.

use crate::search::{SearchHit, SearchIndex, SearchRequest};
use deptrag_core::config::SearchSettings;
use deptrag_core::{AppError, AppResult};
use serde::{Deserialize, Serialize};

/// Search request body.
#[derive(Debug, Serialize)]
struct AzureSearchBody<'a> {
    search: &'a str,
    top: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    filter: Option<String>,
}

/// Search response body.
#[derive(Debug, Deserialize)]
struct AzureSearchResponse {
    value: Vec<serde_json::Map<String, serde_json::Value>>,
}

/// Key Azure uses for the relevance score inside each hit.
const SCORE_KEY: &str = "@search.score";

/// Azure AI Search client bound to one index.
pub struct AzureSearchClient {
    /// Service endpoint, without trailing slash
    endpoint: String,

    index_name: String,

    api_key: String,

    api_version: String,

    /// HTTP client
    client: reqwest::Client,
}

impl AzureSearchClient {
    /// Create a client for one index.
    pub fn new(
        endpoint: impl Into<String>,
        index_name: impl Into<String>,
        api_key: impl Into<String>,
        api_version: impl Into<String>,
    ) -> Self {
        Self {
            endpoint: endpoint.into().trim_end_matches('/').to_string(),
            index_name: index_name.into(),
            api_key: api_key.into(),
            api_version: api_version.into(),
            client: reqwest::Client::new(),
        }
    }

    /// Create a client from resolved configuration.
    pub fn from_settings(settings: &SearchSettings) -> Self {
        Self::new(
            settings.endpoint.as_str(),
            settings.index_name.as_str(),
            settings.api_key.as_str(),
            settings.api_version.as_str(),
        )
    }

    fn search_url(&self) -> String {
        format!(
            "{}/indexes/{}/docs/search?api-version={}",
            self.endpoint, self.index_name, self.api_version
        )
    }

    fn to_body<'a>(request: &'a SearchRequest) -> AzureSearchBody<'a> {
        AzureSearchBody {
            search: &request.text,
            top: request.top,
            filter: request.filter.as_ref().map(|f| f.to_odata()),
        }
    }

    /// Convert the response into hits, keeping engine order.
    fn convert_response(response: AzureSearchResponse) -> Vec<SearchHit> {
        response
            .value
            .into_iter()
            .map(|mut fields| {
                let score = fields.remove(SCORE_KEY).and_then(|v| v.as_f64());
                SearchHit { score, fields }
            })
            .collect()
    }
}

#[async_trait::async_trait]
impl SearchIndex for AzureSearchClient {
    fn index_name(&self) -> &str {
        &self.index_name
    }

    async fn query(&self, request: &SearchRequest) -> AppResult<Vec<SearchHit>> {
        tracing::debug!(
            index = %self.index_name,
            top = request.top,
            filtered = request.filter.is_some(),
            "Querying Azure AI Search"
        );

        let response = self
            .client
            .post(self.search_url())
            .header("api-key", &self.api_key)
            .json(&Self::to_body(request))
            .send()
            .await
            .map_err(|e| {
                AppError::Retrieval(format!("Failed to send request to search index: {}", e))
            })?;

        if !response.status().is_success() {
            let status = response.status();
            let error_text = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".to_string());
            return Err(AppError::Retrieval(format!(
                "Search API error ({}): {}",
                status, error_text
            )));
        }

        let body: AzureSearchResponse = response.json().await.map_err(|e| {
            AppError::Retrieval(format!("Failed to parse search response: {}", e))
        })?;

        Ok(Self::convert_response(body))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::search::DocumentFilter;

    #[test]
    fn test_search_url() {
        let client = AzureSearchClient::new(
            "https://acme.search.windows.net/",
            "department-docs",
            "key",
            "2023-11-01",
        );
        assert_eq!(client.index_name(), "department-docs");
        assert_eq!(
            client.search_url(),
            "https://acme.search.windows.net/indexes/department-docs/docs/search?api-version=2023-11-01"
        );
    }

    #[test]
    fn test_body_with_filter() {
        let request = SearchRequest {
            text: "refund policy".to_string(),
            top: 3,
            filter: DocumentFilter::any_of([9, 5]),
        };
        let body = serde_json::to_value(AzureSearchClient::to_body(&request)).unwrap();
        assert_eq!(
            body,
            serde_json::json!({
                "search": "refund policy",
                "top": 3,
                "filter": "id eq '5' or id eq '9'"
            })
        );
    }

    #[test]
    fn test_body_without_filter() {
        let request = SearchRequest {
            text: "refund policy".to_string(),
            top: 3,
            filter: None,
        };
        let body = serde_json::to_value(AzureSearchClient::to_body(&request)).unwrap();
        assert!(body.get("filter").is_none());
    }

    #[test]
    fn test_convert_response() {
        let response: AzureSearchResponse = serde_json::from_value(serde_json::json!({
            "@odata.context": "https://acme.search.windows.net/indexes('docs')/$metadata",
            "value": [
                {"@search.score": 4.2, "id": "5", "content": "Refunds within 30 days."},
                {"@search.score": 1.1, "id": "9"}
            ]
        }))
        .unwrap();

        let hits = AzureSearchClient::convert_response(response);
        assert_eq!(hits.len(), 2);
        assert_eq!(hits[0].score, Some(4.2));
        assert_eq!(hits[0].content(), Some("Refunds within 30 days."));
        assert!(!hits[0].fields.contains_key(SCORE_KEY));
        assert_eq!(hits[1].content(), None);
    }
}
