//! In-memory stand-ins for the search index and the model.

use crate::search::{SearchHit, SearchIndex, SearchRequest};
use deptrag_core::{AppError, AppResult};
use deptrag_llm::{LlmChoice, LlmClient, LlmRequest, LlmResponse, LlmUsage};
use std::sync::Mutex;

/// Search index returning canned hits and recording every request.
pub(crate) struct MockSearchIndex {
    hits: Vec<SearchHit>,
    failure: Mutex<Option<AppError>>,
    requests: Mutex<Vec<SearchRequest>>,
}

impl MockSearchIndex {
    pub(crate) fn with_hits(hits: Vec<SearchHit>) -> Self {
        Self {
            hits,
            failure: Mutex::new(None),
            requests: Mutex::new(Vec::new()),
        }
    }

    /// Fails the first query with `err`.
    pub(crate) fn failing(err: AppError) -> Self {
        Self {
            hits: Vec::new(),
            failure: Mutex::new(Some(err)),
            requests: Mutex::new(Vec::new()),
        }
    }

    pub(crate) fn requests(&self) -> Vec<SearchRequest> {
        self.requests.lock().unwrap().clone()
    }
}

#[async_trait::async_trait]
impl SearchIndex for MockSearchIndex {
    fn index_name(&self) -> &str {
        "mock-index"
    }

    async fn query(&self, request: &SearchRequest) -> AppResult<Vec<SearchHit>> {
        self.requests.lock().unwrap().push(request.clone());
        if let Some(err) = self.failure.lock().unwrap().take() {
            return Err(err);
        }
        Ok(self.hits.clone())
    }
}

/// Model returning canned choices and recording every request.
pub(crate) struct MockLlmClient {
    choices: Vec<Option<String>>,
    failure: Mutex<Option<AppError>>,
    requests: Mutex<Vec<LlmRequest>>,
}

impl MockLlmClient {
    pub(crate) fn answering(answer: &str) -> Self {
        Self::with_choices(vec![Some(answer.to_string())])
    }

    pub(crate) fn with_choices(choices: Vec<Option<String>>) -> Self {
        Self {
            choices,
            failure: Mutex::new(None),
            requests: Mutex::new(Vec::new()),
        }
    }

    /// Fails the first completion with `err`.
    pub(crate) fn failing(err: AppError) -> Self {
        Self {
            choices: Vec::new(),
            failure: Mutex::new(Some(err)),
            requests: Mutex::new(Vec::new()),
        }
    }

    pub(crate) fn requests(&self) -> Vec<LlmRequest> {
        self.requests.lock().unwrap().clone()
    }
}

#[async_trait::async_trait]
impl LlmClient for MockLlmClient {
    fn provider_name(&self) -> &str {
        "mock"
    }

    async fn complete(&self, request: &LlmRequest) -> AppResult<LlmResponse> {
        self.requests.lock().unwrap().push(request.clone());
        if let Some(err) = self.failure.lock().unwrap().take() {
            return Err(err);
        }

        let choices = self
            .choices
            .iter()
            .enumerate()
            .map(|(index, content)| LlmChoice {
                index: index as u32,
                content: content.clone(),
                finish_reason: Some("stop".to_string()),
            })
            .collect();

        Ok(LlmResponse {
            choices,
            model: request.model.clone(),
            usage: LlmUsage::new(10, 5),
        })
    }
}
