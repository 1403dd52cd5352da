//! Department search orchestration.
//!
//! retrieve → assemble → generate, once per request, with no shared
//! mutable state between requests.

use crate::context::assemble_context;
use crate::rag::generate::AnswerGenerator;
use crate::rag::types::AnswerResult;
use crate::retrieval::RetrievalGateway;
use crate::scope::{Query, Scope};
use crate::search::AzureSearchClient;
use deptrag_core::{AppConfig, AppError, AppResult};
use deptrag_llm::{create_client, ClientOptions};
use std::sync::Arc;
use std::time::Instant;

/// Runs the retrieval-augmented answer flow.
///
/// Cheap to clone; clones share the underlying clients.
#[derive(Clone)]
pub struct SearchOrchestrator {
    retrieval: RetrievalGateway,
    generator: AnswerGenerator,
}

impl SearchOrchestrator {
    pub fn new(retrieval: RetrievalGateway, generator: AnswerGenerator) -> Self {
        Self {
            retrieval,
            generator,
        }
    }

    /// Build the search and model clients from configuration.
    pub fn from_config(config: &AppConfig) -> AppResult<Self> {
        let settings = config.search_settings()?;
        let index = AzureSearchClient::from_settings(&settings);

        let provider = config.provider.as_str();
        let options = ClientOptions {
            endpoint: config.resolve_endpoint(provider),
            api_key: config.resolve_api_key(provider),
            api_version: config.resolve_api_version(provider),
            timeout_secs: config.resolve_timeout(provider),
        };
        let client = create_client(provider, &options).map_err(AppError::Config)?;

        tracing::debug!(
            index = %settings.index_name,
            provider,
            model = %config.model,
            "Search orchestrator configured"
        );

        Ok(Self::new(
            RetrievalGateway::new(Arc::new(index)),
            AnswerGenerator::new(client, config.model.clone()),
        ))
    }

    /// Answer a question within a scope.
    ///
    /// Generation always runs, even when retrieval finds nothing. A
    /// retrieval failure ends the request before the model is called.
    pub async fn search(&self, scope: &Scope, query: &Query) -> AppResult<AnswerResult> {
        let start = Instant::now();

        let fragments = self.retrieval.retrieve(scope, query).await?;
        let context = assemble_context(&fragments);

        if context.is_empty() {
            tracing::info!("No fragment content retrieved; answering from the question alone");
        }

        let answer = self.generator.generate(query, &context).await?;

        tracing::info!(
            compound = scope.compound_id(),
            department = scope.department_id(),
            fragments = fragments.len(),
            "Search completed in {:.2}s",
            start.elapsed().as_secs_f64()
        );

        Ok(AnswerResult::new(answer))
    }

    /// Validate raw request parameters and run [`SearchOrchestrator::search`].
    pub async fn search_department(
        &self,
        department_id: i64,
        compound_id: i64,
        query: &str,
        document_ids: &[i64],
    ) -> AppResult<AnswerResult> {
        let scope = Scope::new(compound_id, department_id)?
            .with_documents(document_ids.iter().copied())?;
        let query = Query::new(query)?;

        self.search(&scope, &query).await
    }
}
