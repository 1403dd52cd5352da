//! Scoped retrieval of ranked document fragments.

use crate::scope::{Query, Scope};
use crate::search::{DocumentFilter, SearchIndex, SearchRequest};
use deptrag_core::{AppError, AppResult};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

/// Number of hits requested from the index for every query.
pub const RESULT_LIMIT: usize = 3;

/// A unit of retrieved text, ranked by relevance.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RetrievedFragment {
    /// 0 is the most relevant hit
    pub rank: usize,

    /// Fragment text; empty when the hit carried no content
    pub content: String,
}

impl RetrievedFragment {
    pub fn new(rank: usize, content: impl Into<String>) -> Self {
        Self {
            rank,
            content: content.into(),
        }
    }
}

/// Translates a scope and query into an index query.
#[derive(Clone)]
pub struct RetrievalGateway {
    index: Arc<dyn SearchIndex>,
}

impl RetrievalGateway {
    pub fn new(index: Arc<dyn SearchIndex>) -> Self {
        Self { index }
    }

    /// Build the index request for a scope and query.
    ///
    /// An allow-list becomes a document-id filter; without one the query
    /// runs unfiltered.
    pub fn build_request(scope: &Scope, query: &Query) -> SearchRequest {
        SearchRequest {
            text: query.as_str().to_string(),
            top: RESULT_LIMIT,
            filter: DocumentFilter::any_of(scope.allowed_document_ids().iter().copied()),
        }
    }

    /// Retrieve the top fragments for a query within a scope.
    ///
    /// Fragments keep the engine's order. Failures surface as `AppError::Retrieval`.
    pub async fn retrieve(&self, scope: &Scope, query: &Query) -> AppResult<Vec<RetrievedFragment>> {
        let request = Self::build_request(scope, query);

        tracing::info!(
            index = self.index.index_name(),
            compound = scope.compound_id(),
            department = scope.department_id(),
            allowed = scope.allowed_document_ids().len(),
            "Retrieving fragments"
        );

        let hits = self.index.query(&request).await.map_err(into_retrieval)?;

        let fragments: Vec<RetrievedFragment> = hits
            .iter()
            .take(RESULT_LIMIT)
            .enumerate()
            .map(|(rank, hit)| RetrievedFragment::new(rank, hit.content().unwrap_or_default()))
            .collect();

        tracing::debug!("Retrieved {} fragments", fragments.len());
        Ok(fragments)
    }
}

fn into_retrieval(err: AppError) -> AppError {
    match err {
        AppError::Retrieval(_) => err,
        other => AppError::Retrieval(other.to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::search::SearchHit;
    use crate::tests::mocks::MockSearchIndex;

    fn query() -> Query {
        Query::new("refund policy").unwrap()
    }

    #[test]
    fn test_request_with_allow_list() {
        let scope = Scope::new(1, 2).unwrap().with_documents([9, 5]).unwrap();
        let request = RetrievalGateway::build_request(&scope, &query());

        assert_eq!(request.text, "refund policy");
        assert_eq!(request.top, 3);
        let filter = request.filter.unwrap();
        assert_eq!(filter.ids().iter().copied().collect::<Vec<_>>(), vec![5, 9]);
        assert_eq!(filter.to_odata(), "id eq '5' or id eq '9'");
    }

    #[test]
    fn test_request_without_allow_list() {
        let scope = Scope::new(1, 2).unwrap();
        let request = RetrievalGateway::build_request(&scope, &query());
        assert!(request.filter.is_none());
        assert_eq!(request.top, RESULT_LIMIT);
    }

    #[tokio::test]
    async fn test_retrieve_keeps_order_and_blank_hits() {
        let index = Arc::new(MockSearchIndex::with_hits(vec![
            SearchHit::with_content("A"),
            SearchHit::default(),
            SearchHit::with_content("B"),
        ]));
        let gateway = RetrievalGateway::new(index.clone());

        let fragments = gateway
            .retrieve(&Scope::new(1, 2).unwrap(), &query())
            .await
            .unwrap();

        assert_eq!(
            fragments,
            vec![
                RetrievedFragment::new(0, "A"),
                RetrievedFragment::new(1, ""),
                RetrievedFragment::new(2, "B"),
            ]
        );
        assert_eq!(index.requests().len(), 1);
    }

    #[tokio::test]
    async fn test_retrieve_never_exceeds_limit() {
        let hits = (0..5)
            .map(|i| SearchHit::with_content(format!("hit {}", i)))
            .collect();
        let gateway = RetrievalGateway::new(Arc::new(MockSearchIndex::with_hits(hits)));

        let fragments = gateway
            .retrieve(&Scope::new(1, 2).unwrap(), &query())
            .await
            .unwrap();
        assert_eq!(fragments.len(), RESULT_LIMIT);
        assert_eq!(fragments[2].content, "hit 2");
    }

    #[tokio::test]
    async fn test_retrieve_wraps_foreign_errors() {
        let index = MockSearchIndex::failing(AppError::Other("socket closed".to_string()));
        let gateway = RetrievalGateway::new(Arc::new(index));

        let err = gateway
            .retrieve(&Scope::new(1, 2).unwrap(), &query())
            .await
            .unwrap_err();
        assert!(err.is_retrieval());
        assert!(err.to_string().contains("socket closed"));
    }
}
