//! End-to-end tests of the department search flow against mock services.

use crate::rag::{AnswerGenerator, SearchOrchestrator};
use crate::retrieval::{RetrievalGateway, RESULT_LIMIT};
use crate::scope::{Query, Scope};
use crate::search::SearchHit;
use crate::tests::mocks::{MockLlmClient, MockSearchIndex};
use deptrag_core::AppError;
use std::sync::Arc;

fn orchestrator(
    index: &Arc<MockSearchIndex>,
    llm: &Arc<MockLlmClient>,
) -> SearchOrchestrator {
    SearchOrchestrator::new(
        RetrievalGateway::new(index.clone()),
        AnswerGenerator::new(llm.clone(), "answers"),
    )
}

fn user_turn(llm: &MockLlmClient) -> String {
    let requests = llm.requests();
    assert_eq!(requests.len(), 1, "expected exactly one completion call");
    requests[0].messages[1].content.clone()
}

#[tokio::test]
async fn test_full_flow() {
    let index = Arc::new(MockSearchIndex::with_hits(vec![
        SearchHit::with_content("A"),
        SearchHit::with_content(""),
        SearchHit::with_content("B"),
    ]));
    let llm = Arc::new(MockLlmClient::answering("Grounded answer."));

    let scope = Scope::new(1, 7).unwrap();
    let query = Query::new("what is B?").unwrap();
    let result = orchestrator(&index, &llm).search(&scope, &query).await.unwrap();

    assert_eq!(result.answer, "Grounded answer.");
    assert!(result.sources.is_none());
    assert_eq!(user_turn(&llm), "Information:\nA\n\nB\nQuestion: what is B?");
}

#[tokio::test]
async fn test_allow_list_becomes_filter() {
    let index = Arc::new(MockSearchIndex::with_hits(vec![]));
    let llm = Arc::new(MockLlmClient::answering("ok"));

    let scope = Scope::new(1, 7).unwrap().with_documents([9, 5]).unwrap();
    let query = Query::new("refund policy").unwrap();
    orchestrator(&index, &llm).search(&scope, &query).await.unwrap();

    let requests = index.requests();
    assert_eq!(requests.len(), 1);
    assert_eq!(requests[0].top, 3);
    let filter = requests[0].filter.as_ref().unwrap();
    assert_eq!(filter.to_odata(), "id eq '5' or id eq '9'");
}

#[tokio::test]
async fn test_no_allow_list_means_no_filter() {
    let index = Arc::new(MockSearchIndex::with_hits(vec![]));
    let llm = Arc::new(MockLlmClient::answering("ok"));

    let scope = Scope::new(1, 7).unwrap();
    let query = Query::new("refund policy").unwrap();
    orchestrator(&index, &llm).search(&scope, &query).await.unwrap();

    let requests = index.requests();
    assert!(requests[0].filter.is_none());
    assert_eq!(requests[0].top, RESULT_LIMIT);
}

#[tokio::test]
async fn test_empty_retrieval_still_generates() {
    let index = Arc::new(MockSearchIndex::with_hits(vec![]));
    let llm = Arc::new(MockLlmClient::answering("I don't know."));

    let scope = Scope::new(1, 7).unwrap();
    let query = Query::new("who approves leave?").unwrap();
    let result = orchestrator(&index, &llm).search(&scope, &query).await.unwrap();

    assert_eq!(result.answer, "I don't know.");
    assert_eq!(
        user_turn(&llm),
        "Information:\n\nQuestion: who approves leave?"
    );
}

#[tokio::test]
async fn test_retrieval_failure_skips_generation() {
    let index = Arc::new(MockSearchIndex::failing(AppError::Retrieval(
        "connection refused".to_string(),
    )));
    let llm = Arc::new(MockLlmClient::answering("unused"));

    let scope = Scope::new(1, 7).unwrap();
    let query = Query::new("refund policy").unwrap();
    let err = orchestrator(&index, &llm)
        .search(&scope, &query)
        .await
        .unwrap_err();

    assert!(err.is_retrieval());
    assert!(llm.requests().is_empty());
}

#[tokio::test]
async fn test_zero_choices_is_generation_failure() {
    let index = Arc::new(MockSearchIndex::with_hits(vec![SearchHit::with_content("A")]));
    let llm = Arc::new(MockLlmClient::with_choices(vec![]));

    let scope = Scope::new(1, 7).unwrap();
    let query = Query::new("refund policy").unwrap();
    let err = orchestrator(&index, &llm)
        .search(&scope, &query)
        .await
        .unwrap_err();

    assert!(err.is_generation());
}

#[tokio::test]
async fn test_model_failure_is_distinct_from_retrieval_failure() {
    let index = Arc::new(MockSearchIndex::with_hits(vec![SearchHit::with_content("A")]));
    let llm = Arc::new(MockLlmClient::failing(AppError::Llm(
        "503 Service Unavailable".to_string(),
    )));

    let scope = Scope::new(1, 7).unwrap();
    let query = Query::new("refund policy").unwrap();
    let err = orchestrator(&index, &llm)
        .search(&scope, &query)
        .await
        .unwrap_err();

    assert!(err.is_generation());
    assert!(!err.is_retrieval());
}

#[tokio::test]
async fn test_search_department_validates_inputs() {
    let index = Arc::new(MockSearchIndex::with_hits(vec![]));
    let llm = Arc::new(MockLlmClient::answering("ok"));
    let orchestrator = orchestrator(&index, &llm);

    let err = orchestrator
        .search_department(7, 1, "   ", &[])
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::Scope(_)));

    let err = orchestrator
        .search_department(7, 1, "refund policy", &[5, -1])
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::Scope(_)));

    assert!(index.requests().is_empty());
    assert!(llm.requests().is_empty());

    let result = orchestrator
        .search_department(7, 1, "refund policy", &[5, 9])
        .await
        .unwrap();
    assert_eq!(result.answer, "ok");
}

#[tokio::test]
async fn test_concurrent_requests_share_clients() {
    let index = Arc::new(MockSearchIndex::with_hits(vec![SearchHit::with_content("A")]));
    let llm = Arc::new(MockLlmClient::answering("ok"));
    let first = orchestrator(&index, &llm);
    let second = first.clone();

    let scope_a = Scope::new(1, 7).unwrap();
    let scope_b = Scope::new(2, 8).unwrap().with_documents([3]).unwrap();
    let query = Query::new("refund policy").unwrap();

    let (a, b) = tokio::join!(first.search(&scope_a, &query), second.search(&scope_b, &query));
    assert!(a.is_ok());
    assert!(b.is_ok());
    assert_eq!(index.requests().len(), 2);
    assert_eq!(llm.requests().len(), 2);
}
