//! End-to-end: LLM-backed router, circuit breaker, chat service, store.

use std::sync::Arc;
use std::time::Duration;

use slide_intent_core::config::CircuitConfig;
use slide_intent_core::mocks::{MockBackend, MockLlm, MockReply};
use slide_intent_core::traits::{IntentRouter, SessionStore};
use slide_intent_core::types::{ComponentConfig, ComponentKind, IntentRequest, TableLayout};
use slide_intent_model_gateway::{CircuitBreakerClient, ProviderHealth};
use slide_intent_resolver::{ChatService, DeterministicRouter, LlmExtractor};
use slide_intent_store::InMemorySessionStore;

#[tokio::test]
async fn test_conversation_builds_a_slide() {
    let llm = Arc::new(MockLlm::scripted(vec![
        MockReply::Text(r#"{"action": "ADD", "component_type": "METRICS", "count": 3, "content_prompt": "ARR, churn, NPS"}"#.into()),
        MockReply::Text(r#"{"corners": "rounded", "count": 3}"#.into()),
        MockReply::Text(r#"Sure: {"action": "ADD", "component_type": "TABLE", "count": 1}"#.into()),
        MockReply::Text(r#"{"rows": 6, "columns": 4, "layout": "vertical"}"#.into()),
        MockReply::Text(r#"{"action": "GENERATE", "component_type": null}"#.into()),
    ]));
    let router = DeterministicRouter::new(LlmExtractor::new(llm.clone(), Duration::from_secs(8)));
    let store = Arc::new(InMemorySessionStore::new());
    let backend = Arc::new(MockBackend::new());
    let service = ChatService::new(Arc::new(router), store.clone(), backend.clone());

    let first = service.handle(None, IntentRequest::text("add 3 metrics for ARR, churn and NPS")).await;
    assert!(first.success);
    let session_id = first.session_id.clone();
    assert_eq!(first.element.as_ref().map(|e| e.count), Some(3));

    let second = service
        .handle(Some(&session_id), IntentRequest::text("add a comparison table with 6 rows and 4 columns"))
        .await;
    match second.element.map(|e| e.config) {
        Some(ComponentConfig::Table(t)) => {
            assert_eq!((t.rows, t.columns), (Some(6), Some(4)));
            assert_eq!(t.layout, TableLayout::Vertical);
        }
        other => panic!("expected table element, got {other:?}"),
    }

    let third = service.handle(Some(&session_id), IntentRequest::text("generate the content")).await;
    assert_eq!(third.updated_elements.len(), 2);

    let session = store.get(&session_id).await.unwrap().unwrap();
    assert_eq!(session.elements.len(), 2);
    assert_eq!(session.transcript.len(), 6);
    assert_eq!(backend.requests().len(), 4);
    assert_eq!(llm.call_count(), 5);
}

#[tokio::test]
async fn test_open_circuit_fails_fast_into_heuristics() {
    let llm = Arc::new(MockLlm::failing("503 service unavailable"));
    let breaker = Arc::new(CircuitBreakerClient::new(
        llm.clone(),
        "openai:gpt-4o-mini",
        &CircuitConfig {
            min_requests: 2,
            failure_rate: 0.5,
            cooldown_secs: 60,
        },
    ));
    let router = DeterministicRouter::new(LlmExtractor::new(breaker.clone(), Duration::from_secs(8)));
    let service = ChatService::new(
        Arc::new(router),
        Arc::new(InMemorySessionStore::new()),
        Arc::new(MockBackend::new()),
    );

    for message in ["add 2 charts", "add a photo of the team", "add 6 rows table"] {
        let reply = service.handle(Some("s1"), IntentRequest::text(message)).await;
        assert!(reply.success, "{message}: {:?}", reply.error);
    }

    assert_eq!(breaker.health(), ProviderHealth::CircuitOpen);
    // Two failures open the circuit; later calls never reach the provider.
    assert_eq!(llm.call_count(), 2);

    let reply = service.handle(Some("s1"), IntentRequest::text("add 3 metrics")).await;
    assert_eq!(reply.element.map(|e| e.component_type), Some(ComponentKind::Metrics));
}

#[tokio::test(start_paused = true)]
async fn test_hung_provider_opens_circuit() {
    let llm = Arc::new(MockLlm::stalled());
    let breaker = Arc::new(CircuitBreakerClient::new(
        llm.clone(),
        "openai:gpt-4o-mini",
        &CircuitConfig {
            min_requests: 2,
            failure_rate: 0.5,
            cooldown_secs: 60,
        },
    ));
    let router = DeterministicRouter::new(LlmExtractor::new(breaker.clone(), Duration::from_secs(8)));

    for message in ["add 3 metrics", "add a pie chart", "add 6 rows table", "add 2 photos", "add steps"] {
        let intent = router.resolve(&IntentRequest::text(message)).await.intent;
        assert!(intent.component.is_some(), "{message}");
    }

    assert_eq!(breaker.health(), ProviderHealth::CircuitOpen);
    // The first message's two timed-out calls open the circuit.
    assert_eq!(llm.call_count(), 2);
}
