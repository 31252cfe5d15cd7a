use std::sync::Arc;

use slide_intent_core::mocks::{MockBackend, MockLlm};
use slide_intent_core::traits::SessionStore;
use slide_intent_core::types::{
    ChatRole, ComponentKind, ConfigPatch, IntentRequest, MetricsPatch, Placement,
};
use slide_intent_resolver::{ChatService, DeterministicRouter, LlmExtractor};
use slide_intent_store::InMemorySessionStore;

struct Harness {
    service: ChatService,
    store: Arc<InMemorySessionStore>,
    backend: Arc<MockBackend>,
}

fn harness_with(router: DeterministicRouter, backend: MockBackend) -> Harness {
    let store = Arc::new(InMemorySessionStore::new());
    let backend = Arc::new(backend);
    let service = ChatService::new(Arc::new(router), store.clone(), backend.clone());
    Harness { service, store, backend }
}

fn harness() -> Harness {
    harness_with(DeterministicRouter::heuristic_only(), MockBackend::new())
}

#[tokio::test]
async fn test_add_places_element_and_records_transcript() {
    let h = harness();
    let reply = h.service.handle(Some("s1"), IntentRequest::text("add 3 metrics")).await;

    assert!(reply.success);
    assert_eq!(reply.session_id, "s1");
    assert_eq!(reply.action_taken.as_deref(), Some("add"));
    assert_eq!(reply.response_text, "Added 3 metrics elements.");
    assert_eq!(reply.presentation_id.as_deref(), Some("mock-presentation"));
    assert!(!reply.suggestions.is_empty());

    let element = reply.element.unwrap();
    assert_eq!(element.component_type, ComponentKind::Metrics);
    assert_eq!(element.count, 3);

    let session = h.store.get("s1").await.unwrap().unwrap();
    assert_eq!(session.elements.len(), 1);
    assert_eq!(session.transcript.len(), 2);
    assert_eq!(session.transcript[0].role, ChatRole::User);
    assert_eq!(session.transcript[1].role, ChatRole::Assistant);
    assert_eq!(session.presentation_id.as_deref(), Some("mock-presentation"));
}

#[tokio::test]
async fn test_session_created_on_first_use() {
    let h = harness();
    let reply = h.service.handle(None, IntentRequest::text("add a table")).await;
    assert!(reply.success);
    assert!(!reply.session_id.is_empty());
    assert!(h.store.get(&reply.session_id).await.unwrap().is_some());
}

#[tokio::test]
async fn test_empty_message_is_rejected() {
    let h = harness();
    let reply = h.service.handle(Some("s1"), IntentRequest::text("   ")).await;
    assert!(!reply.success);
    assert!(reply.error.is_some());
    assert!(h.store.is_empty());
}

#[tokio::test]
async fn test_invalid_placement_is_rejected() {
    let h = harness();
    let request = IntentRequest::text("add a chart").with_placement(Placement {
        start_col: Some(40),
        ..Default::default()
    });
    let reply = h.service.handle(Some("s1"), request).await;
    assert!(!reply.success);
    assert!(h.backend.requests().is_empty());
}

#[tokio::test]
async fn test_clear_keeps_transcript() {
    let h = harness();
    h.service.handle(Some("s1"), IntentRequest::text("add 2 tables")).await;
    let reply = h.service.handle(Some("s1"), IntentRequest::text("clear the slide")).await;

    assert!(reply.success);
    assert_eq!(reply.response_text, "Slide cleared. Ready for new elements.");
    let session = h.store.get("s1").await.unwrap().unwrap();
    assert!(session.elements.is_empty());
    assert_eq!(session.transcript.len(), 4);
}

#[tokio::test]
async fn test_remove_explains_how() {
    let h = harness();
    let reply = h.service.handle(Some("s1"), IntentRequest::text("remove the chart")).await;
    assert_eq!(reply.action_taken.as_deref(), Some("remove"));
    assert!(reply.response_text.contains("edit buttons"));
    assert!(h.backend.requests().is_empty());
}

#[tokio::test]
async fn test_generate_on_empty_canvas() {
    let h = harness();
    let reply = h.service.handle(Some("s1"), IntentRequest::text("generate content")).await;
    assert!(reply.success);
    assert!(reply.response_text.starts_with("No elements to generate content for"));
    assert!(reply.updated_elements.is_empty());
}

#[tokio::test]
async fn test_generate_turns_placeholders_into_content() {
    let h = harness();
    let request = IntentRequest::text("sales KPIs")
        .with_kind(ComponentKind::Metrics)
        .with_config(ConfigPatch::Metrics(MetricsPatch {
            placeholder_mode: Some(true),
            ..Default::default()
        }));
    let added = h.service.handle(Some("s1"), request).await;
    assert!(added.element.unwrap().config.placeholder_mode());

    let reply = h.service.handle(Some("s1"), IntentRequest::text("fill it in")).await;
    assert_eq!(reply.action_taken.as_deref(), Some("generate"));
    assert_eq!(reply.response_text, "Generated AI content for 1 element.");
    assert_eq!(reply.updated_elements.len(), 1);

    let requests = h.backend.requests();
    assert_eq!(requests.len(), 2);
    assert!(!requests[1].config.placeholder_mode());
    assert_eq!(requests[1].content_prompt, "sales KPIs");

    let session = h.store.get("s1").await.unwrap().unwrap();
    assert!(session.elements[0].updated_at.is_some());
    assert!(!session.elements[0].config.placeholder_mode());
}

#[tokio::test]
async fn test_backend_failure_is_a_failed_reply() {
    let h = harness_with(DeterministicRouter::heuristic_only(), MockBackend::failing("renderer down"));
    let reply = h.service.handle(Some("s1"), IntentRequest::text("add 3 metrics")).await;

    assert!(!reply.success);
    assert!(reply.error.unwrap().contains("renderer down"));
    let session = h.store.get("s1").await.unwrap().unwrap();
    assert!(session.elements.is_empty());
}

#[tokio::test]
async fn test_debug_request_skips_backend() {
    let h = harness();
    let reply = h
        .service
        .handle(Some("s1"), IntentRequest::text("add 3 metrics").with_debug())
        .await;

    assert!(reply.success);
    assert_eq!(reply.action_taken.as_deref(), Some("debug"));
    let debug = reply.debug.unwrap();
    assert_eq!(debug.would_send.map(|r| r.count), Some(3));
    assert!(h.backend.requests().is_empty());
}

#[tokio::test]
async fn test_clarification_when_no_kind() {
    let llm = Arc::new(MockLlm::constant(r#"{"action": "ADD", "component_type": null}"#));
    let router = DeterministicRouter::new(LlmExtractor::new(llm, std::time::Duration::from_secs(8)));
    let h = harness_with(router, MockBackend::new());

    let reply = h.service.handle(Some("s1"), IntentRequest::text("add something")).await;
    assert!(reply.success);
    assert_eq!(reply.action_taken.as_deref(), Some("clarify"));
    assert!(reply.response_text.starts_with("What would you like to add?"));
    assert_eq!(reply.suggestions.len(), 4);
    assert!(h.backend.requests().is_empty());
}

#[tokio::test]
async fn test_modify_echoes_action() {
    let h = harness();
    let reply = h.service.handle(Some("s1"), IntentRequest::text("change the title")).await;
    assert_eq!(reply.action_taken.as_deref(), Some("modify"));
    assert!(reply.response_text.starts_with("I understood your request as: modify"));
}
