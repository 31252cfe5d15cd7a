//! Chat service: one user message in, one assistant reply out.
//!
//! Resolves the message to an intent, applies it to the session's canvas
//! through the generation backend, and records the transcript. Failures of
//! collaborators become failed replies; nothing is propagated.

use serde::{Deserialize, Serialize};
use std::sync::Arc;

use slide_intent_core::{
    traits::{GenerationBackend, IntentRouter, SessionStore},
    types::{
        ActionKind, ChatEntry, ComponentKind, DebugTrace, GenerationRequest, Intent, IntentRequest,
        PlacedElement, Session,
    },
    Result,
};

const START_SUGGESTIONS: &[&str] = &["Add 3 metrics", "Add comparison table", "Add process steps"];
const CLARIFY_SUGGESTIONS: &[&str] = &[
    "Add 3 metrics",
    "Add data table",
    "Add bullet points",
    "Add numbered steps",
];
const EMPTY_CANVAS_SUGGESTIONS: &[&str] = &["Add 3 metrics", "Add process steps", "Add comparison"];
const GENERATED_SUGGESTIONS: &[&str] = &["Edit content", "Add more elements", "Clear and start over"];

/// Assistant reply to one chat message.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ChatReply {
    pub success: bool,
    pub session_id: String,
    pub response_text: String,
    pub action_taken: Option<String>,
    /// Element placed by an ADD.
    pub element: Option<PlacedElement>,
    /// Elements re-rendered by a GENERATE.
    #[serde(default)]
    pub updated_elements: Vec<PlacedElement>,
    pub presentation_id: Option<String>,
    #[serde(default)]
    pub suggestions: Vec<String>,
    pub debug: Option<DebugTrace>,
    pub error: Option<String>,
}

impl ChatReply {
    fn ok(session_id: &str, text: impl Into<String>, action: &str) -> Self {
        Self {
            success: true,
            session_id: session_id.to_string(),
            response_text: text.into(),
            action_taken: Some(action.to_string()),
            ..Default::default()
        }
    }

    fn failed(session_id: &str, text: impl Into<String>, error: impl Into<String>) -> Self {
        Self {
            success: false,
            session_id: session_id.to_string(),
            response_text: text.into(),
            error: Some(error.into()),
            ..Default::default()
        }
    }

    fn with_suggestions(mut self, suggestions: &[&str]) -> Self {
        self.suggestions = suggestions.iter().map(|s| s.to_string()).collect();
        self
    }
}

/// Orchestrates router, session store and generation backend.
pub struct ChatService {
    router: Arc<dyn IntentRouter>,
    store: Arc<dyn SessionStore>,
    backend: Arc<dyn GenerationBackend>,
}

impl ChatService {
    pub fn new(
        router: Arc<dyn IntentRouter>,
        store: Arc<dyn SessionStore>,
        backend: Arc<dyn GenerationBackend>,
    ) -> Self {
        Self { router, store, backend }
    }

    /// Handle one message for a session, creating the session on first use.
    pub async fn handle(&self, session_id: Option<&str>, request: IntentRequest) -> ChatReply {
        let known_id = session_id.unwrap_or_default();

        if request.raw_message.trim().is_empty() {
            return ChatReply::failed(known_id, "Please type a message.", "message cannot be empty");
        }
        if let Some(placement) = &request.placement {
            if let Err(e) = placement.validate() {
                return ChatReply::failed(known_id, "That position is outside the slide.", e.to_string());
            }
        }

        let session = match self.store.create(session_id).await {
            Ok(session) => session,
            Err(e) => {
                tracing::error!(error = %e, "Failed to open session");
                return ChatReply::failed(known_id, "Sorry, I could not open your session.", e.to_string());
            }
        };

        match self.process(&session, request).await {
            Ok(reply) => reply,
            Err(e) => {
                tracing::error!(session_id = %session.id, error = %e, "Error processing message");
                let text = "Sorry, I encountered an error processing your request. Please try again.";
                if let Err(e) = self.store.append_chat(&session.id, ChatEntry::assistant(text, Vec::new())).await {
                    tracing::warn!(session_id = %session.id, error = %e, "Failed to record error reply");
                }
                ChatReply::failed(&session.id, text, e.to_string())
            }
        }
    }

    async fn process(&self, session: &Session, request: IntentRequest) -> Result<ChatReply> {
        self.store
            .append_chat(&session.id, ChatEntry::user(request.raw_message.clone()))
            .await?;

        let resolution = self.router.resolve(&request).await;
        let intent = resolution.intent;

        tracing::info!(
            session_id = %session.id,
            trace_id = %request.trace_id,
            action = %intent.action,
            kind = ?intent.component_type(),
            count = ?intent.count,
            confidence = intent.confidence,
            "Intent resolved"
        );

        let mut reply = match resolution.debug {
            Some(trace) => {
                let text = format!(
                    "Debug: {} {} via {:?}, nothing was generated.",
                    intent.action,
                    intent.component_type().map_or("no component", |k| k.as_str()),
                    trace.path
                );
                let mut reply = ChatReply::ok(&session.id, text, "debug");
                reply.debug = Some(trace);
                reply
            }
            None => self.apply(session, &request, &intent).await?,
        };

        if reply.presentation_id.is_none() {
            reply.presentation_id = self.store.presentation_id(&session.id).await?;
        }
        self.store
            .append_chat(
                &session.id,
                ChatEntry::assistant(reply.response_text.clone(), reply.suggestions.clone()),
            )
            .await?;

        Ok(reply)
    }

    async fn apply(&self, session: &Session, request: &IntentRequest, intent: &Intent) -> Result<ChatReply> {
        let id = session.id.as_str();
        match intent.action {
            ActionKind::Clear => {
                self.store.clear(id).await?;
                Ok(ChatReply::ok(id, "Slide cleared. Ready for new elements.", "clear")
                    .with_suggestions(START_SUGGESTIONS))
            }
            ActionKind::Remove => Ok(ChatReply::ok(
                id,
                "To remove an element, use the edit buttons on the slide, or say 'clear' to start fresh.",
                "remove",
            )),
            ActionKind::Add => self.add(id, request, intent).await,
            ActionKind::Generate => self.regenerate(session).await,
            ActionKind::Modify | ActionKind::Move => Ok(ChatReply::ok(
                id,
                format!(
                    "I understood your request as: {}. Let me know if you'd like to add specific elements.",
                    intent.action.as_str().to_lowercase()
                ),
                &intent.action.as_str().to_lowercase(),
            )),
        }
    }

    async fn add(&self, session_id: &str, request: &IntentRequest, intent: &Intent) -> Result<ChatReply> {
        let Some(plan) = GenerationRequest::plan(intent, request.placement.as_ref()) else {
            return Ok(ChatReply::ok(
                session_id,
                "What would you like to add? Options: metrics (KPIs/stats), table (data grid), text boxes (bullets/steps/sections), chart, or image.",
                "clarify",
            )
            .with_suggestions(CLARIFY_SUGGESTIONS));
        };

        let rendered = match self.backend.generate(&plan).await {
            Ok(rendered) => rendered,
            Err(e) => {
                tracing::warn!(kind = %plan.component_type, error = %e, "Generation backend failed");
                return Ok(ChatReply::failed(
                    session_id,
                    format!("Failed to generate {}.", kind_label(plan.component_type)),
                    e.to_string(),
                ));
            }
        };

        if let Some(presentation_id) = &rendered.presentation_id {
            self.store.set_presentation_id(session_id, presentation_id).await?;
        }
        let element = PlacedElement::from_generation(&plan, rendered.html, rendered.variants_used);
        self.store.append_element(session_id, element.clone()).await?;

        let text = format!(
            "Added {} {} element{}.",
            plan.count,
            kind_label(plan.component_type),
            if plan.count > 1 { "s" } else { "" }
        );
        let mut reply = ChatReply::ok(session_id, text, "add").with_suggestions(add_suggestions(plan.component_type));
        reply.element = Some(element);
        reply.presentation_id = rendered.presentation_id;
        Ok(reply)
    }

    /// Re-render every placed element with real content.
    async fn regenerate(&self, session: &Session) -> Result<ChatReply> {
        let id = session.id.as_str();
        let elements = match self.store.get(id).await? {
            Some(current) => current.elements,
            None => session.elements.clone(),
        };

        if elements.is_empty() {
            return Ok(ChatReply::ok(
                id,
                "No elements to generate content for. Add some elements first, then say 'generate' to fill them with AI content.",
                "generate",
            )
            .with_suggestions(EMPTY_CANVAS_SUGGESTIONS));
        }

        let mut updated = Vec::new();
        for element in elements {
            let mut request = element.regeneration_request();
            request.config.set_placeholder_mode(false);

            match self.backend.generate(&request).await {
                Ok(rendered) => {
                    let element = PlacedElement {
                        html: rendered.html,
                        config: request.config,
                        variants_used: rendered.variants_used,
                        updated_at: Some(chrono::Utc::now().timestamp()),
                        ..element
                    };
                    self.store.replace_element(id, element.clone()).await?;
                    updated.push(element);
                }
                Err(e) => {
                    tracing::warn!(element_id = %element.id, error = %e, "Failed to regenerate element");
                }
            }
        }

        let mut reply = if updated.is_empty() {
            ChatReply::ok(id, "Could not generate content. Try adding elements first.", "generate")
                .with_suggestions(EMPTY_CANVAS_SUGGESTIONS)
        } else {
            let n = updated.len();
            ChatReply::ok(
                id,
                format!("Generated AI content for {n} element{}.", if n > 1 { "s" } else { "" }),
                "generate",
            )
            .with_suggestions(GENERATED_SUGGESTIONS)
        };
        reply.updated_elements = updated;
        Ok(reply)
    }
}

fn kind_label(kind: ComponentKind) -> String {
    kind.as_str().to_lowercase()
}

fn add_suggestions(kind: ComponentKind) -> &'static [&'static str] {
    match kind {
        ComponentKind::Metrics => &["Add text boxes below", "Add chart", "Add more metrics"],
        ComponentKind::Table => &["Add metrics above", "Add chart", "Add another table"],
        ComponentKind::TextBox => &["Add metrics", "Add chart", "Add more text boxes"],
        ComponentKind::Chart => &["Add another chart", "Add metrics", "Add text boxes", "Clear and start over"],
        ComponentKind::Image => &["Add another image", "Add text boxes", "Add chart", "Clear and start over"],
    }
}
