//! In-memory session store implementation using DashMap.

use async_trait::async_trait;
use dashmap::DashMap;
use uuid::Uuid;

use slide_intent_core::{
    traits::SessionStore,
    types::{ChatEntry, PlacedElement, Session},
    Error, Result,
};

/// In-memory session store. Each session is locked only for the duration of
/// one operation.
#[derive(Debug, Default)]
pub struct InMemorySessionStore {
    sessions: DashMap<String, Session>,
}

impl InMemorySessionStore {
    /// Create a new in-memory session store.
    pub fn new() -> Self {
        Self {
            sessions: DashMap::new(),
        }
    }

    /// Get the number of sessions.
    pub fn len(&self) -> usize {
        self.sessions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sessions.is_empty()
    }

    /// Run `f` against a session, touching it afterwards.
    fn update<T>(&self, session_id: &str, f: impl FnOnce(&mut Session) -> T) -> Result<T> {
        let mut session = self
            .sessions
            .get_mut(session_id)
            .ok_or_else(|| Error::SessionNotFound(session_id.to_string()))?;
        let out = f(session.value_mut());
        session.touch();
        Ok(out)
    }
}

#[async_trait]
impl SessionStore for InMemorySessionStore {
    async fn create(&self, session_id: Option<&str>) -> Result<Session> {
        let id = session_id
            .map(str::to_string)
            .unwrap_or_else(|| Uuid::new_v4().to_string());

        let session = self
            .sessions
            .entry(id.clone())
            .or_insert_with(|| {
                tracing::debug!(session_id = %id, "Creating session");
                Session::new(id.clone())
            })
            .clone();
        Ok(session)
    }

    async fn get(&self, session_id: &str) -> Result<Option<Session>> {
        Ok(self.sessions.get(session_id).map(|r| r.clone()))
    }

    async fn append_element(&self, session_id: &str, element: PlacedElement) -> Result<()> {
        tracing::trace!(
            session_id = %session_id,
            element_id = %element.id,
            kind = %element.component_type,
            "Placing element"
        );
        self.update(session_id, |s| s.elements.push(element))
    }

    async fn replace_element(&self, session_id: &str, element: PlacedElement) -> Result<bool> {
        self.update(session_id, |s| {
            match s.elements.iter_mut().find(|e| e.id == element.id) {
                Some(slot) => {
                    *slot = element;
                    true
                }
                None => false,
            }
        })
    }

    async fn append_chat(&self, session_id: &str, entry: ChatEntry) -> Result<()> {
        self.update(session_id, |s| s.transcript.push(entry))
    }

    async fn clear(&self, session_id: &str) -> Result<()> {
        let removed = self.update(session_id, |s| {
            let n = s.elements.len();
            s.elements.clear();
            n
        })?;
        tracing::debug!(session_id = %session_id, removed, "Cleared canvas");
        Ok(())
    }

    async fn presentation_id(&self, session_id: &str) -> Result<Option<String>> {
        Ok(self
            .sessions
            .get(session_id)
            .and_then(|s| s.presentation_id.clone()))
    }

    async fn set_presentation_id(&self, session_id: &str, presentation_id: &str) -> Result<()> {
        self.update(session_id, |s| s.presentation_id = Some(presentation_id.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use slide_intent_core::types::{
        ComponentConfig, ComponentKind, GenerationRequest, GridPosition,
    };

    fn element(html: &str) -> PlacedElement {
        let request = GenerationRequest {
            component_type: ComponentKind::Metrics,
            count: 3,
            position: GridPosition {
                start_col: 2,
                start_row: 4,
                width: 30,
                height: 4,
            },
            grid_row: "4/8".into(),
            grid_column: "2/32".into(),
            content_prompt: "revenue KPIs".into(),
            config: ComponentConfig::default_for(ComponentKind::Metrics),
        };
        PlacedElement::from_generation(&request, html.to_string(), vec![])
    }

    #[tokio::test]
    async fn test_create_is_idempotent() {
        let store = InMemorySessionStore::new();
        let first = store.create(Some("s1")).await.unwrap();
        store.append_chat("s1", ChatEntry::user("hello")).await.unwrap();

        let again = store.create(Some("s1")).await.unwrap();
        assert_eq!(again.id, first.id);
        assert_eq!(again.transcript.len(), 1);
        assert_eq!(store.len(), 1);
    }

    #[tokio::test]
    async fn test_create_generates_id() {
        let store = InMemorySessionStore::new();
        let a = store.create(None).await.unwrap();
        let b = store.create(None).await.unwrap();
        assert_ne!(a.id, b.id);
        assert_eq!(store.len(), 2);
    }

    #[tokio::test]
    async fn test_clear_keeps_transcript() {
        let store = InMemorySessionStore::new();
        store.create(Some("s1")).await.unwrap();
        store.append_element("s1", element("<div/>")).await.unwrap();
        store.append_chat("s1", ChatEntry::user("add metrics")).await.unwrap();

        store.clear("s1").await.unwrap();

        let session = store.get("s1").await.unwrap().unwrap();
        assert!(session.elements.is_empty());
        assert_eq!(session.transcript.len(), 1);
    }

    #[tokio::test]
    async fn test_replace_element() {
        let store = InMemorySessionStore::new();
        store.create(Some("s1")).await.unwrap();
        let mut placed = element("<div>old</div>");
        store.append_element("s1", placed.clone()).await.unwrap();

        placed.html = "<div>new</div>".into();
        assert!(store.replace_element("s1", placed.clone()).await.unwrap());

        let session = store.get("s1").await.unwrap().unwrap();
        assert_eq!(session.elements.len(), 1);
        assert_eq!(session.elements[0].html, "<div>new</div>");

        assert!(!store.replace_element("s1", element("<p/>")).await.unwrap());
    }

    #[tokio::test]
    async fn test_unknown_session() {
        let store = InMemorySessionStore::new();
        assert!(store.get("missing").await.unwrap().is_none());
        assert!(store.presentation_id("missing").await.unwrap().is_none());
        assert!(matches!(
            store.append_chat("missing", ChatEntry::user("hi")).await,
            Err(Error::SessionNotFound(_))
        ));
    }

    #[tokio::test]
    async fn test_presentation_id() {
        let store = InMemorySessionStore::new();
        store.create(Some("s1")).await.unwrap();
        store.set_presentation_id("s1", "pres-1").await.unwrap();
        assert_eq!(store.presentation_id("s1").await.unwrap().as_deref(), Some("pres-1"));
    }
}
