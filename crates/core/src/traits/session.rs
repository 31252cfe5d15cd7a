use async_trait::async_trait;
use crate::error::Result;
use crate::types::{ChatEntry, PlacedElement, Session};

/// Session store for canvas state and transcripts. Last write wins per session.
#[async_trait]
pub trait SessionStore: Send + Sync {
    /// Create a session, generating an id when none is given. Creating an
    /// existing id returns the existing session untouched.
    async fn create(&self, session_id: Option<&str>) -> Result<Session>;

    /// Load a session by ID.
    async fn get(&self, session_id: &str) -> Result<Option<Session>>;

    /// Place an element on the session's canvas.
    async fn append_element(&self, session_id: &str, element: PlacedElement) -> Result<()>;

    /// Replace the element with the same id. Returns false if there is none.
    async fn replace_element(&self, session_id: &str, element: PlacedElement) -> Result<bool>;

    /// Append to the chat transcript.
    async fn append_chat(&self, session_id: &str, entry: ChatEntry) -> Result<()>;

    /// Remove every element. The transcript is kept.
    async fn clear(&self, session_id: &str) -> Result<()>;

    async fn presentation_id(&self, session_id: &str) -> Result<Option<String>>;

    async fn set_presentation_id(&self, session_id: &str, presentation_id: &str) -> Result<()>;
}
