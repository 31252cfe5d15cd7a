use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::types::{ComponentConfig, ComponentKind, GenerationRequest, GridPosition};

// =============================================================================
// Session & Canvas Types
// =============================================================================

/// One chat session: the elements placed on its slide plus the transcript.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Session {
    /// Unique session ID.
    pub id: String,

    /// Elements on the canvas, in placement order.
    pub elements: Vec<PlacedElement>,

    /// Chat transcript.
    pub transcript: Vec<ChatEntry>,

    /// Presentation the slide is rendered into, once one exists.
    pub presentation_id: Option<String>,

    /// Creation timestamp.
    pub created_at: i64,

    /// Last updated timestamp.
    pub updated_at: i64,
}

impl Session {
    pub fn new(id: impl Into<String>) -> Self {
        let now = chrono::Utc::now().timestamp();
        Self {
            id: id.into(),
            elements: Vec::new(),
            transcript: Vec::new(),
            presentation_id: None,
            created_at: now,
            updated_at: now,
        }
    }

    pub fn touch(&mut self) {
        self.updated_at = chrono::Utc::now().timestamp();
    }
}

/// An element rendered onto the canvas.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlacedElement {
    pub id: String,
    pub component_type: ComponentKind,
    pub position: GridPosition,
    pub html: String,
    /// Prompt the element was generated from; reused on regeneration.
    pub original_prompt: String,
    pub count: u32,
    pub config: ComponentConfig,
    pub variants_used: Vec<String>,
    pub created_at: i64,
    pub updated_at: Option<i64>,
}

impl PlacedElement {
    /// Record the result of a generation call.
    pub fn from_generation(request: &GenerationRequest, html: String, variants_used: Vec<String>) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            component_type: request.component_type,
            position: request.position,
            html,
            original_prompt: request.content_prompt.clone(),
            count: request.count,
            config: request.config.clone(),
            variants_used,
            created_at: chrono::Utc::now().timestamp(),
            updated_at: None,
        }
    }

    /// Generation request that reproduces this element.
    pub fn regeneration_request(&self) -> GenerationRequest {
        GenerationRequest {
            component_type: self.component_type,
            count: self.count,
            position: self.position,
            grid_row: self.position.grid_row(),
            grid_column: self.position.grid_column(),
            content_prompt: self.original_prompt.clone(),
            config: self.config.clone(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChatRole {
    User,
    Assistant,
}

/// Entry in the chat transcript.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChatEntry {
    pub role: ChatRole,
    pub content: String,
    #[serde(default)]
    pub suggestions: Vec<String>,
    pub timestamp: i64,
}

impl ChatEntry {
    pub fn user(content: impl Into<String>) -> Self {
        Self::new(ChatRole::User, content.into(), Vec::new())
    }

    pub fn assistant(content: impl Into<String>, suggestions: Vec<String>) -> Self {
        Self::new(ChatRole::Assistant, content.into(), suggestions)
    }

    fn new(role: ChatRole, content: String, suggestions: Vec<String>) -> Self {
        Self {
            role,
            content,
            suggestions,
            timestamp: chrono::Utc::now().timestamp(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{Intent, MetricsConfig};

    #[test]
    fn test_regeneration_request_matches_original() {
        let intent = Intent::add(ComponentConfig::Metrics(MetricsConfig::default()), "revenue")
            .with_count(Some(3));
        let request = GenerationRequest::plan(&intent, None).unwrap();
        let element = PlacedElement::from_generation(&request, "<div/>".into(), vec![]);
        assert_eq!(element.regeneration_request(), request);
    }
}
