use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use crate::error::Result;
use crate::types::GenerationRequest;

/// Rendered markup returned by a generation backend.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RenderedElement {
    pub html: String,
    /// Presentation the element was rendered into, if the backend created one.
    pub presentation_id: Option<String>,
    #[serde(default)]
    pub variants_used: Vec<String>,
}

/// Opaque rendering service for one component kind or all of them.
#[async_trait]
pub trait GenerationBackend: Send + Sync {
    async fn generate(&self, request: &GenerationRequest) -> Result<RenderedElement>;
}
