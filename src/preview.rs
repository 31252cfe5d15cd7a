//! Local preview backend: renders placeholder markup instead of calling a
//! remote generation service.

use async_trait::async_trait;

use slide_intent_core::{
    traits::{GenerationBackend, RenderedElement},
    types::{ComponentConfig, GenerationRequest},
    Result,
};

pub const PREVIEW_PRESENTATION_ID: &str = "local-preview";

#[derive(Debug, Default)]
pub struct PreviewBackend;

impl PreviewBackend {
    fn variant(config: &ComponentConfig) -> String {
        match config {
            ComponentConfig::Metrics(c) => format!("metrics-{:?}", c.color_scheme).to_lowercase(),
            ComponentConfig::Table(c) => format!("table-{:?}", c.layout).to_lowercase(),
            ComponentConfig::TextBox(c) => format!("text-box-{:?}", c.layout).to_lowercase(),
            ComponentConfig::Chart(c) => format!("chart-{}", c.chart_type.display_name()).to_lowercase(),
            ComponentConfig::Image(c) => format!("image-{:?}", c.style).to_lowercase(),
        }
    }
}

#[async_trait]
impl GenerationBackend for PreviewBackend {
    async fn generate(&self, request: &GenerationRequest) -> Result<RenderedElement> {
        let variant = Self::variant(&request.config);
        let placeholder = request.config.placeholder_mode();

        let items: String = (1..=request.count)
            .map(|i| format!("<div class=\"instance\" data-index=\"{i}\"></div>"))
            .collect();
        let html = format!(
            "<section class=\"{variant}\" data-kind=\"{kind}\" data-placeholder=\"{placeholder}\" \
             style=\"grid-row: {row}; grid-column: {col};\" title=\"{prompt}\">{items}</section>",
            kind = request.component_type,
            row = request.grid_row,
            col = request.grid_column,
            prompt = request.content_prompt.replace('"', "&quot;"),
        );

        tracing::debug!(
            kind = %request.component_type,
            count = request.count,
            grid_row = %request.grid_row,
            grid_column = %request.grid_column,
            "Rendered preview element"
        );

        Ok(RenderedElement {
            html,
            presentation_id: Some(PREVIEW_PRESENTATION_ID.to_string()),
            variants_used: vec![variant],
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use slide_intent_core::types::{ComponentKind, Intent};

    #[tokio::test]
    async fn test_preview_renders_every_instance() {
        let intent = Intent::add(ComponentConfig::default_for(ComponentKind::Metrics), "KPIs")
            .with_count(Some(3));
        let request = GenerationRequest::plan(&intent, None).unwrap();

        let rendered = PreviewBackend.generate(&request).await.unwrap();
        assert_eq!(rendered.html.matches("class=\"instance\"").count(), 3);
        assert!(rendered.html.contains(&format!("grid-column: {}", request.grid_column)));
        assert_eq!(rendered.presentation_id.as_deref(), Some(PREVIEW_PRESENTATION_ID));
        assert_eq!(rendered.variants_used.len(), 1);
    }
}
