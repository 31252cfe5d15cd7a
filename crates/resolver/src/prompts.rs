//! Prompt contracts for the two LLM calls.

use schemars::schema_for;

use slide_intent_core::types::ComponentKind;

use crate::inference::Inferable;

/// System instruction for the coarse intent call.
pub const INTENT_SYSTEM_PROMPT: &str = r#"You are an intent parser for a slide element builder.

Parse the user's message and extract:
- action: "add", "modify", "remove", "move", "clear" or "generate"
- component_type: one of "METRICS", "TABLE", "TEXT_BOX", "CHART", "IMAGE", or null when no element is named
- count: number of element instances, if stated
- content_prompt: the content description for generation
- position_hint: "below", "right", "center", etc., if stated

Component keywords:
- METRICS: metrics, kpis, stats, statistics, data points
- TABLE: table, data table, schedule, matrix
- TEXT_BOX: text box, bullets, steps, process, sections, comparison, callout, key points, list
- CHART: chart, graph, plot, visualization, pie, bar, line, scatter, radar, waterfall
- IMAGE: image, photo, picture, illustration, graphic, artwork

Structural numbers are not counts: "6 rows" or "4 columns" describe one table, and
"5 bullet points" describes the items inside one text box.

Respond with valid JSON only:
{
    "action": "add|modify|remove|move|clear|generate",
    "component_type": "METRICS|TABLE|TEXT_BOX|CHART|IMAGE|null",
    "count": <number or null>,
    "content_prompt": "<extracted content description>",
    "position_hint": "<position or null>",
    "confidence": <0.0-1.0>
}"#;

/// User turn for either call.
pub fn user_prompt(message: &str) -> String {
    format!("User message: {message}")
}

/// System instruction for specialized extraction of one kind.
///
/// Embeds the JSON schema of the kind's patch so field names and enum
/// values come from the same types the response is parsed into.
pub fn extraction_prompt<C: Inferable>() -> String {
    let schema = serde_json::to_string_pretty(&schema_for!(C::Patch)).unwrap_or_default();
    let (min, max) = C::KIND.spec().count_range;
    format!(
        "You extract {kind} parameters for a slide element builder.\n\n\
         Return ONE JSON object with the fields of this schema plus an optional integer \"count\" \
         ({min}-{max}) for the number of {kind} instances. Use null for anything the message does \
         not state. Never guess styling the user did not ask for.\n\n\
         Rules:\n{rules}\n\n\
         Schema:\n{schema}\n\n\
         Respond with valid JSON only.",
        kind = label(C::KIND),
        rules = C::EXTRACTION_RULES,
    )
}

fn label(kind: ComponentKind) -> &'static str {
    match kind {
        ComponentKind::Metrics => "metric card",
        ComponentKind::Table => "table",
        ComponentKind::TextBox => "text box",
        ComponentKind::Chart => "chart",
        ComponentKind::Image => "image",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use slide_intent_core::types::{TableConfig, TextBoxConfig};

    #[test]
    fn test_table_prompt_embeds_schema_and_rules() {
        let prompt = extraction_prompt::<TableConfig>();
        assert!(prompt.contains("\"rows\""));
        assert!(prompt.contains("header_color"));
        assert!(prompt.contains("never the table count"));
        assert!(prompt.contains("(1-2)"));
    }

    #[test]
    fn test_text_box_prompt_mentions_items_per_instance() {
        let prompt = extraction_prompt::<TextBoxConfig>();
        assert!(prompt.contains("items_per_instance"));
        assert!(prompt.contains("colored-bg"));
    }
}
