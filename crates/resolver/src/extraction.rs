//! LLM extraction adapter.
//!
//! Both calls are best-effort. Every failure (transport, timeout, malformed
//! JSON, unknown enumeration values) comes back as the `Err` arm of an
//! [`Attempt`] so the router can pick its fallback.

use serde::Deserialize;
use serde_json::{Map, Value};
use std::sync::Arc;
use std::time::Duration;

use slide_intent_core::{
    traits::{ChatMessage, LlmClient},
    types::{ActionKind, ComponentKind, ComponentSettings, Extraction, IntentGuess},
    Error, Result,
};

use crate::inference::Inferable;
use crate::prompts;

/// Confidence assumed when the LLM leaves it out.
const DEFAULT_LLM_CONFIDENCE: f64 = 0.9;

/// Outcome of one LLM call: the raw text, if any arrived, and the parse.
#[derive(Debug)]
pub struct Attempt<T> {
    pub raw: Option<String>,
    pub outcome: Result<T>,
}

impl<T> Attempt<T> {
    fn failed(raw: Option<String>, error: Error) -> Self {
        Self { raw, outcome: Err(error) }
    }
}

/// Runs the coarse intent and specialized extraction calls.
#[derive(Clone)]
pub struct LlmExtractor {
    client: Option<Arc<dyn LlmClient>>,
    timeout: Duration,
}

impl LlmExtractor {
    pub fn new(client: Arc<dyn LlmClient>, timeout: Duration) -> Self {
        Self { client: Some(client), timeout }
    }

    /// An extractor with no LLM behind it; every call fails immediately.
    pub fn disabled() -> Self {
        Self { client: None, timeout: Duration::ZERO }
    }

    pub fn is_enabled(&self) -> bool {
        self.client.is_some()
    }

    /// Coarse intent: action, kind, count and content prompt.
    pub async fn coarse_intent(&self, message: &str) -> Attempt<IntentGuess> {
        match self.call(prompts::INTENT_SYSTEM_PROMPT, message).await {
            Ok(raw) => {
                let outcome = parse_intent(&raw, message);
                Attempt { raw: Some(raw), outcome }
            }
            Err(e) => Attempt::failed(None, e),
        }
    }

    /// Specialized extraction for a fixed kind.
    pub async fn extract<C: Inferable>(&self, message: &str) -> Attempt<Extraction<C::Patch>> {
        let system = prompts::extraction_prompt::<C>();
        match self.call(&system, message).await {
            Ok(raw) => {
                let outcome = parse_extraction::<C>(&raw);
                Attempt { raw: Some(raw), outcome }
            }
            Err(e) => Attempt::failed(None, e),
        }
    }

    async fn call(&self, system: &str, message: &str) -> Result<String> {
        let Some(client) = &self.client else {
            return Err(Error::LlmDisabled("no LLM client configured".into()));
        };

        let messages = [
            ChatMessage::system(system),
            ChatMessage::user(prompts::user_prompt(message)),
        ];

        match tokio::time::timeout(self.timeout, client.chat(&messages)).await {
            Ok(Ok(response)) => {
                tracing::debug!(
                    content_length = response.content.len(),
                    total_tokens = response.usage.total_tokens,
                    "LLM responded"
                );
                Ok(response.content)
            }
            Ok(Err(e)) => Err(e),
            Err(_) => Err(Error::Timeout(format!(
                "LLM call exceeded {} ms",
                self.timeout.as_millis()
            ))),
        }
    }
}

// =============================================================================
// Response Parsing
// =============================================================================

/// The outermost `{...}` block of an LLM reply, tolerating prose and
/// Markdown fences around it.
pub fn extract_json_block(text: &str) -> Option<&str> {
    let start = text.find('{')?;
    let end = text.rfind('}')?;
    (start < end).then(|| &text[start..=end])
}

fn parse_object(raw: &str) -> Result<Map<String, Value>> {
    let block = extract_json_block(raw)
        .ok_or_else(|| Error::malformed("no JSON object in LLM response"))?;
    match serde_json::from_str::<Value>(block) {
        Ok(Value::Object(map)) => Ok(map),
        Ok(other) => Err(Error::malformed(format!("expected a JSON object, got {other}"))),
        Err(e) => Err(Error::malformed(e.to_string())),
    }
}

/// A positive integer count, or nothing. Whole floats (`2.0`) and numeric
/// strings (`"2"`) are accepted.
fn count_from(value: Option<&Value>) -> Option<u32> {
    let n = match value? {
        Value::Number(n) => n.as_u64().or_else(|| n.as_f64().and_then(whole)),
        Value::String(s) => {
            let s = s.trim();
            s.parse::<u64>().ok().or_else(|| s.parse::<f64>().ok().and_then(whole))
        }
        _ => None,
    }?;
    u32::try_from(n).ok().filter(|n| *n >= 1)
}

fn whole(f: f64) -> Option<u64> {
    (f.is_finite() && f.fract() == 0.0 && f >= 0.0 && f <= u32::MAX as f64).then_some(f as u64)
}

#[derive(Deserialize)]
struct IntentWire {
    #[serde(default)]
    action: Option<String>,
    #[serde(default)]
    component_type: Option<String>,
    #[serde(default)]
    content_prompt: Option<String>,
    #[serde(default)]
    position_hint: Option<String>,
    #[serde(default)]
    confidence: Option<f64>,
}

/// Validate a coarse intent reply. A missing action means ADD; a null
/// component is a legitimate "no component".
pub fn parse_intent(raw: &str, message: &str) -> Result<IntentGuess> {
    let map = parse_object(raw)?;
    let count = count_from(map.get("count"));
    let wire: IntentWire = serde_json::from_value(Value::Object(map))
        .map_err(|e| Error::malformed(e.to_string()))?;

    let action = match wire.action.as_deref() {
        None => ActionKind::Add,
        Some(action) => action.parse()?,
    };
    let component_type = match wire.component_type.as_deref().map(str::trim) {
        None | Some("") => None,
        Some(s) if s.eq_ignore_ascii_case("null") => None,
        Some(s) => Some(s.parse::<ComponentKind>()?),
    };

    Ok(IntentGuess {
        action,
        component_type,
        count,
        content_prompt: wire
            .content_prompt
            .filter(|p| !p.trim().is_empty())
            .unwrap_or_else(|| message.to_string()),
        position_hint: wire.position_hint.filter(|h| !h.trim().is_empty()),
        confidence: wire.confidence.unwrap_or(DEFAULT_LLM_CONFIDENCE).clamp(0.0, 1.0),
    })
}

/// Validate a specialized extraction reply into a sanitized patch and an
/// optional count.
pub fn parse_extraction<C: ComponentSettings>(raw: &str) -> Result<Extraction<C::Patch>> {
    let mut map = parse_object(raw)?;
    let count = count_from(map.remove("count").as_ref());
    let mut patch: C::Patch = serde_json::from_value(Value::Object(map))
        .map_err(|e| Error::malformed(format!("{} parameters: {e}", C::KIND)))?;
    C::sanitize(&mut patch);
    Ok(Extraction { patch, count })
}

#[cfg(test)]
mod tests {
    use super::*;
    use slide_intent_core::types::{ChartConfig, ChartType, TableConfig, TextBoxConfig};

    #[test]
    fn test_json_block_recovery() {
        assert_eq!(extract_json_block("```json\n{\"a\": 1}\n```"), Some("{\"a\": 1}"));
        assert_eq!(extract_json_block("Sure! {\"a\": {\"b\": 2}} hope that helps"), Some("{\"a\": {\"b\": 2}}"));
        assert_eq!(extract_json_block("no json here"), None);
        assert_eq!(extract_json_block("} backwards {"), None);
    }

    #[test]
    fn test_parse_intent_full() {
        let raw = r#"{"action": "add", "component_type": "TABLE", "count": 2,
                      "content_prompt": "quarterly sales", "position_hint": "below", "confidence": 0.95}"#;
        let guess = parse_intent(raw, "msg").unwrap();
        assert_eq!(guess.action, ActionKind::Add);
        assert_eq!(guess.component_type, Some(ComponentKind::Table));
        assert_eq!(guess.count, Some(2));
        assert_eq!(guess.content_prompt, "quarterly sales");
        assert_eq!(guess.position_hint.as_deref(), Some("below"));
    }

    #[test]
    fn test_parse_intent_defaults() {
        let guess = parse_intent(r#"{"component_type": null}"#, "add something").unwrap();
        assert_eq!(guess.action, ActionKind::Add);
        assert_eq!(guess.component_type, None);
        assert_eq!(guess.content_prompt, "add something");
        assert_eq!(guess.confidence, DEFAULT_LLM_CONFIDENCE);
    }

    #[test]
    fn test_parse_intent_rejects_unknown_values() {
        assert!(matches!(
            parse_intent(r#"{"action": "add", "component_type": "SEQUENTIAL"}"#, "m"),
            Err(Error::UnknownComponent(_))
        ));
        assert!(matches!(
            parse_intent(r#"{"action": "explode", "component_type": "TABLE"}"#, "m"),
            Err(Error::UnknownAction(_))
        ));
        assert!(matches!(parse_intent("not json", "m"), Err(Error::MalformedResponse(_))));
    }

    #[test]
    fn test_parse_intent_ignores_bad_count() {
        let guess = parse_intent(r#"{"component_type": "METRICS", "count": -3}"#, "m").unwrap();
        assert_eq!(guess.count, None);
    }

    #[test]
    fn test_count_accepts_whole_floats_and_numeric_strings() {
        let guess = parse_intent(r#"{"component_type": "METRICS", "count": 2.0}"#, "m").unwrap();
        assert_eq!(guess.count, Some(2));
        let guess = parse_intent(r#"{"component_type": "METRICS", "count": " 3 "}"#, "m").unwrap();
        assert_eq!(guess.count, Some(3));
        let extraction = parse_extraction::<ChartConfig>(r#"{"count": "4.0"}"#).unwrap();
        assert_eq!(extraction.count, Some(4));

        for bad in [r#""2.5""#, "2.5", r#""two""#, "0", r#""-1""#, "true"] {
            let raw = format!(r#"{{"component_type": "METRICS", "count": {bad}}}"#);
            assert_eq!(parse_intent(&raw, "m").unwrap().count, None, "{bad}");
        }
    }

    #[test]
    fn test_parse_table_extraction() {
        let raw = r#"{"rows": 6, "columns": 40, "header_color": "blue", "count": null, "corners": null}"#;
        let extraction = parse_extraction::<TableConfig>(raw).unwrap();
        assert_eq!(extraction.count, None);
        assert_eq!(extraction.patch.rows, Some(6));
        assert_eq!(extraction.patch.columns, Some(8));
        assert!(extraction.patch.corners.is_none());
    }

    #[test]
    fn test_parse_extraction_with_count() {
        let raw = r#"Here you go: {"chart_type": "bar_stacked", "include_insights": true, "count": 2}"#;
        let extraction = parse_extraction::<ChartConfig>(raw).unwrap();
        assert_eq!(extraction.count, Some(2));
        assert_eq!(extraction.patch.chart_type, Some(ChartType::BarStacked));
    }

    #[test]
    fn test_parse_extraction_unknown_enum_fails() {
        let raw = r#"{"list_style": "roman_numerals"}"#;
        assert!(matches!(
            parse_extraction::<TextBoxConfig>(raw),
            Err(Error::MalformedResponse(_))
        ));
    }

    #[tokio::test]
    async fn test_disabled_extractor_fails_fast() {
        let extractor = LlmExtractor::disabled();
        let attempt = extractor.coarse_intent("add a table").await;
        assert!(attempt.raw.is_none());
        assert!(matches!(attempt.outcome, Err(Error::LlmDisabled(_))));
    }
}
