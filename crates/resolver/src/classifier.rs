//! Rule-based intent classifier, the fallback when the coarse LLM call fails.

use regex::Regex;
use std::collections::HashSet;
use std::sync::LazyLock;

use slide_intent_core::types::{ActionKind, ComponentConfig, ComponentKind, IntentGuess};

use crate::inference::{self, any_of};

/// Confidence of a keyword classification.
pub const RULE_BASED_CONFIDENCE: f64 = 0.8;

static WORD_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\b\w+\b").expect("valid regex"));

/// A number followed by one of these describes structure, not instances.
const STRUCTURAL_UNITS: &[&str] = &[
    "rows", "row", "columns", "column", "cols", "col",
    "bullets", "bullet", "points", "point", "items", "item",
    "chars", "characters",
];

/// A number followed by one of these is the instance count.
const COUNT_UNITS: &[&str] = &[
    "tables", "table",
    "boxes", "box", "sections", "section",
    "metrics", "metric", "kpis", "kpi",
    "charts", "chart",
    "images", "image", "photos", "photo",
];

/// Keyword classification plus the configuration inferred for its kind.
#[derive(Debug, Clone, PartialEq)]
pub struct Classification {
    pub guess: IntentGuess,
    pub config: ComponentConfig,
}

/// Classify a raw message by keywords. Always resolves a kind; anything
/// unrecognized is a text box.
pub fn classify(message: &str) -> Classification {
    let lower = message.to_lowercase();
    let action = classify_action(&lower);
    let kind = classify_kind(&lower);
    let count = extract_count(&lower, kind);

    tracing::debug!(
        action = %action,
        kind = %kind,
        count = ?count,
        "Rule-based classification"
    );

    Classification {
        guess: IntentGuess {
            action,
            component_type: Some(kind),
            count,
            content_prompt: message.to_string(),
            position_hint: None,
            confidence: RULE_BASED_CONFIDENCE,
        },
        config: inference::infer(kind, &lower),
    }
}

/// Action from whole-word tokens, so "placeholder" never reads as "place".
pub fn classify_action(lower: &str) -> ActionKind {
    let words: HashSet<&str> = WORD_RE.find_iter(lower).map(|m| m.as_str()).collect();
    let has_any = |candidates: &[&str]| candidates.iter().any(|w| words.contains(w));

    if has_any(&["remove", "delete", "clear"]) {
        if words.contains("clear") {
            ActionKind::Clear
        } else {
            ActionKind::Remove
        }
    } else if has_any(&["move", "position", "reposition"]) {
        ActionKind::Move
    } else if has_any(&["change", "modify", "update", "edit"]) {
        ActionKind::Modify
    } else if has_any(&["generate", "fill"])
        || lower.contains("create content")
        || lower.contains("write content")
    {
        ActionKind::Generate
    } else {
        ActionKind::Add
    }
}

/// Kind by keyword priority: metrics, explicit text box, table, chart,
/// image, then text box.
pub fn classify_kind(lower: &str) -> ComponentKind {
    if ComponentKind::Metrics.matches_keywords(lower) {
        ComponentKind::Metrics
    } else if any_of(lower, &["text box", "text_box", "textbox"]) {
        ComponentKind::TextBox
    } else if ComponentKind::Table.matches_keywords(lower) {
        if any_of(lower, &["grid layout", "grid arrangement"]) {
            ComponentKind::TextBox
        } else {
            ComponentKind::Table
        }
    } else if ComponentKind::Chart.matches_keywords(lower) {
        ComponentKind::Chart
    } else if ComponentKind::Image.matches_keywords(lower) {
        ComponentKind::Image
    } else {
        ComponentKind::TextBox
    }
}

/// Instance count from whitespace-split words.
///
/// A number before a structural unit is skipped; before a count unit it is
/// the count. Any other number up to six counts only for kinds whose
/// numbers are not usually structural.
pub fn extract_count(lower: &str, kind: ComponentKind) -> Option<u32> {
    let words: Vec<&str> = lower.split_whitespace().collect();

    for (i, word) in words.iter().enumerate() {
        let Some(value) = small_number(word) else {
            continue;
        };
        let next = words.get(i + 1).copied().unwrap_or("");

        if STRUCTURAL_UNITS.contains(&next) {
            continue;
        }
        if COUNT_UNITS.contains(&next) {
            return Some(value);
        }
        if value <= 6 && !matches!(kind, ComponentKind::Table | ComponentKind::TextBox) {
            return Some(value);
        }
    }
    None
}

/// Digits or one..six.
fn small_number(word: &str) -> Option<u32> {
    if !word.is_empty() && word.bytes().all(|b| b.is_ascii_digit()) {
        return word.parse().ok();
    }
    match word {
        "one" => Some(1),
        "two" => Some(2),
        "three" => Some(3),
        "four" => Some(4),
        "five" => Some(5),
        "six" => Some(6),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use slide_intent_core::types::ListStyle;

    #[test]
    fn test_six_rows_table() {
        let c = classify("add 6 rows table");
        assert_eq!(c.guess.component_type, Some(ComponentKind::Table));
        assert_eq!(c.guess.count, None);
        match c.config {
            ComponentConfig::Table(t) => assert_eq!(t.rows, Some(6)),
            other => panic!("expected table config, got {other:?}"),
        }
    }

    #[test]
    fn test_three_metrics() {
        let c = classify("add 3 metrics");
        assert_eq!(c.guess.component_type, Some(ComponentKind::Metrics));
        assert_eq!(c.guess.count, Some(3));
        assert_eq!(c.guess.confidence, RULE_BASED_CONFIDENCE);
    }

    #[test]
    fn test_grid_layout_overrides_table() {
        let c = classify("numbered steps with grid layout");
        assert_eq!(c.guess.component_type, Some(ComponentKind::TextBox));
        match c.config {
            ComponentConfig::TextBox(t) => assert_eq!(t.list_style, ListStyle::Numbers),
            other => panic!("expected text box config, got {other:?}"),
        }
    }

    #[test]
    fn test_action_words() {
        assert_eq!(classify_action("clear the slide"), ActionKind::Clear);
        assert_eq!(classify_action("delete and clear"), ActionKind::Clear);
        assert_eq!(classify_action("remove the chart"), ActionKind::Remove);
        assert_eq!(classify_action("move it right"), ActionKind::Move);
        assert_eq!(classify_action("edit the title"), ActionKind::Modify);
        assert_eq!(classify_action("fill with content"), ActionKind::Generate);
        assert_eq!(classify_action("please write content now"), ActionKind::Generate);
        assert_eq!(classify_action("add placeholder boxes"), ActionKind::Add);
    }

    #[test]
    fn test_kind_priority() {
        // "stats" outranks "table".
        assert_eq!(classify_kind("table of stats"), ComponentKind::Metrics);
        assert_eq!(classify_kind("a textbox with a table"), ComponentKind::TextBox);
        assert_eq!(classify_kind("bar chart photo"), ComponentKind::Chart);
        assert_eq!(classify_kind("a photo of the team"), ComponentKind::Image);
        assert_eq!(classify_kind("hello"), ComponentKind::TextBox);
    }

    #[test]
    fn test_count_units() {
        assert_eq!(extract_count("add 2 tables with 5 rows", ComponentKind::Table), Some(2));
        assert_eq!(extract_count("three boxes", ComponentKind::TextBox), Some(3));
        assert_eq!(extract_count("bordered box with 5 bullet points", ComponentKind::TextBox), None);
        assert_eq!(extract_count("4 columns", ComponentKind::Chart), None);
        assert_eq!(extract_count("add 2 pie", ComponentKind::Chart), Some(2));
        assert_eq!(extract_count("add 9 pie", ComponentKind::Chart), None);
        assert_eq!(extract_count("add 3 things", ComponentKind::TextBox), None);
    }

    #[test]
    fn test_content_prompt_keeps_original_case() {
        let c = classify("Add Revenue KPIs");
        assert_eq!(c.guess.content_prompt, "Add Revenue KPIs");
    }
}
