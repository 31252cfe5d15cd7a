//! Keyword-driven configuration inference.
//!
//! Every inferencer is a pure, total function of the lowercased message. It
//! returns a complete configuration: fields nothing in the message speaks to
//! keep their schema default.

mod chart;
mod image;
mod metrics;
mod table;
mod text_box;

pub use chart::infer_chart;
pub use image::infer_image;
pub use metrics::infer_metrics;
pub use table::infer_table;
pub use text_box::infer_text_box;

use regex::Captures;

use slide_intent_core::types::{
    ChartConfig, ColorVariant, ComponentConfig, ComponentKind, ComponentSettings, ImageConfig,
    MetricsConfig, TableConfig, TextBoxConfig,
};

/// A configuration type with a keyword inferencer and LLM extraction rules.
pub trait Inferable: ComponentSettings {
    /// Derive a complete configuration from a lowercased message.
    fn infer(message: &str) -> Self;

    /// Kind-specific guidance for the specialized extraction prompt.
    const EXTRACTION_RULES: &'static str;
}

/// Infer the configuration for any kind.
pub fn infer(kind: ComponentKind, message: &str) -> ComponentConfig {
    let lower = message.to_lowercase();
    match kind {
        ComponentKind::Metrics => MetricsConfig::infer(&lower).into_config(),
        ComponentKind::Table => TableConfig::infer(&lower).into_config(),
        ComponentKind::TextBox => TextBoxConfig::infer(&lower).into_config(),
        ComponentKind::Chart => ChartConfig::infer(&lower).into_config(),
        ComponentKind::Image => ImageConfig::infer(&lower).into_config(),
    }
}

// =============================================================================
// Shared Matching Helpers
// =============================================================================

/// Whether any keyword occurs as a substring.
pub(crate) fn any_of(message: &str, keywords: &[&str]) -> bool {
    keywords.iter().any(|kw| message.contains(kw))
}

/// Digits or an English number word up to ten.
pub(crate) fn number_value(word: &str) -> Option<u32> {
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
        "seven" => Some(7),
        "eight" => Some(8),
        "nine" => Some(9),
        "ten" => Some(10),
        _ => None,
    }
}

/// Read a `N-M` char range out of a capture, keeping it only when it is a
/// valid limit pair.
pub(crate) fn char_range(caps: Option<Captures<'_>>) -> Option<(u32, u32)> {
    let caps = caps?;
    let min: u32 = caps.get(1)?.as_str().parse().ok()?;
    let max: u32 = caps.get(2)?.as_str().parse().ok()?;
    let valid = (5..=500).contains(&min) && (5..=500).contains(&max) && min <= max;
    valid.then_some((min, max))
}

/// First color named in the message, checked in table order.
pub(crate) fn first_color(message: &str, table: &[(&str, ColorVariant)]) -> Option<ColorVariant> {
    table
        .iter()
        .find(|(keyword, _)| message.contains(keyword))
        .map(|(_, color)| *color)
}

/// Ten renderer colors in detection order.
pub(crate) const TEN_COLORS: &[(&str, ColorVariant)] = &[
    ("purple", ColorVariant::Purple),
    ("blue", ColorVariant::Blue),
    ("red", ColorVariant::Red),
    ("green", ColorVariant::Green),
    ("cyan", ColorVariant::Cyan),
    ("orange", ColorVariant::Orange),
    ("pink", ColorVariant::Pink),
    ("teal", ColorVariant::Teal),
    ("yellow", ColorVariant::Yellow),
    ("indigo", ColorVariant::Indigo),
];
