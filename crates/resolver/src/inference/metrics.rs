use slide_intent_core::types::{Alignment, Arrangement, ColorScheme, Corners, MetricsConfig};

use super::{any_of, first_color, Inferable, TEN_COLORS};

/// Infer metric card styling from a lowercased message.
pub fn infer_metrics(message: &str) -> MetricsConfig {
    let mut config = MetricsConfig::default();

    if any_of(message, &["square", "sharp", "angular", "square corners"]) {
        config.corners = Corners::Square;
    }
    config.border = any_of(message, &["bordered", "with border", "border"]);

    if any_of(message, &["left-aligned", "left aligned", "align left"]) {
        config.alignment = Alignment::Left;
    } else if any_of(message, &["right-aligned", "right aligned", "align right"]) {
        config.alignment = Alignment::Right;
    }

    if any_of(message, &["solid color", "solid", "flat"]) {
        config.color_scheme = ColorScheme::Solid;
    } else if any_of(message, &["pastel", "accent", "light colors"]) {
        config.color_scheme = ColorScheme::Accent;
    }

    if any_of(message, &["vertical", "stacked", "column"]) {
        config.layout = Arrangement::Vertical;
    } else if any_of(message, &["grid", "2x2"]) {
        config.layout = Arrangement::Grid;
    }

    config.color_variant = first_color(message, TEN_COLORS);

    config
}

impl Inferable for MetricsConfig {
    fn infer(message: &str) -> Self {
        infer_metrics(message)
    }

    const EXTRACTION_RULES: &'static str = "\
- \"3 metrics\", \"four KPIs\" or \"2 stats\" set count, the number of metric cards (1-4).
- solid or flat mean color_scheme \"solid\"; pastel or light colors mean \"accent\".
- stacked or vertical mean layout \"vertical\"; grid or 2x2 mean \"grid\".
- a named color sets color_variant.";
}

#[cfg(test)]
mod tests {
    use super::*;
    use slide_intent_core::types::ColorVariant;

    #[test]
    fn test_defaults() {
        assert_eq!(infer_metrics("add 3 metrics"), MetricsConfig::default());
    }

    #[test]
    fn test_styling() {
        let config = infer_metrics("4 kpis in a 2x2 grid, square, bordered, pastel, align left");
        assert_eq!(config.layout, Arrangement::Grid);
        assert_eq!(config.corners, Corners::Square);
        assert!(config.border);
        assert_eq!(config.color_scheme, ColorScheme::Accent);
        assert_eq!(config.alignment, Alignment::Left);
    }

    #[test]
    fn test_solid_wins_over_pastel() {
        let config = infer_metrics("solid pastel cards stacked");
        assert_eq!(config.color_scheme, ColorScheme::Solid);
        assert_eq!(config.layout, Arrangement::Vertical);
    }

    #[test]
    fn test_color_variant() {
        assert_eq!(infer_metrics("indigo metrics").color_variant, Some(ColorVariant::Indigo));
        assert_eq!(infer_metrics("teal and green kpis").color_variant, Some(ColorVariant::Green));
    }
}
