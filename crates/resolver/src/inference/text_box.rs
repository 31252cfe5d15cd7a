use regex::Regex;
use std::sync::LazyLock;

use slide_intent_core::types::{
    Arrangement, Background, ColorScheme, ColorVariant, Corners, ListStyle, ThemeMode,
    TextBoxConfig, TitleStyle,
};

use super::{any_of, char_range, first_color, number_value, Inferable};

static TITLE_CHARS_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"title\s+(\d+)-(\d+)\s+chars?").expect("valid regex"));
static ITEM_CHARS_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"items?\s+(\d+)-(\d+)\s+chars?").expect("valid regex"));
static GRID_COLS_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(\d+)\s*columns?").expect("valid regex"));
static ITEMS_PER_BOX_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"\b(\d+|one|two|three|four|five|six|seven|eight|nine|ten)\s+(?:bullet\s+points?|bullets?|points?|items?)\b",
    )
    .expect("valid regex")
});

// Eight box colors; yellow and indigo are table-only accents.
const BOX_COLORS: &[(&str, ColorVariant)] = &[
    ("purple", ColorVariant::Purple),
    ("blue", ColorVariant::Blue),
    ("red", ColorVariant::Red),
    ("green", ColorVariant::Green),
    ("cyan", ColorVariant::Cyan),
    ("orange", ColorVariant::Orange),
    ("pink", ColorVariant::Pink),
    ("teal", ColorVariant::Teal),
];

/// Infer text box styling from a lowercased message.
pub fn infer_text_box(message: &str) -> TextBoxConfig {
    let mut config = TextBoxConfig::default();

    config.list_style = if any_of(message, &["numbered", "ordered", "steps", "process", "phases"]) {
        ListStyle::Numbers
    } else if any_of(message, &["plain text", "paragraph", "no bullets", "no list"]) {
        ListStyle::None
    } else {
        ListStyle::Bullets
    };

    if any_of(message, &["transparent", "no background", "plain", "simple"]) {
        config.background = Background::Transparent;
    }
    config.border = any_of(message, &["bordered", "box", "boxed", "framed"]);
    if any_of(message, &["square", "sharp", "angular"]) {
        config.corners = Corners::Square;
    }

    if any_of(message, &["bold title", "highlighted", "emphasized"]) {
        config.title_style = TitleStyle::Highlighted;
    } else if any_of(message, &["badge", "tagged", "labeled"]) {
        config.title_style = TitleStyle::ColoredBg;
    } else if any_of(message, &["neutral title", "neutral style", "muted title"]) {
        config.title_style = TitleStyle::Neutral;
    } else if any_of(message, &["no title", "without title", "titleless"]) {
        config.show_title = false;
    }

    if any_of(message, &["solid color", "flat"]) {
        config.color_scheme = ColorScheme::Solid;
    } else if any_of(message, &["gradient", "colorful", "vibrant"]) {
        config.color_scheme = ColorScheme::Gradient;
    }

    // Vertical wins: "2 column" contains "column".
    if any_of(message, &["vertical", "vertically", "stacked", "stack", "top to bottom", "column"]) {
        config.layout = Arrangement::Vertical;
    } else if any_of(message, &["grid", "2x2", "2 column", "two column"]) {
        config.layout = Arrangement::Grid;
    }

    config.placeholder_mode =
        any_of(message, &["lorem ipsum", "placeholder", "dummy content", "sample text"]);

    if let Some((min, max)) = char_range(TITLE_CHARS_RE.captures(message)) {
        config.title_min_chars = min;
        config.title_max_chars = max;
    }
    if let Some((min, max)) = char_range(ITEM_CHARS_RE.captures(message)) {
        config.item_min_chars = min;
        config.item_max_chars = max;
    }

    if any_of(message, &["dark mode", "dark theme", "dark text"]) {
        config.theme_mode = ThemeMode::Dark;
    }

    config.color_variant = first_color(message, BOX_COLORS);

    if config.layout == Arrangement::Grid {
        config.grid_cols = GRID_COLS_RE
            .captures(message)
            .and_then(|caps| caps[1].parse::<u32>().ok())
            .filter(|cols| (1..=6).contains(cols));
    }

    config.items_per_instance = ITEMS_PER_BOX_RE
        .captures(message)
        .and_then(|caps| number_value(&caps[1]))
        .map(|n| n.clamp(1, 7));

    config
}

impl Inferable for TextBoxConfig {
    fn infer(message: &str) -> Self {
        infer_text_box(message)
    }

    const EXTRACTION_RULES: &'static str = "\
- \"5 bullet points\", \"4 items\", \"3 points each\" describe items_per_instance, the items INSIDE each box. They are never the box count.
- count is the number of boxes, only when stated as boxes, sections or columns of boxes (\"3 boxes\", \"two sections\").
- numbered, steps, process or phases mean list_style \"numbers\"; plain text or paragraphs mean \"none\".
- bordered, boxed or framed mean border true.
- \"grid\" or \"2x2\" mean layout \"grid\"; stacked or top to bottom mean \"vertical\".
- \"title 30-50 chars\" sets title_min_chars and title_max_chars; \"items 60-120 chars\" sets item_min_chars and item_max_chars.
- lorem ipsum, placeholder or dummy content mean placeholder_mode true.";
}
