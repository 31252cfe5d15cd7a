use regex::Regex;
use std::sync::LazyLock;

use slide_intent_core::types::{
    clamp_columns, clamp_rows, Alignment, BorderStyle, ColorVariant, Corners, HeaderStyle,
    TableConfig, TableLayout,
};

use super::{any_of, char_range, first_color, number_value, Inferable};

static ROWS_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(\d+|one|two|three|four|five|six|seven|eight|nine|ten)\s+(?:data\s+)?rows?")
        .expect("valid regex")
});
static COLUMNS_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(\d+|one|two|three|four|five|six|seven|eight)\s+columns?").expect("valid regex")
});
static HEADER_CHARS_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"header\s+(\d+)-(\d+)\s*chars?").expect("valid regex"));
static CELL_CHARS_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"cell\s+(\d+)-(\d+)\s*chars?").expect("valid regex"));

// Aliases sit right after their canonical color; order decides ties.
const HEADER_COLORS: &[(&str, ColorVariant)] = &[
    ("purple", ColorVariant::Purple),
    ("violet", ColorVariant::Purple),
    ("blue", ColorVariant::Blue),
    ("azure", ColorVariant::Blue),
    ("green", ColorVariant::Green),
    ("emerald", ColorVariant::Green),
    ("red", ColorVariant::Red),
    ("crimson", ColorVariant::Red),
    ("cyan", ColorVariant::Cyan),
    ("aqua", ColorVariant::Cyan),
    ("orange", ColorVariant::Orange),
    ("amber", ColorVariant::Orange),
    ("pink", ColorVariant::Pink),
    ("magenta", ColorVariant::Pink),
    ("yellow", ColorVariant::Yellow),
    ("gold", ColorVariant::Yellow),
    ("teal", ColorVariant::Teal),
    ("turquoise", ColorVariant::Teal),
    ("indigo", ColorVariant::Indigo),
];

/// Infer table structure and styling from a lowercased message.
pub fn infer_table(message: &str) -> TableConfig {
    let mut config = TableConfig::default();

    config.rows = ROWS_RE
        .captures(message)
        .and_then(|caps| number_value(&caps[1]))
        .map(clamp_rows);
    config.columns = COLUMNS_RE
        .captures(message)
        .and_then(|caps| number_value(&caps[1]))
        .map(clamp_columns);

    config.header_color = first_color(message, HEADER_COLORS);

    config.stripe_rows =
        !any_of(message, &["no stripe", "no stripes", "plain rows", "no alternating"]);
    if any_of(message, &["rounded", "round corners", "rounded corners"]) {
        config.corners = Corners::Rounded;
    }

    if any_of(message, &["pastel header", "soft header", "light header"]) {
        config.header_style = HeaderStyle::Pastel;
    } else if any_of(message, &["minimal header", "simple header", "plain header"]) {
        config.header_style = HeaderStyle::Minimal;
    }

    if any_of(message, &["center-aligned", "center aligned", "centered"]) {
        config.alignment = Alignment::Center;
    } else if any_of(message, &["right-aligned", "right aligned"]) {
        config.alignment = Alignment::Right;
    }

    if any_of(message, &["no border", "borderless", "no borders"]) {
        config.border_style = BorderStyle::None;
    } else if any_of(message, &["medium border", "thicker border"]) {
        config.border_style = BorderStyle::Medium;
    } else if any_of(message, &["heavy border", "thick border", "bold border"]) {
        config.border_style = BorderStyle::Heavy;
    }

    if any_of(message, &["vertical", "stacked"]) {
        config.layout = TableLayout::Vertical;
    }

    config.first_column_bold =
        any_of(message, &["first column bold", "bold first column", "first col bold"]);
    config.last_column_bold =
        any_of(message, &["last column bold", "bold last column", "last col bold"]);
    config.show_total_row =
        any_of(message, &["total row", "totals row", "summary row", "show total"]);

    if let Some((min, max)) = char_range(HEADER_CHARS_RE.captures(message)) {
        config.header_min_chars = min;
        config.header_max_chars = max;
    }
    if let Some((min, max)) = char_range(CELL_CHARS_RE.captures(message)) {
        config.cell_min_chars = min;
        config.cell_max_chars = max;
    }

    config
}

impl Inferable for TableConfig {
    fn infer(message: &str) -> Self {
        infer_table(message)
    }

    const EXTRACTION_RULES: &'static str = "\
- \"6 rows\" or \"six data rows\" set rows. \"4 columns\" sets columns. These are table STRUCTURE, never the table count.
- count is the number of separate tables, only when stated as tables (\"2 tables\", \"two tables\").
- rows must be 2-15 and columns 2-8.
- a color near header or table sets header_color.
- \"no stripes\" or \"plain rows\" mean stripe_rows false.
- \"total row\" or \"summary row\" mean show_total_row true.
- \"header 20-25 chars\" sets header_min_chars and header_max_chars; \"cell 90-100 chars\" sets cell_min_chars and cell_max_chars.";
}
