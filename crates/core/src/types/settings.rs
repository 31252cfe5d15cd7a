//! Per-kind style configurations.
//!
//! Each kind has a complete configuration (every field resolved, schema
//! defaults applied) and a patch (every field optional, `None` meaning
//! "not determined"). Patches are what extraction layers and callers
//! produce; the merge resolver folds them into a complete configuration.

use schemars::JsonSchema;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::error::{Error, Result};
use crate::types::ComponentKind;

// =============================================================================
// Shared Option Enums
// =============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "lowercase")]
pub enum Corners {
    Rounded,
    Square,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "lowercase")]
pub enum Alignment {
    Left,
    Center,
    Right,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "lowercase")]
pub enum ColorScheme {
    Gradient,
    Solid,
    /// Pastel backgrounds.
    Accent,
}

/// Arrangement of multiple instances.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "lowercase")]
pub enum Arrangement {
    Horizontal,
    Vertical,
    Grid,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "lowercase")]
pub enum TableLayout {
    Horizontal,
    Vertical,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "lowercase")]
pub enum Background {
    Colored,
    Transparent,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "kebab-case")]
pub enum TitleStyle {
    Plain,
    Highlighted,
    ColoredBg,
    Neutral,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "lowercase")]
pub enum ListStyle {
    Bullets,
    Numbers,
    None,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "lowercase")]
pub enum ThemeMode {
    Light,
    Dark,
}

/// Named color variants understood by the renderers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "lowercase")]
pub enum ColorVariant {
    Purple,
    Blue,
    Red,
    Green,
    Cyan,
    Orange,
    Pink,
    Teal,
    Yellow,
    Indigo,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "lowercase")]
pub enum HeaderStyle {
    Solid,
    Pastel,
    Minimal,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "lowercase")]
pub enum BorderStyle {
    None,
    Light,
    Medium,
    Heavy,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum ChartType {
    Line,
    BarVertical,
    BarHorizontal,
    BarGrouped,
    BarStacked,
    Area,
    AreaStacked,
    Pie,
    Doughnut,
    Scatter,
    Bubble,
    Radar,
    PolarArea,
    Waterfall,
}

impl ChartType {
    /// Human-readable name ("bar stacked").
    pub fn display_name(&self) -> String {
        serde_json::to_value(self)
            .ok()
            .and_then(|v| v.as_str().map(|s| s.replace('_', " ")))
            .unwrap_or_default()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "lowercase")]
pub enum ImageStyle {
    Realistic,
    Illustration,
    Corporate,
    Abstract,
    Minimalist,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "lowercase")]
pub enum ImageQuality {
    Draft,
    Standard,
    High,
    Ultra,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub enum AspectRatio {
    #[serde(rename = "16:9")]
    Wide,
    #[serde(rename = "4:3")]
    Standard,
    #[serde(rename = "1:1")]
    Square,
    #[serde(rename = "3:2")]
    Photo,
    #[serde(rename = "9:16")]
    Portrait,
}

// =============================================================================
// Settings Trait
// =============================================================================

/// A complete per-kind configuration and its patch type.
pub trait ComponentSettings:
    Serialize + DeserializeOwned + Default + Clone + fmt::Debug + Send + Sync + 'static
{
    /// Partial form, every field optional.
    type Patch: Serialize
        + DeserializeOwned
        + Default
        + Clone
        + fmt::Debug
        + JsonSchema
        + Send
        + Sync
        + 'static;

    /// The kind this configuration belongs to.
    const KIND: ComponentKind;

    /// Check declared ranges. Called after every merge.
    fn validate(&self) -> Result<()> {
        Ok(())
    }

    /// Clamp structural values in an untrusted patch into their valid ranges.
    fn sanitize(_patch: &mut Self::Patch) {}

    /// Wrap into the tagged union.
    fn into_config(self) -> ComponentConfig;

    /// Borrow this kind's patch out of a caller-supplied patch, if it matches.
    fn patch_of(patch: &ConfigPatch) -> Option<&Self::Patch>;
}

fn check_char_range(field: &str, min: u32, max: u32) -> Result<()> {
    if !(5..=500).contains(&min) || !(5..=500).contains(&max) {
        return Err(Error::invalid_config(format!(
            "{field} char limits must be within 5-500, got {min}-{max}"
        )));
    }
    if min > max {
        return Err(Error::invalid_config(format!(
            "{field} min chars {min} exceeds max chars {max}"
        )));
    }
    Ok(())
}

fn check_optional_range(field: &str, value: Option<u32>, min: u32, max: u32) -> Result<()> {
    match value {
        Some(v) if !(min..=max).contains(&v) => Err(Error::invalid_config(format!(
            "{field} must be within {min}-{max}, got {v}"
        ))),
        _ => Ok(()),
    }
}

/// Parse a CSS grid span ("4/11") and check it against the last grid line.
fn check_span(field: &str, span: &str, last_line: u32) -> Result<()> {
    let parsed = span
        .split_once('/')
        .and_then(|(a, b)| Some((a.trim().parse::<u32>().ok()?, b.trim().parse::<u32>().ok()?)));
    match parsed {
        Some((start, end)) if start >= 1 && start < end && end <= last_line => Ok(()),
        _ => Err(Error::invalid_config(format!("{field} is not a valid grid span: {span}"))),
    }
}

// =============================================================================
// TEXT_BOX
// =============================================================================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TextBoxConfig {
    pub background: Background,
    pub corners: Corners,
    pub border: bool,
    pub show_title: bool,
    pub title_style: TitleStyle,
    pub list_style: ListStyle,
    pub color_scheme: ColorScheme,
    pub layout: Arrangement,
    pub heading_align: Alignment,
    pub content_align: Alignment,
    pub theme_mode: ThemeMode,
    pub placeholder_mode: bool,
    pub title_min_chars: u32,
    pub title_max_chars: u32,
    pub item_min_chars: u32,
    pub item_max_chars: u32,
    pub color_variant: Option<ColorVariant>,
    /// Only meaningful when `layout` is grid.
    pub grid_cols: Option<u32>,
    pub items_per_instance: Option<u32>,
}

impl Default for TextBoxConfig {
    fn default() -> Self {
        Self {
            background: Background::Colored,
            corners: Corners::Rounded,
            border: false,
            show_title: true,
            title_style: TitleStyle::Plain,
            list_style: ListStyle::Bullets,
            color_scheme: ColorScheme::Accent,
            layout: Arrangement::Horizontal,
            heading_align: Alignment::Left,
            content_align: Alignment::Left,
            theme_mode: ThemeMode::Light,
            placeholder_mode: false,
            title_min_chars: 30,
            title_max_chars: 40,
            item_min_chars: 80,
            item_max_chars: 100,
            color_variant: None,
            grid_cols: None,
            items_per_instance: None,
        }
    }
}

/// Text box style options extracted from a message.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(default)]
pub struct TextBoxPatch {
    /// colored or transparent box background.
    pub background: Option<Background>,
    pub corners: Option<Corners>,
    /// Draw a border around each box.
    pub border: Option<bool>,
    pub show_title: Option<bool>,
    pub title_style: Option<TitleStyle>,
    /// bullets, numbers (numbered steps) or none (plain paragraphs).
    pub list_style: Option<ListStyle>,
    pub color_scheme: Option<ColorScheme>,
    /// How multiple boxes are arranged.
    pub layout: Option<Arrangement>,
    pub heading_align: Option<Alignment>,
    pub content_align: Option<Alignment>,
    pub theme_mode: Option<ThemeMode>,
    /// Lorem ipsum instead of generated content.
    pub placeholder_mode: Option<bool>,
    pub title_min_chars: Option<u32>,
    pub title_max_chars: Option<u32>,
    pub item_min_chars: Option<u32>,
    pub item_max_chars: Option<u32>,
    pub color_variant: Option<ColorVariant>,
    /// Columns for a grid layout (1-6).
    pub grid_cols: Option<u32>,
    /// Bullet points or items inside EACH box (1-7). "5 bullet points" is 5 here, not a box count.
    pub items_per_instance: Option<u32>,
}

impl ComponentSettings for TextBoxConfig {
    type Patch = TextBoxPatch;
    const KIND: ComponentKind = ComponentKind::TextBox;

    fn validate(&self) -> Result<()> {
        check_char_range("title", self.title_min_chars, self.title_max_chars)?;
        check_char_range("item", self.item_min_chars, self.item_max_chars)?;
        check_optional_range("grid_cols", self.grid_cols, 1, 6)?;
        check_optional_range("items_per_instance", self.items_per_instance, 1, 7)
    }

    fn sanitize(patch: &mut TextBoxPatch) {
        patch.items_per_instance = patch.items_per_instance.map(|n| n.clamp(1, 7));
        patch.grid_cols = patch.grid_cols.filter(|n| (1..=6).contains(n));
    }

    fn into_config(self) -> ComponentConfig {
        ComponentConfig::TextBox(self)
    }

    fn patch_of(patch: &ConfigPatch) -> Option<&TextBoxPatch> {
        match patch {
            ConfigPatch::TextBox(p) => Some(p),
            _ => None,
        }
    }
}

// =============================================================================
// TABLE
// =============================================================================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TableConfig {
    pub stripe_rows: bool,
    pub corners: Corners,
    pub header_style: HeaderStyle,
    pub alignment: Alignment,
    pub border_style: BorderStyle,
    pub layout: TableLayout,
    pub placeholder_mode: bool,
    pub header_color: Option<ColorVariant>,
    pub first_column_bold: bool,
    pub last_column_bold: bool,
    pub show_total_row: bool,
    pub header_min_chars: u32,
    pub header_max_chars: u32,
    pub cell_min_chars: u32,
    pub cell_max_chars: u32,
    pub rows: Option<u32>,
    pub columns: Option<u32>,
}

impl Default for TableConfig {
    fn default() -> Self {
        Self {
            stripe_rows: true,
            corners: Corners::Square,
            header_style: HeaderStyle::Solid,
            alignment: Alignment::Left,
            border_style: BorderStyle::Light,
            layout: TableLayout::Horizontal,
            placeholder_mode: false,
            header_color: None,
            first_column_bold: false,
            last_column_bold: false,
            show_total_row: false,
            header_min_chars: 5,
            header_max_chars: 25,
            cell_min_chars: 10,
            cell_max_chars: 50,
            rows: None,
            columns: None,
        }
    }
}

/// Table style and structure options extracted from a message.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(default)]
pub struct TablePatch {
    /// Alternating (banded) row colors.
    pub stripe_rows: Option<bool>,
    pub corners: Option<Corners>,
    pub header_style: Option<HeaderStyle>,
    pub alignment: Option<Alignment>,
    pub border_style: Option<BorderStyle>,
    pub layout: Option<TableLayout>,
    pub placeholder_mode: Option<bool>,
    /// Header row color.
    pub header_color: Option<ColorVariant>,
    pub first_column_bold: Option<bool>,
    pub last_column_bold: Option<bool>,
    /// Total row with a double line above it.
    pub show_total_row: Option<bool>,
    pub header_min_chars: Option<u32>,
    pub header_max_chars: Option<u32>,
    pub cell_min_chars: Option<u32>,
    pub cell_max_chars: Option<u32>,
    /// Data rows in the table (2-15). "6 rows" is rows=6, never a table count.
    pub rows: Option<u32>,
    /// Columns in the table (2-8). "4 columns" is columns=4, never a table count.
    pub columns: Option<u32>,
}

impl ComponentSettings for TableConfig {
    type Patch = TablePatch;
    const KIND: ComponentKind = ComponentKind::Table;

    fn validate(&self) -> Result<()> {
        check_char_range("header", self.header_min_chars, self.header_max_chars)?;
        check_char_range("cell", self.cell_min_chars, self.cell_max_chars)?;
        check_optional_range("rows", self.rows, 2, 15)?;
        check_optional_range("columns", self.columns, 2, 8)
    }

    fn sanitize(patch: &mut TablePatch) {
        patch.rows = patch.rows.map(clamp_rows);
        patch.columns = patch.columns.map(clamp_columns);
    }

    fn into_config(self) -> ComponentConfig {
        ComponentConfig::Table(self)
    }

    fn patch_of(patch: &ConfigPatch) -> Option<&TablePatch> {
        match patch {
            ConfigPatch::Table(p) => Some(p),
            _ => None,
        }
    }
}

/// Clamp a table row count into 2-15.
pub fn clamp_rows(rows: u32) -> u32 {
    rows.clamp(2, 15)
}

/// Clamp a table column count into 2-8.
pub fn clamp_columns(columns: u32) -> u32 {
    columns.clamp(2, 8)
}

// =============================================================================
// METRICS
// =============================================================================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MetricsConfig {
    pub corners: Corners,
    pub border: bool,
    pub alignment: Alignment,
    pub color_scheme: ColorScheme,
    pub layout: Arrangement,
    pub placeholder_mode: bool,
    pub color_variant: Option<ColorVariant>,
}

impl Default for MetricsConfig {
    fn default() -> Self {
        Self {
            corners: Corners::Rounded,
            border: false,
            alignment: Alignment::Center,
            color_scheme: ColorScheme::Gradient,
            layout: Arrangement::Horizontal,
            placeholder_mode: false,
            color_variant: None,
        }
    }
}

/// Metric card style options extracted from a message.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(default)]
pub struct MetricsPatch {
    pub corners: Option<Corners>,
    pub border: Option<bool>,
    pub alignment: Option<Alignment>,
    /// gradient, solid or accent (pastel).
    pub color_scheme: Option<ColorScheme>,
    pub layout: Option<Arrangement>,
    pub placeholder_mode: Option<bool>,
    pub color_variant: Option<ColorVariant>,
}

impl ComponentSettings for MetricsConfig {
    type Patch = MetricsPatch;
    const KIND: ComponentKind = ComponentKind::Metrics;

    fn into_config(self) -> ComponentConfig {
        ComponentConfig::Metrics(self)
    }

    fn patch_of(patch: &ConfigPatch) -> Option<&MetricsPatch> {
        match patch {
            ConfigPatch::Metrics(p) => Some(p),
            _ => None,
        }
    }
}

// =============================================================================
// CHART
// =============================================================================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ChartConfig {
    pub chart_type: ChartType,
    pub include_insights: bool,
    pub series_names: Vec<String>,
}

impl Default for ChartConfig {
    fn default() -> Self {
        Self {
            chart_type: ChartType::Line,
            include_insights: false,
            series_names: Vec::new(),
        }
    }
}

/// Chart options extracted from a message.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(default)]
pub struct ChartPatch {
    /// The most specific chart type named ("stacked bar" is bar_stacked, not bar_vertical).
    pub chart_type: Option<ChartType>,
    /// Add a key insights panel next to the chart.
    pub include_insights: Option<bool>,
    /// Custom names for multi-series charts.
    pub series_names: Option<Vec<String>>,
}

impl ComponentSettings for ChartConfig {
    type Patch = ChartPatch;
    const KIND: ComponentKind = ComponentKind::Chart;

    fn into_config(self) -> ComponentConfig {
        ComponentConfig::Chart(self)
    }

    fn patch_of(patch: &ConfigPatch) -> Option<&ChartPatch> {
        match patch {
            ConfigPatch::Chart(p) => Some(p),
            _ => None,
        }
    }
}

// =============================================================================
// IMAGE
// =============================================================================

/// Content-safe zone default: 12 columns by 7 rows at the top left, 16:9.
pub const DEFAULT_IMAGE_ROW_SPAN: &str = "4/11";
pub const DEFAULT_IMAGE_COLUMN_SPAN: &str = "2/14";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ImageConfig {
    pub style: ImageStyle,
    pub quality: ImageQuality,
    pub grid_row: String,
    pub grid_column: String,
    pub aspect_ratio: AspectRatio,
    pub placeholder_mode: bool,
}

impl Default for ImageConfig {
    fn default() -> Self {
        Self {
            style: ImageStyle::Realistic,
            quality: ImageQuality::Standard,
            grid_row: DEFAULT_IMAGE_ROW_SPAN.to_string(),
            grid_column: DEFAULT_IMAGE_COLUMN_SPAN.to_string(),
            aspect_ratio: AspectRatio::Wide,
            placeholder_mode: false,
        }
    }
}

/// Image options extracted from a message.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(default)]
pub struct ImagePatch {
    pub style: Option<ImageStyle>,
    pub quality: Option<ImageQuality>,
    /// CSS grid row span inside rows 4-18, e.g. "4/18".
    pub grid_row: Option<String>,
    /// CSS grid column span inside columns 2-32, e.g. "2/17".
    pub grid_column: Option<String>,
    pub aspect_ratio: Option<AspectRatio>,
    pub placeholder_mode: Option<bool>,
}

impl ComponentSettings for ImageConfig {
    type Patch = ImagePatch;
    const KIND: ComponentKind = ComponentKind::Image;

    fn validate(&self) -> Result<()> {
        check_span("grid_row", &self.grid_row, 19)?;
        check_span("grid_column", &self.grid_column, 33)
    }

    fn into_config(self) -> ComponentConfig {
        ComponentConfig::Image(self)
    }

    fn patch_of(patch: &ConfigPatch) -> Option<&ImagePatch> {
        match patch {
            ConfigPatch::Image(p) => Some(p),
            _ => None,
        }
    }
}

// =============================================================================
// Tagged Unions
// =============================================================================

/// Exactly one complete configuration, tagged by kind.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "component_type", content = "config", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ComponentConfig {
    Metrics(MetricsConfig),
    Table(TableConfig),
    TextBox(TextBoxConfig),
    Chart(ChartConfig),
    Image(ImageConfig),
}

impl ComponentConfig {
    /// Kind of the carried configuration.
    pub fn kind(&self) -> ComponentKind {
        match self {
            Self::Metrics(_) => ComponentKind::Metrics,
            Self::Table(_) => ComponentKind::Table,
            Self::TextBox(_) => ComponentKind::TextBox,
            Self::Chart(_) => ComponentKind::Chart,
            Self::Image(_) => ComponentKind::Image,
        }
    }

    /// Schema default for a kind.
    pub fn default_for(kind: ComponentKind) -> Self {
        match kind {
            ComponentKind::Metrics => Self::Metrics(MetricsConfig::default()),
            ComponentKind::Table => Self::Table(TableConfig::default()),
            ComponentKind::TextBox => Self::TextBox(TextBoxConfig::default()),
            ComponentKind::Chart => Self::Chart(ChartConfig::default()),
            ComponentKind::Image => Self::Image(ImageConfig::default()),
        }
    }

    /// Whether placeholder (lorem ipsum) content is requested. Charts always generate.
    pub fn placeholder_mode(&self) -> bool {
        match self {
            Self::Metrics(c) => c.placeholder_mode,
            Self::Table(c) => c.placeholder_mode,
            Self::TextBox(c) => c.placeholder_mode,
            Self::Image(c) => c.placeholder_mode,
            Self::Chart(_) => false,
        }
    }

    pub fn set_placeholder_mode(&mut self, on: bool) {
        match self {
            Self::Metrics(c) => c.placeholder_mode = on,
            Self::Table(c) => c.placeholder_mode = on,
            Self::TextBox(c) => c.placeholder_mode = on,
            Self::Image(c) => c.placeholder_mode = on,
            Self::Chart(_) => {}
        }
    }

    /// Flat field map of the carried configuration, nulls removed.
    pub fn non_null_fields(&self) -> serde_json::Map<String, serde_json::Value> {
        let value = match self {
            Self::Metrics(c) => serde_json::to_value(c),
            Self::Table(c) => serde_json::to_value(c),
            Self::TextBox(c) => serde_json::to_value(c),
            Self::Chart(c) => serde_json::to_value(c),
            Self::Image(c) => serde_json::to_value(c),
        };
        match value {
            Ok(serde_json::Value::Object(map)) => {
                map.into_iter().filter(|(_, v)| !v.is_null()).collect()
            }
            _ => serde_json::Map::new(),
        }
    }
}

/// A caller-supplied partial configuration, tagged by kind.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "component_type", content = "config", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ConfigPatch {
    Metrics(MetricsPatch),
    Table(TablePatch),
    TextBox(TextBoxPatch),
    Chart(ChartPatch),
    Image(ImagePatch),
}

impl ConfigPatch {
    pub fn kind(&self) -> ComponentKind {
        match self {
            Self::Metrics(_) => ComponentKind::Metrics,
            Self::Table(_) => ComponentKind::Table,
            Self::TextBox(_) => ComponentKind::TextBox,
            Self::Chart(_) => ComponentKind::Chart,
            Self::Image(_) => ComponentKind::Image,
        }
    }
}
