use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::Error;

// =============================================================================
// Component Kinds & Registry
// =============================================================================

/// The five supported visual element types.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, schemars::JsonSchema)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ComponentKind {
    /// Number-focused KPI cards.
    Metrics,
    /// Grid-based data tables.
    Table,
    /// Configurable text boxes (bullets, steps, sections, callouts).
    TextBox,
    /// Data visualization charts.
    Chart,
    /// AI-generated images.
    Image,
}

impl ComponentKind {
    /// All kinds.
    pub const ALL: [ComponentKind; 5] = [
        ComponentKind::Metrics,
        ComponentKind::Table,
        ComponentKind::TextBox,
        ComponentKind::Chart,
        ComponentKind::Image,
    ];

    /// Wire name, also used as the downstream endpoint segment.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Metrics => "METRICS",
            Self::Table => "TABLE",
            Self::TextBox => "TEXT_BOX",
            Self::Chart => "CHART",
            Self::Image => "IMAGE",
        }
    }

    /// Registry entry for this kind.
    pub fn spec(&self) -> &'static ComponentSpec {
        match self {
            Self::Metrics => &METRICS_SPEC,
            Self::Table => &TABLE_SPEC,
            Self::TextBox => &TEXT_BOX_SPEC,
            Self::Chart => &CHART_SPEC,
            Self::Image => &IMAGE_SPEC,
        }
    }

    /// Whether any of this kind's recognition keywords occurs in `lower`.
    pub fn matches_keywords(&self, lower: &str) -> bool {
        self.spec().keywords.iter().any(|kw| lower.contains(kw))
    }
}

impl fmt::Display for ComponentKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ComponentKind {
    type Err = Error;

    /// Case-insensitive; accepts `TEXT_BOX`, `text_box`, `textbox` and `text box`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_uppercase().replace([' ', '-'], "_");
        match normalized.as_str() {
            "METRICS" => Ok(Self::Metrics),
            "TABLE" => Ok(Self::Table),
            "TEXT_BOX" | "TEXTBOX" => Ok(Self::TextBox),
            "CHART" => Ok(Self::Chart),
            "IMAGE" => Ok(Self::Image),
            _ => Err(Error::UnknownComponent(s.to_string())),
        }
    }
}

/// Static registry entry for a component kind.
#[derive(Debug)]
pub struct ComponentSpec {
    /// Recognition keywords, matched as lowercase substrings.
    pub keywords: &'static [&'static str],
    /// Valid instance count range (inclusive).
    pub count_range: (u32, u32),
    /// Grid footprint (width, height) for multiple instances.
    pub default_size: (u32, u32),
    /// Grid footprint (width, height) for a single instance.
    pub single_instance_size: (u32, u32),
}

impl ComponentSpec {
    /// Footprint for `count` instances.
    pub fn footprint(&self, count: u32) -> (u32, u32) {
        if count == 1 {
            self.single_instance_size
        } else {
            self.default_size
        }
    }

    /// Clamp an instance count into the valid range.
    pub fn clamp_count(&self, count: u32) -> u32 {
        count.clamp(self.count_range.0, self.count_range.1)
    }
}

// No "numbers" here: it collides with "numbered" lists.
static METRICS_SPEC: ComponentSpec = ComponentSpec {
    keywords: &["metrics", "kpis", "stats", "statistics", "data points", "metric", "kpi"],
    count_range: (1, 4),
    default_size: (28, 8),
    single_instance_size: (10, 8),
};

// No "grid" here: it collides with the text box "grid layout".
static TABLE_SPEC: ComponentSpec = ComponentSpec {
    keywords: &["table", "data table", "schedule", "matrix"],
    count_range: (1, 2),
    default_size: (28, 10),
    single_instance_size: (28, 10),
};

static TEXT_BOX_SPEC: ComponentSpec = ComponentSpec {
    keywords: &[
        "bullets", "bullet points", "bullet list", "features", "benefits",
        "numbered", "numbered list", "ordered", "steps", "process", "phases",
        "sections", "categories", "topics", "areas", "pillars",
        "comparison", "compare", "vs", "versus", "columns", "options",
        "callout", "highlight", "key points", "takeaways", "insights",
        "text", "content", "list", "items", "points",
    ],
    count_range: (1, 6),
    default_size: (28, 12),
    single_instance_size: (14, 10),
};

static CHART_SPEC: ComponentSpec = ComponentSpec {
    keywords: &[
        "chart", "graph", "plot", "visualization", "visualize",
        "line chart", "bar chart", "pie chart", "doughnut chart",
        "scatter", "bubble", "radar", "waterfall", "area chart",
        "trend chart", "comparison chart", "histogram",
    ],
    count_range: (1, 2),
    default_size: (14, 11),
    single_instance_size: (14, 11),
};

static IMAGE_SPEC: ComponentSpec = ComponentSpec {
    keywords: &[
        "image", "photo", "picture", "illustration", "visual", "graphic",
        "photograph", "artwork", "ai image", "generate image", "create image",
    ],
    count_range: (1, 4),
    default_size: (14, 10),
    single_instance_size: (14, 10),
};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_kind_variants() {
        assert_eq!("table".parse::<ComponentKind>().unwrap(), ComponentKind::Table);
        assert_eq!("TEXT_BOX".parse::<ComponentKind>().unwrap(), ComponentKind::TextBox);
        assert_eq!("textbox".parse::<ComponentKind>().unwrap(), ComponentKind::TextBox);
        assert_eq!("text box".parse::<ComponentKind>().unwrap(), ComponentKind::TextBox);
        assert!(matches!(
            "SEQUENTIAL".parse::<ComponentKind>(),
            Err(Error::UnknownComponent(_))
        ));
    }

    #[test]
    fn test_wire_name_roundtrip() {
        let json = serde_json::to_string(&ComponentKind::TextBox).unwrap();
        assert_eq!(json, "\"TEXT_BOX\"");
    }

    #[test]
    fn test_footprint_single_vs_many() {
        let spec = ComponentKind::Metrics.spec();
        assert_eq!(spec.footprint(1), (10, 8));
        assert_eq!(spec.footprint(3), (28, 8));
        assert_eq!(spec.clamp_count(9), 4);
        assert_eq!(spec.clamp_count(0), 1);
    }
}
