use slide_intent_core::types::{ChartConfig, ChartType};

use super::{any_of, Inferable};

/// Chart type keywords, most specific first. The first hit wins.
const CHART_TYPE_CASCADE: &[(&[&str], ChartType)] = &[
    (&["stacked area", "area stacked"], ChartType::AreaStacked),
    (&["grouped bar", "side by side bar", "multi-bar"], ChartType::BarGrouped),
    (&["stacked bar", "bar stacked"], ChartType::BarStacked),
    (&["horizontal bar", "bar horizontal"], ChartType::BarHorizontal),
    (&["waterfall", "bridge chart", "income bridge"], ChartType::Waterfall),
    (&["scatter", "correlation", "x-y plot"], ChartType::Scatter),
    (&["bubble"], ChartType::Bubble),
    (&["radar", "spider", "web chart"], ChartType::Radar),
    (&["polar", "polar area"], ChartType::PolarArea),
    (&["doughnut", "donut"], ChartType::Doughnut),
    (&["pie", "share", "distribution"], ChartType::Pie),
    (&["area chart", "filled line"], ChartType::Area),
    (&["bar chart", "bar", "column"], ChartType::BarVertical),
    (&["line", "trend", "over time", "growth", "timeline"], ChartType::Line),
];

/// Infer chart type and options from a lowercased message.
pub fn infer_chart(message: &str) -> ChartConfig {
    let chart_type = CHART_TYPE_CASCADE
        .iter()
        .find(|(keywords, _)| any_of(message, keywords))
        .map(|(_, chart_type)| *chart_type)
        .unwrap_or(ChartType::Line);

    ChartConfig {
        chart_type,
        include_insights: any_of(message, &["insight", "analysis", "with insights", "key insights"]),
        series_names: Vec::new(),
    }
}

impl Inferable for ChartConfig {
    fn infer(message: &str) -> Self {
        infer_chart(message)
    }

    const EXTRACTION_RULES: &'static str = "\
- pick the MOST specific chart_type: \"stacked bar\" is bar_stacked, \"grouped bar\" is bar_grouped, \"horizontal bar\" is bar_horizontal, plain \"bar\" is bar_vertical.
- donut means doughnut; spider or web chart means radar; bridge chart means waterfall.
- insight, insights or analysis mean include_insights true.
- \"2 charts\" sets count (1-2).
- named series (\"revenue vs cost\") go in series_names.";
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_specific_before_generic() {
        let config = infer_chart("stacked bar chart with insights");
        assert_eq!(config.chart_type, ChartType::BarStacked);
        assert!(config.include_insights);

        assert_eq!(infer_chart("stacked area of revenue").chart_type, ChartType::AreaStacked);
        assert_eq!(infer_chart("donut of market share").chart_type, ChartType::Doughnut);
        assert_eq!(infer_chart("market share").chart_type, ChartType::Pie);
        assert_eq!(infer_chart("bar chart").chart_type, ChartType::BarVertical);
        assert_eq!(infer_chart("revenue growth").chart_type, ChartType::Line);
    }

    #[test]
    fn test_default_line() {
        let config = infer_chart("add a chart");
        assert_eq!(config, ChartConfig::default());
    }
}
