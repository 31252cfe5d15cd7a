use serde::{Deserialize, Serialize};

use crate::types::{ComponentConfig, ComponentKind, Intent, Placement, GRID_COLUMNS, GRID_ROWS};

/// Content-safe zone origin used when the caller does not place the element.
pub const DEFAULT_START_COL: u32 = 2;
pub const DEFAULT_START_ROW: u32 = 4;

/// A rectangle on the slide grid, 1-based.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct GridPosition {
    pub start_col: u32,
    pub start_row: u32,
    pub width: u32,
    pub height: u32,
}

impl GridPosition {
    /// Resolve a footprint against an optional placement, kept inside the grid.
    pub fn resolve(footprint: (u32, u32), placement: Option<&Placement>) -> Self {
        let placement = placement.copied().unwrap_or_default();
        let start_col = placement.start_col.unwrap_or(DEFAULT_START_COL).clamp(1, GRID_COLUMNS);
        let start_row = placement.start_row.unwrap_or(DEFAULT_START_ROW).clamp(1, GRID_ROWS);
        let width = placement
            .width
            .unwrap_or(footprint.0)
            .clamp(1, GRID_COLUMNS + 1 - start_col);
        let height = placement
            .height
            .unwrap_or(footprint.1)
            .clamp(1, GRID_ROWS + 1 - start_row);
        Self { start_col, start_row, width, height }
    }

    /// CSS `grid-column` span, end exclusive.
    pub fn grid_column(&self) -> String {
        format!("{}/{}", self.start_col, self.start_col + self.width)
    }

    /// CSS `grid-row` span, end exclusive.
    pub fn grid_row(&self) -> String {
        format!("{}/{}", self.start_row, self.start_row + self.height)
    }
}

/// Payload for a generation backend.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GenerationRequest {
    /// Endpoint selector.
    pub component_type: ComponentKind,
    pub count: u32,
    pub position: GridPosition,
    pub grid_row: String,
    pub grid_column: String,
    pub content_prompt: String,
    pub config: ComponentConfig,
}

impl GenerationRequest {
    /// Plan the downstream call for an intent. `None` when the intent carries
    /// no component.
    ///
    /// The count defaults to 1 and is clamped to the kind's range; the
    /// footprint is the single-instance size for one instance and the
    /// default size otherwise, unless the placement overrides it.
    pub fn plan(intent: &Intent, placement: Option<&Placement>) -> Option<Self> {
        let config = intent.component.clone()?;
        let kind = config.kind();
        let spec = kind.spec();
        let count = spec.clamp_count(intent.count.unwrap_or(1));
        let position = GridPosition::resolve(spec.footprint(count), placement);

        Some(Self {
            component_type: kind,
            count,
            grid_row: position.grid_row(),
            grid_column: position.grid_column(),
            position,
            content_prompt: intent.content_prompt.clone(),
            config,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{MetricsConfig, TableConfig};

    #[test]
    fn test_plan_single_metric_uses_single_size() {
        let intent = Intent::add(ComponentConfig::Metrics(MetricsConfig::default()), "revenue");
        let plan = GenerationRequest::plan(&intent, None).unwrap();
        assert_eq!(plan.count, 1);
        assert_eq!((plan.position.width, plan.position.height), (10, 8));
        assert_eq!(plan.grid_column, "2/12");
        assert_eq!(plan.grid_row, "4/12");
    }

    #[test]
    fn test_plan_clamps_count() {
        let intent = Intent::add(ComponentConfig::Table(TableConfig::default()), "q3")
            .with_count(Some(5));
        let plan = GenerationRequest::plan(&intent, None).unwrap();
        assert_eq!(plan.count, 2);
        assert_eq!((plan.position.width, plan.position.height), (28, 10));
    }

    #[test]
    fn test_placement_overrides_footprint() {
        let intent = Intent::add(ComponentConfig::Metrics(MetricsConfig::default()), "kpis")
            .with_count(Some(3));
        let placement = Placement {
            start_col: Some(17),
            start_row: Some(5),
            width: Some(15),
            height: None,
        };
        let plan = GenerationRequest::plan(&intent, Some(&placement)).unwrap();
        assert_eq!(plan.grid_column, "17/32");
        assert_eq!(plan.position.height, 8);
        assert_eq!(plan.grid_row, "5/13");
    }

    #[test]
    fn test_position_stays_on_grid() {
        let placement = Placement { start_col: Some(30), start_row: Some(17), width: None, height: None };
        let pos = GridPosition::resolve((28, 10), Some(&placement));
        assert_eq!(pos.grid_column(), "30/33");
        assert_eq!(pos.grid_row(), "17/19");
    }

    #[test]
    fn test_no_component_no_plan() {
        let intent = Intent {
            component: None,
            ..Intent::add(ComponentConfig::Metrics(MetricsConfig::default()), "")
        };
        assert!(GenerationRequest::plan(&intent, None).is_none());
    }
}
