use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::{Error, Result};
use crate::types::{ComponentKind, ConfigPatch, DebugTrace, Intent};

// =============================================================================
// Request Types
// =============================================================================

/// Slide grid bounds: 32 columns by 18 rows, 1-based.
pub const GRID_COLUMNS: u32 = 32;
pub const GRID_ROWS: u32 = 18;

/// Caller-supplied position override. Unset fields fall back to the
/// content-safe zone origin and the kind's registry footprint.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Placement {
    pub start_col: Option<u32>,
    pub start_row: Option<u32>,
    pub width: Option<u32>,
    pub height: Option<u32>,
}

impl Placement {
    /// Reject positions outside the slide grid.
    pub fn validate(&self) -> Result<()> {
        let in_range = |v: Option<u32>, max: u32| v.map_or(true, |v| (1..=max).contains(&v));
        if !in_range(self.start_col, GRID_COLUMNS) || !in_range(self.width, GRID_COLUMNS) {
            return Err(Error::invalid_request(format!(
                "placement columns must be within 1-{GRID_COLUMNS}: {self:?}"
            )));
        }
        if !in_range(self.start_row, GRID_ROWS) || !in_range(self.height, GRID_ROWS) {
            return Err(Error::invalid_request(format!(
                "placement rows must be within 1-{GRID_ROWS}: {self:?}"
            )));
        }
        Ok(())
    }
}

/// One message to resolve.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IntentRequest {
    /// Correlates log lines for one resolution.
    #[serde(default = "new_trace_id")]
    pub trace_id: String,
    pub raw_message: String,
    /// When set, the kind is fixed and never re-derived from text.
    #[serde(default)]
    pub caller_fixed_kind: Option<ComponentKind>,
    #[serde(default)]
    pub caller_config: Option<ConfigPatch>,
    #[serde(default)]
    pub caller_count: Option<u32>,
    #[serde(default)]
    pub placement: Option<Placement>,
    #[serde(default)]
    pub want_debug: bool,
}

fn new_trace_id() -> String {
    Uuid::new_v4().to_string()
}

impl IntentRequest {
    /// A plain text request with nothing fixed by the caller.
    pub fn text(message: impl Into<String>) -> Self {
        Self {
            trace_id: new_trace_id(),
            raw_message: message.into(),
            caller_fixed_kind: None,
            caller_config: None,
            caller_count: None,
            placement: None,
            want_debug: false,
        }
    }

    pub fn with_kind(mut self, kind: ComponentKind) -> Self {
        self.caller_fixed_kind = Some(kind);
        self
    }

    pub fn with_config(mut self, config: ConfigPatch) -> Self {
        self.caller_config = Some(config);
        self
    }

    pub fn with_count(mut self, count: u32) -> Self {
        self.caller_count = Some(count);
        self
    }

    pub fn with_placement(mut self, placement: Placement) -> Self {
        self.placement = Some(placement);
        self
    }

    pub fn with_debug(mut self) -> Self {
        self.want_debug = true;
        self
    }
}

/// Router output: the finalized intent and, when asked for, how it was reached.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Resolution {
    pub intent: Intent,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub debug: Option<DebugTrace>,
}
