use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::core::{ViewportState, VisibleRange, project_instant};
use crate::render::{HeaderCell, Lane};

/// Live "now" indicator position inside the visible range.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct NowMarker {
    pub at: DateTime<Utc>,
    pub position_percent: f64,
}

impl NowMarker {
    /// Returns `None` when `now` falls outside `[range.start, range.end]`.
    #[must_use]
    pub fn locate(now: DateTime<Utc>, range: VisibleRange) -> Option<Self> {
        project_instant(now, range).map(|position_percent| Self {
            at: now,
            position_percent,
        })
    }
}

/// Everything the presentation layer needs for one timeline draw.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TimelineFrame {
    pub viewport: ViewportState,
    pub visible_range: VisibleRange,
    pub caption: String,
    pub chart_width_px: f64,
    pub header: Vec<HeaderCell>,
    pub lanes: Vec<Lane>,
    pub now_marker: Option<NowMarker>,
}

impl TimelineFrame {
    #[must_use]
    pub fn block_count(&self) -> usize {
        self.lanes.iter().map(|lane| lane.blocks.len()).sum()
    }
}
