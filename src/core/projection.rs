use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::core::primitives::millis_between;
use crate::core::{TimeInterval, VisibleRange};

/// Screen-space placement of one interval, in percent of the visible span.
///
/// `width_percent` is `None` exactly when `clipped_right` is set: the
/// renderer stretches such blocks to the right edge instead of sizing them.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct IntervalProjection {
    pub left_percent: f64,
    pub width_percent: Option<f64>,
    pub clipped_right: bool,
}

/// Projects an interval onto the visible range.
///
/// Returns `None` when the interval does not overlap the range. A start before
/// the range is clamped flush to the left edge with no indicator; an end past
/// the range sets `clipped_right`.
#[must_use]
pub fn project_interval(interval: TimeInterval, range: VisibleRange) -> Option<IntervalProjection> {
    if interval.end() <= range.start || interval.start() >= range.end {
        return None;
    }

    let span = range.span_millis() as f64;
    let clamped_start = interval.start().max(range.start);
    let left_percent = millis_between(range.start, clamped_start) as f64 / span * 100.0;
    let clipped_right = interval.end() > range.end;
    let width_percent = if clipped_right {
        None
    } else {
        Some(millis_between(clamped_start, interval.end()) as f64 / span * 100.0)
    };

    Some(IntervalProjection {
        left_percent,
        width_percent,
        clipped_right,
    })
}

/// Projects a single instant, inclusive of both range boundaries.
#[must_use]
pub fn project_instant(instant: DateTime<Utc>, range: VisibleRange) -> Option<f64> {
    if !range.contains_instant(instant) {
        return None;
    }
    Some(millis_between(range.start, instant) as f64 / range.span_millis() as f64 * 100.0)
}
