use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::core::primitives::{
    LocalZone, MILLIS_PER_HOUR, floor_to_hour, millis_between, utc_from_millis,
};

/// Width of one navigation page.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Granularity {
    #[default]
    Day,
    Week,
}

impl Granularity {
    #[must_use]
    pub const fn span_hours(self) -> u32 {
        match self {
            Self::Day => 24,
            Self::Week => 168,
        }
    }

    #[must_use]
    pub const fn span_millis(self) -> i64 {
        self.span_hours() as i64 * MILLIS_PER_HOUR
    }
}

/// Navigation state surviving across renders.
///
/// `offset` counts pages of the current granularity away from "today" and is
/// unbounded in both directions. Transitions return a new value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct ViewportState {
    pub granularity: Granularity,
    pub offset: i64,
}

impl ViewportState {
    #[must_use]
    pub const fn new(granularity: Granularity, offset: i64) -> Self {
        Self {
            granularity,
            offset,
        }
    }

    #[must_use]
    pub const fn today(granularity: Granularity) -> Self {
        Self::new(granularity, 0)
    }

    /// Swaps the granularity; the offset keeps its numeric value.
    #[must_use]
    pub const fn with_granularity(self, granularity: Granularity) -> Self {
        Self {
            granularity,
            offset: self.offset,
        }
    }

    #[must_use]
    pub const fn paged_by(self, pages: i64) -> Self {
        Self {
            granularity: self.granularity,
            offset: self.offset.saturating_add(pages),
        }
    }

    #[must_use]
    pub const fn reset_to_today(self) -> Self {
        Self::today(self.granularity)
    }
}

/// Concrete, hour-aligned time window currently on screen.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct VisibleRange {
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
    pub hour_count: u32,
}

impl VisibleRange {
    #[must_use]
    pub fn span_millis(self) -> i64 {
        millis_between(self.start, self.end)
    }

    /// Inclusive on both ends.
    #[must_use]
    pub fn contains_instant(self, instant: DateTime<Utc>) -> bool {
        instant >= self.start && instant <= self.end
    }
}

/// Resolves the visible window on UTC hour boundaries.
#[must_use]
pub fn resolve_visible_range(state: ViewportState, now: DateTime<Utc>) -> VisibleRange {
    resolve_visible_range_in(state, now, LocalZone::default())
}

/// Resolves the visible window, flooring `now` to the local hour in `zone`.
///
/// `start = floor_to_hour(now) + offset * span`. Offsets that would leave
/// chrono's representable range pin to the furthest whole page that fits, and
/// an anchor too close to the upper bound is pulled back so the last page
/// still spans a full `span`.
#[must_use]
pub fn resolve_visible_range_in(
    state: ViewportState,
    now: DateTime<Utc>,
    zone: impl Into<LocalZone>,
) -> VisibleRange {
    let span_ms = state.granularity.span_millis();
    let min_ms = DateTime::<Utc>::MIN_UTC.timestamp_millis();
    let max_ms = DateTime::<Utc>::MAX_UTC.timestamp_millis();

    let last_start_ms = max_ms - span_ms;
    let last_start_ms = last_start_ms - last_start_ms.rem_euclid(MILLIS_PER_HOUR);
    let anchor_ms = floor_to_hour(now, zone)
        .timestamp_millis()
        .min(last_start_ms);

    let pages_back = anchor_ms.saturating_sub(min_ms).max(0) / span_ms;
    let pages_forward = (last_start_ms - anchor_ms) / span_ms;
    let pages = state.offset.clamp(-pages_back, pages_forward);

    let start_ms = anchor_ms + pages * span_ms;
    VisibleRange {
        start: utc_from_millis(start_ms),
        end: utc_from_millis(start_ms + span_ms),
        hour_count: state.granularity.span_hours(),
    }
}
