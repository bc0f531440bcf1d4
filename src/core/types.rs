use chrono::{DateTime, TimeDelta, Utc};
use serde::{Deserialize, Serialize};

use crate::error::{GanttError, GanttResult};

/// Closed time range attached to a timeline entity.
///
/// `end >= start` always holds; zero-length intervals are allowed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "RawTimeInterval")]
pub struct TimeInterval {
    start: DateTime<Utc>,
    end: DateTime<Utc>,
}

#[derive(Deserialize)]
struct RawTimeInterval {
    start: DateTime<Utc>,
    end: DateTime<Utc>,
}

impl TryFrom<RawTimeInterval> for TimeInterval {
    type Error = GanttError;

    fn try_from(raw: RawTimeInterval) -> GanttResult<Self> {
        Self::new(raw.start, raw.end)
    }
}

impl TimeInterval {
    pub fn new(start: DateTime<Utc>, end: DateTime<Utc>) -> GanttResult<Self> {
        if end < start {
            return Err(GanttError::NegativeInterval { start, end });
        }
        Ok(Self { start, end })
    }

    /// Builds an interval from a start and a duration, saturating at chrono's upper bound.
    #[must_use]
    pub fn starting_at(start: DateTime<Utc>, duration: TimeDelta) -> Self {
        let duration = duration.max(TimeDelta::zero());
        let end = start
            .checked_add_signed(duration)
            .unwrap_or(DateTime::<Utc>::MAX_UTC);
        Self { start, end }
    }

    #[must_use]
    pub fn start(self) -> DateTime<Utc> {
        self.start
    }

    #[must_use]
    pub fn end(self) -> DateTime<Utc> {
        self.end
    }

    #[must_use]
    pub fn duration(self) -> TimeDelta {
        self.end - self.start
    }

    #[must_use]
    pub fn is_degenerate(self) -> bool {
        self.start == self.end
    }
}

/// A queued or active job placed on the schedule.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScheduledEntry {
    pub interval: TimeInterval,
    pub label: String,
    pub thumbnail: Option<String>,
    /// Set upstream when the job overlaps an unavailability window.
    pub spans_unavailability: bool,
}

impl ScheduledEntry {
    #[must_use]
    pub fn new(label: impl Into<String>, interval: TimeInterval) -> Self {
        Self {
            interval,
            label: label.into(),
            thumbnail: None,
            spans_unavailability: false,
        }
    }

    #[must_use]
    pub fn with_thumbnail(mut self, thumbnail: impl Into<String>) -> Self {
        self.thumbnail = Some(thumbnail.into());
        self
    }

    #[must_use]
    pub fn spanning_unavailability(mut self, spans: bool) -> Self {
        self.spans_unavailability = spans;
        self
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UnavailabilityWindow {
    pub id: String,
    pub interval: TimeInterval,
}

impl UnavailabilityWindow {
    #[must_use]
    pub fn new(id: impl Into<String>, interval: TimeInterval) -> Self {
        Self {
            id: id.into(),
            interval,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HistoryStatus {
    Completed,
    Printing,
}

/// A job that has started printing, finished or not.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HistoryEntry {
    pub interval: TimeInterval,
    pub label: String,
    pub status: HistoryStatus,
    pub thumbnail: Option<String>,
    /// `true` when `interval.end` was synthesized from a duration estimate.
    pub end_is_estimate: bool,
}

impl HistoryEntry {
    #[must_use]
    pub fn completed(label: impl Into<String>, interval: TimeInterval) -> Self {
        Self {
            interval,
            label: label.into(),
            status: HistoryStatus::Completed,
            thumbnail: None,
            end_is_estimate: false,
        }
    }

    /// A running job whose end is projected from its estimated duration.
    #[must_use]
    pub fn printing(label: impl Into<String>, start: DateTime<Utc>, estimate: TimeDelta) -> Self {
        Self {
            interval: TimeInterval::starting_at(start, estimate),
            label: label.into(),
            status: HistoryStatus::Printing,
            thumbnail: None,
            end_is_estimate: true,
        }
    }

    #[must_use]
    pub fn with_thumbnail(mut self, thumbnail: impl Into<String>) -> Self {
        self.thumbnail = Some(thumbnail.into());
        self
    }
}

/// A print the printer reports but no queued job accounts for.
///
/// The end stays open until the printer reports one.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UnknownPrintMarker {
    pub start: DateTime<Utc>,
    pub end: Option<DateTime<Utc>>,
    pub label: Option<String>,
}

impl UnknownPrintMarker {
    #[must_use]
    pub fn new(start: DateTime<Utc>) -> Self {
        Self {
            start,
            end: None,
            label: None,
        }
    }

    #[must_use]
    pub fn with_end(mut self, end: DateTime<Utc>) -> Self {
        self.end = Some(end);
        self
    }

    #[must_use]
    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }

    /// Resolves the open end, falling back to `start + fallback`.
    ///
    /// A reported end earlier than `start` collapses to a zero-length interval.
    #[must_use]
    pub fn resolve_interval(&self, fallback: TimeDelta) -> TimeInterval {
        match self.end {
            Some(end) => TimeInterval {
                start: self.start,
                end: end.max(self.start),
            },
            None => TimeInterval::starting_at(self.start, fallback),
        }
    }

    #[must_use]
    pub fn label_or<'a>(&'a self, default: &'a str) -> &'a str {
        self.label
            .as_deref()
            .filter(|label| !label.trim().is_empty())
            .unwrap_or(default)
    }
}

/// All entity sets feeding one render pass.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct TimelineSnapshot {
    #[serde(default)]
    pub scheduled: Vec<ScheduledEntry>,
    #[serde(default)]
    pub unavailability: Vec<UnavailabilityWindow>,
    #[serde(default)]
    pub history: Vec<HistoryEntry>,
    #[serde(default)]
    pub unknown_print: Option<UnknownPrintMarker>,
}

impl TimelineSnapshot {
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.scheduled.is_empty()
            && self.unavailability.is_empty()
            && self.history.is_empty()
            && self.unknown_print.is_none()
    }
}
