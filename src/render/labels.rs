use chrono::{DateTime, Utc};

use crate::core::TimeInterval;
use crate::core::primitives::{LocalZone, format_local};

const CLOCK_PATTERN: &str = "%H:%M";
const DATE_PATTERN: &str = "%a, %b %-d";
const HOUR_PATTERN: &str = "%H";
const WEEKDAY_PATTERN: &str = "%a";

/// Formats the short human-readable texts attached to timeline blocks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct TimeLabelFormatter {
    zone: LocalZone,
}

impl TimeLabelFormatter {
    #[must_use]
    pub fn new(zone: impl Into<LocalZone>) -> Self {
        Self { zone: zone.into() }
    }

    #[must_use]
    pub fn zone(self) -> LocalZone {
        self.zone
    }

    #[must_use]
    pub fn clock(self, instant: DateTime<Utc>) -> String {
        format_local(instant, self.zone, CLOCK_PATTERN)
    }

    #[must_use]
    pub fn date(self, instant: DateTime<Utc>) -> String {
        format_local(instant, self.zone, DATE_PATTERN)
    }

    #[must_use]
    pub fn hour(self, instant: DateTime<Utc>) -> String {
        format_local(instant, self.zone, HOUR_PATTERN)
    }

    #[must_use]
    pub fn weekday(self, instant: DateTime<Utc>) -> String {
        format_local(instant, self.zone, WEEKDAY_PATTERN)
    }

    /// `"{name} (HH:MM - HH:MM)"`
    #[must_use]
    pub fn span_title(self, name: &str, interval: TimeInterval) -> String {
        format!(
            "{name} ({} - {})",
            self.clock(interval.start()),
            self.clock(interval.end())
        )
    }

    /// `"{name} (Started HH:MM)"`
    #[must_use]
    pub fn started_title(self, name: &str, start: DateTime<Utc>) -> String {
        format!("{name} (Started {})", self.clock(start))
    }

    #[must_use]
    pub fn unavailable_title(self, interval: TimeInterval) -> String {
        format!(
            "Unavailable: {} - {}",
            self.clock(interval.start()),
            self.clock(interval.end())
        )
    }

    #[must_use]
    pub fn range_caption(self, start: DateTime<Utc>, end: DateTime<Utc>) -> String {
        format!("{} - {}", self.date(start), self.date(end))
    }
}
