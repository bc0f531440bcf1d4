use chrono::{DateTime, FixedOffset, Local, NaiveDateTime, Offset, TimeZone, Utc};

use crate::error::{GanttError, GanttResult};

pub const MILLIS_PER_HOUR: i64 = 3_600_000;

/// Wall-clock zone used for hour flooring and label text.
///
/// `System` follows the host's zone rules, so its offset may change across
/// daylight-saving transitions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LocalZone {
    Fixed(FixedOffset),
    System,
}

impl Default for LocalZone {
    fn default() -> Self {
        Self::Fixed(Utc.fix())
    }
}

impl From<FixedOffset> for LocalZone {
    fn from(offset: FixedOffset) -> Self {
        Self::Fixed(offset)
    }
}

impl LocalZone {
    /// Offset in effect at `instant`.
    #[must_use]
    pub fn offset_at(self, instant: DateTime<Utc>) -> FixedOffset {
        match self {
            Self::Fixed(offset) => offset,
            Self::System => Local.offset_from_utc_datetime(&instant.naive_utc()).fix(),
        }
    }
}

/// Parses a backend timestamp into a UTC instant.
///
/// RFC 3339 values with any offset are accepted. Values without an offset
/// are read as UTC.
pub fn parse_timestamp(field: &'static str, value: &str) -> GanttResult<DateTime<Utc>> {
    let trimmed = value.trim();
    if let Ok(parsed) = DateTime::parse_from_rfc3339(trimmed) {
        return Ok(parsed.with_timezone(&Utc));
    }

    NaiveDateTime::parse_from_str(trimmed, "%Y-%m-%dT%H:%M:%S%.f")
        .map(|naive| naive.and_utc())
        .map_err(|_| GanttError::InvalidTimestamp {
            field,
            value: value.to_owned(),
        })
}

/// Floors an instant to the start of its local hour in `zone`.
#[must_use]
pub fn floor_to_hour(instant: DateTime<Utc>, zone: impl Into<LocalZone>) -> DateTime<Utc> {
    let offset = zone.into().offset_at(instant);
    let offset_ms = i64::from(offset.local_minus_utc()) * 1000;
    let local_ms = instant.timestamp_millis().saturating_add(offset_ms);
    let floored = local_ms - local_ms.rem_euclid(MILLIS_PER_HOUR);
    utc_from_millis(floored.saturating_sub(offset_ms))
}

/// Converts epoch milliseconds to an instant, pinning to chrono's bounds.
#[must_use]
pub fn utc_from_millis(millis: i64) -> DateTime<Utc> {
    DateTime::from_timestamp_millis(millis).unwrap_or(if millis < 0 {
        DateTime::<Utc>::MIN_UTC
    } else {
        DateTime::<Utc>::MAX_UTC
    })
}

#[must_use]
pub fn millis_between(from: DateTime<Utc>, to: DateTime<Utc>) -> i64 {
    (to - from).num_milliseconds()
}

#[must_use]
pub fn format_local(instant: DateTime<Utc>, zone: LocalZone, pattern: &str) -> String {
    instant
        .with_timezone(&zone.offset_at(instant))
        .format(pattern)
        .to_string()
}
