use chrono::{DateTime, TimeDelta, Utc};
use serde::{Deserialize, Serialize};

use crate::core::{Granularity, VisibleRange};
use crate::render::TimeLabelFormatter;

const HOURS_PER_DAY: u32 = 24;

/// One hour-wide header cell above the lanes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HeaderCell {
    pub index: u32,
    pub start: DateTime<Utc>,
    pub label: Option<String>,
}

/// Builds one header cell per visible hour.
///
/// Day view labels every hour with its two-digit local hour. Week view only
/// labels the first hour of each 24-hour run, with the short weekday name.
/// Cells stop at `range.end`.
#[must_use]
pub fn header_cells(
    range: VisibleRange,
    granularity: Granularity,
    formatter: TimeLabelFormatter,
) -> Vec<HeaderCell> {
    (0..range.hour_count)
        .map_while(|index| {
            let start = range
                .start
                .checked_add_signed(TimeDelta::hours(i64::from(index)))
                .filter(|start| *start < range.end)?;
            let label = match granularity {
                Granularity::Day => Some(formatter.hour(start)),
                Granularity::Week if index % HOURS_PER_DAY == 0 => Some(formatter.weekday(start)),
                Granularity::Week => None,
            };
            Some(HeaderCell {
                index,
                start,
                label,
            })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use chrono::{TimeZone, Utc};

    use super::header_cells;
    use crate::core::{Granularity, ViewportState, resolve_visible_range};
    use crate::render::TimeLabelFormatter;

    #[test]
    fn day_header_labels_every_hour() {
        let now = Utc.with_ymd_and_hms(2024, 1, 10, 15, 20, 0).unwrap();
        let range = resolve_visible_range(ViewportState::today(Granularity::Day), now);
        let cells = header_cells(range, Granularity::Day, TimeLabelFormatter::default());

        assert_eq!(cells.len(), 24);
        assert_eq!(cells[0].label.as_deref(), Some("15"));
        assert_eq!(cells[9].label.as_deref(), Some("00"));
        assert_eq!(cells[23].label.as_deref(), Some("14"));
    }

    #[test]
    fn week_header_labels_each_day_once() {
        let now = Utc.with_ymd_and_hms(2024, 1, 10, 15, 20, 0).unwrap();
        let range = resolve_visible_range(ViewportState::today(Granularity::Week), now);
        let cells = header_cells(range, Granularity::Week, TimeLabelFormatter::default());

        let labels: Vec<&str> = cells.iter().filter_map(|c| c.label.as_deref()).collect();
        assert_eq!(cells.len(), 168);
        assert_eq!(labels, ["Wed", "Thu", "Fri", "Sat", "Sun", "Mon", "Tue"]);
    }
}
