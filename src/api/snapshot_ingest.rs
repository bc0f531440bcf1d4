use chrono::{DateTime, TimeDelta, Utc};
use indexmap::IndexMap;
use serde::{Deserialize, Deserializer, Serialize};
use tracing::{debug, trace, warn};

use crate::core::{
    HistoryEntry, HistoryStatus, ScheduledEntry, TimeInterval, TimelineSnapshot,
    UnavailabilityWindow, UnknownPrintMarker, parse_timestamp,
};
use crate::error::{GanttError, GanttResult};

use super::TimelineConfig;

const JOB_STATUS_COMPLETED: &str = "completed";
const JOB_STATUS_PRINTING: &str = "printing";

/// Backend data snapshot as delivered over the wire.
///
/// Missing or `null` arrays read as empty; unknown fields are ignored.
/// Timestamps are optional on the wire so a single incomplete record is
/// dropped during conversion instead of failing the whole payload.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct SnapshotPayload {
    #[serde(default, deserialize_with = "null_as_empty")]
    pub schedule: Vec<ScheduleRecord>,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub unavailability_windows: Vec<UnavailabilityRecord>,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub jobs: Vec<JobRecord>,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub plates: Vec<PlateRecord>,
    #[serde(default)]
    pub unknown_print: Option<UnknownPrintRecord>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScheduleRecord {
    #[serde(default)]
    pub plate_name: Option<String>,
    #[serde(default)]
    pub scheduled_start: Option<String>,
    #[serde(default)]
    pub scheduled_end: Option<String>,
    #[serde(default)]
    pub thumbnail_path: Option<String>,
    #[serde(default)]
    pub spans_unavailability: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UnavailabilityRecord {
    pub id: String,
    #[serde(default)]
    pub start: Option<String>,
    #[serde(default)]
    pub end: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct JobRecord {
    #[serde(default)]
    pub id: String,
    #[serde(default)]
    pub plate_id: Option<String>,
    pub status: String,
    #[serde(default)]
    pub started_at: Option<String>,
    #[serde(default)]
    pub ended_at: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlateRecord {
    pub id: String,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub estimated_duration_seconds: Option<i64>,
    #[serde(default)]
    pub thumbnail_path: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UnknownPrintRecord {
    #[serde(default)]
    pub started_at: Option<String>,
    #[serde(default)]
    pub end_time: Option<String>,
    #[serde(default)]
    pub task_name: Option<String>,
}

impl SnapshotPayload {
    pub fn from_json_str(input: &str) -> GanttResult<Self> {
        serde_json::from_str(input).map_err(|e| {
            GanttError::InvalidData(format!("failed to parse snapshot payload json: {e}"))
        })
    }
}

impl TimelineSnapshot {
    /// Parses a backend JSON payload and converts it in one step.
    pub fn from_json_payload(input: &str, config: &TimelineConfig) -> GanttResult<Self> {
        let payload = SnapshotPayload::from_json_str(input)?;
        Ok(Self::from_payload(&payload, config))
    }

    /// Converts wire records into timeline entities.
    ///
    /// Records with unparsable timestamps or an end before their start are
    /// logged and skipped; the rest of the snapshot is kept.
    #[must_use]
    pub fn from_payload(payload: &SnapshotPayload, config: &TimelineConfig) -> Self {
        let plates: IndexMap<&str, &PlateRecord> = payload
            .plates
            .iter()
            .map(|plate| (plate.id.as_str(), plate))
            .collect();

        let scheduled: Vec<ScheduledEntry> = payload
            .schedule
            .iter()
            .filter_map(|record| scheduled_entry(record, config))
            .collect();
        let unavailability: Vec<UnavailabilityWindow> = payload
            .unavailability_windows
            .iter()
            .filter_map(unavailability_window)
            .collect();
        let history: Vec<HistoryEntry> = payload
            .jobs
            .iter()
            .filter_map(|job| history_entry(job, &plates, config))
            .collect();
        let unknown_print = payload.unknown_print.as_ref().and_then(unknown_print_marker);

        debug!(
            scheduled = scheduled.len(),
            unavailability = unavailability.len(),
            history = history.len(),
            unknown_print = unknown_print.is_some(),
            "ingested timeline snapshot"
        );

        Self {
            scheduled,
            unavailability,
            history,
            unknown_print,
        }
    }
}

fn scheduled_entry(record: &ScheduleRecord, config: &TimelineConfig) -> Option<ScheduledEntry> {
    let interval = record_interval(
        "scheduled_start",
        record.scheduled_start.as_deref(),
        "scheduled_end",
        record.scheduled_end.as_deref(),
    )?;
    let label = label_or(record.plate_name.as_deref(), &config.missing_label);
    Some(ScheduledEntry {
        interval,
        label,
        thumbnail: record.thumbnail_path.clone(),
        spans_unavailability: record.spans_unavailability,
    })
}

fn unavailability_window(record: &UnavailabilityRecord) -> Option<UnavailabilityWindow> {
    let interval = record_interval("start", record.start.as_deref(), "end", record.end.as_deref())?;
    Some(UnavailabilityWindow::new(record.id.clone(), interval))
}

fn history_entry(
    job: &JobRecord,
    plates: &IndexMap<&str, &PlateRecord>,
    config: &TimelineConfig,
) -> Option<HistoryEntry> {
    let status = match job.status.as_str() {
        JOB_STATUS_COMPLETED => HistoryStatus::Completed,
        JOB_STATUS_PRINTING => HistoryStatus::Printing,
        _ => return None,
    };
    let Some(started_at) = job.started_at.as_deref() else {
        trace!(job = %job.id, "skipping history job without start time");
        return None;
    };
    let start = parse_or_warn("started_at", started_at)?;
    let plate = job
        .plate_id
        .as_deref()
        .and_then(|plate_id| plates.get(plate_id).copied());

    let (interval, end_is_estimate) = match job.ended_at.as_deref() {
        Some(ended_at) => {
            let end = parse_or_warn("ended_at", ended_at)?;
            (checked_interval(start, end)?, false)
        }
        None => {
            let estimate = plate
                .and_then(|plate| plate.estimated_duration_seconds)
                .filter(|seconds| *seconds > 0)
                .and_then(TimeDelta::try_seconds)
                .unwrap_or_else(|| config.history_fallback_duration());
            (TimeInterval::starting_at(start, estimate), true)
        }
    };

    Some(HistoryEntry {
        interval,
        label: label_or(
            plate.and_then(|plate| plate.name.as_deref()),
            &config.missing_label,
        ),
        status,
        thumbnail: plate.and_then(|plate| plate.thumbnail_path.clone()),
        end_is_estimate,
    })
}

fn unknown_print_marker(record: &UnknownPrintRecord) -> Option<UnknownPrintMarker> {
    let start = required_timestamp("started_at", record.started_at.as_deref())?;
    // An unreadable end leaves the print open-ended rather than hiding it.
    let end = record
        .end_time
        .as_deref()
        .and_then(|end_time| parse_or_warn("end_time", end_time));
    Some(UnknownPrintMarker {
        start,
        end,
        label: record
            .task_name
            .clone()
            .filter(|name| !name.trim().is_empty()),
    })
}

fn record_interval(
    start_field: &'static str,
    start: Option<&str>,
    end_field: &'static str,
    end: Option<&str>,
) -> Option<TimeInterval> {
    let start = required_timestamp(start_field, start)?;
    let end = required_timestamp(end_field, end)?;
    checked_interval(start, end)
}

fn required_timestamp(field: &'static str, value: Option<&str>) -> Option<DateTime<Utc>> {
    let Some(value) = value else {
        warn!(field, "dropping snapshot record without timestamp");
        return None;
    };
    parse_or_warn(field, value)
}

fn checked_interval(start: DateTime<Utc>, end: DateTime<Utc>) -> Option<TimeInterval> {
    TimeInterval::new(start, end)
        .map_err(|err| warn!(%err, "dropping snapshot record"))
        .ok()
}

fn parse_or_warn(field: &'static str, value: &str) -> Option<DateTime<Utc>> {
    parse_timestamp(field, value)
        .map_err(|err| warn!(%err, "dropping unparsable timestamp"))
        .ok()
}

fn label_or(label: Option<&str>, fallback: &str) -> String {
    label
        .filter(|label| !label.trim().is_empty())
        .unwrap_or(fallback)
        .to_owned()
}

fn null_as_empty<'de, D, T>(deserializer: D) -> Result<Vec<T>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    Ok(Option::<Vec<T>>::deserialize(deserializer)?.unwrap_or_default())
}
