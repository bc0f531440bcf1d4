use chrono::{FixedOffset, Offset, TimeDelta, Utc};
use serde::{Deserialize, Serialize};

use crate::core::{Granularity, LocalZone};
use crate::error::{GanttError, GanttResult};
use crate::render::{AssemblyOptions, TimeLabelFormatter};

const MAX_UTC_OFFSET_MINUTES: u32 = 24 * 60 - 1;

/// Public engine bootstrap configuration.
///
/// Every field has a serde default so hosts can persist partial configs.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TimelineConfig {
    #[serde(default)]
    pub initial_granularity: Granularity,
    #[serde(default = "default_day_cell_width_px")]
    pub day_cell_width_px: f64,
    #[serde(default = "default_week_cell_width_px")]
    pub week_cell_width_px: f64,
    #[serde(default)]
    pub utc_offset_minutes: i32,
    /// Follow the host's zone rules instead of `utc_offset_minutes`.
    #[serde(default)]
    pub use_system_time_zone: bool,
    #[serde(default = "default_fallback_duration_secs")]
    pub history_fallback_duration_secs: i64,
    #[serde(default = "default_fallback_duration_secs")]
    pub unknown_print_fallback_secs: i64,
    #[serde(default = "default_unknown_print_label")]
    pub unknown_print_label: String,
    #[serde(default = "default_missing_label")]
    pub missing_label: String,
}

impl Default for TimelineConfig {
    fn default() -> Self {
        Self {
            initial_granularity: Granularity::Day,
            day_cell_width_px: default_day_cell_width_px(),
            week_cell_width_px: default_week_cell_width_px(),
            utc_offset_minutes: 0,
            use_system_time_zone: false,
            history_fallback_duration_secs: default_fallback_duration_secs(),
            unknown_print_fallback_secs: default_fallback_duration_secs(),
            unknown_print_label: default_unknown_print_label(),
            missing_label: default_missing_label(),
        }
    }
}

impl TimelineConfig {
    #[must_use]
    pub fn with_initial_granularity(mut self, granularity: Granularity) -> Self {
        self.initial_granularity = granularity;
        self
    }

    #[must_use]
    pub fn with_utc_offset_minutes(mut self, minutes: i32) -> Self {
        self.utc_offset_minutes = minutes;
        self
    }

    #[must_use]
    pub fn with_system_time_zone(mut self, enabled: bool) -> Self {
        self.use_system_time_zone = enabled;
        self
    }

    pub fn from_json_str(input: &str) -> GanttResult<Self> {
        let config: Self = serde_json::from_str(input)
            .map_err(|e| GanttError::InvalidConfig(format!("failed to parse config json: {e}")))?;
        config.validate()
    }

    pub fn validate(self) -> GanttResult<Self> {
        for (value, name) in [
            (self.day_cell_width_px, "day_cell_width_px"),
            (self.week_cell_width_px, "week_cell_width_px"),
        ] {
            if !value.is_finite() || value <= 0.0 {
                return Err(GanttError::InvalidConfig(format!(
                    "`{name}` must be finite and > 0"
                )));
            }
        }

        for (value, name) in [
            (
                self.history_fallback_duration_secs,
                "history_fallback_duration_secs",
            ),
            (self.unknown_print_fallback_secs, "unknown_print_fallback_secs"),
        ] {
            if value <= 0 || TimeDelta::try_seconds(value).is_none() {
                return Err(GanttError::InvalidConfig(format!(
                    "`{name}` must be a positive representable duration"
                )));
            }
        }

        if self.utc_offset_minutes.unsigned_abs() > MAX_UTC_OFFSET_MINUTES {
            return Err(GanttError::InvalidConfig(format!(
                "utc offset must stay within +/-{MAX_UTC_OFFSET_MINUTES} minutes, got {}",
                self.utc_offset_minutes
            )));
        }

        Ok(self)
    }

    #[must_use]
    pub fn cell_width_px(&self, granularity: Granularity) -> f64 {
        match granularity {
            Granularity::Day => self.day_cell_width_px,
            Granularity::Week => self.week_cell_width_px,
        }
    }

    /// Falls back to UTC when the configured offset is out of range.
    #[must_use]
    pub fn local_offset(&self) -> FixedOffset {
        FixedOffset::east_opt(self.utc_offset_minutes.saturating_mul(60))
            .unwrap_or_else(|| Utc.fix())
    }

    #[must_use]
    pub fn local_zone(&self) -> LocalZone {
        if self.use_system_time_zone {
            LocalZone::System
        } else {
            LocalZone::Fixed(self.local_offset())
        }
    }

    #[must_use]
    pub fn history_fallback_duration(&self) -> TimeDelta {
        seconds_or_hour(self.history_fallback_duration_secs)
    }

    #[must_use]
    pub fn unknown_print_fallback(&self) -> TimeDelta {
        seconds_or_hour(self.unknown_print_fallback_secs)
    }

    #[must_use]
    pub fn formatter(&self) -> TimeLabelFormatter {
        TimeLabelFormatter::new(self.local_zone())
    }

    #[must_use]
    pub fn assembly_options(&self) -> AssemblyOptions {
        AssemblyOptions {
            formatter: self.formatter(),
            unknown_print_fallback: self.unknown_print_fallback(),
            unknown_print_label: self.unknown_print_label.clone(),
        }
    }
}

fn seconds_or_hour(seconds: i64) -> TimeDelta {
    TimeDelta::try_seconds(seconds)
        .filter(|delta| *delta > TimeDelta::zero())
        .unwrap_or(TimeDelta::hours(1))
}

fn default_day_cell_width_px() -> f64 {
    40.0
}

fn default_week_cell_width_px() -> f64 {
    20.0
}

fn default_fallback_duration_secs() -> i64 {
    3600
}

fn default_unknown_print_label() -> String {
    "Unknown Print".to_owned()
}

fn default_missing_label() -> String {
    "Unknown".to_owned()
}
