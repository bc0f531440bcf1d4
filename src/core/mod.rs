pub mod primitives;
pub mod projection;
pub mod time_window;
pub mod types;

pub use primitives::{LocalZone, floor_to_hour, parse_timestamp};
pub use projection::{IntervalProjection, project_instant, project_interval};
pub use time_window::{
    Granularity, ViewportState, VisibleRange, resolve_visible_range, resolve_visible_range_in,
};
pub use types::{
    HistoryEntry, HistoryStatus, ScheduledEntry, TimeInterval, TimelineSnapshot,
    UnavailabilityWindow, UnknownPrintMarker,
};
