//! Host-facing surface: the stateful engine, its configuration, snapshot
//! ingestion and the now-marker lifecycle.

mod engine;
mod engine_config;
mod frame_builder;
mod invalidation;
mod json_contract;
mod now_marker_ticker;
mod snapshot_ingest;

pub use engine::TimelineEngine;
pub use engine_config::TimelineConfig;
pub use frame_builder::render;
pub use invalidation::InvalidationLevel;
pub use json_contract::{TIMELINE_FRAME_JSON_SCHEMA_V1, TimelineFrameJsonContractV1};
pub use now_marker_ticker::{
    Clock, FrameRequestId, FrameScheduler, ManualClock, NowMarkerTicker, SystemClock, TickOutcome,
};
pub use snapshot_ingest::{
    JobRecord, PlateRecord, ScheduleRecord, SnapshotPayload, UnavailabilityRecord,
    UnknownPrintRecord,
};
