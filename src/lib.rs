//! print-gantt: timeline projection engine for a 3D-printer job dashboard.
//!
//! Turns scheduled jobs, unavailability windows, print history and an
//! unknown-print sentinel into paginated, clipped screen-space lanes with a
//! live "now" marker. Persistence, transport and drawing stay with the host.

pub mod api;
pub mod core;
pub mod error;
pub mod interaction;
pub mod render;
pub mod telemetry;

pub use api::{TimelineConfig, TimelineEngine};
pub use error::{GanttError, GanttResult};
