use chrono::{DateTime, Utc};
use thiserror::Error;

pub type GanttResult<T> = Result<T, GanttError>;

#[derive(Debug, Error)]
pub enum GanttError {
    #[error("interval ends before it starts: start={start}, end={end}")]
    NegativeInterval {
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    },

    #[error("invalid timestamp in `{field}`: {value:?}")]
    InvalidTimestamp { field: &'static str, value: String },

    #[error("invalid config: {0}")]
    InvalidConfig(String),

    #[error("invalid data: {0}")]
    InvalidData(String),
}
