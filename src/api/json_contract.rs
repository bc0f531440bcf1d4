use serde::{Deserialize, Serialize};

use crate::error::{GanttError, GanttResult};
use crate::render::TimelineFrame;

pub const TIMELINE_FRAME_JSON_SCHEMA_V1: u32 = 1;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TimelineFrameJsonContractV1 {
    pub schema_version: u32,
    pub frame: TimelineFrame,
}

impl TimelineFrame {
    pub fn to_json_pretty(&self) -> GanttResult<String> {
        serde_json::to_string_pretty(self)
            .map_err(|e| GanttError::InvalidData(format!("failed to serialize frame json: {e}")))
    }

    pub fn to_json_contract_v1_pretty(&self) -> GanttResult<String> {
        let payload = TimelineFrameJsonContractV1 {
            schema_version: TIMELINE_FRAME_JSON_SCHEMA_V1,
            frame: self.clone(),
        };
        serde_json::to_string_pretty(&payload).map_err(|e| {
            GanttError::InvalidData(format!("failed to serialize frame contract v1: {e}"))
        })
    }

    /// Accepts either a bare frame or a v1 contract envelope.
    pub fn from_json_compat_str(input: &str) -> GanttResult<Self> {
        if let Ok(frame) = serde_json::from_str::<TimelineFrame>(input) {
            return Ok(frame);
        }
        let payload: TimelineFrameJsonContractV1 = serde_json::from_str(input).map_err(|e| {
            GanttError::InvalidData(format!("failed to parse frame json payload: {e}"))
        })?;
        if payload.schema_version != TIMELINE_FRAME_JSON_SCHEMA_V1 {
            return Err(GanttError::InvalidData(format!(
                "unsupported frame schema version: {}",
                payload.schema_version
            )));
        }
        Ok(payload.frame)
    }
}
