use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::core::{Granularity, ViewportState};

/// Owns the viewport state and applies navigation commands to it.
///
/// Every mutator replaces the state wholesale and returns the new value so the
/// host can persist it or trigger a re-render.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Navigator {
    state: ViewportState,
}

impl Navigator {
    #[must_use]
    pub fn new(state: ViewportState) -> Self {
        Self { state }
    }

    #[must_use]
    pub fn state(self) -> ViewportState {
        self.state
    }

    pub fn set_granularity(&mut self, granularity: Granularity) -> ViewportState {
        self.apply(self.state.with_granularity(granularity), "set granularity")
    }

    pub fn page_back(&mut self) -> ViewportState {
        self.apply(self.state.paged_by(-1), "page back")
    }

    pub fn page_forward(&mut self) -> ViewportState {
        self.apply(self.state.paged_by(1), "page forward")
    }

    pub fn reset_to_today(&mut self) -> ViewportState {
        self.apply(self.state.reset_to_today(), "reset to today")
    }

    fn apply(&mut self, next: ViewportState, action: &'static str) -> ViewportState {
        debug!(
            action,
            granularity = ?next.granularity,
            offset = next.offset,
            "viewport navigation"
        );
        self.state = next;
        next
    }
}
