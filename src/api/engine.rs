use tracing::debug;

use crate::core::{
    Granularity, TimelineSnapshot, ViewportState, VisibleRange, resolve_visible_range_in,
};
use crate::error::GanttResult;
use crate::interaction::Navigator;
use crate::render::{NowMarker, TimelineFrame};

use super::{
    Clock, FrameRequestId, FrameScheduler, InvalidationLevel, NowMarkerTicker, SystemClock,
    TickOutcome, TimelineConfig, render,
};

/// Stateful timeline view: navigation, latest snapshot and repaint tracking.
///
/// The viewport state is the only thing that survives across renders; every
/// frame is derived from scratch from it, the snapshot and the clock.
#[derive(Debug)]
pub struct TimelineEngine<C: Clock = SystemClock> {
    config: TimelineConfig,
    navigator: Navigator,
    snapshot: TimelineSnapshot,
    clock: C,
    pending: InvalidationLevel,
}

impl TimelineEngine<SystemClock> {
    pub fn new(config: TimelineConfig) -> GanttResult<Self> {
        Self::with_clock(config, SystemClock)
    }
}

impl<C: Clock> TimelineEngine<C> {
    pub fn with_clock(config: TimelineConfig, clock: C) -> GanttResult<Self> {
        let config = config.validate()?;
        let navigator = Navigator::new(ViewportState::today(config.initial_granularity));
        Ok(Self {
            config,
            navigator,
            snapshot: TimelineSnapshot::default(),
            clock,
            pending: InvalidationLevel::Full,
        })
    }

    #[must_use]
    pub fn config(&self) -> &TimelineConfig {
        &self.config
    }

    #[must_use]
    pub fn clock(&self) -> &C {
        &self.clock
    }

    #[must_use]
    pub fn snapshot(&self) -> &TimelineSnapshot {
        &self.snapshot
    }

    #[must_use]
    pub fn viewport_state(&self) -> ViewportState {
        self.navigator.state()
    }

    #[must_use]
    pub fn visible_range(&self) -> VisibleRange {
        resolve_visible_range_in(
            self.viewport_state(),
            self.clock.now(),
            self.config.local_zone(),
        )
    }

    #[must_use]
    pub fn now_marker(&self) -> Option<NowMarker> {
        NowMarker::locate(self.clock.now(), self.visible_range())
    }

    pub fn set_snapshot(&mut self, snapshot: TimelineSnapshot) {
        self.snapshot = snapshot;
        self.invalidate(InvalidationLevel::Full);
    }

    /// Replaces the snapshot from a backend JSON payload.
    ///
    /// On a malformed payload the previous snapshot is kept.
    pub fn ingest_payload_json(&mut self, input: &str) -> GanttResult<()> {
        let snapshot = TimelineSnapshot::from_json_payload(input, &self.config)?;
        self.set_snapshot(snapshot);
        Ok(())
    }

    pub fn set_granularity(&mut self, granularity: Granularity) -> ViewportState {
        let before = self.viewport_state();
        let after = self.navigator.set_granularity(granularity);
        self.invalidate_if_moved(before, after)
    }

    pub fn page_back(&mut self) -> ViewportState {
        let before = self.viewport_state();
        let after = self.navigator.page_back();
        self.invalidate_if_moved(before, after)
    }

    pub fn page_forward(&mut self) -> ViewportState {
        let before = self.viewport_state();
        let after = self.navigator.page_forward();
        self.invalidate_if_moved(before, after)
    }

    pub fn reset_to_today(&mut self) -> ViewportState {
        let before = self.viewport_state();
        let after = self.navigator.reset_to_today();
        self.invalidate_if_moved(before, after)
    }

    #[must_use]
    pub fn pending_invalidation(&self) -> InvalidationLevel {
        self.pending
    }

    pub fn invalidate(&mut self, level: InvalidationLevel) {
        self.pending = self.pending.max(level);
    }

    /// Builds a frame for the current state and clears pending invalidation.
    pub fn render(&mut self) -> TimelineFrame {
        let frame = render(
            self.viewport_state(),
            &self.snapshot,
            self.clock.now(),
            &self.config,
        );
        self.pending = InvalidationLevel::None;
        frame
    }

    pub fn render_if_invalidated(&mut self) -> Option<TimelineFrame> {
        if self.pending == InvalidationLevel::None {
            return None;
        }
        Some(self.render())
    }

    /// Starts a now-marker ticker for this view on the host scheduler.
    #[must_use]
    pub fn mount<S: FrameScheduler>(&self, scheduler: S) -> NowMarkerTicker<S> {
        debug!(viewport = ?self.viewport_state(), "timeline view mounted");
        NowMarkerTicker::start(scheduler)
    }

    /// Feeds one display-refresh callback to `ticker`.
    pub fn tick_now_marker<S: FrameScheduler>(
        &mut self,
        ticker: &mut NowMarkerTicker<S>,
        request: FrameRequestId,
    ) -> TickOutcome {
        let outcome = ticker.on_frame(request, self.visible_range(), self.clock.now());
        if matches!(outcome, TickOutcome::Updated(_)) {
            self.invalidate(InvalidationLevel::NowMarker);
        }
        outcome
    }

    fn invalidate_if_moved(&mut self, before: ViewportState, after: ViewportState) -> ViewportState {
        if before != after {
            self.invalidate(InvalidationLevel::Full);
        }
        after
    }
}
