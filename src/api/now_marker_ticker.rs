use std::cell::Cell;
use std::rc::Rc;

use chrono::{DateTime, TimeDelta, Utc};
use serde::{Deserialize, Serialize};
use tracing::{debug, trace};

use crate::core::VisibleRange;
use crate::render::NowMarker;

/// Source of wall-clock time for the engine.
pub trait Clock {
    fn now(&self) -> DateTime<Utc>;
}

#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

/// Host-driven clock. Clones share the same instant.
#[derive(Debug, Clone)]
pub struct ManualClock {
    now: Rc<Cell<DateTime<Utc>>>,
}

impl ManualClock {
    #[must_use]
    pub fn new(now: DateTime<Utc>) -> Self {
        Self {
            now: Rc::new(Cell::new(now)),
        }
    }

    pub fn set(&self, now: DateTime<Utc>) {
        self.now.set(now);
    }

    pub fn advance(&self, delta: TimeDelta) {
        let next = self
            .now
            .get()
            .checked_add_signed(delta)
            .unwrap_or(DateTime::<Utc>::MAX_UTC);
        self.now.set(next);
    }
}

impl Clock for ManualClock {
    fn now(&self) -> DateTime<Utc> {
        self.now.get()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct FrameRequestId(pub u64);

/// Host display-refresh primitive: one callback per requested frame.
pub trait FrameScheduler {
    fn request_frame(&mut self) -> FrameRequestId;
    fn cancel_frame(&mut self, id: FrameRequestId);
}

impl<T: FrameScheduler + ?Sized> FrameScheduler for &mut T {
    fn request_frame(&mut self) -> FrameRequestId {
        (**self).request_frame()
    }

    fn cancel_frame(&mut self, id: FrameRequestId) {
        (**self).cancel_frame(id);
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum TickOutcome {
    /// The frame was the pending one; the marker was recomputed.
    Updated(Option<NowMarker>),
    /// The frame id did not match the pending request and was ignored.
    Stale,
}

/// Per-frame now-marker refresh bound to a mounted view.
///
/// Creating the ticker requests the first frame. Each accepted frame
/// recomputes the marker and requests the next one. Dropping the ticker (or
/// calling [`NowMarkerTicker::stop`]) cancels the outstanding request exactly
/// once.
#[derive(Debug)]
pub struct NowMarkerTicker<S: FrameScheduler> {
    scheduler: S,
    pending: Option<FrameRequestId>,
    marker: Option<NowMarker>,
    frames: u64,
}

impl<S: FrameScheduler> NowMarkerTicker<S> {
    #[must_use]
    pub fn start(mut scheduler: S) -> Self {
        let first = scheduler.request_frame();
        debug!(request = first.0, "now marker ticker started");
        Self {
            scheduler,
            pending: Some(first),
            marker: None,
            frames: 0,
        }
    }

    #[must_use]
    pub fn pending_request(&self) -> Option<FrameRequestId> {
        self.pending
    }

    #[must_use]
    pub fn marker(&self) -> Option<NowMarker> {
        self.marker
    }

    #[must_use]
    pub fn frames_processed(&self) -> u64 {
        self.frames
    }

    #[must_use]
    pub fn scheduler(&self) -> &S {
        &self.scheduler
    }

    pub fn on_frame(
        &mut self,
        request: FrameRequestId,
        range: VisibleRange,
        now: DateTime<Utc>,
    ) -> TickOutcome {
        if self.pending != Some(request) {
            trace!(request = request.0, "ignoring stale frame");
            return TickOutcome::Stale;
        }

        self.marker = NowMarker::locate(now, range);
        self.frames += 1;
        self.pending = Some(self.scheduler.request_frame());
        trace!(
            frame = self.frames,
            visible = self.marker.is_some(),
            "now marker refreshed"
        );
        TickOutcome::Updated(self.marker)
    }

    /// Tears the ticker down; equivalent to dropping it.
    pub fn stop(self) {
        drop(self);
    }
}

impl<S: FrameScheduler> Drop for NowMarkerTicker<S> {
    fn drop(&mut self) {
        if let Some(request) = self.pending.take() {
            self.scheduler.cancel_frame(request);
            debug!(
                request = request.0,
                frames = self.frames,
                "now marker ticker stopped"
            );
        }
    }
}
