use chrono::{DateTime, Utc};
use tracing::trace;

use crate::core::{TimelineSnapshot, ViewportState, resolve_visible_range_in};
use crate::render::{NowMarker, TimelineFrame, assemble_lanes, header_cells};

use super::TimelineConfig;

/// Projects a snapshot for the given viewport at instant `now`.
///
/// Pure: identical inputs produce identical frames.
#[must_use]
pub fn render(
    viewport: ViewportState,
    snapshot: &TimelineSnapshot,
    now: DateTime<Utc>,
    config: &TimelineConfig,
) -> TimelineFrame {
    let formatter = config.formatter();
    let visible_range = resolve_visible_range_in(viewport, now, formatter.zone());
    let lanes = assemble_lanes(snapshot, visible_range, &config.assembly_options());
    let header = header_cells(visible_range, viewport.granularity, formatter);
    let chart_width_px =
        f64::from(visible_range.hour_count) * config.cell_width_px(viewport.granularity);

    let frame = TimelineFrame {
        viewport,
        visible_range,
        caption: formatter.range_caption(visible_range.start, visible_range.end),
        chart_width_px,
        header,
        lanes,
        now_marker: NowMarker::locate(now, visible_range),
    };
    trace!(
        granularity = ?viewport.granularity,
        offset = viewport.offset,
        blocks = frame.block_count(),
        "rendered timeline frame"
    );
    frame
}
