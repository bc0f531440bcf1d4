use chrono::TimeDelta;
use serde::{Deserialize, Serialize};
use smallvec::{SmallVec, smallvec};
use tracing::trace;

use crate::core::{
    HistoryEntry, HistoryStatus, IntervalProjection, ScheduledEntry, TimeInterval,
    TimelineSnapshot, UnavailabilityWindow, UnknownPrintMarker, VisibleRange, project_interval,
};
use crate::render::{LaneKind, LaneRole, TimeLabelFormatter};

/// Styling classification attached to a block; carries no behavior.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BlockTag {
    Completed,
    Printing,
    Spans,
}

/// The entity a block was projected from.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum BlockSource {
    Unavailability(UnavailabilityWindow),
    History(HistoryEntry),
    UnknownPrint(UnknownPrintMarker),
    Scheduled(ScheduledEntry),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProjectedBlock {
    pub left_percent: f64,
    pub width_percent: Option<f64>,
    pub clipped_right: bool,
    pub role: LaneRole,
    pub tags: SmallVec<[BlockTag; 2]>,
    pub label: String,
    pub title: String,
    pub thumbnail: Option<String>,
    pub source: BlockSource,
}

impl ProjectedBlock {
    #[must_use]
    pub fn projection(&self) -> IntervalProjection {
        IntervalProjection {
            left_percent: self.left_percent,
            width_percent: self.width_percent,
            clipped_right: self.clipped_right,
        }
    }

    #[must_use]
    pub fn has_tag(&self, tag: BlockTag) -> bool {
        self.tags.contains(&tag)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Lane {
    pub kind: LaneKind,
    pub label: String,
    pub blocks: Vec<ProjectedBlock>,
}

/// Inputs to lane assembly that do not come from the snapshot.
#[derive(Debug, Clone, PartialEq)]
pub struct AssemblyOptions {
    pub formatter: TimeLabelFormatter,
    pub unknown_print_fallback: TimeDelta,
    pub unknown_print_label: String,
}

impl Default for AssemblyOptions {
    fn default() -> Self {
        Self {
            formatter: TimeLabelFormatter::default(),
            unknown_print_fallback: TimeDelta::hours(1),
            unknown_print_label: "Unknown Print".to_owned(),
        }
    }
}

/// Builds the ordered lanes for one render pass.
///
/// Entities that do not overlap `range` are dropped. Within a lane, blocks
/// follow [`LaneKind::roles`] so later roles stack above earlier ones; each
/// role keeps the order its entities arrived in.
#[must_use]
pub fn assemble_lanes(
    snapshot: &TimelineSnapshot,
    range: VisibleRange,
    options: &AssemblyOptions,
) -> Vec<Lane> {
    LaneKind::ORDER
        .iter()
        .map(|&kind| {
            let blocks: Vec<ProjectedBlock> = kind
                .roles()
                .iter()
                .flat_map(|&role| project_role(role, snapshot, range, options))
                .collect();
            trace!(lane = ?kind, blocks = blocks.len(), "assembled lane");
            Lane {
                kind,
                label: kind.label().to_owned(),
                blocks,
            }
        })
        .collect()
}

fn project_role(
    role: LaneRole,
    snapshot: &TimelineSnapshot,
    range: VisibleRange,
    options: &AssemblyOptions,
) -> Vec<ProjectedBlock> {
    let formatter = options.formatter;
    match role {
        LaneRole::Unavailability => snapshot
            .unavailability
            .iter()
            .filter_map(|window| {
                place(window.interval, range, || BlockDraft {
                    role,
                    tags: SmallVec::new(),
                    label: LaneKind::Unavailability.label().to_owned(),
                    title: formatter.unavailable_title(window.interval),
                    thumbnail: None,
                    source: BlockSource::Unavailability(window.clone()),
                })
            })
            .collect(),
        LaneRole::History => snapshot
            .history
            .iter()
            .filter_map(|entry| {
                place(entry.interval, range, || BlockDraft {
                    role,
                    tags: match entry.status {
                        HistoryStatus::Completed => smallvec![BlockTag::Completed],
                        HistoryStatus::Printing => smallvec![BlockTag::Printing],
                    },
                    label: entry.label.clone(),
                    title: if entry.end_is_estimate {
                        formatter.started_title(&entry.label, entry.interval.start())
                    } else {
                        formatter.span_title(&entry.label, entry.interval)
                    },
                    thumbnail: entry.thumbnail.clone(),
                    source: BlockSource::History(entry.clone()),
                })
            })
            .collect(),
        LaneRole::UnknownPrint => snapshot
            .unknown_print
            .iter()
            .filter_map(|marker| {
                let interval = marker.resolve_interval(options.unknown_print_fallback);
                place(interval, range, || {
                    let label = marker.label_or(&options.unknown_print_label).to_owned();
                    BlockDraft {
                        role,
                        tags: smallvec![BlockTag::Printing],
                        title: formatter.started_title(&label, marker.start),
                        label,
                        thumbnail: None,
                        source: BlockSource::UnknownPrint(marker.clone()),
                    }
                })
            })
            .collect(),
        LaneRole::Scheduled => snapshot
            .scheduled
            .iter()
            .filter_map(|entry| {
                place(entry.interval, range, || BlockDraft {
                    role,
                    tags: if entry.spans_unavailability {
                        smallvec![BlockTag::Spans]
                    } else {
                        SmallVec::new()
                    },
                    label: entry.label.clone(),
                    title: formatter.span_title(&entry.label, entry.interval),
                    thumbnail: entry.thumbnail.clone(),
                    source: BlockSource::Scheduled(entry.clone()),
                })
            })
            .collect(),
    }
}

struct BlockDraft {
    role: LaneRole,
    tags: SmallVec<[BlockTag; 2]>,
    label: String,
    title: String,
    thumbnail: Option<String>,
    source: BlockSource,
}

fn place(
    interval: TimeInterval,
    range: VisibleRange,
    draft: impl FnOnce() -> BlockDraft,
) -> Option<ProjectedBlock> {
    let projection = project_interval(interval, range)?;
    let draft = draft();
    Some(ProjectedBlock {
        left_percent: projection.left_percent,
        width_percent: projection.width_percent,
        clipped_right: projection.clipped_right,
        role: draft.role,
        tags: draft.tags,
        label: draft.label,
        title: draft.title,
        thumbnail: draft.thumbnail,
        source: draft.source,
    })
}
