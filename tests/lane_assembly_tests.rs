use chrono::{DateTime, TimeDelta, TimeZone, Utc};
use print_gantt::core::{
    Granularity, HistoryEntry, ScheduledEntry, TimeInterval, TimelineSnapshot,
    UnavailabilityWindow, UnknownPrintMarker, ViewportState, VisibleRange, resolve_visible_range,
};
use print_gantt::render::{
    AssemblyOptions, BlockSource, BlockTag, LaneKind, LaneRole, assemble_lanes,
};

fn at(day: u32, hour: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 1, day, hour, 0, 0).unwrap()
}

fn interval(start: DateTime<Utc>, end: DateTime<Utc>) -> TimeInterval {
    TimeInterval::new(start, end).expect("valid interval")
}

fn day_range() -> VisibleRange {
    resolve_visible_range(ViewportState::today(Granularity::Day), at(10, 15))
}

fn mixed_snapshot() -> TimelineSnapshot {
    TimelineSnapshot {
        scheduled: vec![
            ScheduledEntry::new("Gear housing", interval(at(10, 16), at(10, 19)))
                .with_thumbnail("/local/printassist/thumbnails/gear.png")
                .spanning_unavailability(true),
            ScheduledEntry::new("Far future", interval(at(14, 0), at(14, 2))),
        ],
        unavailability: vec![UnavailabilityWindow::new(
            "night",
            interval(at(10, 22), at(11, 7)),
        )],
        history: vec![
            HistoryEntry::completed("Benchy", interval(at(10, 12), at(10, 16))),
            HistoryEntry::printing("Bracket", at(10, 14), TimeDelta::hours(3)),
            HistoryEntry::completed("Old", interval(at(8, 1), at(8, 2))),
        ],
        unknown_print: Some(UnknownPrintMarker::new(at(10, 15)).with_end(at(10, 17))),
    }
}

#[test]
fn lanes_come_in_fixed_order_with_labels() {
    let lanes = assemble_lanes(&mixed_snapshot(), day_range(), &AssemblyOptions::default());

    assert_eq!(lanes.len(), 2);
    assert_eq!(lanes[0].kind, LaneKind::Unavailability);
    assert_eq!(lanes[0].label, "Unavailable");
    assert_eq!(lanes[1].kind, LaneKind::Schedule);
    assert_eq!(lanes[1].label, "Print Queue");
}

#[test]
fn schedule_lane_stacks_history_then_unknown_print_then_queue() {
    let lanes = assemble_lanes(&mixed_snapshot(), day_range(), &AssemblyOptions::default());
    let roles: Vec<LaneRole> = lanes[1].blocks.iter().map(|block| block.role).collect();

    assert_eq!(
        roles,
        vec![
            LaneRole::History,
            LaneRole::History,
            LaneRole::UnknownPrint,
            LaneRole::Scheduled,
        ]
    );
}

#[test]
fn stacking_order_ignores_input_order() {
    let mut snapshot = mixed_snapshot();
    snapshot.history.reverse();
    snapshot.scheduled.reverse();

    let lanes = assemble_lanes(&snapshot, day_range(), &AssemblyOptions::default());
    let roles: Vec<LaneRole> = lanes[1].blocks.iter().map(|block| block.role).collect();
    let mut sorted = roles.clone();
    sorted.sort();

    assert_eq!(roles, sorted);
}

#[test]
fn entities_outside_the_range_are_dropped_silently() {
    let lanes = assemble_lanes(&mixed_snapshot(), day_range(), &AssemblyOptions::default());
    let labels: Vec<&str> = lanes[1].blocks.iter().map(|b| b.label.as_str()).collect();

    assert!(!labels.contains(&"Old"));
    assert!(!labels.contains(&"Far future"));
    assert_eq!(lanes[0].blocks.len(), 1);
}

#[test]
fn blocks_carry_styling_tags() {
    let lanes = assemble_lanes(&mixed_snapshot(), day_range(), &AssemblyOptions::default());
    let schedule = &lanes[1].blocks;

    assert!(schedule[0].has_tag(BlockTag::Completed));
    assert!(schedule[1].has_tag(BlockTag::Printing));
    assert!(schedule[2].has_tag(BlockTag::Printing));
    assert!(schedule[3].has_tag(BlockTag::Spans));
    assert!(lanes[0].blocks[0].tags.is_empty());
}

#[test]
fn blocks_carry_titles_and_thumbnails() {
    let lanes = assemble_lanes(&mixed_snapshot(), day_range(), &AssemblyOptions::default());
    let schedule = &lanes[1].blocks;

    assert_eq!(schedule[0].title, "Benchy (12:00 - 16:00)");
    assert_eq!(schedule[1].title, "Bracket (Started 14:00)");
    assert_eq!(schedule[2].label, "Unknown Print");
    assert_eq!(schedule[2].title, "Unknown Print (Started 15:00)");
    assert_eq!(schedule[3].title, "Gear housing (16:00 - 19:00)");
    assert_eq!(
        schedule[3].thumbnail.as_deref(),
        Some("/local/printassist/thumbnails/gear.png")
    );
    assert_eq!(lanes[0].blocks[0].title, "Unavailable: 22:00 - 07:00");
}

#[test]
fn unavailability_block_keeps_window_id_for_removal() {
    let lanes = assemble_lanes(&mixed_snapshot(), day_range(), &AssemblyOptions::default());

    match &lanes[0].blocks[0].source {
        BlockSource::Unavailability(window) => assert_eq!(window.id, "night"),
        other => panic!("unexpected source: {other:?}"),
    }
}

#[test]
fn open_ended_unknown_print_uses_fallback_duration() {
    let snapshot = TimelineSnapshot {
        unknown_print: Some(UnknownPrintMarker::new(at(10, 12)).with_label("mystery.gcode")),
        ..TimelineSnapshot::default()
    };
    let short = AssemblyOptions {
        unknown_print_fallback: TimeDelta::hours(4),
        ..AssemblyOptions::default()
    };

    let hidden = assemble_lanes(&snapshot, day_range(), &AssemblyOptions::default());
    let shown = assemble_lanes(&snapshot, day_range(), &short);

    assert!(hidden[1].blocks.is_empty());
    assert_eq!(shown[1].blocks.len(), 1);
    assert_eq!(shown[1].blocks[0].label, "mystery.gcode");
    assert_eq!(shown[1].blocks[0].left_percent, 0.0);
}

#[test]
fn empty_snapshot_still_yields_both_lanes() {
    let lanes = assemble_lanes(
        &TimelineSnapshot::default(),
        day_range(),
        &AssemblyOptions::default(),
    );

    assert_eq!(lanes.len(), 2);
    assert!(lanes.iter().all(|lane| lane.blocks.is_empty()));
}
