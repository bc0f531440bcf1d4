use chrono::{DateTime, TimeDelta, TimeZone, Utc};
use print_gantt::core::{
    Granularity, TimeInterval, ViewportState, VisibleRange, project_interval,
    resolve_visible_range,
};
use proptest::prelude::*;

const TOLERANCE: f64 = 1e-9;

fn base_now() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 1, 10, 15, 0, 0).unwrap()
}

fn range_for(week: bool, offset: i64) -> VisibleRange {
    let granularity = if week {
        Granularity::Week
    } else {
        Granularity::Day
    };
    resolve_visible_range(ViewportState::new(granularity, offset), base_now())
}

fn interval_at(range: VisibleRange, start_ms: i64, len_ms: i64) -> TimeInterval {
    let start = range.start + TimeDelta::milliseconds(start_ms);
    TimeInterval::new(start, start + TimeDelta::milliseconds(len_ms)).expect("valid interval")
}

proptest! {
    #[test]
    fn inside_intervals_stay_within_bounds(
        week in any::<bool>(),
        offset in -500i64..500,
        start_factor in 0.0f64..1.0,
        len_factor in 0.0f64..1.0,
    ) {
        let range = range_for(week, offset);
        let span = range.span_millis();
        let start_ms = (start_factor * span as f64) as i64;
        let len_ms = ((span - start_ms) as f64 * len_factor) as i64;
        let interval = interval_at(range, start_ms, len_ms);

        let projection = project_interval(interval, range);
        if len_ms == 0 && start_ms == 0 {
            prop_assert!(projection.is_none());
        } else {
            let projection = projection.expect("inside interval projects");
            let width = projection.width_percent.expect("unclipped width");
            prop_assert!(!projection.clipped_right);
            prop_assert!((0.0..=100.0).contains(&projection.left_percent));
            prop_assert!((0.0..=100.0).contains(&width));
            prop_assert!(projection.left_percent + width <= 100.0 + TOLERANCE);
        }
    }

    #[test]
    fn intervals_starting_early_and_ending_inside_are_flush_left(
        week in any::<bool>(),
        lead_ms in 1i64..10_000_000_000,
        end_factor in 0.0001f64..1.0,
    ) {
        let range = range_for(week, 0);
        let end_ms = ((range.span_millis() as f64 * end_factor) as i64).max(1);
        let interval = interval_at(range, -lead_ms, lead_ms + end_ms);

        let projection = project_interval(interval, range).expect("overlaps");
        prop_assert_eq!(projection.left_percent, 0.0);
        prop_assert!(!projection.clipped_right);
    }

    #[test]
    fn intervals_ending_late_are_clipped(
        week in any::<bool>(),
        start_factor in -2.0f64..0.9999,
        overshoot_ms in 1i64..10_000_000_000,
    ) {
        let range = range_for(week, 0);
        let span = range.span_millis();
        let start_ms = (start_factor * span as f64) as i64;
        let interval = interval_at(range, start_ms, span - start_ms + overshoot_ms);

        let projection = project_interval(interval, range).expect("overlaps");
        prop_assert!(projection.clipped_right);
        prop_assert!(projection.width_percent.is_none());
    }

    #[test]
    fn intervals_outside_are_dropped(
        week in any::<bool>(),
        before in any::<bool>(),
        gap_ms in 0i64..10_000_000_000,
        len_ms in 0i64..10_000_000_000,
    ) {
        let range = range_for(week, 0);
        let interval = if before {
            interval_at(range, -gap_ms - len_ms, len_ms)
        } else {
            interval_at(range, range.span_millis() + gap_ms, len_ms)
        };

        prop_assert!(project_interval(interval, range).is_none());
    }

    #[test]
    fn projection_is_deterministic(
        week in any::<bool>(),
        offset in -50i64..50,
        start_ms in -1_000_000_000i64..1_000_000_000,
        len_ms in 0i64..2_000_000_000,
    ) {
        let range = range_for(week, offset);
        let interval = interval_at(range, start_ms, len_ms);

        let first = project_interval(interval, range);
        let second = project_interval(interval, range);
        prop_assert_eq!(
            first.map(|p| (p.left_percent.to_bits(), p.width_percent.map(f64::to_bits), p.clipped_right)),
            second.map(|p| (p.left_percent.to_bits(), p.width_percent.map(f64::to_bits), p.clipped_right))
        );
    }
}
