use chrono::{TimeDelta, TimeZone, Utc};
use criterion::{Criterion, criterion_group, criterion_main};
use print_gantt::api::{TimelineConfig, render};
use print_gantt::core::{
    Granularity, HistoryEntry, ScheduledEntry, TimeInterval, TimelineSnapshot,
    UnavailabilityWindow, ViewportState, project_interval, resolve_visible_range,
};
use std::hint::black_box;

fn bench_interval_projection(c: &mut Criterion) {
    let now = Utc.with_ymd_and_hms(2024, 1, 10, 15, 0, 0).unwrap();
    let range = resolve_visible_range(ViewportState::today(Granularity::Week), now);
    let interval = TimeInterval::new(now + TimeDelta::hours(3), now + TimeDelta::hours(200))
        .expect("valid interval");

    c.bench_function("interval_projection", |b| {
        b.iter(|| project_interval(black_box(interval), black_box(range)))
    });
}

fn bench_week_render_1k(c: &mut Criterion) {
    let now = Utc.with_ymd_and_hms(2024, 1, 10, 15, 0, 0).unwrap();
    let snapshot = TimelineSnapshot {
        scheduled: (0..1_000)
            .map(|i| {
                let start = now + TimeDelta::minutes(i * 17);
                ScheduledEntry::new(
                    format!("plate-{i}"),
                    TimeInterval::starting_at(start, TimeDelta::minutes(95)),
                )
            })
            .collect(),
        unavailability: (0..14)
            .map(|day| {
                let start = now + TimeDelta::hours(day * 24 + 7);
                UnavailabilityWindow::new(
                    format!("night-{day}"),
                    TimeInterval::starting_at(start, TimeDelta::hours(9)),
                )
            })
            .collect(),
        history: (0..200)
            .map(|i| {
                let start = now - TimeDelta::minutes(i * 45);
                HistoryEntry::completed(
                    format!("done-{i}"),
                    TimeInterval::starting_at(start, TimeDelta::minutes(40)),
                )
            })
            .collect(),
        unknown_print: None,
    };
    let config = TimelineConfig::default();

    c.bench_function("week_render_1k", |b| {
        b.iter(|| {
            render(
                ViewportState::today(Granularity::Week),
                black_box(&snapshot),
                now,
                &config,
            )
        })
    });
}

criterion_group!(benches, bench_interval_projection, bench_week_render_1k);
criterion_main!(benches);
