use print_gantt::core::{Granularity, ViewportState};
use print_gantt::interaction::Navigator;
use proptest::prelude::*;

#[test]
fn fresh_navigator_shows_today_by_day() {
    let navigator = Navigator::default();
    assert_eq!(navigator.state(), ViewportState::new(Granularity::Day, 0));
}

#[test]
fn paging_moves_offset_by_one() {
    let mut navigator = Navigator::default();

    assert_eq!(navigator.page_forward().offset, 1);
    assert_eq!(navigator.page_forward().offset, 2);
    assert_eq!(navigator.page_back().offset, 1);
    assert_eq!(navigator.page_back().offset, 0);
    assert_eq!(navigator.page_back().offset, -1);
}

#[test]
fn granularity_switch_keeps_offset_value() {
    let mut navigator = Navigator::new(ViewportState::new(Granularity::Day, 3));

    let state = navigator.set_granularity(Granularity::Week);
    assert_eq!(state, ViewportState::new(Granularity::Week, 3));
    assert_eq!(navigator.state(), state);
}

#[test]
fn reset_returns_to_offset_zero_keeping_granularity() {
    let mut navigator = Navigator::new(ViewportState::new(Granularity::Week, -12));

    let state = navigator.reset_to_today();
    assert_eq!(state, ViewportState::new(Granularity::Week, 0));
}

#[test]
fn offset_saturates_at_integer_limits() {
    let mut navigator = Navigator::new(ViewportState::new(Granularity::Day, i64::MAX));
    assert_eq!(navigator.page_forward().offset, i64::MAX);
}

proptest! {
    #[test]
    fn forward_then_back_restores_offset(offset in -1_000_000i64..1_000_000, week in any::<bool>()) {
        let granularity = if week { Granularity::Week } else { Granularity::Day };
        let start = ViewportState::new(granularity, offset);
        let mut navigator = Navigator::new(start);

        navigator.page_forward();
        let restored = navigator.page_back();

        prop_assert_eq!(restored, start);
    }

    #[test]
    fn reset_always_yields_zero(offset in any::<i64>(), pages in proptest::collection::vec(any::<bool>(), 0..20)) {
        let mut navigator = Navigator::new(ViewportState::new(Granularity::Day, offset));
        for forward in pages {
            if forward {
                navigator.page_forward();
            } else {
                navigator.page_back();
            }
        }

        prop_assert_eq!(navigator.reset_to_today().offset, 0);
    }
}
