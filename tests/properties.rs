//! Property tests for the placement pipeline.

use chrono::{Datelike, NaiveDate, NaiveDateTime, TimeDelta};
use proptest::prelude::*;

use break_engine::calculation::{is_applicable, place_breaks};
use break_engine::models::{
    BreakRule, DistributionType, FailureReason, HoursMinutes, ShiftWindow, WeekdayFilter,
};

fn base_date() -> NaiveDateTime {
    NaiveDate::from_ymd_opt(2025, 3, 10)
        .unwrap()
        .and_hms_opt(0, 0, 0)
        .unwrap()
}

prop_compose! {
    /// A shift starting within one week of a Monday, up to 16 hours long.
    fn arb_shift()(start_minute in 0i64..(7 * 24 * 60), length_ms in 1i64..(16 * 60 * 60 * 1000)) -> ShiftWindow {
        let start = base_date() + TimeDelta::minutes(start_minute);
        let end = start + TimeDelta::milliseconds(length_ms);
        ShiftWindow::new("prop_shift", start, end).unwrap()
    }
}

fn arb_distribution() -> impl Strategy<Value = DistributionType> {
    prop_oneof![
        Just(DistributionType::Beginning),
        Just(DistributionType::Middle),
        Just(DistributionType::End),
        Just(DistributionType::AfterHours),
    ]
}

fn arb_weekday() -> impl Strategy<Value = WeekdayFilter> {
    (-1i64..7).prop_map(|code| WeekdayFilter::from_code(code).unwrap())
}

prop_compose! {
    fn arb_rule()(
        min_hours in 0u32..12,
        min_minutes in 0u32..60,
        total_break_minutes in -10i64..120,
        break_count in -1i64..7,
        distribution in arb_distribution(),
        offset_hours in 0u32..10,
        offset_minutes in 0u32..60,
        weekday in arb_weekday(),
    ) -> BreakRule {
        BreakRule {
            id: format!("rule_{}_{}_{}", min_hours, break_count, distribution),
            description: None,
            min_shift_length: HoursMinutes::new(min_hours, min_minutes).unwrap(),
            total_break_minutes,
            break_count,
            distribution: distribution.into(),
            after_hours_offset: HoursMinutes::new(offset_hours, offset_minutes).unwrap(),
            weekday,
        }
    }
}

proptest! {
    #[test]
    fn placement_is_deterministic(shift in arb_shift(), rules in prop::collection::vec(arb_rule(), 0..5)) {
        prop_assert_eq!(place_breaks(&shift, &rules), place_breaks(&shift, &rules));
    }

    #[test]
    fn breaks_lie_within_the_shift(shift in arb_shift(), rules in prop::collection::vec(arb_rule(), 0..5)) {
        let result = place_breaks(&shift, &rules);
        for window in &result.breaks {
            prop_assert!(window.start >= shift.start);
            prop_assert!(window.end <= shift.end);
            prop_assert!(window.start <= window.end);
        }
    }

    #[test]
    fn at_most_four_breaks_in_slot_order(shift in arb_shift(), rules in prop::collection::vec(arb_rule(), 0..5)) {
        let result = place_breaks(&shift, &rules);
        prop_assert!(result.breaks.len() <= 4);
        for pair in result.breaks.windows(2) {
            prop_assert!(pair[0].slot_index < pair[1].slot_index);
        }
        if let Some(rule_id) = &result.rule_id {
            let rule = rules.iter().find(|r| &r.id == rule_id).unwrap();
            prop_assert!((result.breaks.len() as i64) <= rule.break_count.max(0));
        }
    }

    #[test]
    fn breaks_and_failure_are_exclusive(shift in arb_shift(), rules in prop::collection::vec(arb_rule(), 0..5)) {
        let result = place_breaks(&shift, &rules);
        prop_assert_eq!(result.breaks.is_empty(), result.failure.is_some());
    }

    #[test]
    fn other_weekday_rule_never_applies(shift in arb_shift(), mut rule in arb_rule()) {
        let other = WeekdayFilter::from_code(
            (i64::from(shift.start.weekday().num_days_from_sunday()) + 1) % 7,
        )
        .unwrap();
        rule.weekday = other;

        prop_assert!(!is_applicable(&shift, &rule));
        let result = place_breaks(&shift, std::slice::from_ref(&rule));
        prop_assert_eq!(result.failure, Some(FailureReason::NoApplicableRule));
    }

    #[test]
    fn rule_longer_than_shift_never_applies(shift in arb_shift(), mut rule in arb_rule()) {
        let shift_whole_minutes = (shift.end - shift.start).num_minutes();
        let hours = u32::try_from(shift_whole_minutes / 60 + 1).unwrap();
        rule.min_shift_length = HoursMinutes::new(hours, 0).unwrap();

        prop_assert!(!is_applicable(&shift, &rule));
        let result = place_breaks(&shift, std::slice::from_ref(&rule));
        prop_assert_eq!(result.failure, Some(FailureReason::NoApplicableRule));
    }
}
