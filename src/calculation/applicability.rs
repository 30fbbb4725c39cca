//! Break rule applicability checks.
//!
//! A rule applies to a shift when its weekday filter accepts the weekday the
//! shift starts on and the shift is at least as long as the rule's minimum.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::models::{BreakRule, ShiftWindow};

/// The component checks behind an applicability decision.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Applicability {
    /// The rule's weekday filter accepts the shift's start weekday.
    pub weekday_match: bool,
    /// The shift is at least as long as the rule's minimum shift length.
    pub length_match: bool,
}

impl Applicability {
    /// Returns true if both checks passed.
    pub fn is_applicable(&self) -> bool {
        self.weekday_match && self.length_match
    }
}

/// Runs both applicability checks for one rule.
pub fn check_applicability(shift: &ShiftWindow, rule: &BreakRule) -> Applicability {
    let min_minutes = Decimal::from(rule.min_shift_length.total_minutes());
    Applicability {
        weekday_match: rule.weekday.matches(shift.weekday()),
        length_match: shift.duration_minutes() >= min_minutes,
    }
}

/// Returns true if `rule` applies to `shift`.
///
/// # Example
///
/// ```
/// use break_engine::calculation::is_applicable;
/// use break_engine::models::{BreakRule, DistributionType, ShiftWindow, WeekdayFilter};
/// use chrono::NaiveDateTime;
///
/// let shift = ShiftWindow::new(
///     "shift_001",
///     NaiveDateTime::parse_from_str("2025-03-14 08:00:00", "%Y-%m-%d %H:%M:%S").unwrap(),
///     NaiveDateTime::parse_from_str("2025-03-14 11:00:00", "%Y-%m-%d %H:%M:%S").unwrap(),
/// ).unwrap();
///
/// let rule = BreakRule {
///     id: "standard".to_string(),
///     description: None,
///     min_shift_length: "04:00".parse().unwrap(),
///     total_break_minutes: 60,
///     break_count: 4,
///     distribution: DistributionType::Middle.into(),
///     after_hours_offset: Default::default(),
///     weekday: WeekdayFilter::Any,
/// };
///
/// // 180 minutes is shorter than the 240 minute minimum
/// assert!(!is_applicable(&shift, &rule));
/// ```
pub fn is_applicable(shift: &ShiftWindow, rule: &BreakRule) -> bool {
    check_applicability(shift, rule).is_applicable()
}

/// Returns every rule that applies to `shift`, in input order.
pub fn applicable_rules<'a>(shift: &ShiftWindow, rules: &'a [BreakRule]) -> Vec<&'a BreakRule> {
    rules
        .iter()
        .filter(|rule| is_applicable(shift, rule))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{DistributionType, WeekdayFilter};
    use chrono::NaiveDateTime;

    fn make_datetime(date_str: &str, time_str: &str) -> NaiveDateTime {
        NaiveDateTime::parse_from_str(&format!("{} {}", date_str, time_str), "%Y-%m-%d %H:%M:%S")
            .unwrap()
    }

    // 2025-03-14 is a Friday
    fn friday_shift(start: &str, end: &str) -> ShiftWindow {
        ShiftWindow::new(
            "shift_001",
            make_datetime("2025-03-14", start),
            make_datetime("2025-03-14", end),
        )
        .unwrap()
    }

    fn rule(id: &str, min_length: &str, weekday: WeekdayFilter) -> BreakRule {
        BreakRule {
            id: id.to_string(),
            description: None,
            min_shift_length: min_length.parse().unwrap(),
            total_break_minutes: 60,
            break_count: 4,
            distribution: DistributionType::Middle.into(),
            after_hours_offset: Default::default(),
            weekday,
        }
    }

    #[test]
    fn test_any_weekday_and_long_enough_applies() {
        let shift = friday_shift("08:00:00", "16:00:00");
        let check = check_applicability(&shift, &rule("r1", "04:00", WeekdayFilter::Any));
        assert!(check.weekday_match);
        assert!(check.length_match);
        assert!(check.is_applicable());
    }

    #[test]
    fn test_matching_weekday_applies() {
        let shift = friday_shift("08:00:00", "16:00:00");
        assert!(is_applicable(&shift, &rule("r1", "04:00", WeekdayFilter::Friday)));
    }

    #[test]
    fn test_other_weekday_does_not_apply() {
        let shift = friday_shift("08:00:00", "16:00:00");
        let check = check_applicability(&shift, &rule("r1", "04:00", WeekdayFilter::Monday));
        assert!(!check.weekday_match);
        assert!(check.length_match);
        assert!(!check.is_applicable());
    }

    #[test]
    fn test_short_shift_does_not_apply() {
        let shift = friday_shift("08:00:00", "11:00:00");
        let check = check_applicability(&shift, &rule("r1", "04:00", WeekdayFilter::Any));
        assert!(check.weekday_match);
        assert!(!check.length_match);
    }

    #[test]
    fn test_exact_minimum_length_applies() {
        let shift = friday_shift("08:00:00", "12:00:00");
        assert!(is_applicable(&shift, &rule("r1", "04:00", WeekdayFilter::Any)));
    }

    #[test]
    fn test_overnight_shift_uses_start_weekday() {
        let shift = ShiftWindow::new(
            "night",
            make_datetime("2025-03-14", "22:00:00"),
            make_datetime("2025-03-15", "06:00:00"),
        )
        .unwrap();
        assert!(is_applicable(&shift, &rule("r1", "04:00", WeekdayFilter::Friday)));
        assert!(!is_applicable(&shift, &rule("r2", "04:00", WeekdayFilter::Saturday)));
    }

    #[test]
    fn test_applicable_rules_keeps_input_order() {
        let shift = friday_shift("08:00:00", "14:00:00");
        let rules = vec![
            rule("long", "08:00", WeekdayFilter::Any),
            rule("friday", "05:00", WeekdayFilter::Friday),
            rule("monday", "04:00", WeekdayFilter::Monday),
            rule("short", "02:00", WeekdayFilter::Any),
        ];

        let ids: Vec<&str> = applicable_rules(&shift, &rules)
            .iter()
            .map(|r| r.id.as_str())
            .collect();
        assert_eq!(ids, vec!["friday", "short"]);
    }
}
