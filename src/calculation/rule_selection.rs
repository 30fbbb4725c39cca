//! Best-rule selection among applicable candidates.

use rust_decimal::Decimal;

use crate::models::{BreakRule, ShiftWindow};

use super::applicability::is_applicable;

/// Picks the applicable rule whose minimum shift length is closest to the
/// actual shift length.
///
/// Only applicable rules are considered, so the difference
/// `shift_minutes - min_shift_length` is never negative. When several rules
/// are equally close, the first in input order wins.
///
/// # Returns
///
/// `None` if no candidate applies.
///
/// # Example
///
/// ```
/// use break_engine::calculation::select_best_rule;
/// use break_engine::models::{BreakRule, DistributionType, ShiftWindow, WeekdayFilter};
/// use chrono::NaiveDateTime;
///
/// let make_rule = |id: &str, min: &str| BreakRule {
///     id: id.to_string(),
///     description: None,
///     min_shift_length: min.parse().unwrap(),
///     total_break_minutes: 30,
///     break_count: 2,
///     distribution: DistributionType::Beginning.into(),
///     after_hours_offset: Default::default(),
///     weekday: WeekdayFilter::Any,
/// };
/// let rules = vec![make_rule("four_hours", "04:00"), make_rule("six_hours", "06:00")];
///
/// let shift = ShiftWindow::new(
///     "shift_001",
///     NaiveDateTime::parse_from_str("2025-03-14 08:00:00", "%Y-%m-%d %H:%M:%S").unwrap(),
///     NaiveDateTime::parse_from_str("2025-03-14 15:00:00", "%Y-%m-%d %H:%M:%S").unwrap(),
/// ).unwrap();
///
/// assert_eq!(select_best_rule(&shift, &rules).unwrap().id, "six_hours");
/// ```
pub fn select_best_rule<'a>(shift: &ShiftWindow, candidates: &'a [BreakRule]) -> Option<&'a BreakRule> {
    let shift_minutes = shift.duration_minutes();

    // min_by_key returns the first of equal minima
    candidates
        .iter()
        .filter(|rule| is_applicable(shift, rule))
        .min_by_key(|rule| shift_minutes - Decimal::from(rule.min_shift_length.total_minutes()))
}
