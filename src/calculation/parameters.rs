//! Break parameter validation.
//!
//! Derives the per-break length from a selected rule and rejects rules whose
//! break count or break length cannot produce a placement.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::models::{BreakRule, FailureReason};

/// The largest number of breaks a rule may request.
pub const MAX_BREAK_COUNT: i64 = 4;

/// Validated break parameters for a selected rule.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct BreakParameters {
    /// Number of breaks, in 1..=4.
    pub break_count: usize,
    /// Length of each break in minutes (`total_break_minutes / break_count`).
    pub single_break_len: Decimal,
}

/// Validates a rule's break count and per-break length.
///
/// The break count is checked first, so a zero count is reported as
/// `InvalidBreakCount` rather than dividing by zero.
///
/// # Example
///
/// ```
/// use break_engine::calculation::validate_parameters;
/// use break_engine::models::{BreakRule, DistributionType, FailureReason, WeekdayFilter};
/// use rust_decimal::Decimal;
///
/// let mut rule = BreakRule {
///     id: "standard".to_string(),
///     description: None,
///     min_shift_length: "04:00".parse().unwrap(),
///     total_break_minutes: 50,
///     break_count: 4,
///     distribution: DistributionType::Middle.into(),
///     after_hours_offset: Default::default(),
///     weekday: WeekdayFilter::Any,
/// };
/// assert_eq!(validate_parameters(&rule).unwrap().single_break_len, Decimal::new(125, 1));
///
/// rule.break_count = 5;
/// assert_eq!(validate_parameters(&rule), Err(FailureReason::InvalidBreakCount));
/// ```
pub fn validate_parameters(rule: &BreakRule) -> Result<BreakParameters, FailureReason> {
    if !(1..=MAX_BREAK_COUNT).contains(&rule.break_count) {
        return Err(FailureReason::InvalidBreakCount);
    }

    let single_break_len = Decimal::from(rule.total_break_minutes) / Decimal::from(rule.break_count);
    if single_break_len <= Decimal::ZERO {
        return Err(FailureReason::InvalidBreakLength);
    }

    Ok(BreakParameters {
        break_count: rule.break_count as usize,
        single_break_len,
    })
}
