//! First-break positioning per distribution strategy.
//!
//! All positions are minutes from the shift start. With `L` the shift length,
//! `n` the break count and `len` the per-break length:
//!
//! | distribution | first start        | spacing            |
//! |--------------|--------------------|--------------------|
//! | BEGINNING    | `0`                | `L / n`            |
//! | MIDDLE       | `L/(n+1) - len/2`  | `L/(n+1)`          |
//! | END          | `L/n - len`        | `L/n`              |
//! | AFTER_HOURS  | offset minutes     | `offset hours*60 + len` |
//!
//! MIDDLE centres each break on a partition boundary, END closes each
//! partition with a break, and AFTER_HOURS ignores the shift length.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::models::{BreakRule, DistributionType, FailureReason, ShiftWindow};

/// The first break position and the spacing between successive breaks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct FirstBreak {
    /// The distribution that produced this position.
    pub distribution: DistributionType,
    /// Start of the first break, in minutes from the shift start.
    pub first_start: Decimal,
    /// End of the first break, in minutes from the shift start.
    pub first_end: Decimal,
    /// Minutes between the starts of successive breaks.
    pub spacing: Decimal,
}

impl FirstBreak {
    /// Returns true if the first break lies inside a shift of
    /// `shift_minutes` length.
    pub fn is_within(&self, shift_minutes: Decimal) -> bool {
        self.first_start >= Decimal::ZERO && self.first_end <= shift_minutes
    }
}

/// Computes the first break and the spacing for `rule`.
///
/// `single_break_len` comes from parameter validation, which also guarantees
/// `rule.break_count` is in 1..=4. No bounds check happens here.
///
/// # Returns
///
/// `InvalidDistributionType` if the rule's distribution is not recognized.
///
/// # Example
///
/// ```
/// use break_engine::calculation::compute_first;
/// use break_engine::models::{BreakRule, DistributionType, ShiftWindow, WeekdayFilter};
/// use chrono::NaiveDateTime;
/// use rust_decimal::Decimal;
///
/// let shift = ShiftWindow::new(
///     "shift_001",
///     NaiveDateTime::parse_from_str("2025-03-14 08:00:00", "%Y-%m-%d %H:%M:%S").unwrap(),
///     NaiveDateTime::parse_from_str("2025-03-14 16:00:00", "%Y-%m-%d %H:%M:%S").unwrap(),
/// ).unwrap();
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
/// let first = compute_first(&shift, &rule, Decimal::from(15)).unwrap();
/// assert_eq!(first.first_start, Decimal::new(885, 1));
/// assert_eq!(first.spacing, Decimal::from(96));
/// ```
pub fn compute_first(
    shift: &ShiftWindow,
    rule: &BreakRule,
    single_break_len: Decimal,
) -> Result<FirstBreak, FailureReason> {
    let distribution = rule
        .distribution
        .resolve()
        .ok_or(FailureReason::InvalidDistributionType)?;

    let shift_minutes = shift.duration_minutes();
    let n = Decimal::from(rule.break_count);

    let (first_start, spacing) = match distribution {
        DistributionType::Beginning => (Decimal::ZERO, shift_minutes / n),
        DistributionType::Middle => {
            let partition = shift_minutes / (n + Decimal::ONE);
            (partition - single_break_len / Decimal::TWO, partition)
        }
        DistributionType::End => {
            let partition = shift_minutes / n;
            (partition - single_break_len, partition)
        }
        DistributionType::AfterHours => {
            let offset = &rule.after_hours_offset;
            let whole_hours = Decimal::from(offset.hours()) * Decimal::from(60);
            (
                Decimal::from(offset.total_minutes()),
                whole_hours + single_break_len,
            )
        }
    };

    Ok(FirstBreak {
        distribution,
        first_start,
        first_end: first_start + single_break_len,
        spacing,
    })
}
