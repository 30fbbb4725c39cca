//! Minute arithmetic over shift instants.
//!
//! Durations inside the engine are [`Decimal`] minutes so that fractional
//! positions (a 15 minute break centred on a partition boundary starts half a
//! minute off the hour) stay exact until they are turned back into instants.
//! That conversion rounds once, to the nearest millisecond.

use chrono::{NaiveDateTime, TimeDelta};
use rust_decimal::Decimal;
use rust_decimal::prelude::ToPrimitive;

const MILLIS_PER_MINUTE: i64 = 60_000;

/// Returns the signed number of minutes from `start` to `end`.
///
/// # Example
///
/// ```
/// use break_engine::calculation::minutes_between;
/// use chrono::NaiveDateTime;
/// use rust_decimal::Decimal;
///
/// let start = NaiveDateTime::parse_from_str("2025-03-14 08:00:00", "%Y-%m-%d %H:%M:%S").unwrap();
/// let end = NaiveDateTime::parse_from_str("2025-03-14 09:28:30", "%Y-%m-%d %H:%M:%S").unwrap();
/// assert_eq!(minutes_between(start, end), Decimal::new(885, 1));
/// ```
pub fn minutes_between(start: NaiveDateTime, end: NaiveDateTime) -> Decimal {
    let millis = (end - start).num_milliseconds();
    Decimal::from(millis) / Decimal::from(MILLIS_PER_MINUTE)
}

/// Returns `instant` shifted by `minutes`, rounded to the nearest millisecond.
///
/// Returns `None` if the result is outside the representable range.
///
/// # Example
///
/// ```
/// use break_engine::calculation::offset_by_minutes;
/// use chrono::NaiveDateTime;
/// use rust_decimal::Decimal;
///
/// let start = NaiveDateTime::parse_from_str("2025-03-14 08:00:00", "%Y-%m-%d %H:%M:%S").unwrap();
/// let shifted = offset_by_minutes(start, Decimal::new(885, 1)).unwrap();
/// assert_eq!(shifted.to_string(), "2025-03-14 09:28:30");
/// ```
pub fn offset_by_minutes(instant: NaiveDateTime, minutes: Decimal) -> Option<NaiveDateTime> {
    let millis = minutes
        .checked_mul(Decimal::from(MILLIS_PER_MINUTE))?
        .round()
        .to_i64()?;
    let delta = TimeDelta::try_milliseconds(millis)?;
    instant.checked_add_signed(delta)
}

/// Formats minutes for audit output, without trailing zeros.
pub fn format_minutes(minutes: Decimal) -> String {
    minutes.normalize().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn make_datetime(date_str: &str, time_str: &str) -> NaiveDateTime {
        NaiveDateTime::parse_from_str(&format!("{} {}", date_str, time_str), "%Y-%m-%d %H:%M:%S")
            .unwrap()
    }

    #[test]
    fn test_minutes_between_whole_hours() {
        let start = make_datetime("2025-03-14", "08:00:00");
        let end = make_datetime("2025-03-14", "16:00:00");
        assert_eq!(minutes_between(start, end), Decimal::from(480));
    }

    #[test]
    fn test_minutes_between_is_signed() {
        let start = make_datetime("2025-03-14", "08:00:00");
        let end = make_datetime("2025-03-14", "07:30:00");
        assert_eq!(minutes_between(start, end), Decimal::from(-30));
    }

    #[test]
    fn test_minutes_between_across_midnight() {
        let start = make_datetime("2025-03-14", "23:00:00");
        let end = make_datetime("2025-03-15", "01:15:00");
        assert_eq!(minutes_between(start, end), Decimal::from(135));
    }

    #[test]
    fn test_offset_by_fractional_minutes() {
        let start = make_datetime("2025-03-14", "08:00:00");
        let shifted = offset_by_minutes(start, Decimal::new(1845, 1)).unwrap();
        assert_eq!(shifted, make_datetime("2025-03-14", "11:04:30"));
    }

    #[test]
    fn test_offset_by_negative_minutes() {
        let start = make_datetime("2025-03-14", "08:00:00");
        let shifted = offset_by_minutes(start, Decimal::from(-90)).unwrap();
        assert_eq!(shifted, make_datetime("2025-03-14", "06:30:00"));
    }

    #[test]
    fn test_offset_rounds_to_nearest_millisecond() {
        let start = make_datetime("2025-03-14", "08:00:00");
        // 1/3 minute is 20000 ms exactly; 1/7 minute is 8571.43 ms
        let third = Decimal::ONE / Decimal::from(3);
        let seventh = Decimal::ONE / Decimal::from(7);
        assert_eq!(
            (offset_by_minutes(start, third).unwrap() - start).num_milliseconds(),
            20_000
        );
        assert_eq!(
            (offset_by_minutes(start, seventh).unwrap() - start).num_milliseconds(),
            8_571
        );
    }

    #[test]
    fn test_offset_out_of_range_is_none() {
        let start = make_datetime("2025-03-14", "08:00:00");
        assert!(offset_by_minutes(start, Decimal::MAX).is_none());
    }

    #[test]
    fn test_format_minutes_drops_trailing_zeros() {
        assert_eq!(format_minutes(Decimal::new(8850, 2)), "88.5");
        assert_eq!(format_minutes(Decimal::new(4800, 1)), "480");
    }
}
