//! Shift window model.
//!
//! This module defines the [`ShiftWindow`] struct: the work interval that
//! breaks are placed within.

use chrono::{Datelike, NaiveDateTime, Weekday};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::calculation::minutes_between;
use crate::error::{EngineError, EngineResult};

/// Represents a work shift with already-resolved start and end instants.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ShiftWindow {
    /// Unique identifier for the shift.
    pub id: String,
    /// The start of the shift.
    pub start: NaiveDateTime,
    /// The end of the shift.
    pub end: NaiveDateTime,
}

impl ShiftWindow {
    /// Creates a validated shift window.
    ///
    /// # Returns
    ///
    /// Returns `InvalidShift` if `end` is not strictly after `start`.
    ///
    /// # Examples
    ///
    /// ```
    /// use break_engine::models::ShiftWindow;
    /// use chrono::NaiveDateTime;
    ///
    /// let start = NaiveDateTime::parse_from_str("2025-03-14 08:00:00", "%Y-%m-%d %H:%M:%S").unwrap();
    /// let end = NaiveDateTime::parse_from_str("2025-03-14 16:00:00", "%Y-%m-%d %H:%M:%S").unwrap();
    ///
    /// let shift = ShiftWindow::new("shift_001", start, end).unwrap();
    /// assert!(ShiftWindow::new("shift_002", end, start).is_err());
    /// # let _ = shift;
    /// ```
    pub fn new(
        id: impl Into<String>,
        start: NaiveDateTime,
        end: NaiveDateTime,
    ) -> EngineResult<Self> {
        let shift = Self {
            id: id.into(),
            start,
            end,
        };
        shift.validate()?;
        Ok(shift)
    }

    /// Checks the `end > start` invariant.
    ///
    /// Deserialized shifts bypass [`ShiftWindow::new`], so callers receiving
    /// shifts from the outside should validate them before planning.
    pub fn validate(&self) -> EngineResult<()> {
        if self.end <= self.start {
            return Err(EngineError::InvalidShift {
                shift_id: self.id.clone(),
                message: format!(
                    "end time {} must be after start time {}",
                    self.end, self.start
                ),
            });
        }
        Ok(())
    }

    /// Returns the length of the shift in minutes.
    ///
    /// Sub-minute precision is kept, so a shift ending on a half minute
    /// yields a fractional value.
    pub fn duration_minutes(&self) -> Decimal {
        minutes_between(self.start, self.end)
    }

    /// Returns the day of the week on which the shift starts.
    ///
    /// # Examples
    ///
    /// ```
    /// use break_engine::models::ShiftWindow;
    /// use chrono::{NaiveDateTime, Weekday};
    ///
    /// let shift = ShiftWindow {
    ///     id: "shift_001".to_string(),
    ///     start: NaiveDateTime::parse_from_str("2025-03-14 22:00:00", "%Y-%m-%d %H:%M:%S").unwrap(),
    ///     end: NaiveDateTime::parse_from_str("2025-03-15 06:00:00", "%Y-%m-%d %H:%M:%S").unwrap(),
    /// };
    /// assert_eq!(shift.weekday(), Weekday::Fri);
    /// ```
    pub fn weekday(&self) -> Weekday {
        self.start.weekday()
    }

    /// Returns true if `[start, end]` lies entirely inside the shift.
    pub fn contains(&self, start: NaiveDateTime, end: NaiveDateTime) -> bool {
        start >= self.start && end <= self.end
    }
}
