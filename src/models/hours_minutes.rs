//! Clock-style durations used in break rule configuration.
//!
//! Rule files express minimum shift lengths and after-hours offsets as
//! `"HH:MM"` strings. [`HoursMinutes`] parses and validates that format and
//! exposes both the total minute count and the whole-hours part, which the
//! after-hours distribution uses separately.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::EngineError;

/// A non-negative duration expressed as whole hours and minutes.
///
/// # Example
///
/// ```
/// use break_engine::models::HoursMinutes;
///
/// let offset: HoursMinutes = "07:30".parse().unwrap();
/// assert_eq!(offset.hours(), 7);
/// assert_eq!(offset.total_minutes(), 450);
/// assert_eq!(offset.to_string(), "07:30");
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct HoursMinutes {
    hours: u32,
    minutes: u32,
}

impl HoursMinutes {
    /// Creates a duration from hours and minutes.
    ///
    /// Returns `InvalidDuration` if `minutes` is 60 or more.
    pub fn new(hours: u32, minutes: u32) -> Result<Self, EngineError> {
        if minutes >= 60 {
            return Err(EngineError::InvalidDuration {
                value: format!("{:02}:{:02}", hours, minutes),
                message: "minutes must be less than 60".to_string(),
            });
        }
        Ok(Self { hours, minutes })
    }

    /// Returns the whole-hours part.
    pub fn hours(&self) -> u32 {
        self.hours
    }

    /// Returns the minutes part (0..60).
    pub fn minutes(&self) -> u32 {
        self.minutes
    }

    /// Returns the full duration in minutes.
    pub fn total_minutes(&self) -> i64 {
        i64::from(self.hours) * 60 + i64::from(self.minutes)
    }
}

impl FromStr for HoursMinutes {
    type Err = EngineError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = |message: &str| EngineError::InvalidDuration {
            value: s.to_string(),
            message: message.to_string(),
        };

        let (hours, minutes) = s
            .trim()
            .split_once(':')
            .ok_or_else(|| invalid("expected HH:MM"))?;

        let hours = hours
            .parse::<u32>()
            .map_err(|_| invalid("hours must be a non-negative integer"))?;
        let minutes = minutes
            .parse::<u32>()
            .map_err(|_| invalid("minutes must be a non-negative integer"))?;

        if minutes >= 60 {
            return Err(invalid("minutes must be less than 60"));
        }

        Ok(Self { hours, minutes })
    }
}

impl TryFrom<String> for HoursMinutes {
    type Error = EngineError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<HoursMinutes> for String {
    fn from(value: HoursMinutes) -> Self {
        value.to_string()
    }
}

impl fmt::Display for HoursMinutes {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:02}:{:02}", self.hours, self.minutes)
    }
}
