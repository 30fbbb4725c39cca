//! Break rule model and related types.
//!
//! A [`BreakRule`] describes how much break time a shift earns, how many
//! breaks it is split into, how those breaks are distributed, and which
//! shifts the rule applies to.

use std::fmt;

use chrono::Weekday;
use serde::{Deserialize, Serialize};

use super::HoursMinutes;

/// Strategy controlling the first break's position and the spacing between
/// successive breaks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum DistributionType {
    /// Breaks anchored at successive equal partitions from the shift start.
    #[serde(alias = "beginning")]
    Beginning,
    /// Breaks centred inside `n + 1` equal partitions.
    #[serde(alias = "middle")]
    Middle,
    /// Breaks closing each of `n` equal partitions.
    #[serde(alias = "end")]
    End,
    /// First break at a fixed offset after the shift start.
    #[serde(alias = "after_hours")]
    AfterHours,
}

impl DistributionType {
    /// Maps a legacy numeric code (0..=3) to a distribution type.
    ///
    /// # Example
    ///
    /// ```
    /// use break_engine::models::DistributionType;
    ///
    /// assert_eq!(DistributionType::from_code(1), Some(DistributionType::Middle));
    /// assert_eq!(DistributionType::from_code(7), None);
    /// ```
    pub fn from_code(code: i64) -> Option<Self> {
        match code {
            0 => Some(Self::Beginning),
            1 => Some(Self::Middle),
            2 => Some(Self::End),
            3 => Some(Self::AfterHours),
            _ => None,
        }
    }

    /// Returns the legacy numeric code.
    pub fn code(&self) -> i64 {
        match self {
            Self::Beginning => 0,
            Self::Middle => 1,
            Self::End => 2,
            Self::AfterHours => 3,
        }
    }
}

impl fmt::Display for DistributionType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Beginning => write!(f, "BEGINNING"),
            Self::Middle => write!(f, "MIDDLE"),
            Self::End => write!(f, "END"),
            Self::AfterHours => write!(f, "AFTER_HOURS"),
        }
    }
}

/// The distribution value as written in a rule.
///
/// Rules may carry a recognized name, a legacy numeric code, or a value the
/// engine does not know. Unknown values are kept as data so that placement
/// reports them as `InvalidDistributionType` instead of failing to load or
/// silently falling back to a default.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum DistributionSetting {
    /// A recognized distribution name.
    Known(DistributionType),
    /// A numeric distribution code.
    Code(i64),
    /// An unrecognized distribution name.
    Unrecognized(String),
}

impl DistributionSetting {
    /// Resolves the setting to a distribution type, if it names one.
    ///
    /// # Example
    ///
    /// ```
    /// use break_engine::models::{DistributionSetting, DistributionType};
    ///
    /// assert_eq!(DistributionSetting::Code(3).resolve(), Some(DistributionType::AfterHours));
    /// assert_eq!(DistributionSetting::Unrecognized("EVEN".into()).resolve(), None);
    /// ```
    pub fn resolve(&self) -> Option<DistributionType> {
        match self {
            Self::Known(distribution) => Some(*distribution),
            Self::Code(code) => DistributionType::from_code(*code),
            Self::Unrecognized(_) => None,
        }
    }
}

impl From<DistributionType> for DistributionSetting {
    fn from(distribution: DistributionType) -> Self {
        Self::Known(distribution)
    }
}

impl fmt::Display for DistributionSetting {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Known(distribution) => write!(f, "{}", distribution),
            Self::Code(code) => match DistributionType::from_code(*code) {
                Some(distribution) => write!(f, "{}", distribution),
                None => write!(f, "code {}", code),
            },
            Self::Unrecognized(name) => write!(f, "{}", name),
        }
    }
}

/// The weekday a rule is restricted to, or `Any`.
///
/// Deserializes from lowercase day names or from the legacy numeric codes
/// (`-1` for any day, `0` for Sunday through `6` for Saturday).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", try_from = "WeekdayValue")]
pub enum WeekdayFilter {
    /// The rule applies on every day.
    #[default]
    Any,
    /// Sunday only.
    Sunday,
    /// Monday only.
    Monday,
    /// Tuesday only.
    Tuesday,
    /// Wednesday only.
    Wednesday,
    /// Thursday only.
    Thursday,
    /// Friday only.
    Friday,
    /// Saturday only.
    Saturday,
}

impl WeekdayFilter {
    /// Returns true if a shift starting on `weekday` passes this filter.
    ///
    /// # Example
    ///
    /// ```
    /// use break_engine::models::WeekdayFilter;
    /// use chrono::Weekday;
    ///
    /// assert!(WeekdayFilter::Any.matches(Weekday::Sun));
    /// assert!(WeekdayFilter::Friday.matches(Weekday::Fri));
    /// assert!(!WeekdayFilter::Friday.matches(Weekday::Sat));
    /// ```
    pub fn matches(&self, weekday: Weekday) -> bool {
        match self.weekday() {
            None => true,
            Some(day) => day == weekday,
        }
    }

    /// Returns the concrete weekday, or `None` for `Any`.
    pub fn weekday(&self) -> Option<Weekday> {
        match self {
            Self::Any => None,
            Self::Sunday => Some(Weekday::Sun),
            Self::Monday => Some(Weekday::Mon),
            Self::Tuesday => Some(Weekday::Tue),
            Self::Wednesday => Some(Weekday::Wed),
            Self::Thursday => Some(Weekday::Thu),
            Self::Friday => Some(Weekday::Fri),
            Self::Saturday => Some(Weekday::Sat),
        }
    }

    /// Maps a legacy numeric code to a filter.
    pub fn from_code(code: i64) -> Option<Self> {
        match code {
            -1 => Some(Self::Any),
            0 => Some(Self::Sunday),
            1 => Some(Self::Monday),
            2 => Some(Self::Tuesday),
            3 => Some(Self::Wednesday),
            4 => Some(Self::Thursday),
            5 => Some(Self::Friday),
            6 => Some(Self::Saturday),
            _ => None,
        }
    }

    fn from_name(name: &str) -> Option<Self> {
        match name.to_ascii_lowercase().as_str() {
            "any" => Some(Self::Any),
            "sunday" | "sun" => Some(Self::Sunday),
            "monday" | "mon" => Some(Self::Monday),
            "tuesday" | "tue" => Some(Self::Tuesday),
            "wednesday" | "wed" => Some(Self::Wednesday),
            "thursday" | "thu" => Some(Self::Thursday),
            "friday" | "fri" => Some(Self::Friday),
            "saturday" | "sat" => Some(Self::Saturday),
            _ => None,
        }
    }
}

impl fmt::Display for WeekdayFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.weekday() {
            None => write!(f, "Any day"),
            Some(day) => write!(f, "{}", day),
        }
    }
}

/// Raw weekday value accepted from configuration and requests.
#[derive(Deserialize)]
#[serde(untagged)]
enum WeekdayValue {
    Code(i64),
    Name(String),
}

impl TryFrom<WeekdayValue> for WeekdayFilter {
    type Error = String;

    fn try_from(value: WeekdayValue) -> Result<Self, Self::Error> {
        match value {
            WeekdayValue::Code(code) => WeekdayFilter::from_code(code)
                .ok_or_else(|| format!("unknown weekday code {}, expected -1..=6", code)),
            WeekdayValue::Name(name) => WeekdayFilter::from_name(&name)
                .ok_or_else(|| format!("unknown weekday '{}'", name)),
        }
    }
}

/// A configured break rule.
///
/// # Example
///
/// ```
/// use break_engine::models::{BreakRule, DistributionType, WeekdayFilter};
///
/// let yaml = r#"
/// id: standard_day
/// min_shift_length: "04:00"
/// total_break_minutes: 60
/// break_count: 4
/// distribution: MIDDLE
/// "#;
/// let rule: BreakRule = serde_yaml::from_str(yaml).unwrap();
/// assert_eq!(rule.distribution.resolve(), Some(DistributionType::Middle));
/// assert_eq!(rule.weekday, WeekdayFilter::Any);
/// assert_eq!(rule.after_hours_offset.total_minutes(), 0);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BreakRule {
    /// Unique identifier for the rule.
    pub id: String,
    /// Optional human-readable description.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// The shortest shift this rule applies to.
    pub min_shift_length: HoursMinutes,
    /// Total break minutes, split evenly across `break_count` breaks.
    pub total_break_minutes: i64,
    /// Number of breaks; valid rules have 1..=4.
    pub break_count: i64,
    /// How breaks are positioned within the shift.
    pub distribution: DistributionSetting,
    /// Offset of the first break for the after-hours distribution.
    #[serde(default)]
    pub after_hours_offset: HoursMinutes,
    /// Restricts the rule to shifts starting on one weekday.
    #[serde(default)]
    pub weekday: WeekdayFilter,
}
