//! Request types for the Break Placement Engine API.
//!
//! This module defines the JSON request structures for the `/placements` endpoint.

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use crate::models::{BreakRule, ShiftWindow};

/// Request body for the `/placements` endpoint.
///
/// When `rules` is omitted the server's loaded ruleset is used.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlacementRequest {
    /// The shift to place breaks within.
    pub shift: ShiftRequest,
    /// Candidate rules to use instead of the loaded ruleset.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rules: Option<Vec<BreakRule>>,
}

/// Shift information in a placement request.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ShiftRequest {
    /// Unique identifier for the shift.
    pub id: String,
    /// The start of the shift.
    pub start: NaiveDateTime,
    /// The end of the shift.
    pub end: NaiveDateTime,
}

impl From<ShiftRequest> for ShiftWindow {
    fn from(req: ShiftRequest) -> Self {
        ShiftWindow {
            id: req.id,
            start: req.start,
            end: req.end,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{DistributionType, WeekdayFilter};

    #[test]
    fn test_deserialize_placement_request() {
        let json = r#"{
            "shift": {
                "id": "shift_001",
                "start": "2025-03-14T08:00:00",
                "end": "2025-03-14T16:00:00"
            }
        }"#;

        let request: PlacementRequest = serde_json::from_str(json).unwrap();
        assert_eq!(request.shift.id, "shift_001");
        assert!(request.rules.is_none());
    }

    #[test]
    fn test_deserialize_request_with_inline_rules() {
        let json = r#"{
            "shift": {
                "id": "shift_002",
                "start": "2025-03-14T08:00:00",
                "end": "2025-03-14T16:00:00"
            },
            "rules": [
                {
                    "id": "late",
                    "min_shift_length": "08:00",
                    "total_break_minutes": 15,
                    "break_count": 1,
                    "distribution": 3,
                    "after_hours_offset": "07:30",
                    "weekday": 5
                }
            ]
        }"#;

        let request: PlacementRequest = serde_json::from_str(json).unwrap();
        let rules = request.rules.unwrap();
        assert_eq!(rules.len(), 1);
        assert_eq!(rules[0].distribution.resolve(), Some(DistributionType::AfterHours));
        assert_eq!(rules[0].weekday, WeekdayFilter::Friday);
    }

    #[test]
    fn test_shift_conversion_skips_validation() {
        let req = ShiftRequest {
            id: "backwards".to_string(),
            start: NaiveDateTime::parse_from_str("2025-03-14 16:00:00", "%Y-%m-%d %H:%M:%S")
                .unwrap(),
            end: NaiveDateTime::parse_from_str("2025-03-14 08:00:00", "%Y-%m-%d %H:%M:%S")
                .unwrap(),
        };

        let shift: ShiftWindow = req.into();
        assert_eq!(shift.id, "backwards");
        assert!(shift.validate().is_err());
    }
}
