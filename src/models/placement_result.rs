//! Placement result models for the Break Placement Engine.
//!
//! This module contains the [`PlacementResult`] type and its associated
//! structures: the placed [`BreakWindow`]s, the [`FailureReason`] explaining an
//! empty result, and the audit steps recorded by each pipeline stage.

use std::fmt;

use chrono::NaiveDateTime;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::calculation::minutes_between;

/// A placed break inside a shift.
///
/// # Example
///
/// ```
/// use break_engine::models::BreakWindow;
/// use chrono::NaiveDateTime;
/// use rust_decimal::Decimal;
///
/// let window = BreakWindow {
///     start: NaiveDateTime::parse_from_str("2025-03-14 15:30:00", "%Y-%m-%d %H:%M:%S").unwrap(),
///     end: NaiveDateTime::parse_from_str("2025-03-14 15:45:00", "%Y-%m-%d %H:%M:%S").unwrap(),
///     slot_index: 0,
/// };
/// assert_eq!(window.duration_minutes(), Decimal::from(15));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BreakWindow {
    /// The start of the break.
    pub start: NaiveDateTime,
    /// The end of the break.
    pub end: NaiveDateTime,
    /// The slot (0..=3) this break was derived for.
    pub slot_index: usize,
}

impl BreakWindow {
    /// Returns the length of the break in minutes.
    pub fn duration_minutes(&self) -> Decimal {
        minutes_between(self.start, self.end)
    }
}

/// Why a placement produced no breaks.
///
/// Variants are listed in pipeline order; the first one triggered wins.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FailureReason {
    /// No candidate rule matches the shift's weekday and length.
    NoApplicableRule,
    /// The selected rule's break count is outside 1..=4.
    InvalidBreakCount,
    /// The per-break length is not greater than zero.
    InvalidBreakLength,
    /// The rule names a distribution the engine does not recognize.
    InvalidDistributionType,
    /// The first break falls outside the shift.
    FirstBreakOutOfBounds,
}

impl FailureReason {
    /// Returns a stable upper-case code for programmatic handling.
    pub fn code(&self) -> &'static str {
        match self {
            Self::NoApplicableRule => "NO_APPLICABLE_RULE",
            Self::InvalidBreakCount => "INVALID_BREAK_COUNT",
            Self::InvalidBreakLength => "INVALID_BREAK_LENGTH",
            Self::InvalidDistributionType => "INVALID_DISTRIBUTION_TYPE",
            Self::FirstBreakOutOfBounds => "FIRST_BREAK_OUT_OF_BOUNDS",
        }
    }
}

impl fmt::Display for FailureReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NoApplicableRule => write!(f, "No applicable break rule found for this shift"),
            Self::InvalidBreakCount => {
                write!(f, "Invalid number of breaks (must be between 1 and 4)")
            }
            Self::InvalidBreakLength => {
                write!(f, "Invalid break length (must be greater than 0)")
            }
            Self::InvalidDistributionType => write!(f, "Invalid distribution type"),
            Self::FirstBreakOutOfBounds => write!(f, "First break is outside shift bounds"),
        }
    }
}

/// The pipeline stage an audit step belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PipelineStage {
    /// Applicability filtering and best-rule selection.
    RuleSelection,
    /// Break count and length validation.
    ParameterValidation,
    /// First break position and spacing.
    Distribution,
    /// Bounds check of the first break.
    FirstBreakBounds,
    /// Derivation of the remaining breaks.
    Placement,
}

/// A single step in the audit trace recording one stage's decision.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuditStep {
    /// The sequential step number, starting at 1.
    pub step_number: u32,
    /// The stage that produced this step.
    pub stage: PipelineStage,
    /// The input data for this step.
    pub input: serde_json::Value,
    /// The output data from this step.
    pub output: serde_json::Value,
    /// Human-readable explanation of the decision.
    pub reasoning: String,
}

/// The outcome of one placement run.
///
/// Either `breaks` is non-empty and `failure` is `None`, or `breaks` is empty
/// and `failure` explains why.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlacementResult {
    /// The ID of the shift breaks were placed for.
    pub shift_id: String,
    /// The ID of the selected rule, if selection succeeded.
    pub rule_id: Option<String>,
    /// Placed breaks ordered by slot index.
    pub breaks: Vec<BreakWindow>,
    /// Why no breaks were placed, when `breaks` is empty.
    pub failure: Option<FailureReason>,
    /// One step per executed pipeline stage.
    pub audit_trace: Vec<AuditStep>,
}

impl PlacementResult {
    /// Returns true if at least one break was placed.
    pub fn is_placed(&self) -> bool {
        !self.breaks.is_empty()
    }

    /// Returns the total minutes of all placed breaks.
    pub fn total_break_minutes(&self) -> Decimal {
        self.breaks.iter().map(BreakWindow::duration_minutes).sum()
    }
}
