//! Core data models for the Break Placement Engine.
//!
//! This module contains all the domain models used throughout the engine.

mod break_rule;
mod hours_minutes;
mod placement_result;
mod shift;

pub use break_rule::{BreakRule, DistributionSetting, DistributionType, WeekdayFilter};
pub use hours_minutes::HoursMinutes;
pub use placement_result::{
    AuditStep, BreakWindow, FailureReason, PipelineStage, PlacementResult,
};
pub use shift::ShiftWindow;
