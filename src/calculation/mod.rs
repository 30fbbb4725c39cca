//! Calculation logic for the Break Placement Engine.
//!
//! This module contains the stages of the placement pipeline: minute
//! arithmetic, rule applicability, best-rule selection, parameter validation,
//! first-break distribution, slot derivation, and the pipeline that runs them
//! in order.

mod applicability;
mod distribution;
mod parameters;
mod pipeline;
mod placement;
mod rule_selection;
mod time_math;

pub use applicability::{Applicability, applicable_rules, check_applicability, is_applicable};
pub use distribution::{FirstBreak, compute_first};
pub use parameters::{BreakParameters, MAX_BREAK_COUNT, validate_parameters};
pub use pipeline::{BreakPlanner, place_breaks};
pub use placement::{BreakSlots, SLOT_COUNT, compact, derive_all, slot_window};
pub use rule_selection::select_best_rule;
pub use time_math::{format_minutes, minutes_between, offset_by_minutes};
