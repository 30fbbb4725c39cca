//! The break placement pipeline.
//!
//! Runs rule selection, parameter validation, distribution, the first-break
//! bounds check and slot derivation in that order. The first stage that fails
//! ends the run with an empty break list and its [`FailureReason`]. Each stage
//! that runs appends an [`AuditStep`] to the result.

use rust_decimal::Decimal;
use serde_json::json;
use tracing::{debug, info};

use crate::config::RulesetLoader;
use crate::models::{
    AuditStep, BreakRule, BreakWindow, FailureReason, PipelineStage, PlacementResult, ShiftWindow,
};

use super::applicability::check_applicability;
use super::distribution::{FirstBreak, compute_first};
use super::parameters::{BreakParameters, validate_parameters};
use super::placement::{compact, derive_all, slot_window};
use super::rule_selection::select_best_rule;
use super::time_math::format_minutes;

/// State threaded through the stages of one run.
struct PipelineContext<'a> {
    shift: &'a ShiftWindow,
    shift_minutes: Decimal,
    rule_id: Option<String>,
    audit_trace: Vec<AuditStep>,
}

impl<'a> PipelineContext<'a> {
    fn new(shift: &'a ShiftWindow) -> Self {
        Self {
            shift,
            shift_minutes: shift.duration_minutes(),
            rule_id: None,
            audit_trace: Vec::new(),
        }
    }

    fn record(
        &mut self,
        stage: PipelineStage,
        input: serde_json::Value,
        output: serde_json::Value,
        reasoning: String,
    ) {
        let step_number = self.audit_trace.len() as u32 + 1;
        self.audit_trace.push(AuditStep {
            step_number,
            stage,
            input,
            output,
            reasoning,
        });
    }

    fn finish(self, outcome: Result<Vec<BreakWindow>, FailureReason>) -> PlacementResult {
        let (breaks, failure) = match outcome {
            Ok(breaks) => (breaks, None),
            Err(reason) => (Vec::new(), Some(reason)),
        };
        PlacementResult {
            shift_id: self.shift.id.clone(),
            rule_id: self.rule_id,
            breaks,
            failure,
            audit_trace: self.audit_trace,
        }
    }
}

/// Places breaks for `shift` using the best of `rules`.
///
/// This never fails: every expected problem is reported through
/// [`PlacementResult::failure`]. The shift itself is assumed valid
/// (see [`ShiftWindow::validate`]).
///
/// # Example
///
/// ```
/// use break_engine::calculation::place_breaks;
/// use break_engine::models::{BreakRule, DistributionType, ShiftWindow, WeekdayFilter};
/// use chrono::NaiveDateTime;
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
/// let result = place_breaks(&shift, &[rule]);
/// assert_eq!(result.breaks.len(), 4);
/// assert_eq!(result.breaks[0].start.format("%H:%M:%S").to_string(), "09:28:30");
/// assert!(result.failure.is_none());
/// ```
pub fn place_breaks(shift: &ShiftWindow, rules: &[BreakRule]) -> PlacementResult {
    let mut ctx = PipelineContext::new(shift);
    let outcome = run_stages(&mut ctx, rules);

    match &outcome {
        Ok(breaks) => info!(
            shift_id = %shift.id,
            rule_id = ctx.rule_id.as_deref().unwrap_or_default(),
            breaks = breaks.len(),
            "Breaks placed"
        ),
        Err(reason) => info!(
            shift_id = %shift.id,
            reason = reason.code(),
            "No breaks placed"
        ),
    }

    ctx.finish(outcome)
}

fn run_stages(ctx: &mut PipelineContext<'_>, rules: &[BreakRule]) -> Result<Vec<BreakWindow>, FailureReason> {
    let rule = select_stage(ctx, rules)?;
    let params = parameter_stage(ctx, rule)?;
    let first = distribution_stage(ctx, rule, &params)?;
    bounds_stage(ctx, &first)?;
    Ok(placement_stage(ctx, &first, &params))
}

fn select_stage<'r>(
    ctx: &mut PipelineContext<'_>,
    rules: &'r [BreakRule],
) -> Result<&'r BreakRule, FailureReason> {
    let checks: Vec<serde_json::Value> = rules
        .iter()
        .map(|rule| {
            let check = check_applicability(ctx.shift, rule);
            json!({
                "rule_id": rule.id,
                "weekday": rule.weekday,
                "min_shift_length": rule.min_shift_length,
                "weekday_match": check.weekday_match,
                "length_match": check.length_match,
            })
        })
        .collect();
    let applicable_count = checks
        .iter()
        .filter(|c| c["weekday_match"] == true && c["length_match"] == true)
        .count();

    let selected = select_best_rule(ctx.shift, rules);
    let input = json!({
        "shift_weekday": ctx.shift.weekday().to_string(),
        "shift_minutes": format_minutes(ctx.shift_minutes),
        "candidates": checks,
    });

    match selected {
        Some(rule) => {
            let difference =
                ctx.shift_minutes - Decimal::from(rule.min_shift_length.total_minutes());
            ctx.record(
                PipelineStage::RuleSelection,
                input,
                json!({
                    "applicable_count": applicable_count,
                    "selected_rule": rule.id,
                    "difference_minutes": format_minutes(difference),
                }),
                format!(
                    "{} of {} rules apply; selected '{}' whose minimum {} is {} minutes below the shift length",
                    applicable_count,
                    rules.len(),
                    rule.id,
                    rule.min_shift_length,
                    format_minutes(difference)
                ),
            );
            debug!(shift_id = %ctx.shift.id, rule_id = %rule.id, "Rule selected");
            ctx.rule_id = Some(rule.id.clone());
            Ok(rule)
        }
        None => {
            ctx.record(
                PipelineStage::RuleSelection,
                input,
                json!({ "applicable_count": 0, "failure": FailureReason::NoApplicableRule }),
                format!(
                    "None of {} rules match the shift weekday and length",
                    rules.len()
                ),
            );
            Err(FailureReason::NoApplicableRule)
        }
    }
}

fn parameter_stage(
    ctx: &mut PipelineContext<'_>,
    rule: &BreakRule,
) -> Result<BreakParameters, FailureReason> {
    let input = json!({
        "break_count": rule.break_count,
        "total_break_minutes": rule.total_break_minutes,
    });

    let validated = validate_parameters(rule);
    match &validated {
        Ok(params) => ctx.record(
            PipelineStage::ParameterValidation,
            input,
            json!({ "single_break_len": format_minutes(params.single_break_len) }),
            format!(
                "{} breaks of {} minutes each",
                params.break_count,
                format_minutes(params.single_break_len)
            ),
        ),
        Err(reason) => ctx.record(
            PipelineStage::ParameterValidation,
            input,
            json!({ "failure": reason }),
            reason.to_string(),
        ),
    }
    validated
}

fn distribution_stage(
    ctx: &mut PipelineContext<'_>,
    rule: &BreakRule,
    params: &BreakParameters,
) -> Result<FirstBreak, FailureReason> {
    let input = json!({
        "distribution": rule.distribution.to_string(),
        "after_hours_offset": rule.after_hours_offset,
        "shift_minutes": format_minutes(ctx.shift_minutes),
        "single_break_len": format_minutes(params.single_break_len),
    });

    let computed = compute_first(ctx.shift, rule, params.single_break_len);
    match &computed {
        Ok(first) => ctx.record(
            PipelineStage::Distribution,
            input,
            json!({
                "first_start": format_minutes(first.first_start),
                "first_end": format_minutes(first.first_end),
                "spacing": format_minutes(first.spacing),
            }),
            format!(
                "{} distribution: first break from minute {} to {}, {} minutes between breaks",
                first.distribution,
                format_minutes(first.first_start),
                format_minutes(first.first_end),
                format_minutes(first.spacing)
            ),
        ),
        Err(reason) => ctx.record(
            PipelineStage::Distribution,
            input,
            json!({ "failure": reason }),
            format!("Distribution '{}' is not recognized", rule.distribution),
        ),
    }
    computed
}

fn bounds_stage(ctx: &mut PipelineContext<'_>, first: &FirstBreak) -> Result<(), FailureReason> {
    let within = first.is_within(ctx.shift_minutes) && slot_window(ctx.shift, first, 0).is_some();
    let input = json!({
        "first_start": format_minutes(first.first_start),
        "first_end": format_minutes(first.first_end),
        "shift_minutes": format_minutes(ctx.shift_minutes),
    });

    if within {
        ctx.record(
            PipelineStage::FirstBreakBounds,
            input,
            json!({ "within_shift": true }),
            "The first break is within the shift bounds".to_string(),
        );
        Ok(())
    } else {
        ctx.record(
            PipelineStage::FirstBreakBounds,
            input,
            json!({ "within_shift": false, "failure": FailureReason::FirstBreakOutOfBounds }),
            "The first break is outside the shift bounds".to_string(),
        );
        Err(FailureReason::FirstBreakOutOfBounds)
    }
}

fn placement_stage(
    ctx: &mut PipelineContext<'_>,
    first: &FirstBreak,
    params: &BreakParameters,
) -> Vec<BreakWindow> {
    let slots = derive_all(ctx.shift, first, params.break_count);

    let slot_report: Vec<serde_json::Value> = slots
        .iter()
        .enumerate()
        .take(params.break_count)
        .map(|(slot_index, slot)| match slot {
            Some(window) => json!({
                "slot_index": slot_index,
                "start": window.start,
                "end": window.end,
            }),
            None => json!({ "slot_index": slot_index, "placed": false }),
        })
        .collect();

    let breaks = compact(slots);
    let skipped = params.break_count - breaks.len();
    if skipped > 0 {
        debug!(
            shift_id = %ctx.shift.id,
            skipped,
            "Derived breaks fell outside the shift"
        );
    }

    ctx.record(
        PipelineStage::Placement,
        json!({
            "break_count": params.break_count,
            "spacing": format_minutes(first.spacing),
        }),
        json!({ "slots": slot_report }),
        format!(
            "Placed {} of {} breaks; {} outside the shift",
            breaks.len(),
            params.break_count,
            skipped
        ),
    );
    breaks
}

/// Places breaks for shifts against a fixed set of candidate rules.
///
/// # Example
///
/// ```no_run
/// use break_engine::calculation::BreakPlanner;
/// use break_engine::config::RulesetLoader;
///
/// let loader = RulesetLoader::load("./config/standard")?;
/// let planner = BreakPlanner::from_loader(&loader);
/// println!("{} candidate rules", planner.rules().len());
/// # Ok::<(), break_engine::error::EngineError>(())
/// ```
#[derive(Debug, Clone)]
pub struct BreakPlanner {
    rules: Vec<BreakRule>,
}

impl BreakPlanner {
    /// Creates a planner over `rules`, kept in the given order.
    pub fn new(rules: Vec<BreakRule>) -> Self {
        Self { rules }
    }

    /// Creates a planner over every rule in a loaded ruleset.
    pub fn from_loader(loader: &RulesetLoader) -> Self {
        Self::new(loader.rules().to_vec())
    }

    /// Returns the candidate rules.
    pub fn rules(&self) -> &[BreakRule] {
        &self.rules
    }

    /// Places breaks for `shift`.
    pub fn plan(&self, shift: &ShiftWindow) -> PlacementResult {
        place_breaks(shift, &self.rules)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{DistributionSetting, DistributionType, WeekdayFilter};
    use chrono::NaiveDateTime;

    fn make_datetime(date_str: &str, time_str: &str) -> NaiveDateTime {
        NaiveDateTime::parse_from_str(&format!("{} {}", date_str, time_str), "%Y-%m-%d %H:%M:%S")
            .unwrap()
    }

    // 2025-03-14 is a Friday
    fn shift(start: &str, end: &str) -> ShiftWindow {
        ShiftWindow::new(
            "shift_001",
            make_datetime("2025-03-14", start),
            make_datetime("2025-03-14", end),
        )
        .unwrap()
    }

    fn middle_rule() -> BreakRule {
        BreakRule {
            id: "standard".to_string(),
            description: None,
            min_shift_length: "04:00".parse().unwrap(),
            total_break_minutes: 60,
            break_count: 4,
            distribution: DistributionType::Middle.into(),
            after_hours_offset: Default::default(),
            weekday: WeekdayFilter::Any,
        }
    }

    fn after_hours_rule(offset: &str) -> BreakRule {
        BreakRule {
            id: "after_hours".to_string(),
            description: None,
            min_shift_length: "04:00".parse().unwrap(),
            total_break_minutes: 15,
            break_count: 1,
            distribution: DistributionType::AfterHours.into(),
            after_hours_offset: offset.parse().unwrap(),
            weekday: WeekdayFilter::Any,
        }
    }

    fn stages(result: &PlacementResult) -> Vec<PipelineStage> {
        result.audit_trace.iter().map(|s| s.stage).collect()
    }

    #[test]
    fn test_middle_distribution_places_four_breaks() {
        let result = place_breaks(&shift("08:00:00", "16:00:00"), &[middle_rule()]);

        assert!(result.failure.is_none());
        assert_eq!(result.rule_id.as_deref(), Some("standard"));
        let starts: Vec<String> = result
            .breaks
            .iter()
            .map(|b| b.start.format("%H:%M:%S").to_string())
            .collect();
        assert_eq!(starts, vec!["09:28:30", "11:04:30", "12:40:30", "14:16:30"]);
        assert_eq!(result.total_break_minutes(), Decimal::from(60));
    }

    #[test]
    fn test_successful_run_records_every_stage() {
        let result = place_breaks(&shift("08:00:00", "16:00:00"), &[middle_rule()]);
        assert_eq!(
            stages(&result),
            vec![
                PipelineStage::RuleSelection,
                PipelineStage::ParameterValidation,
                PipelineStage::Distribution,
                PipelineStage::FirstBreakBounds,
                PipelineStage::Placement,
            ]
        );
        let numbers: Vec<u32> = result.audit_trace.iter().map(|s| s.step_number).collect();
        assert_eq!(numbers, vec![1, 2, 3, 4, 5]);
        assert_eq!(result.audit_trace[2].output["first_start"], "88.5");
    }

    #[test]
    fn test_no_rules_fails_with_no_applicable_rule() {
        let result = place_breaks(&shift("08:00:00", "16:00:00"), &[]);
        assert!(result.breaks.is_empty());
        assert_eq!(result.failure, Some(FailureReason::NoApplicableRule));
        assert_eq!(result.rule_id, None);
        assert_eq!(stages(&result), vec![PipelineStage::RuleSelection]);
    }

    #[test]
    fn test_short_shift_fails_with_no_applicable_rule() {
        let result = place_breaks(&shift("08:00:00", "11:00:00"), &[middle_rule()]);
        assert_eq!(result.failure, Some(FailureReason::NoApplicableRule));
        assert_eq!(result.audit_trace[0].input["candidates"][0]["length_match"], false);
    }

    #[test]
    fn test_invalid_break_count_stops_after_validation() {
        let mut rule = middle_rule();
        rule.break_count = 5;
        let result = place_breaks(&shift("08:00:00", "16:00:00"), &[rule]);

        assert!(result.breaks.is_empty());
        assert_eq!(result.failure, Some(FailureReason::InvalidBreakCount));
        assert_eq!(result.rule_id.as_deref(), Some("standard"));
        assert_eq!(
            stages(&result),
            vec![PipelineStage::RuleSelection, PipelineStage::ParameterValidation]
        );
    }

    #[test]
    fn test_invalid_break_length() {
        let mut rule = middle_rule();
        rule.total_break_minutes = 0;
        let result = place_breaks(&shift("08:00:00", "16:00:00"), &[rule]);
        assert_eq!(result.failure, Some(FailureReason::InvalidBreakLength));
    }

    #[test]
    fn test_invalid_distribution_type() {
        let mut rule = middle_rule();
        rule.distribution = DistributionSetting::Unrecognized("EVEN".to_string());
        let result = place_breaks(&shift("08:00:00", "16:00:00"), &[rule]);

        assert_eq!(result.failure, Some(FailureReason::InvalidDistributionType));
        assert_eq!(stages(&result).last(), Some(&PipelineStage::Distribution));
    }

    #[test]
    fn test_after_hours_inside_shift() {
        let result = place_breaks(&shift("08:00:00", "16:00:00"), &[after_hours_rule("07:30")]);
        assert_eq!(result.breaks.len(), 1);
        assert_eq!(result.breaks[0].start, make_datetime("2025-03-14", "15:30:00"));
        assert_eq!(result.breaks[0].end, make_datetime("2025-03-14", "15:45:00"));
    }

    #[test]
    fn test_after_hours_past_shift_end_is_out_of_bounds() {
        let result = place_breaks(&shift("08:00:00", "16:00:00"), &[after_hours_rule("08:30")]);
        assert!(result.breaks.is_empty());
        assert_eq!(result.failure, Some(FailureReason::FirstBreakOutOfBounds));
        assert_eq!(result.audit_trace.last().unwrap().output["within_shift"], false);
    }

    #[test]
    fn test_partial_placement_reports_skipped_slots() {
        let mut rule = after_hours_rule("02:00");
        rule.break_count = 4;
        rule.total_break_minutes = 60;
        let result = place_breaks(&shift("08:00:00", "16:00:00"), &[rule]);

        assert!(result.failure.is_none());
        let indices: Vec<usize> = result.breaks.iter().map(|b| b.slot_index).collect();
        assert_eq!(indices, vec![0, 1, 2]);
        let placement = result.audit_trace.last().unwrap();
        assert_eq!(placement.output["slots"][3]["placed"], false);
        assert!(placement.reasoning.contains("1 outside the shift"));
    }

    #[test]
    fn test_best_rule_is_used_among_many() {
        let mut long_rule = after_hours_rule("07:30");
        long_rule.id = "long_shift".to_string();
        long_rule.min_shift_length = "08:00".parse().unwrap();
        let rules = vec![middle_rule(), long_rule];

        let result = place_breaks(&shift("08:00:00", "16:00:00"), &rules);
        assert_eq!(result.rule_id.as_deref(), Some("long_shift"));
        assert_eq!(result.breaks.len(), 1);
    }

    #[test]
    fn test_repeated_runs_are_identical() {
        let s = shift("08:00:00", "16:00:00");
        let rules = vec![middle_rule(), after_hours_rule("02:00")];
        assert_eq!(place_breaks(&s, &rules), place_breaks(&s, &rules));
    }

    #[test]
    fn test_planner_uses_its_rules() {
        let planner = BreakPlanner::new(vec![after_hours_rule("07:30")]);
        assert_eq!(planner.rules().len(), 1);
        let result = planner.plan(&shift("08:00:00", "16:00:00"));
        assert_eq!(result.breaks.len(), 1);
    }
}
