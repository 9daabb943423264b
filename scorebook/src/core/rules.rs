//! Critical rule battery for the validation engine.
//!
//! Each rule is independent: it inspects the whole at-bat and returns every
//! violation it finds. Rules that need the batting result skip their
//! result-specific checks when the code is unknown; `HitTypeRule` reports that.

use std::collections::HashSet;

use crate::core::movement::{Fate, Movement};
use crate::core::result::BatterPlacement;
use crate::core::validation::{AtBatValidationData, RuleViolation, ValidationRule, ViolationType};

/// Most outs a single at-bat can record.
pub const MAX_OUTS_PER_AT_BAT: i32 = 3;

/// Runners keep their relative order unless the lead runner scored or was
/// put out. Structural faults (one runner in two places) are reported as
/// order violations and suppress the passing check, whose answer would be
/// meaningless.
pub struct NoRunnerPassingRule;

impl ValidationRule for NoRunnerPassingRule {
    fn name(&self) -> &'static str {
        "no-runner-passing"
    }

    fn check(&self, data: &AtBatValidationData) -> Vec<RuleViolation> {
        let mut violations = structural_order_faults(data);
        if !violations.is_empty() {
            return violations;
        }

        let movement = Movement::infer(
            &data.before_state,
            &data.after_state,
            &data.runs_scored,
            &data.batter_id,
        );
        for (trailing, leading) in movement.passes() {
            violations.push(RuleViolation::new(
                ViolationType::RunnerPassingViolation,
                format!(
                    "runner '{}' passed runner '{}'",
                    trailing.runner_id, leading.runner_id
                ),
            ));
        }
        violations
    }
}

fn structural_order_faults(data: &AtBatValidationData) -> Vec<RuleViolation> {
    let mut violations = Vec::new();
    let mut fault = |message: String| {
        violations.push(RuleViolation::new(ViolationType::RunnerOrderViolation, message));
    };

    for (label, state) in [("before", &data.before_state), ("after", &data.after_state)] {
        for id in duplicate_ids(state.occupied().map(|(_, id)| id)) {
            fault(format!("runner '{id}' occupies more than one base {label} the at-bat"));
        }
    }

    if let Some(base) = data.before_state.base_of(&data.batter_id) {
        fault(format!(
            "batter '{}' is already on {} before the at-bat",
            data.batter_id, base
        ));
    }

    for id in duplicate_ids(data.runs_scored.iter().map(String::as_str)) {
        fault(format!("runner '{id}' scored more than once"));
    }

    for id in &data.runs_scored {
        if let Some(base) = data.after_state.base_of(id) {
            fault(format!("runner '{id}' both scored and remains on {base}"));
        }
    }

    violations
}

fn duplicate_ids<'a>(ids: impl Iterator<Item = &'a str>) -> Vec<&'a str> {
    let mut seen = HashSet::new();
    let mut duplicates = Vec::new();
    for id in ids {
        if !seen.insert(id) && !duplicates.contains(&id) {
            duplicates.push(id);
        }
    }
    duplicates
}

/// RBIs never exceed runs scored, are never negative, and are never
/// credited on results that do not credit them (errors, double plays).
pub struct RbiRule;

impl ValidationRule for RbiRule {
    fn name(&self) -> &'static str {
        "rbi-validation"
    }

    fn check(&self, data: &AtBatValidationData) -> Vec<RuleViolation> {
        let mut violations = Vec::new();
        let runs = data.runs_scored.len();

        if data.rbis < 0 {
            violations.push(RuleViolation::new(
                ViolationType::IncorrectRbiCount,
                format!("rbis must be >= 0 (got {})", data.rbis),
            ));
        } else if usize::try_from(data.rbis).is_ok_and(|rbis| rbis > runs) {
            violations.push(RuleViolation::new(
                ViolationType::IncorrectRbiCount,
                format!("rbis {} exceed runs scored {}", data.rbis, runs),
            ));
        }

        if let Some(result) = data.result() {
            if !result.credits_rbi() && data.rbis > 0 {
                violations.push(RuleViolation::new(
                    ViolationType::IncorrectRbiCount,
                    format!("no rbis may be credited for {} (got {})", result.name(), data.rbis),
                ));
            }
        }

        violations
    }
}

/// An at-bat records between zero and three outs.
pub struct MaxOutsRule;

impl ValidationRule for MaxOutsRule {
    fn name(&self) -> &'static str {
        "max-outs"
    }

    fn check(&self, data: &AtBatValidationData) -> Vec<RuleViolation> {
        if (0..=MAX_OUTS_PER_AT_BAT).contains(&data.outs) {
            return Vec::new();
        }
        vec![RuleViolation::new(
            ViolationType::ExcessiveOuts,
            format!(
                "outs must be between 0 and {} (got {})",
                MAX_OUTS_PER_AT_BAT, data.outs
            ),
        )]
    }
}

/// The after-state honours the result's guarantees and nobody moves backwards.
pub struct BaseAdvancementRule;

impl ValidationRule for BaseAdvancementRule {
    fn name(&self) -> &'static str {
        "base-advancement"
    }

    fn check(&self, data: &AtBatValidationData) -> Vec<RuleViolation> {
        let mut messages = Vec::new();

        for (from, id) in data.before_state.occupied() {
            if let Some(to) = data.after_state.base_of(id) {
                if to < from {
                    messages.push(format!("runner '{id}' moved back from {from} to {to}"));
                }
            }
        }

        let appeared = data
            .after_state
            .occupied()
            .map(|(_, id)| id)
            .chain(data.runs_scored.iter().map(String::as_str))
            .filter(|id| *id != data.batter_id && !data.before_state.contains(id));
        for id in appeared {
            messages.push(format!("runner '{id}' was not on base and is not the batter"));
        }

        if let Some(result) = data.result() {
            let batter = batter_fate(data);
            match result.batter_placement() {
                BatterPlacement::OnBase(min) => {
                    let reached = batter
                        .progress()
                        .is_some_and(|progress| progress >= min.number());
                    if !reached {
                        messages.push(format!(
                            "batter '{}' must reach at least {} on a {}",
                            data.batter_id,
                            min,
                            result.name()
                        ));
                    }
                }
                BatterPlacement::Scores => {
                    if batter != Fate::Scored {
                        messages.push(format!(
                            "batter '{}' must score on a {}",
                            data.batter_id,
                            result.name()
                        ));
                    }
                    if !data.after_state.is_empty() {
                        messages.push(format!(
                            "bases must be empty after a {} (found {})",
                            result.name(),
                            data.after_state
                        ));
                    }
                }
                BatterPlacement::Out => {
                    if batter != Fate::Out {
                        messages.push(format!(
                            "batter '{}' is out on a {} and cannot advance",
                            data.batter_id,
                            result.name()
                        ));
                    }
                }
            }
        }

        messages
            .into_iter()
            .map(|message| RuleViolation::new(ViolationType::InvalidBaseAdvancement, message))
            .collect()
    }
}

fn batter_fate(data: &AtBatValidationData) -> Fate {
    if let Some(base) = data.after_state.base_of(&data.batter_id) {
        Fate::OnBase(base)
    } else if data.runs_scored.contains(&data.batter_id) {
        Fate::Scored
    } else {
        Fate::Out
    }
}

/// The result code is in the closed set and its implied outs were recorded.
pub struct HitTypeRule;

impl ValidationRule for HitTypeRule {
    fn name(&self) -> &'static str {
        "hit-type"
    }

    fn check(&self, data: &AtBatValidationData) -> Vec<RuleViolation> {
        let Some(result) = data.result() else {
            return vec![RuleViolation::new(
                ViolationType::InvalidHitType,
                format!("unknown batting result code '{}'", data.batting_result),
            )];
        };

        let implied = i64::from(result.batter_outs());
        if i64::from(data.outs) < implied {
            return vec![RuleViolation::new(
                ViolationType::InvalidHitType,
                format!(
                    "a {} records at least {} out(s) (got {})",
                    result.name(),
                    implied,
                    data.outs
                ),
            )];
        }
        Vec::new()
    }
}
