//! Advancement service: the outcome that actually gets recorded.
//!
//! `calculate_standard_advancement` takes the generator's standard outcome;
//! `apply_manual_overrides` lets the scorekeeper replace individual runners'
//! fates and rejects configurations that break runner order. Rejections here
//! are hard errors: an at-bat that fails them is never recorded.

use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::core::bases::{Base, BaserunnerState};
use crate::core::generator::{standard_movement, standard_outcome};
use crate::core::movement::{Fate, Movement};
use crate::core::result::BattingResult;
use crate::core::validation::AtBatValidationData;

/// Scorekeeper-chosen destination for a runner already on base.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RunnerDestination {
    Stay,
    Second,
    Third,
    Home,
    Out,
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown runner destination '{0}' (expected stay, second, third, home or out)")]
pub struct UnknownDestination(pub String);

impl FromStr for RunnerDestination {
    type Err = UnknownDestination;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "stay" => Ok(RunnerDestination::Stay),
            "second" => Ok(RunnerDestination::Second),
            "third" => Ok(RunnerDestination::Third),
            "home" => Ok(RunnerDestination::Home),
            "out" => Ok(RunnerDestination::Out),
            _ => Err(UnknownDestination(s.to_string())),
        }
    }
}

impl fmt::Display for RunnerDestination {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            RunnerDestination::Stay => "stay",
            RunnerDestination::Second => "second",
            RunnerDestination::Third => "third",
            RunnerDestination::Home => "home",
            RunnerDestination::Out => "out",
        };
        f.write_str(label)
    }
}

/// Per-runner overrides keyed by runner id.
pub type ManualOverrides = BTreeMap<String, RunnerDestination>;

/// Overrides that cannot be applied.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum OverrideError {
    #[error("runner '{runner_id}' is not on base")]
    UnknownRunner { runner_id: String },

    #[error("runner '{runner_id}' cannot move back from {from} to {to}")]
    BackwardMove {
        runner_id: String,
        from: Base,
        to: Base,
    },

    #[error("runner cannot pass another runner: '{trailing}' would pass '{leading}'")]
    RunnerPassing { trailing: String, leading: String },

    #[error("batter '{batter_id}' is already on base")]
    BatterOnBase { batter_id: String },
}

/// Recorded result of an at-bat, ready for validation and persistence.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AdvancementResult {
    pub final_baserunners: BaserunnerState,
    pub scoring_runners: Vec<String>,
    pub rbis: u32,
    /// Outs recorded during this at-bat (delta, not the inning total).
    pub outs: u32,
}

impl AdvancementResult {
    pub fn into_validation_data(
        self,
        before: &BaserunnerState,
        result: BattingResult,
        batter_id: &str,
    ) -> AtBatValidationData {
        AtBatValidationData {
            before_state: before.clone(),
            after_state: self.final_baserunners,
            batting_result: result.code().to_string(),
            batter_id: batter_id.to_string(),
            rbis: i32::try_from(self.rbis).unwrap_or(i32::MAX),
            outs: i32::try_from(self.outs).unwrap_or(i32::MAX),
            runs_scored: self.scoring_runners,
        }
    }
}

/// Standard (non-overridden) advancement for `result`.
pub fn calculate_standard_advancement(
    before: &BaserunnerState,
    result: BattingResult,
    batter_id: &str,
) -> AdvancementResult {
    let outcome = standard_outcome(before, result, batter_id);
    AdvancementResult {
        final_baserunners: outcome.after_state,
        scoring_runners: outcome.runs_scored,
        rbis: outcome.rbis,
        outs: outcome.outs,
    }
}

/// Replace the standard fate of the overridden runners.
///
/// The batter always lands on the result's guaranteed placement. Runners
/// without an override keep their standard fate.
pub fn apply_manual_overrides(
    before: &BaserunnerState,
    result: BattingResult,
    batter_id: &str,
    overrides: &ManualOverrides,
) -> Result<AdvancementResult, OverrideError> {
    if before.contains(batter_id) {
        return Err(OverrideError::BatterOnBase {
            batter_id: batter_id.to_string(),
        });
    }

    let mut movement = standard_movement(before, result, batter_id);
    for (runner_id, destination) in overrides {
        let from = before
            .base_of(runner_id)
            .ok_or_else(|| OverrideError::UnknownRunner {
                runner_id: runner_id.clone(),
            })?;
        let fate = override_fate(runner_id, from, *destination)?;
        if let Some(target) = movement.moves.iter_mut().find(|m| m.origin == Some(from)) {
            target.fate = fate;
        }
    }

    if let Some((trailing, leading)) = movement.first_pass() {
        return Err(OverrideError::RunnerPassing {
            trailing: trailing.runner_id.clone(),
            leading: leading.runner_id.clone(),
        });
    }

    Ok(settle(&movement, result))
}

fn override_fate(
    runner_id: &str,
    from: Base,
    destination: RunnerDestination,
) -> Result<Fate, OverrideError> {
    let to = match destination {
        RunnerDestination::Stay => return Ok(Fate::OnBase(from)),
        RunnerDestination::Home => return Ok(Fate::Scored),
        RunnerDestination::Out => return Ok(Fate::Out),
        RunnerDestination::Second => Base::Second,
        RunnerDestination::Third => Base::Third,
    };
    if to < from {
        return Err(OverrideError::BackwardMove {
            runner_id: runner_id.to_string(),
            from,
            to,
        });
    }
    Ok(Fate::OnBase(to))
}

fn settle(movement: &Movement, result: BattingResult) -> AdvancementResult {
    let (final_baserunners, scoring_runners) = movement.settle();
    let rbis = if result.credits_rbi() {
        u32::try_from(scoring_runners.len()).unwrap_or(u32::MAX)
    } else {
        0
    };
    AdvancementResult {
        final_baserunners,
        scoring_runners,
        rbis,
        outs: result.batter_outs() + movement.runner_outs(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{ids, overrides, state};

    #[test]
    fn standard_single_with_corners() {
        let before = state(Some("a"), None, Some("c"));
        let advancement = calculate_standard_advancement(&before, BattingResult::single(), "x");
        assert_eq!(advancement.final_baserunners, state(Some("x"), Some("a"), None));
        assert_eq!(advancement.scoring_runners, ids(&["c"]));
        assert_eq!(advancement.rbis, 1);
        assert_eq!(advancement.outs, 0);
    }

    /// Runs that score on an error are unearned: no RBI for the batter.
    #[test]
    fn standard_error_scores_without_rbi() {
        let advancement = calculate_standard_advancement(
            &BaserunnerState::loaded("a", "b", "c"),
            BattingResult::error(),
            "x",
        );
        assert_eq!(advancement.scoring_runners, ids(&["c"]));
        assert_eq!(advancement.rbis, 0);
    }

    #[test]
    fn override_sends_runner_home_from_first() {
        let before = state(Some("a"), None, Some("c"));
        let advancement = apply_manual_overrides(
            &before,
            BattingResult::single(),
            "x",
            &overrides(&[("a", RunnerDestination::Home)]),
        )
        .expect("apply");
        assert_eq!(advancement.final_baserunners, state(Some("x"), None, None));
        assert_eq!(advancement.scoring_runners, ids(&["a", "c"]));
        assert_eq!(advancement.rbis, 2);
    }

    #[test]
    fn override_passing_runner_is_rejected() {
        let before = state(Some("a"), None, Some("c"));
        let err = apply_manual_overrides(
            &before,
            BattingResult::single(),
            "x",
            &overrides(&[("a", RunnerDestination::Home), ("c", RunnerDestination::Stay)]),
        )
        .expect_err("passing");
        assert_eq!(
            err,
            OverrideError::RunnerPassing {
                trailing: "a".to_string(),
                leading: "c".to_string(),
            }
        );
        assert!(err.to_string().contains("runner cannot pass another runner"));
    }

    #[test]
    fn override_for_runner_not_on_base_is_rejected() {
        let err = apply_manual_overrides(
            &state(Some("a"), None, None),
            BattingResult::single(),
            "x",
            &overrides(&[("z", RunnerDestination::Home)]),
        )
        .expect_err("unknown");
        assert_eq!(
            err,
            OverrideError::UnknownRunner {
                runner_id: "z".to_string()
            }
        );
    }

    /// The batter is not an override target even though they end up on base.
    #[test]
    fn override_for_batter_is_rejected() {
        let err = apply_manual_overrides(
            &BaserunnerState::empty(),
            BattingResult::single(),
            "x",
            &overrides(&[("x", RunnerDestination::Second)]),
        )
        .expect_err("batter");
        assert!(matches!(err, OverrideError::UnknownRunner { .. }));
    }

    #[test]
    fn override_cannot_move_runner_backwards() {
        let err = apply_manual_overrides(
            &state(None, None, Some("c")),
            BattingResult::walk(),
            "x",
            &overrides(&[("c", RunnerDestination::Second)]),
        )
        .expect_err("backward");
        assert!(matches!(
            err,
            OverrideError::BackwardMove {
                from: Base::Third,
                to: Base::Second,
                ..
            }
        ));
    }

    /// Holding a runner on the base the batter is entitled to is a pass by the batter.
    #[test]
    fn batter_placement_is_not_overridable() {
        let err = apply_manual_overrides(
            &state(None, Some("b"), None),
            BattingResult::double(),
            "x",
            &overrides(&[("b", RunnerDestination::Stay)]),
        )
        .expect_err("batter passes");
        assert_eq!(
            err,
            OverrideError::RunnerPassing {
                trailing: "x".to_string(),
                leading: "b".to_string(),
            }
        );
    }

    #[test]
    fn runner_out_on_the_bases_adds_an_out() {
        let advancement = apply_manual_overrides(
            &state(Some("a"), None, None),
            BattingResult::single(),
            "x",
            &overrides(&[("a", RunnerDestination::Out)]),
        )
        .expect("apply");
        assert_eq!(advancement.final_baserunners, state(Some("x"), None, None));
        assert_eq!(advancement.outs, 1);
        assert!(advancement.scoring_runners.is_empty());
    }

    #[test]
    fn error_overrides_never_credit_rbis() {
        let advancement = apply_manual_overrides(
            &state(None, Some("b"), None),
            BattingResult::error(),
            "x",
            &overrides(&[("b", RunnerDestination::Home)]),
        )
        .expect("apply");
        assert_eq!(advancement.scoring_runners, ids(&["b"]));
        assert_eq!(advancement.rbis, 0);
    }

    #[test]
    fn batter_already_on_base_is_rejected() {
        let err = apply_manual_overrides(
            &state(Some("x"), None, None),
            BattingResult::single(),
            "x",
            &ManualOverrides::new(),
        )
        .expect_err("batter on base");
        assert!(matches!(err, OverrideError::BatterOnBase { .. }));
    }

    #[test]
    fn no_overrides_matches_standard() {
        let before = BaserunnerState::loaded("a", "b", "c");
        for result in BattingResult::ALL {
            let manual = apply_manual_overrides(&before, result, "x", &ManualOverrides::new())
                .expect("apply");
            assert_eq!(manual, calculate_standard_advancement(&before, result, "x"), "{result}");
        }
    }
}
