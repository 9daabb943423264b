//! Rule-table outcome generator.
//!
//! Enumerates the after-states a batting result permits from a given
//! before-state. The per-result table is the contract: a double scores every
//! runner already on base, a single moves every runner exactly one base, and
//! so on. Presets only ever add variants on top of the standard outcome.

use crate::core::bases::{Base, BaserunnerState};
use crate::core::movement::{Fate, Movement};
use crate::core::result::{BatterPlacement, BattingResult};
use crate::core::types::{AdvancementOutcome, OutcomeParameters, OutcomeVariant};

/// Outcomes valid under `params`: the standard outcome first, then the
/// preset's extra variant when it differs from standard.
pub fn generate_valid_outcomes(
    before: &BaserunnerState,
    result: BattingResult,
    batter_id: &str,
    params: OutcomeParameters,
) -> Vec<AdvancementOutcome> {
    let standard = standard_movement(before, result, batter_id);
    let standard_rbis = rbis_for(&standard, result);
    let mut outcomes = vec![outcome_from(
        &standard,
        result,
        OutcomeVariant::Standard,
        standard_rbis,
    )];

    let extra = match params {
        OutcomeParameters::Standard => None,
        OutcomeParameters::Aggressive => aggressive_movement(before, result, batter_id)
            .map(|movement| {
                let rbis = rbis_for(&movement, result);
                outcome_from(&movement, result, OutcomeVariant::Aggressive, rbis)
            }),
        OutcomeParameters::FieldingError => fielding_error_movement(&standard).map(|movement| {
            outcome_from(&movement, result, OutcomeVariant::FieldingError, standard_rbis)
        }),
    };
    outcomes.extend(extra);
    outcomes
}

/// Union of outcomes across every preset, deduplicated by description.
pub fn get_all_valid_outcomes(
    before: &BaserunnerState,
    result: BattingResult,
    batter_id: &str,
) -> Vec<AdvancementOutcome> {
    let mut all: Vec<AdvancementOutcome> = Vec::new();
    for params in OutcomeParameters::ALL {
        for outcome in generate_valid_outcomes(before, result, batter_id, params) {
            if !all.iter().any(|seen| seen.description == outcome.description) {
                all.push(outcome);
            }
        }
    }
    all
}

/// True when `candidate` records the same result as any generated outcome.
pub fn validate_outcome(
    before: &BaserunnerState,
    result: BattingResult,
    batter_id: &str,
    candidate: &AdvancementOutcome,
) -> bool {
    get_all_valid_outcomes(before, result, batter_id)
        .iter()
        .any(|outcome| outcome.same_result_as(candidate))
}

/// The single canonical outcome for `result`, with no preset tuning.
pub fn standard_outcome(
    before: &BaserunnerState,
    result: BattingResult,
    batter_id: &str,
) -> AdvancementOutcome {
    let movement = standard_movement(before, result, batter_id);
    let rbis = rbis_for(&movement, result);
    outcome_from(&movement, result, OutcomeVariant::Standard, rbis)
}

/// Canonical per-runner fates for `result`.
pub fn standard_movement(
    before: &BaserunnerState,
    result: BattingResult,
    batter_id: &str,
) -> Movement {
    let runners = match result {
        BattingResult::Single | BattingResult::Error => {
            Movement::from_runners(before, |base| Fate::from_advance(base, 1))
        }
        BattingResult::Double | BattingResult::Triple | BattingResult::HomeRun => {
            Movement::from_runners(before, |_| Fate::Scored)
        }
        BattingResult::Walk | BattingResult::IntentionalWalk => {
            let forced = before.force_chain();
            Movement::from_runners(before, |base| {
                if forced.contains(&base) {
                    Fate::from_advance(base, 1)
                } else {
                    Fate::OnBase(base)
                }
            })
        }
        BattingResult::Strikeout
        | BattingResult::GroundOut
        | BattingResult::AirOut
        | BattingResult::DoublePlay => Movement::from_runners(before, Fate::OnBase),
        BattingResult::SacrificeFly => Movement::from_runners(before, |base| match base {
            Base::Third => Fate::Scored,
            other => Fate::OnBase(other),
        }),
        BattingResult::FieldersChoice => {
            let forced = before.force_chain();
            let lead = forced.last().copied();
            Movement::from_runners(before, |base| {
                if Some(base) == lead {
                    Fate::Out
                } else if forced.contains(&base) {
                    Fate::from_advance(base, 1)
                } else {
                    Fate::OnBase(base)
                }
            })
        }
    };
    runners.with_batter(batter_id, batter_fate(result))
}

/// Non-forced runners take an extra base. Only results where runners are
/// not already guaranteed to score have an aggressive variant.
fn aggressive_movement(
    before: &BaserunnerState,
    result: BattingResult,
    batter_id: &str,
) -> Option<Movement> {
    let runners = match result {
        BattingResult::Single | BattingResult::Error => {
            Movement::from_runners(before, |base| Fate::from_advance(base, 2))
        }
        BattingResult::SacrificeFly => {
            Movement::from_runners(before, |base| Fate::from_advance(base, 1))
        }
        _ => return None,
    };
    let movement = runners.with_batter(batter_id, batter_fate(result));
    (movement != standard_movement(before, result, batter_id)).then_some(movement)
}

/// Everyone left standing on a base takes one extra, unearned base.
fn fielding_error_movement(standard: &Movement) -> Option<Movement> {
    let mut movement = standard.clone();
    for m in &mut movement.moves {
        m.fate = m.fate.one_more_base();
    }
    (movement != *standard).then_some(movement)
}

fn batter_fate(result: BattingResult) -> Fate {
    match result.batter_placement() {
        BatterPlacement::OnBase(base) => Fate::OnBase(base),
        BatterPlacement::Scores => Fate::Scored,
        BatterPlacement::Out => Fate::Out,
    }
}

fn rbis_for(movement: &Movement, result: BattingResult) -> u32 {
    if !result.credits_rbi() {
        return 0;
    }
    let (_, runs) = movement.settle();
    u32::try_from(runs.len()).unwrap_or(u32::MAX)
}

fn outcome_from(
    movement: &Movement,
    result: BattingResult,
    variant: OutcomeVariant,
    rbis: u32,
) -> AdvancementOutcome {
    let (after_state, runs_scored) = movement.settle();
    AdvancementOutcome {
        after_state,
        rbis,
        runs_scored,
        outs: result.batter_outs() + movement.runner_outs(),
        description: format!("{}: {}", variant.label(), result.name()),
        variant,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{ids, state};

    fn standard(before: &BaserunnerState, result: BattingResult) -> AdvancementOutcome {
        generate_valid_outcomes(before, result, "x", OutcomeParameters::Standard)
            .into_iter()
            .next()
            .expect("standard outcome")
    }

    #[test]
    fn single_moves_everyone_one_base() {
        let outcome = standard(&state(Some("a"), None, Some("c")), BattingResult::single());
        assert_eq!(outcome.after_state, state(Some("x"), Some("a"), None));
        assert_eq!(outcome.runs_scored, ids(&["c"]));
        assert_eq!(outcome.rbis, 1);
        assert_eq!(outcome.outs, 0);
        assert_eq!(outcome.description, "standard: single");
    }

    /// Every runner scores on a double, including one starting at first.
    #[test]
    fn double_scores_every_runner() {
        let outcome = standard(&state(Some("a"), Some("b"), None), BattingResult::double());
        assert_eq!(outcome.after_state, state(None, Some("x"), None));
        assert_eq!(outcome.runs_scored, ids(&["a", "b"]));
        assert_eq!(outcome.rbis, 2);
    }

    #[test]
    fn triple_leaves_batter_on_third() {
        let outcome = standard(&state(Some("a"), None, None), BattingResult::triple());
        assert_eq!(outcome.after_state, state(None, None, Some("x")));
        assert_eq!(outcome.runs_scored, ids(&["a"]));
    }

    #[test]
    fn grand_slam_clears_the_bases() {
        let before = BaserunnerState::loaded("a", "b", "c");
        let outcome = standard(&before, BattingResult::home_run());
        assert!(outcome.after_state.is_empty());
        assert_eq!(outcome.runs_scored, ids(&["a", "b", "c", "x"]));
        assert_eq!(outcome.rbis, 4);
    }

    #[test]
    fn walk_only_moves_forced_runners() {
        let outcome = standard(&state(None, Some("b"), Some("c")), BattingResult::walk());
        assert_eq!(outcome.after_state, state(Some("x"), Some("b"), Some("c")));
        assert!(outcome.runs_scored.is_empty());
        assert_eq!(outcome.rbis, 0);

        let before = state(Some("a"), None, Some("c"));
        let outcome = standard(&before, BattingResult::intentional_walk());
        assert_eq!(outcome.after_state, state(Some("x"), Some("a"), Some("c")));
    }

    #[test]
    fn bases_loaded_walk_forces_in_a_run() {
        let outcome = standard(&BaserunnerState::loaded("a", "b", "c"), BattingResult::walk());
        assert_eq!(outcome.after_state, BaserunnerState::loaded("x", "a", "b"));
        assert_eq!(outcome.runs_scored, ids(&["c"]));
        assert_eq!(outcome.rbis, 1);
    }

    #[test]
    fn strikeout_freezes_runners() {
        let before = BaserunnerState::loaded("a", "b", "c");
        let outcome = standard(&before, BattingResult::strikeout());
        assert_eq!(outcome.after_state, before);
        assert_eq!(outcome.outs, 1);
        assert_eq!(outcome.rbis, 0);
    }

    #[test]
    fn double_play_records_two_outs() {
        let before = state(Some("a"), None, None);
        let outcome = standard(&before, BattingResult::double_play());
        assert_eq!(outcome.after_state, before);
        assert_eq!(outcome.outs, 2);
    }

    #[test]
    fn sacrifice_fly_scores_runner_from_third() {
        let before = state(Some("a"), None, Some("c"));
        let outcome = standard(&before, BattingResult::sacrifice_fly());
        assert_eq!(outcome.after_state, state(Some("a"), None, None));
        assert_eq!(outcome.runs_scored, ids(&["c"]));
        assert_eq!(outcome.rbis, 1);
        assert_eq!(outcome.outs, 1);
    }

    /// The lead forced runner is retired; trailing forced runners move up.
    #[test]
    fn fielders_choice_retires_lead_forced_runner() {
        let before = state(Some("a"), Some("b"), None);
        let outcome = standard(&before, BattingResult::fielders_choice());
        assert_eq!(outcome.after_state, state(Some("x"), Some("a"), None));
        assert_eq!(outcome.outs, 1);
        assert_eq!(outcome.rbis, 0);

        let before = state(None, Some("b"), None);
        let outcome = standard(&before, BattingResult::fielders_choice());
        assert_eq!(outcome.after_state, state(Some("x"), Some("b"), None));
        assert_eq!(outcome.outs, 0);
    }

    #[test]
    fn error_scores_without_rbi() {
        let outcome = standard(&state(None, None, Some("c")), BattingResult::error());
        assert_eq!(outcome.runs_scored, ids(&["c"]));
        assert_eq!(outcome.rbis, 0);
    }

    #[test]
    fn aggressive_single_sends_runner_from_first_to_third() {
        let outcomes = generate_valid_outcomes(
            &state(Some("a"), None, None),
            BattingResult::single(),
            "x",
            OutcomeParameters::Aggressive,
        );
        assert_eq!(outcomes.len(), 2);
        let aggressive = &outcomes[1];
        assert_eq!(aggressive.variant, OutcomeVariant::Aggressive);
        assert_eq!(aggressive.after_state, state(Some("x"), None, Some("a")));
        assert!(aggressive.is_valid_with_parameters(OutcomeParameters::Aggressive));
    }

    /// No aggressive variant is emitted when it would match standard.
    #[test]
    fn aggressive_skips_identical_variant() {
        let outcomes = generate_valid_outcomes(
            &state(None, None, Some("c")),
            BattingResult::single(),
            "x",
            OutcomeParameters::Aggressive,
        );
        assert_eq!(outcomes.len(), 1);
    }

    #[test]
    fn fielding_error_variant_keeps_standard_rbis() {
        let outcomes = generate_valid_outcomes(
            &state(None, Some("b"), None),
            BattingResult::single(),
            "x",
            OutcomeParameters::FieldingError,
        );
        let error = outcomes
            .iter()
            .find(|o| o.variant == OutcomeVariant::FieldingError)
            .expect("error variant");
        assert_eq!(error.after_state, state(None, Some("x"), None));
        assert_eq!(error.runs_scored, ids(&["b"]));
        assert_eq!(error.rbis, 0);
        assert_eq!(error.description, "fielding error: single");
    }

    #[test]
    fn all_outcomes_dedupe_by_description() {
        let outcomes = get_all_valid_outcomes(
            &state(Some("a"), None, None),
            BattingResult::single(),
            "x",
        );
        let descriptions: Vec<_> = outcomes.iter().map(|o| o.description.as_str()).collect();
        assert_eq!(
            descriptions,
            vec!["standard: single", "aggressive: single", "fielding error: single"]
        );
    }

    #[test]
    fn validate_outcome_ignores_description() {
        let before = state(Some("a"), None, None);
        let mut candidate = standard(&before, BattingResult::single());
        candidate.description = "typed in by the scorer".to_string();
        assert!(validate_outcome(&before, BattingResult::single(), "x", &candidate));

        candidate.rbis = 1;
        assert!(!validate_outcome(&before, BattingResult::single(), "x", &candidate));
    }
}
