//! Per-runner fates for a single at-bat and the no-passing order rule.

use crate::core::bases::{Base, BaserunnerState};

/// Where a runner (or the batter) finishes the at-bat.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Fate {
    OnBase(Base),
    Scored,
    Out,
}

impl Fate {
    /// Fate after moving `bases` forward from `base`.
    pub fn from_advance(base: Base, bases: u8) -> Fate {
        match base.advanced_by(bases) {
            Some(next) => Fate::OnBase(next),
            None => Fate::Scored,
        }
    }

    /// Bases covered from home plate: 1..=3 on base, 4 when scored, `None` when out.
    pub fn progress(self) -> Option<u8> {
        match self {
            Fate::OnBase(base) => Some(base.number()),
            Fate::Scored => Some(4),
            Fate::Out => None,
        }
    }

    /// One base further along; runners already home or out are unchanged.
    pub fn one_more_base(self) -> Fate {
        match self {
            Fate::OnBase(base) => Fate::from_advance(base, 1),
            other => other,
        }
    }
}

/// A single participant's movement. `origin` is `None` for the batter.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunnerMove {
    pub runner_id: String,
    pub origin: Option<Base>,
    pub fate: Fate,
}

impl RunnerMove {
    fn start(&self) -> u8 {
        self.origin.map_or(0, Base::number)
    }
}

/// All moves of one at-bat, ordered: runners first to third, then the batter.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Movement {
    pub moves: Vec<RunnerMove>,
}

impl Movement {
    /// Build from the before-state, assigning each runner a fate by base.
    pub fn from_runners(
        before: &BaserunnerState,
        mut fate_for: impl FnMut(Base) -> Fate,
    ) -> Movement {
        let moves = before
            .occupied()
            .map(|(base, id)| RunnerMove {
                runner_id: id.to_string(),
                origin: Some(base),
                fate: fate_for(base),
            })
            .collect();
        Movement { moves }
    }

    /// Append the batter's move.
    pub fn with_batter(mut self, batter_id: &str, fate: Fate) -> Movement {
        self.moves.push(RunnerMove {
            runner_id: batter_id.to_string(),
            origin: None,
            fate,
        });
        self
    }

    /// Reconstruct fates from a recorded at-bat. Runners absent from both the
    /// after-state and the scoring list are treated as put out.
    pub fn infer(
        before: &BaserunnerState,
        after: &BaserunnerState,
        runs_scored: &[String],
        batter_id: &str,
    ) -> Movement {
        let fate_of = |id: &str| {
            if let Some(base) = after.base_of(id) {
                Fate::OnBase(base)
            } else if runs_scored.iter().any(|scored| scored == id) {
                Fate::Scored
            } else {
                Fate::Out
            }
        };
        let moves = before
            .occupied()
            .map(|(base, id)| RunnerMove {
                runner_id: id.to_string(),
                origin: Some(base),
                fate: fate_of(id),
            })
            .collect();
        Movement { moves }.with_batter(batter_id, fate_of(batter_id))
    }

    pub fn fate_of(&self, runner_id: &str) -> Option<Fate> {
        self.moves
            .iter()
            .find(|m| m.runner_id == runner_id)
            .map(|m| m.fate)
    }

    /// Resulting base occupancy and scoring runners (in move order).
    pub fn settle(&self) -> (BaserunnerState, Vec<String>) {
        let mut after = BaserunnerState::empty();
        let mut runs = Vec::new();
        for m in &self.moves {
            match m.fate {
                Fate::OnBase(base) => after = after.with_runner(base, &m.runner_id),
                Fate::Scored => runs.push(m.runner_id.clone()),
                Fate::Out => {}
            }
        }
        (after, runs)
    }

    /// Runners (not the batter) put out.
    pub fn runner_outs(&self) -> u32 {
        let outs = self
            .moves
            .iter()
            .filter(|m| m.origin.is_some() && m.fate == Fate::Out)
            .count();
        u32::try_from(outs).unwrap_or(u32::MAX)
    }

    /// Every `(trailing, leading)` pair where the trailing participant
    /// finishes level with or beyond a leading runner who neither scored nor
    /// was put out.
    pub fn passes(&self) -> Vec<(&RunnerMove, &RunnerMove)> {
        let mut passes = Vec::new();
        for leading in &self.moves {
            let Fate::OnBase(lead_base) = leading.fate else {
                continue;
            };
            for trailing in &self.moves {
                if trailing.start() >= leading.start() {
                    continue;
                }
                let passed = trailing
                    .fate
                    .progress()
                    .is_some_and(|progress| progress >= lead_base.number());
                if passed {
                    passes.push((trailing, leading));
                }
            }
        }
        passes
    }

    pub fn first_pass(&self) -> Option<(&RunnerMove, &RunnerMove)> {
        self.passes().into_iter().next()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn corners() -> BaserunnerState {
        BaserunnerState::empty()
            .with_runner(Base::First, "a")
            .with_runner(Base::Third, "c")
    }

    #[test]
    fn settle_orders_runs_by_starting_base_then_batter() {
        let movement =
            Movement::from_runners(&corners(), |_| Fate::Scored).with_batter("x", Fate::Scored);
        let (after, runs) = movement.settle();
        assert!(after.is_empty());
        assert_eq!(runs, vec!["a", "c", "x"]);
    }

    #[test]
    fn uniform_advance_keeps_order() {
        let movement = Movement::from_runners(&corners(), |base| Fate::from_advance(base, 1))
            .with_batter("x", Fate::OnBase(Base::First));
        assert!(movement.first_pass().is_none());
        let (after, runs) = movement.settle();
        assert_eq!(after, BaserunnerState::new(Some("x".into()), Some("a".into()), None));
        assert_eq!(runs, vec!["c"]);
    }

    /// A trailing runner scoring past a leading runner who held is a pass.
    #[test]
    fn scoring_past_a_holding_runner_is_a_pass() {
        let movement = Movement::from_runners(&corners(), |base| match base {
            Base::First => Fate::Scored,
            _ => Fate::OnBase(base),
        });
        let (trailing, leading) = movement.first_pass().expect("pass");
        assert_eq!(trailing.runner_id, "a");
        assert_eq!(leading.runner_id, "c");
    }

    #[test]
    fn batter_cannot_land_on_an_occupied_base() {
        let movement = Movement::from_runners(&corners(), Fate::OnBase)
            .with_batter("x", Fate::OnBase(Base::First));
        let (trailing, leading) = movement.first_pass().expect("pass");
        assert_eq!(trailing.runner_id, "x");
        assert_eq!(leading.runner_id, "a");
    }

    /// Runners who are out never block the runners behind them.
    #[test]
    fn leading_runner_put_out_does_not_block() {
        let movement = Movement::from_runners(&corners(), |base| match base {
            Base::First => Fate::Scored,
            _ => Fate::Out,
        });
        assert!(movement.first_pass().is_none());
        assert_eq!(movement.runner_outs(), 1);
    }

    #[test]
    fn infer_treats_missing_runners_as_out() {
        let after = BaserunnerState::empty().with_runner(Base::Second, "x");
        let movement = Movement::infer(&corners(), &after, &["c".to_string()], "x");
        assert_eq!(movement.fate_of("a"), Some(Fate::Out));
        assert_eq!(movement.fate_of("c"), Some(Fate::Scored));
        assert_eq!(movement.fate_of("x"), Some(Fate::OnBase(Base::Second)));
    }
}
