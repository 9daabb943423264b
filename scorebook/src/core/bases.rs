//! Base occupancy snapshot taken before or after an at-bat.

use std::fmt;

use serde::{Deserialize, Serialize};

/// One of the three bases a runner can occupy. Home plate is not a `Base`:
/// reaching it means the runner scored.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Base {
    First,
    Second,
    Third,
}

impl Base {
    /// Bases in running order.
    pub const ALL: [Base; 3] = [Base::First, Base::Second, Base::Third];

    /// Distance from home plate in bases (1..=3).
    pub fn number(self) -> u8 {
        match self {
            Base::First => 1,
            Base::Second => 2,
            Base::Third => 3,
        }
    }

    pub fn from_number(number: u8) -> Option<Base> {
        match number {
            1 => Some(Base::First),
            2 => Some(Base::Second),
            3 => Some(Base::Third),
            _ => None,
        }
    }

    /// Base reached after moving `bases` forward; `None` once past third (scored).
    pub fn advanced_by(self, bases: u8) -> Option<Base> {
        Base::from_number(self.number().saturating_add(bases))
    }
}

impl fmt::Display for Base {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Base::First => "first",
            Base::Second => "second",
            Base::Third => "third",
        };
        f.write_str(label)
    }
}

/// Immutable snapshot of who occupies first, second and third base.
///
/// Equality is structural. A runner id should appear in at most one slot;
/// the validation engine reports states that break this.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct BaserunnerState {
    #[serde(default)]
    pub first: Option<String>,
    #[serde(default)]
    pub second: Option<String>,
    #[serde(default)]
    pub third: Option<String>,
}

impl BaserunnerState {
    /// Bases empty.
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn new(first: Option<String>, second: Option<String>, third: Option<String>) -> Self {
        Self {
            first,
            second,
            third,
        }
    }

    /// Bases loaded with the given runners.
    pub fn loaded(first: &str, second: &str, third: &str) -> Self {
        Self::empty()
            .with_runner(Base::First, first)
            .with_runner(Base::Second, second)
            .with_runner(Base::Third, third)
    }

    /// Copy of this state with `runner_id` placed on `base`.
    pub fn with_runner(mut self, base: Base, runner_id: &str) -> Self {
        *self.slot_mut(base) = Some(runner_id.to_string());
        self
    }

    pub fn runner_on(&self, base: Base) -> Option<&str> {
        match base {
            Base::First => self.first.as_deref(),
            Base::Second => self.second.as_deref(),
            Base::Third => self.third.as_deref(),
        }
    }

    pub fn is_occupied(&self, base: Base) -> bool {
        self.runner_on(base).is_some()
    }

    /// Occupied bases with their runner, ordered first to third.
    pub fn occupied(&self) -> impl Iterator<Item = (Base, &str)> + '_ {
        Base::ALL
            .into_iter()
            .filter_map(|base| self.runner_on(base).map(|id| (base, id)))
    }

    pub fn runner_count(&self) -> usize {
        self.occupied().count()
    }

    pub fn is_empty(&self) -> bool {
        self.runner_count() == 0
    }

    pub fn is_loaded(&self) -> bool {
        self.runner_count() == Base::ALL.len()
    }

    /// Base occupied by `runner_id`, lowest first if the id is duplicated.
    pub fn base_of(&self, runner_id: &str) -> Option<Base> {
        self.occupied()
            .find(|(_, id)| *id == runner_id)
            .map(|(base, _)| base)
    }

    pub fn contains(&self, runner_id: &str) -> bool {
        self.base_of(runner_id).is_some()
    }

    /// Bases whose runners are forced to move when the batter takes first:
    /// the unbroken run of occupied bases starting at first.
    pub fn force_chain(&self) -> Vec<Base> {
        Base::ALL
            .into_iter()
            .take_while(|base| self.is_occupied(*base))
            .collect()
    }

    fn slot_mut(&mut self, base: Base) -> &mut Option<String> {
        match base {
            Base::First => &mut self.first,
            Base::Second => &mut self.second,
            Base::Third => &mut self.third,
        }
    }
}

impl fmt::Display for BaserunnerState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let slot = |base| self.runner_on(base).unwrap_or("-");
        write!(
            f,
            "[{}, {}, {}]",
            slot(Base::First),
            slot(Base::Second),
            slot(Base::Third)
        )
    }
}
