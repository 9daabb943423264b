//! Shared value types passed between the generator, the advancement service
//! and the validation engine.
//!
//! All of these are created per at-bat and discarded afterwards; nothing here
//! holds state across calls.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::core::bases::BaserunnerState;

/// Preset controlling how far non-forced runners may be assumed to advance.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OutcomeParameters {
    #[default]
    Standard,
    Aggressive,
    FieldingError,
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown outcome parameters '{0}' (expected standard, aggressive or fielding_error)")]
pub struct UnknownPreset(pub String);

impl OutcomeParameters {
    pub const ALL: [OutcomeParameters; 3] = [
        OutcomeParameters::Standard,
        OutcomeParameters::Aggressive,
        OutcomeParameters::FieldingError,
    ];

    pub fn label(self) -> &'static str {
        match self {
            OutcomeParameters::Standard => "standard",
            OutcomeParameters::Aggressive => "aggressive",
            OutcomeParameters::FieldingError => "fielding_error",
        }
    }
}

impl fmt::Display for OutcomeParameters {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for OutcomeParameters {
    type Err = UnknownPreset;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_ascii_lowercase().replace('-', "_");
        OutcomeParameters::ALL
            .into_iter()
            .find(|preset| preset.label() == normalized)
            .ok_or_else(|| UnknownPreset(s.to_string()))
    }
}

/// Which rule-table variant produced an outcome.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OutcomeVariant {
    Standard,
    Aggressive,
    FieldingError,
}

impl OutcomeVariant {
    pub fn label(self) -> &'static str {
        match self {
            OutcomeVariant::Standard => "standard",
            OutcomeVariant::Aggressive => "aggressive",
            OutcomeVariant::FieldingError => "fielding error",
        }
    }
}

/// A candidate after-state bundle for one at-bat.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AdvancementOutcome {
    pub after_state: BaserunnerState,
    pub rbis: u32,
    /// Scoring runners ordered by starting base, batter last.
    pub runs_scored: Vec<String>,
    pub outs: u32,
    pub description: String,
    pub variant: OutcomeVariant,
}

impl AdvancementOutcome {
    /// Standard outcomes are valid under every preset; other variants only
    /// under the preset that produces them.
    pub fn is_valid_with_parameters(&self, params: OutcomeParameters) -> bool {
        match self.variant {
            OutcomeVariant::Standard => true,
            OutcomeVariant::Aggressive => params == OutcomeParameters::Aggressive,
            OutcomeVariant::FieldingError => params == OutcomeParameters::FieldingError,
        }
    }

    /// Same recorded result (state, runs, RBIs, outs), ignoring description.
    pub fn same_result_as(&self, other: &AdvancementOutcome) -> bool {
        self.after_state == other.after_state
            && self.runs_scored == other.runs_scored
            && self.rbis == other.rbis
            && self.outs == other.outs
    }
}
