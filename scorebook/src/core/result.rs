//! Batting result codes and their fixed scoring properties.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::core::bases::Base;

/// Outcome of a plate appearance, serialized by its scorebook code.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum BattingResult {
    #[serde(rename = "1B")]
    Single,
    #[serde(rename = "2B")]
    Double,
    #[serde(rename = "3B")]
    Triple,
    #[serde(rename = "HR")]
    HomeRun,
    #[serde(rename = "BB")]
    Walk,
    #[serde(rename = "IBB")]
    IntentionalWalk,
    #[serde(rename = "SO")]
    Strikeout,
    #[serde(rename = "GO")]
    GroundOut,
    #[serde(rename = "AO")]
    AirOut,
    #[serde(rename = "SF")]
    SacrificeFly,
    #[serde(rename = "E")]
    Error,
    #[serde(rename = "FC")]
    FieldersChoice,
    #[serde(rename = "DP")]
    DoublePlay,
}

/// Where the batter is guaranteed to end up for a given result.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BatterPlacement {
    OnBase(Base),
    Scores,
    Out,
}

/// Result code outside the closed set.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown batting result code '{0}'")]
pub struct UnknownResultCode(pub String);

impl BattingResult {
    pub const ALL: [BattingResult; 13] = [
        BattingResult::Single,
        BattingResult::Double,
        BattingResult::Triple,
        BattingResult::HomeRun,
        BattingResult::Walk,
        BattingResult::IntentionalWalk,
        BattingResult::Strikeout,
        BattingResult::GroundOut,
        BattingResult::AirOut,
        BattingResult::SacrificeFly,
        BattingResult::Error,
        BattingResult::FieldersChoice,
        BattingResult::DoublePlay,
    ];

    pub fn single() -> Self {
        BattingResult::Single
    }

    pub fn double() -> Self {
        BattingResult::Double
    }

    pub fn triple() -> Self {
        BattingResult::Triple
    }

    pub fn home_run() -> Self {
        BattingResult::HomeRun
    }

    pub fn walk() -> Self {
        BattingResult::Walk
    }

    pub fn intentional_walk() -> Self {
        BattingResult::IntentionalWalk
    }

    pub fn strikeout() -> Self {
        BattingResult::Strikeout
    }

    pub fn ground_out() -> Self {
        BattingResult::GroundOut
    }

    pub fn air_out() -> Self {
        BattingResult::AirOut
    }

    pub fn sacrifice_fly() -> Self {
        BattingResult::SacrificeFly
    }

    pub fn error() -> Self {
        BattingResult::Error
    }

    pub fn fielders_choice() -> Self {
        BattingResult::FieldersChoice
    }

    pub fn double_play() -> Self {
        BattingResult::DoublePlay
    }

    /// Scorebook code, e.g. `"1B"`.
    pub fn code(self) -> &'static str {
        match self {
            BattingResult::Single => "1B",
            BattingResult::Double => "2B",
            BattingResult::Triple => "3B",
            BattingResult::HomeRun => "HR",
            BattingResult::Walk => "BB",
            BattingResult::IntentionalWalk => "IBB",
            BattingResult::Strikeout => "SO",
            BattingResult::GroundOut => "GO",
            BattingResult::AirOut => "AO",
            BattingResult::SacrificeFly => "SF",
            BattingResult::Error => "E",
            BattingResult::FieldersChoice => "FC",
            BattingResult::DoublePlay => "DP",
        }
    }

    pub fn from_code(code: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|result| result.code() == code)
    }

    /// Human label used in outcome descriptions.
    pub fn name(self) -> &'static str {
        match self {
            BattingResult::Single => "single",
            BattingResult::Double => "double",
            BattingResult::Triple => "triple",
            BattingResult::HomeRun => "home run",
            BattingResult::Walk => "walk",
            BattingResult::IntentionalWalk => "intentional walk",
            BattingResult::Strikeout => "strikeout",
            BattingResult::GroundOut => "ground out",
            BattingResult::AirOut => "air out",
            BattingResult::SacrificeFly => "sacrifice fly",
            BattingResult::Error => "error",
            BattingResult::FieldersChoice => "fielder's choice",
            BattingResult::DoublePlay => "double play",
        }
    }

    /// Counts as a hit for batting average.
    pub fn is_hit(self) -> bool {
        matches!(
            self,
            BattingResult::Single
                | BattingResult::Double
                | BattingResult::Triple
                | BattingResult::HomeRun
        )
    }

    /// The batter is retired on this result.
    pub fn is_out(self) -> bool {
        matches!(self.batter_placement(), BatterPlacement::Out)
    }

    pub fn is_walk(self) -> bool {
        matches!(self, BattingResult::Walk | BattingResult::IntentionalWalk)
    }

    /// The batter takes a base, so runners in the force chain must move.
    pub fn requires_force_advancement(self) -> bool {
        !self.is_out()
    }

    /// Whether runs scoring on this result are credited to the batter.
    pub fn credits_rbi(self) -> bool {
        !matches!(self, BattingResult::Error | BattingResult::DoublePlay)
    }

    /// Minimum guaranteed placement of the batter.
    pub fn batter_placement(self) -> BatterPlacement {
        match self {
            BattingResult::Single
            | BattingResult::Walk
            | BattingResult::IntentionalWalk
            | BattingResult::Error
            | BattingResult::FieldersChoice => BatterPlacement::OnBase(Base::First),
            BattingResult::Double => BatterPlacement::OnBase(Base::Second),
            BattingResult::Triple => BatterPlacement::OnBase(Base::Third),
            BattingResult::HomeRun => BatterPlacement::Scores,
            BattingResult::Strikeout
            | BattingResult::GroundOut
            | BattingResult::AirOut
            | BattingResult::SacrificeFly
            | BattingResult::DoublePlay => BatterPlacement::Out,
        }
    }

    /// Outs implied by the result itself, before any runner is put out.
    pub fn batter_outs(self) -> u32 {
        match self {
            BattingResult::Strikeout
            | BattingResult::GroundOut
            | BattingResult::AirOut
            | BattingResult::SacrificeFly => 1,
            BattingResult::DoublePlay => 2,
            BattingResult::Single
            | BattingResult::Double
            | BattingResult::Triple
            | BattingResult::HomeRun
            | BattingResult::Walk
            | BattingResult::IntentionalWalk
            | BattingResult::Error
            | BattingResult::FieldersChoice => 0,
        }
    }
}

impl fmt::Display for BattingResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

impl FromStr for BattingResult {
    type Err = UnknownResultCode;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_code(s.trim()).ok_or_else(|| UnknownResultCode(s.to_string()))
    }
}
