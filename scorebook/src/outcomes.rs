//! `scorebook outcomes`: list the outcomes a batting result permits.

use std::path::Path;

use anyhow::{Context, Result};
use serde::Serialize;
use tracing::{debug, info};

use crate::core::bases::BaserunnerState;
use crate::core::generator::{generate_valid_outcomes, get_all_valid_outcomes};
use crate::core::result::BattingResult;
use crate::core::types::{AdvancementOutcome, OutcomeParameters};
use crate::io::at_bat_file::load_at_bat;

/// Which presets to enumerate.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutcomeScope {
    Preset(OutcomeParameters),
    All,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct OutcomeListing {
    pub before: BaserunnerState,
    pub result: BattingResult,
    pub batter: String,
    /// Preset used, `None` when every preset was enumerated.
    pub parameters: Option<OutcomeParameters>,
    pub outcomes: Vec<AdvancementOutcome>,
}

/// Enumerate outcomes for an in-memory at-bat.
pub fn list_outcomes(
    before: &BaserunnerState,
    result: BattingResult,
    batter_id: &str,
    scope: OutcomeScope,
) -> OutcomeListing {
    let (parameters, outcomes) = match scope {
        OutcomeScope::Preset(params) => (
            Some(params),
            generate_valid_outcomes(before, result, batter_id, params),
        ),
        OutcomeScope::All => (None, get_all_valid_outcomes(before, result, batter_id)),
    };
    debug!(%before, %result, count = outcomes.len(), "outcomes generated");
    OutcomeListing {
        before: before.clone(),
        result,
        batter: batter_id.to_string(),
        parameters,
        outcomes,
    }
}

/// Load an at-bat request and enumerate its outcomes.
///
/// Preset precedence: `scope` when given, then the file's `parameters`,
/// then `default_parameters`.
pub fn list_outcomes_from_file(
    path: &Path,
    scope: Option<OutcomeScope>,
    default_parameters: OutcomeParameters,
) -> Result<OutcomeListing> {
    let request = load_at_bat(path).with_context(|| "load at-bat for outcomes")?;
    let scope = scope.unwrap_or(OutcomeScope::Preset(
        request.parameters.unwrap_or(default_parameters),
    ));
    info!(path = %path.display(), ?scope, "listing outcomes");
    Ok(list_outcomes(
        &request.before,
        request.result,
        &request.batter,
        scope,
    ))
}
