//! `scorebook record`: compute, validate and report one at-bat.
//!
//! Flow: advancement (standard, or with the scorekeeper's overrides) →
//! validation engine → optional generator cross-check. Only an at-bat that
//! clears every step comes back as `Recorded`.

use std::path::Path;

use anyhow::{Context, Result};
use serde::Serialize;
use tracing::{debug, info, warn};

use crate::core::advancement::{
    AdvancementResult, apply_manual_overrides, calculate_standard_advancement,
};
use crate::core::generator::validate_outcome;
use crate::core::result::BattingResult;
use crate::core::types::{AdvancementOutcome, OutcomeVariant};
use crate::core::validation::{ValidationResult, validate_at_bat};
use crate::io::at_bat_file::{AtBatRequest, load_at_bat};
use crate::io::config::RecordingConfig;

/// Structured record outcome, serialized as the command's JSON report.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum RecordOutcome {
    /// Advancement computed and every check passed.
    Recorded {
        advancement: AdvancementResult,
        validation: ValidationResult,
    },
    /// The advancement service refused the overrides.
    OverrideRejected { error: String },
    /// The computed at-bat broke at least one validation rule.
    ValidationFailed {
        advancement: AdvancementResult,
        validation: ValidationResult,
    },
    /// Valid, but not an outcome the generator produces for this result.
    NotGenerated {
        advancement: AdvancementResult,
        validation: ValidationResult,
    },
}

impl RecordOutcome {
    pub fn is_recorded(&self) -> bool {
        matches!(self, RecordOutcome::Recorded { .. })
    }
}

/// Record an in-memory at-bat request.
pub fn record_at_bat(request: &AtBatRequest, recording: &RecordingConfig) -> RecordOutcome {
    let advancement = if request.overrides.is_empty() {
        calculate_standard_advancement(&request.before, request.result, &request.batter)
    } else {
        match apply_manual_overrides(
            &request.before,
            request.result,
            &request.batter,
            &request.overrides,
        ) {
            Ok(advancement) => advancement,
            Err(err) => {
                warn!(batter = %request.batter, error = %err, "overrides rejected");
                return RecordOutcome::OverrideRejected {
                    error: err.to_string(),
                };
            }
        }
    };
    debug!(
        after = %advancement.final_baserunners,
        runs = advancement.scoring_runners.len(),
        rbis = advancement.rbis,
        outs = advancement.outs,
        "advancement computed"
    );

    let data = advancement.clone().into_validation_data(
        &request.before,
        request.result,
        &request.batter,
    );
    let validation = validate_at_bat(&data);
    if !validation.is_valid {
        warn!(
            violations = validation.violations.len(),
            "at-bat failed validation"
        );
        return RecordOutcome::ValidationFailed {
            advancement,
            validation,
        };
    }

    if recording.require_generated_outcome {
        let candidate = as_candidate(&advancement, request.result);
        if !validate_outcome(&request.before, request.result, &request.batter, &candidate) {
            warn!(result = %request.result, "outcome is not a generated outcome");
            return RecordOutcome::NotGenerated {
                advancement,
                validation,
            };
        }
    }

    RecordOutcome::Recorded {
        advancement,
        validation,
    }
}

/// Load an at-bat request from `path` and record it.
pub fn record_at_bat_file(path: &Path, recording: &RecordingConfig) -> Result<RecordOutcome> {
    let request = load_at_bat(path).with_context(|| "load at-bat for record")?;
    let outcome = record_at_bat(&request, recording);
    info!(
        path = %path.display(),
        recorded = outcome.is_recorded(),
        "record finished"
    );
    Ok(outcome)
}

fn as_candidate(advancement: &AdvancementResult, result: BattingResult) -> AdvancementOutcome {
    AdvancementOutcome {
        after_state: advancement.final_baserunners.clone(),
        rbis: advancement.rbis,
        runs_scored: advancement.scoring_runners.clone(),
        outs: advancement.outs,
        description: format!("recorded: {}", result.name()),
        variant: OutcomeVariant::Standard,
    }
}
