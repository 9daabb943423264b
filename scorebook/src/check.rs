//! `scorebook check`: run the validation engine over a recorded at-bat.

use std::path::Path;

use anyhow::{Context, Result};
use tracing::{debug, info};

use crate::core::validation::{AtBatValidationData, ValidationEngine, ValidationResult};
use crate::io::at_bat_file::load_validation_data;

/// Validate an in-memory at-bat against the critical rules.
pub fn check_at_bat(data: &AtBatValidationData) -> ValidationResult {
    let engine = ValidationEngine::with_critical_rules();
    debug!(rules = ?engine.rule_names(), result = %data.batting_result, "checking at-bat");
    let verdict = engine.validate_at_bat(data);
    for violation in &verdict.violations {
        debug!(kind = %violation.kind, message = %violation.message, "violation");
    }
    verdict
}

/// Load a recorded at-bat from `path` and validate it.
pub fn check_at_bat_file(path: &Path) -> Result<ValidationResult> {
    let data = load_validation_data(path).with_context(|| "load at-bat for check")?;
    let verdict = check_at_bat(&data);
    info!(
        path = %path.display(),
        is_valid = verdict.is_valid,
        violations = verdict.violations.len(),
        "check finished"
    );
    Ok(verdict)
}
