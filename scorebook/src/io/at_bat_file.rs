//! At-bat file loading with schema validation.

use std::fs;
use std::path::Path;

use anyhow::{Context, Result, anyhow};
use jsonschema::validator_for;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::debug;

use crate::core::advancement::ManualOverrides;
use crate::core::bases::BaserunnerState;
use crate::core::result::BattingResult;
use crate::core::types::OutcomeParameters;
use crate::core::validation::AtBatValidationData;

const AT_BAT_SCHEMA: &str = include_str!(concat!(
    env!("CARGO_MANIFEST_DIR"),
    "/../schemas/at_bat/v1.schema.json"
));

/// Inputs supplied by the scoring UI for one at-bat.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AtBatRequest {
    pub before: BaserunnerState,
    pub result: BattingResult,
    pub batter: String,
    #[serde(default, skip_serializing_if = "ManualOverrides::is_empty")]
    pub overrides: ManualOverrides,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub parameters: Option<OutcomeParameters>,
}

/// Load and schema-validate an at-bat request.
pub fn load_at_bat(path: &Path) -> Result<AtBatRequest> {
    let contents =
        fs::read_to_string(path).with_context(|| format!("read at-bat {}", path.display()))?;
    parse_at_bat(&contents).with_context(|| format!("load at-bat {}", path.display()))
}

/// Parse and schema-validate an at-bat request from JSON text.
pub fn parse_at_bat(contents: &str) -> Result<AtBatRequest> {
    let value: Value = serde_json::from_str(contents).context("parse at-bat json")?;
    validate_schema(&value)?;
    let request: AtBatRequest =
        serde_json::from_value(value).context("deserialize at-bat request")?;
    debug!(
        result = %request.result,
        batter = %request.batter,
        overrides = request.overrides.len(),
        "at-bat request loaded"
    );
    Ok(request)
}

/// Load a recorded at-bat for validation. The result code is not checked
/// here; unknown codes are reported by the validation engine.
pub fn load_validation_data(path: &Path) -> Result<AtBatValidationData> {
    let contents =
        fs::read_to_string(path).with_context(|| format!("read at-bat {}", path.display()))?;
    serde_json::from_str(&contents).with_context(|| format!("parse at-bat {}", path.display()))
}

fn validate_schema(instance: &Value) -> Result<()> {
    let schema: Value = serde_json::from_str(AT_BAT_SCHEMA).context("parse at-bat schema")?;
    let compiled = validator_for(&schema).map_err(|err| anyhow!("invalid schema: {}", err))?;
    if !compiled.is_valid(instance) {
        let messages = compiled
            .iter_errors(instance)
            .map(|err| err.to_string())
            .collect::<Vec<_>>();
        return Err(anyhow!(
            "at-bat schema validation failed: {}",
            messages.join("; ")
        ));
    }
    Ok(())
}
