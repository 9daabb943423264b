//! Scorebook configuration stored in `scorebook.toml`.

use std::fs;
use std::path::Path;

use anyhow::{Context, Result, anyhow};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::core::types::OutcomeParameters;

/// Default config file name, resolved against the working directory.
pub const DEFAULT_CONFIG_FILE: &str = "scorebook.toml";

/// Scorebook configuration (TOML).
///
/// Edited by humans; missing fields default to the values below.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct ScorebookConfig {
    /// Preset used by `scorebook outcomes` when `--parameters` is not given.
    pub default_parameters: OutcomeParameters,

    pub recording: RecordingConfig,

    pub logging: LoggingConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct RecordingConfig {
    /// Also reject at-bats whose outcome is not one the generator produces.
    pub require_generated_outcome: bool,

    /// Pretty-print JSON reports.
    pub pretty_json: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct LoggingConfig {
    /// Filter directive used when `RUST_LOG` is unset (e.g. `"scorebook=debug"`).
    pub filter: String,
}

impl Default for RecordingConfig {
    fn default() -> Self {
        Self {
            require_generated_outcome: false,
            pretty_json: true,
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            filter: "warn".to_string(),
        }
    }
}

impl Default for ScorebookConfig {
    fn default() -> Self {
        Self {
            default_parameters: OutcomeParameters::Standard,
            recording: RecordingConfig::default(),
            logging: LoggingConfig::default(),
        }
    }
}

impl ScorebookConfig {
    pub fn validate(&self) -> Result<()> {
        if self.logging.filter.trim().is_empty() {
            return Err(anyhow!("logging.filter must be a non-empty directive"));
        }
        Ok(())
    }
}

/// Load config from a TOML file.
///
/// If the file is missing, returns `ScorebookConfig::default()`.
pub fn load_config(path: &Path) -> Result<ScorebookConfig> {
    if !path.exists() {
        debug!(path = %path.display(), "config missing, using defaults");
        let cfg = ScorebookConfig::default();
        cfg.validate()?;
        return Ok(cfg);
    }
    let contents = fs::read_to_string(path).with_context(|| format!("read {}", path.display()))?;
    let cfg: ScorebookConfig =
        toml::from_str(&contents).with_context(|| format!("parse {}", path.display()))?;
    cfg.validate()?;
    debug!(path = %path.display(), parameters = %cfg.default_parameters, "config loaded");
    Ok(cfg)
}

/// Atomically write config to disk (temp file + rename).
pub fn write_config(path: &Path, cfg: &ScorebookConfig) -> Result<()> {
    cfg.validate()?;
    let mut buf = toml::to_string_pretty(cfg).context("serialize config toml")?;
    buf.push('\n');
    write_atomic(path, &buf)
}

fn write_atomic(path: &Path, contents: &str) -> Result<()> {
    let parent = path
        .parent()
        .with_context(|| format!("config path missing parent {}", path.display()))?;
    fs::create_dir_all(parent).with_context(|| format!("create directory {}", parent.display()))?;
    let tmp_path = path.with_extension("toml.tmp");
    fs::write(&tmp_path, contents)
        .with_context(|| format!("write temp config {}", tmp_path.display()))?;
    fs::rename(&tmp_path, path).with_context(|| format!("replace config {}", path.display()))?;
    Ok(())
}
