//! Test-only helpers for building base states, at-bats and fixture files.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};

use crate::core::advancement::{ManualOverrides, RunnerDestination};
use crate::core::bases::BaserunnerState;
use crate::core::validation::AtBatValidationData;

/// Batter id used by [`at_bat`].
pub const BATTER: &str = "x";

/// Base state from optional runner ids on first, second and third.
pub fn state(first: Option<&str>, second: Option<&str>, third: Option<&str>) -> BaserunnerState {
    BaserunnerState::new(
        first.map(str::to_string),
        second.map(str::to_string),
        third.map(str::to_string),
    )
}

pub fn ids(runners: &[&str]) -> Vec<String> {
    runners.iter().map(|id| id.to_string()).collect()
}

pub fn overrides(entries: &[(&str, RunnerDestination)]) -> ManualOverrides {
    entries
        .iter()
        .map(|(id, destination)| (id.to_string(), *destination))
        .collect()
}

/// Recorded at-bat for batter [`BATTER`].
pub fn at_bat(
    before: BaserunnerState,
    after: BaserunnerState,
    code: &str,
    rbis: i32,
    outs: i32,
    runs: &[&str],
) -> AtBatValidationData {
    AtBatValidationData {
        before_state: before,
        after_state: after,
        batting_result: code.to_string(),
        batter_id: BATTER.to_string(),
        rbis,
        outs,
        runs_scored: ids(runs),
    }
}

/// Temporary directory for at-bat and config fixture files.
pub struct TestDir {
    temp: tempfile::TempDir,
}

impl TestDir {
    pub fn new() -> Result<Self> {
        let temp = tempfile::tempdir().context("create tempdir")?;
        Ok(Self { temp })
    }

    pub fn path(&self) -> &Path {
        self.temp.path()
    }

    /// Write `contents` to `name` inside the directory.
    pub fn write(&self, name: &str, contents: &str) -> Result<PathBuf> {
        let path = self.temp.path().join(name);
        fs::write(&path, contents).with_context(|| format!("write {}", path.display()))?;
        Ok(path)
    }

    pub fn write_json<T: serde::Serialize>(&self, name: &str, value: &T) -> Result<PathBuf> {
        let payload = serde_json::to_string_pretty(value).context("serialize fixture")?;
        self.write(name, &payload)
    }
}
