//! Scorebook CLI: at-bat outcomes, recording and validation.
//!
//! Reports are JSON on stdout; diagnostics go to stderr via `RUST_LOG`.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use serde::Serialize;

use scorebook::check::check_at_bat_file;
use scorebook::core::types::OutcomeParameters;
use scorebook::exit_codes;
use scorebook::io::config::{DEFAULT_CONFIG_FILE, ScorebookConfig, load_config};
use scorebook::logging;
use scorebook::outcomes::{OutcomeScope, list_outcomes_from_file};
use scorebook::record::record_at_bat_file;

#[derive(Parser)]
#[command(
    name = "scorebook",
    version,
    about = "At-bat outcome and validation engine"
)]
struct Cli {
    /// Config file (defaults to `scorebook.toml` in the working directory).
    #[arg(long, global = true, value_name = "PATH")]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// List the outcomes a batting result permits from the given bases.
    Outcomes {
        /// At-bat request JSON file.
        file: PathBuf,
        /// Preset to enumerate (standard, aggressive, fielding_error).
        #[arg(long, conflicts_with = "all")]
        parameters: Option<OutcomeParameters>,
        /// Enumerate every preset.
        #[arg(long)]
        all: bool,
    },
    /// Compute, validate and report the outcome of an at-bat request.
    Record {
        /// At-bat request JSON file.
        file: PathBuf,
    },
    /// Validate a recorded at-bat (before/after states, RBIs, outs).
    Check {
        /// Recorded at-bat JSON file.
        file: PathBuf,
    },
}

fn main() {
    let cli = Cli::parse();
    match run(cli) {
        Ok(code) => std::process::exit(code),
        Err(err) => {
            eprintln!("{:#}", err);
            std::process::exit(exit_codes::INVALID);
        }
    }
}

fn run(cli: Cli) -> Result<i32> {
    let config_path = cli
        .config
        .unwrap_or_else(|| PathBuf::from(DEFAULT_CONFIG_FILE));
    let config = load_config(&config_path).context("load config")?;
    logging::init(&config.logging.filter);

    match cli.command {
        Command::Outcomes {
            file,
            parameters,
            all,
        } => cmd_outcomes(&config, &file, parameters, all),
        Command::Record { file } => cmd_record(&config, &file),
        Command::Check { file } => cmd_check(&config, &file),
    }
}

fn cmd_outcomes(
    config: &ScorebookConfig,
    file: &Path,
    parameters: Option<OutcomeParameters>,
    all: bool,
) -> Result<i32> {
    let scope = if all {
        Some(OutcomeScope::All)
    } else {
        parameters.map(OutcomeScope::Preset)
    };
    let listing = list_outcomes_from_file(file, scope, config.default_parameters)?;
    print_json(config, &listing)?;
    Ok(exit_codes::OK)
}

fn cmd_record(config: &ScorebookConfig, file: &Path) -> Result<i32> {
    let outcome = record_at_bat_file(file, &config.recording)?;
    print_json(config, &outcome)?;
    if outcome.is_recorded() {
        Ok(exit_codes::OK)
    } else {
        Ok(exit_codes::REJECTED)
    }
}

fn cmd_check(config: &ScorebookConfig, file: &Path) -> Result<i32> {
    let verdict = check_at_bat_file(file)?;
    print_json(config, &verdict)?;
    if verdict.is_valid {
        Ok(exit_codes::OK)
    } else {
        Ok(exit_codes::REJECTED)
    }
}

fn print_json<T: Serialize>(config: &ScorebookConfig, value: &T) -> Result<()> {
    let payload = if config.recording.pretty_json {
        serde_json::to_string_pretty(value)
    } else {
        serde_json::to_string(value)
    }
    .context("serialize report")?;
    println!("{payload}");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_outcomes_with_preset() {
        let cli = Cli::parse_from([
            "scorebook",
            "outcomes",
            "at_bat.json",
            "--parameters",
            "fielding-error",
        ]);
        assert!(matches!(
            cli.command,
            Command::Outcomes {
                parameters: Some(OutcomeParameters::FieldingError),
                all: false,
                ..
            }
        ));
    }

    #[test]
    fn parse_outcomes_all() {
        let cli = Cli::parse_from(["scorebook", "outcomes", "at_bat.json", "--all"]);
        assert!(matches!(
            cli.command,
            Command::Outcomes {
                parameters: None,
                all: true,
                ..
            }
        ));
    }

    #[test]
    fn preset_and_all_conflict() {
        let parsed = Cli::try_parse_from([
            "scorebook",
            "outcomes",
            "at_bat.json",
            "--all",
            "--parameters",
            "standard",
        ]);
        assert!(parsed.is_err());
    }

    #[test]
    fn parse_global_config_after_subcommand() {
        let cli = Cli::parse_from(["scorebook", "check", "recorded.json", "--config", "alt.toml"]);
        assert_eq!(cli.config, Some(PathBuf::from("alt.toml")));
        assert!(matches!(cli.command, Command::Check { .. }));
    }

    #[test]
    fn parse_record() {
        let cli = Cli::parse_from(["scorebook", "record", "at_bat.json"]);
        let Command::Record { file } = cli.command else {
            panic!("expected record");
        };
        assert_eq!(file, PathBuf::from("at_bat.json"));
    }
}
