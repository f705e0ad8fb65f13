//! Command-line interface module for file-audit.
//!
//! This module handles:
//! - Parsing the three positional boolean flags
//! - Driving the collect → write pipeline for one run
//! - Printing the progress notices around each stage

use crate::collector::collect_files;
use crate::config::{ExclusionRules, RunConfig, parse_flag};
use crate::error::{AuditError, AuditResult};
use crate::evaluator::{Evaluator, FsEvaluator};
use crate::output::OutputFormatter;
use crate::report::write_report;
use chrono::{Local, NaiveDateTime};
use clap::{ArgAction, Parser};
use std::path::{Path, PathBuf};
use tracing::info;

/// Inventory every file below the current directory into a timestamped report.
///
/// All arguments are optional and positional. Each accepts true/false,
/// yes/no, on/off or 1/0.
#[derive(Debug, Parser)]
#[command(name = "file-audit", version, about)]
pub struct Cli {
    /// Include a SHA-1 hash of each file (slow on large trees)
    #[arg(action = ArgAction::Set, value_parser = parse_flag, default_value = "false")]
    pub include_hash: bool,

    /// Include each file's size in MB
    #[arg(action = ArgAction::Set, value_parser = parse_flag, default_value = "true")]
    pub include_size: bool,

    /// Write CSV; false writes a sectioned TXT listing
    #[arg(action = ArgAction::Set, value_parser = parse_flag, default_value = "true")]
    pub csv_format: bool,
}

impl From<Cli> for RunConfig {
    fn from(cli: Cli) -> Self {
        Self {
            include_hash: cli.include_hash,
            include_size: cli.include_size,
            csv_format: cli.csv_format,
        }
    }
}

/// Runs one audit over the current working directory.
///
/// The report is written into the same directory.
///
/// # Examples
///
/// ```no_run
/// use file_audit::{RunConfig, run_cli};
///
/// match run_cli(RunConfig::default()) {
///     Ok(report) => println!("wrote {}", report.display()),
///     Err(e) => eprintln!("Error: {}", e),
/// }
/// ```
pub fn run_cli(config: RunConfig) -> AuditResult<PathBuf> {
    let root = std::env::current_dir().map_err(|e| AuditError::io(".", e))?;
    let rules = ExclusionRules::for_this_program()?;
    run_audit(
        &root,
        Local::now().naive_local(),
        &config,
        &rules,
        &FsEvaluator,
    )
}

/// Runs the full pipeline over `root` and writes the report into `root`.
///
/// This function:
/// 1. Walks `root` and groups files by extension
/// 2. Creates the report named after `started`
/// 3. Evaluates hash and size per entry while writing it
///
/// Returns the path of the written report.
pub fn run_audit<E: Evaluator + ?Sized>(
    root: &Path,
    started: NaiveDateTime,
    config: &RunConfig,
    rules: &ExclusionRules,
    evaluator: &E,
) -> AuditResult<PathBuf> {
    info!("Starting audit of {} with {:?}", root.display(), config);

    OutputFormatter::info("Collecting files...");
    let index = collect_files(root, rules)?;

    OutputFormatter::info("Writing file paths...");
    let report_path = write_report(root, started, config, &index, evaluator)?;

    OutputFormatter::report_done(&report_path);
    info!("Report written to {}", report_path.display());

    Ok(report_path)
}
