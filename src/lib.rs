//! file-audit - A filesystem inventory and snapshot utility
//!
//! This library walks a directory tree, groups every file by its lowercase
//! extension, and writes a timestamped CSV or TXT report listing each path
//! with an optional SHA-1 fingerprint and size in megabytes.

pub mod cli;
pub mod collector;
pub mod config;
pub mod error;
pub mod evaluator;
pub mod output;
pub mod report;

pub use collector::{FileIndex, collect_files};
pub use config::{ExclusionRules, RunConfig};
pub use error::{AuditError, AuditResult};
pub use evaluator::{Evaluator, FsEvaluator};
pub use report::{ReportFormat, write_report};

pub use cli::{Cli, run_audit, run_cli};
