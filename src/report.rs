//! Report serialization.
//!
//! A run writes exactly one report named `file_audit_DDMMYYYY_HHMMSS` with a
//! `.csv` or `.txt` extension. Two layouts exist:
//!
//! - **CSV**: a `file,ext[,hash][,size_MB]` header and one record per file.
//! - **TXT**: one section per extension, each bracketed by delimiter lines,
//!   with one line per file and labelled hash/size annotations.
//!
//! Files are emitted in extension order, then discovery order. Hash and size
//! are computed through an [`Evaluator`] as each entry is written.

use crate::collector::FileIndex;
use crate::config::{REPORT_PREFIX, RunConfig};
use crate::error::{AuditError, AuditResult};
use crate::evaluator::{Evaluator, format_size};
use crate::output::OutputFormatter;
use chrono::NaiveDateTime;
use indicatif::ProgressBar;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};
use tracing::debug;

/// Line bracketing each extension section of a TXT report.
pub const SECTION_DELIMITER: &str = "-------------------";

/// Section header used for files without an extension.
pub const NO_EXTENSION_HEADER: &str = "Files with no extension:";

const TIMESTAMP_FORMAT: &str = "%d%m%Y_%H%M%S";

/// Layout of the generated report.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReportFormat {
    Csv,
    Txt,
}

impl ReportFormat {
    pub fn from_config(config: &RunConfig) -> Self {
        if config.csv_format { Self::Csv } else { Self::Txt }
    }

    /// File extension of reports in this format, without the dot.
    pub fn extension(self) -> &'static str {
        match self {
            Self::Csv => "csv",
            Self::Txt => "txt",
        }
    }
}

/// Builds the report file name for a run started at `started`.
///
/// # Examples
///
/// ```
/// use chrono::NaiveDate;
/// use file_audit::report::{ReportFormat, report_file_name};
///
/// let started = NaiveDate::from_ymd_opt(2024, 3, 7)
///     .unwrap()
///     .and_hms_opt(9, 5, 2)
///     .unwrap();
/// assert_eq!(
///     report_file_name(started, ReportFormat::Csv),
///     "file_audit_07032024_090502.csv"
/// );
/// ```
pub fn report_file_name(started: NaiveDateTime, format: ReportFormat) -> String {
    format!(
        "{}{}.{}",
        REPORT_PREFIX,
        started.format(TIMESTAMP_FORMAT),
        format.extension()
    )
}

/// Creates the report inside `dir` and writes every indexed file to it.
///
/// An existing file with the same name is truncated. Returns the path of the
/// written report.
///
/// # Errors
///
/// Fails on the first error creating or writing the report, or evaluating a
/// file's hash or size. A partially written report may be left behind.
pub fn write_report<E: Evaluator + ?Sized>(
    dir: &Path,
    started: NaiveDateTime,
    config: &RunConfig,
    index: &FileIndex,
    evaluator: &E,
) -> AuditResult<PathBuf> {
    let format = ReportFormat::from_config(config);
    let report_path = dir.join(report_file_name(started, format));
    debug!("Writing {:?} report to {}", format, report_path.display());

    let file = File::create(&report_path).map_err(|e| AuditError::io(&report_path, e))?;
    let mut out = BufWriter::new(file);
    let progress = OutputFormatter::create_progress_bar(index.len() as u64);

    match format {
        ReportFormat::Csv => write_csv(&mut out, index, config, evaluator, &progress)?,
        ReportFormat::Txt => write_txt(&mut out, index, config, evaluator, &progress)?,
    }

    out.flush().map_err(|e| AuditError::io(&report_path, e))?;
    progress.finish_and_clear();

    Ok(report_path)
}

/// Writes the index as a comma-separated table.
///
/// Paths containing commas, quotes or newlines are quoted, so each file maps
/// to exactly one parsed record.
pub fn write_csv<W: Write, E: Evaluator + ?Sized>(
    out: W,
    index: &FileIndex,
    config: &RunConfig,
    evaluator: &E,
    progress: &ProgressBar,
) -> AuditResult<()> {
    let mut writer = csv::Writer::from_writer(out);

    let mut header = vec!["file", "ext"];
    if config.include_hash {
        header.push("hash");
    }
    if config.include_size {
        header.push("size_MB");
    }
    writer.write_record(&header)?;

    for (ext, files) in index.groups() {
        for path in files {
            let columns = evaluate(path, config, evaluator)?;

            let mut record = vec![path.to_string_lossy().to_string(), ext.to_string()];
            record.extend(columns.hash);
            record.extend(columns.size);
            writer.write_record(&record)?;

            progress.inc(1);
        }
    }

    writer.flush().map_err(csv::Error::from)?;
    Ok(())
}

/// Writes the index as a sectioned, human-readable listing.
pub fn write_txt<W: Write, E: Evaluator + ?Sized>(
    mut out: W,
    index: &FileIndex,
    config: &RunConfig,
    evaluator: &E,
    progress: &ProgressBar,
) -> AuditResult<()> {
    for (ext, files) in index.groups() {
        writeln!(out, "{}", SECTION_DELIMITER)?;
        if ext.is_empty() {
            writeln!(out, "{}", NO_EXTENSION_HEADER)?;
        } else {
            writeln!(out, "{} files:", ext)?;
        }

        for path in files {
            let columns = evaluate(path, config, evaluator)?;

            let mut line = path.to_string_lossy().to_string();
            if let Some(hash) = columns.hash {
                line.push_str(" | File hash: ");
                line.push_str(&hash);
            }
            if let Some(size) = columns.size {
                line.push_str(" | File size: ");
                line.push_str(&size);
                line.push_str(" MB");
            }
            writeln!(out, "{}", line)?;

            progress.inc(1);
        }

        writeln!(out, "{}", SECTION_DELIMITER)?;
    }

    out.flush()?;
    Ok(())
}

/// Optional columns of one report entry, already rendered.
struct EntryColumns {
    hash: Option<String>,
    size: Option<String>,
}

fn evaluate<E: Evaluator + ?Sized>(
    path: &Path,
    config: &RunConfig,
    evaluator: &E,
) -> AuditResult<EntryColumns> {
    let hash = if config.include_hash {
        Some(evaluator.hash(path)?)
    } else {
        None
    };
    let size = if config.include_size {
        Some(format_size(evaluator.size_mb(path)?))
    } else {
        None
    };

    Ok(EntryColumns { hash, size })
}
