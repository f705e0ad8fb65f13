//! Error types shared by every stage of the audit pipeline.

use std::path::PathBuf;
use thiserror::Error;

/// Errors that abort an audit run.
///
/// The tool is all-or-nothing: none of these are retried or skipped.
#[derive(Debug, Error)]
pub enum AuditError {
    /// A positional flag could not be read as a boolean.
    #[error("invalid boolean flag '{value}': expected true/false, yes/no, on/off or 1/0")]
    InvalidFlag { value: String },

    /// Listing a directory failed during traversal.
    #[error("failed to traverse directory tree: {0}")]
    Walk(#[from] walkdir::Error),

    /// Reading, stating or writing a specific file failed.
    #[error("I/O error on {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Writing to the report stream failed.
    #[error("failed to write report: {0}")]
    Write(#[from] std::io::Error),

    /// The CSV serializer rejected a record or failed to write it.
    #[error("failed to write CSV record: {0}")]
    Csv(#[from] csv::Error),

    /// An exclusion pattern did not compile.
    #[error("invalid exclusion pattern '{pattern}': {reason}")]
    Pattern { pattern: String, reason: String },
}

impl AuditError {
    /// Wraps an I/O error with the path it happened on.
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}

/// Result type for audit operations.
pub type AuditResult<T> = Result<T, AuditError>;
