//! Per-file content fingerprints and sizes.
//!
//! Both values are computed on demand while the report is written, never
//! during collection. The [`Evaluator`] trait lets the report writer run
//! against a stub in tests.

use crate::error::{AuditError, AuditResult};
use sha1::{Digest, Sha1};
use std::fs::{self, File};
use std::io::Read;
use std::path::Path;
use tracing::trace;

/// Bytes read per chunk while hashing.
pub const HASH_CHUNK_SIZE: usize = 1024;

const BYTES_PER_MB: f64 = 1024.0 * 1024.0;
const SIZE_SCALE: f64 = 10_000.0;

/// Computes the optional per-file columns of a report.
pub trait Evaluator {
    /// Lowercase hex content fingerprint of the file at `path`.
    fn hash(&self, path: &Path) -> AuditResult<String>;

    /// Size of the file at `path` in megabytes, rounded to 4 decimals.
    fn size_mb(&self, path: &Path) -> AuditResult<f64>;
}

/// Evaluator backed by the real filesystem.
#[derive(Debug, Default, Clone, Copy)]
pub struct FsEvaluator;

impl Evaluator for FsEvaluator {
    fn hash(&self, path: &Path) -> AuditResult<String> {
        sha1_hex(path)
    }

    fn size_mb(&self, path: &Path) -> AuditResult<f64> {
        let metadata = fs::metadata(path).map_err(|e| AuditError::io(path, e))?;
        Ok(bytes_to_mb(metadata.len()))
    }
}

/// Streams a file through SHA-1 and returns the lowercase hex digest.
///
/// The whole file is read regardless of its size.
pub fn sha1_hex(path: &Path) -> AuditResult<String> {
    let mut file = File::open(path).map_err(|e| AuditError::io(path, e))?;
    let mut hasher = Sha1::new();
    let mut buffer = [0u8; HASH_CHUNK_SIZE];

    loop {
        let read = file.read(&mut buffer).map_err(|e| AuditError::io(path, e))?;
        if read == 0 {
            break;
        }
        hasher.update(&buffer[..read]);
    }

    let digest = hex::encode(hasher.finalize());
    trace!("{} -> {}", path.display(), digest);
    Ok(digest)
}

/// Converts a byte count to megabytes rounded to 4 decimal places.
///
/// Ties round to even on the fourth decimal.
///
/// # Examples
///
/// ```
/// use file_audit::evaluator::bytes_to_mb;
///
/// assert_eq!(bytes_to_mb(1_048_576), 1.0);
/// assert_eq!(bytes_to_mb(524_288), 0.5);
/// ```
pub fn bytes_to_mb(bytes: u64) -> f64 {
    (bytes as f64 / BYTES_PER_MB * SIZE_SCALE).round_ties_even() / SIZE_SCALE
}

/// Renders a size in megabytes, always with a fractional part.
///
/// `1.0` stays `1.0` rather than `1`, and values keep their shortest exact
/// decimal form (`0.0001`, `12.3457`).
pub fn format_size(size_mb: f64) -> String {
    format!("{:?}", size_mb)
}
