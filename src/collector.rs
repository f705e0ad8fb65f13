//! Directory traversal and extension grouping.
//!
//! [`collect_files`] walks a root directory and returns a [`FileIndex`]
//! mapping every lowercase extension to the files carrying it, in the order
//! the walk discovered them.

use crate::config::ExclusionRules;
use crate::error::AuditResult;
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use tracing::{debug, info};
use walkdir::{DirEntry, WalkDir};

/// Files discovered during a walk, grouped by extension.
///
/// Extensions iterate in lexicographic order. Files inside a group keep
/// their discovery order. Extensionless files live under the empty key.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct FileIndex {
    groups: BTreeMap<String, Vec<PathBuf>>,
}

impl FileIndex {
    /// Creates an empty index.
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a file to the group for `ext`, creating the group if needed.
    pub fn insert(&mut self, ext: String, path: PathBuf) {
        self.groups.entry(ext).or_default().push(path);
    }

    /// Iterates over `(extension, files)` pairs in extension order.
    pub fn groups(&self) -> impl Iterator<Item = (&str, &[PathBuf])> {
        self.groups
            .iter()
            .map(|(ext, files)| (ext.as_str(), files.as_slice()))
    }

    /// Extensions present in the index, sorted.
    pub fn extensions(&self) -> impl Iterator<Item = &str> {
        self.groups.keys().map(String::as_str)
    }

    /// Files recorded under `ext`, if any.
    pub fn files(&self, ext: &str) -> Option<&[PathBuf]> {
        self.groups.get(ext).map(Vec::as_slice)
    }

    /// Total number of files across all groups.
    pub fn len(&self) -> usize {
        self.groups.values().map(Vec::len).sum()
    }

    /// True when no file has been recorded.
    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }
}

/// Returns the lowercase extension of a file name, including the leading dot.
///
/// Leading dots do not start an extension, so `.bashrc` has none, while
/// `a.` has the extension `.`.
///
/// # Examples
///
/// ```
/// use file_audit::collector::extension_of;
///
/// assert_eq!(extension_of("Report.TXT"), ".txt");
/// assert_eq!(extension_of("archive.tar.gz"), ".gz");
/// assert_eq!(extension_of("Makefile"), "");
/// assert_eq!(extension_of(".bashrc"), "");
/// ```
pub fn extension_of(file_name: &str) -> String {
    let lowered = file_name.to_lowercase();
    let stem_start = lowered.len() - lowered.trim_start_matches('.').len();

    match lowered.rfind('.') {
        Some(dot) if dot >= stem_start && stem_start < lowered.len() => lowered[dot..].to_string(),
        _ => String::new(),
    }
}

/// Walks `root` recursively and groups every included regular file by
/// extension.
///
/// Hidden files are included. A root lying inside an excluded directory
/// yields an empty index. Directories rejected by
/// [`ExclusionRules::is_excluded_dir`] are pruned, and files rejected by
/// [`ExclusionRules::should_include`] are skipped. Symlinks are not followed.
///
/// # Errors
///
/// Any error while listing a directory or reading an entry aborts the walk
/// and is returned as `AuditError::Walk`.
pub fn collect_files(root: &Path, rules: &ExclusionRules) -> AuditResult<FileIndex> {
    let mut index = FileIndex::new();

    if rules.is_inside_excluded_dir(root) {
        debug!("Root {} is inside an excluded directory", root.display());
        return Ok(index);
    }

    let walker = WalkDir::new(root)
        .follow_links(false)
        .into_iter()
        .filter_entry(|entry| !is_pruned_dir(entry, rules));

    for entry in walker {
        let entry = entry?;
        if !entry.file_type().is_file() {
            continue;
        }

        let file_name = entry.file_name().to_string_lossy();
        if !rules.should_include(&file_name) {
            debug!("Skipping excluded file {}", entry.path().display());
            continue;
        }

        let ext = extension_of(&file_name);
        index.insert(ext, entry.into_path());
    }

    info!(
        "Collected {} files in {} extension groups under {}",
        index.len(),
        index.groups.len(),
        root.display()
    );

    Ok(index)
}

fn is_pruned_dir(entry: &DirEntry, rules: &ExclusionRules) -> bool {
    if entry.depth() == 0 || !entry.file_type().is_dir() {
        return false;
    }

    let pruned = rules.is_excluded_dir(&entry.file_name().to_string_lossy());
    if pruned {
        debug!("Skipping directory {}", entry.path().display());
    }
    pruned
}
