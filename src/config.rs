//! Run options and file exclusion rules.
//!
//! A run is configured by a [`RunConfig`] resolved once at startup and never
//! mutated afterwards. Which files are left out of the inventory is decided by
//! [`ExclusionRules`], compiled once from the program identifier and the
//! report naming convention:
//!
//! - the tool's own executable (`file-audit`, `file-audit.exe`, ...)
//! - reports written by earlier runs (`file_audit_*`)
//! - anything inside a `.git` directory

use crate::error::{AuditError, AuditResult};
use glob::Pattern;
use std::path::Path;

/// Identifier of this program, used to keep its own binary out of reports.
pub const PROGRAM_NAME: &str = env!("CARGO_PKG_NAME");

/// Filename prefix shared by every generated report.
pub const REPORT_PREFIX: &str = "file_audit_";

/// Name of the version-control metadata directory that is never traversed.
pub const VCS_DIR: &str = ".git";

/// Options for a single audit run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RunConfig {
    /// Compute a SHA-1 fingerprint for every file.
    pub include_hash: bool,
    /// Report each file's size in megabytes.
    pub include_size: bool,
    /// Write a CSV table instead of a sectioned text listing.
    pub csv_format: bool,
}

impl Default for RunConfig {
    fn default() -> Self {
        Self {
            include_hash: false,
            include_size: true,
            csv_format: true,
        }
    }
}

impl RunConfig {
    /// Resolves a config from up to three positional tokens
    /// (hash, size, format). Missing tokens keep their defaults.
    ///
    /// # Errors
    ///
    /// Returns `AuditError::InvalidFlag` for the first token that is not a
    /// recognised boolean.
    ///
    /// # Examples
    ///
    /// ```
    /// use file_audit::RunConfig;
    ///
    /// let config = RunConfig::from_tokens(&["yes", "0"]).unwrap();
    /// assert!(config.include_hash);
    /// assert!(!config.include_size);
    /// assert!(config.csv_format);
    /// ```
    pub fn from_tokens(tokens: &[&str]) -> AuditResult<Self> {
        let mut config = Self::default();
        let slots = [
            &mut config.include_hash,
            &mut config.include_size,
            &mut config.csv_format,
        ];

        for (slot, token) in slots.into_iter().zip(tokens) {
            *slot = parse_flag(token)?;
        }

        Ok(config)
    }
}

/// Parses a textual boolean.
///
/// Accepts `true/false`, `yes/no`, `y/n`, `t/f`, `on/off` and `1/0`,
/// case-insensitively. Any other token is rejected rather than coerced.
pub fn parse_flag(token: &str) -> AuditResult<bool> {
    match token.trim().to_ascii_lowercase().as_str() {
        "true" | "t" | "yes" | "y" | "on" | "1" => Ok(true),
        "false" | "f" | "no" | "n" | "off" | "0" => Ok(false),
        _ => Err(AuditError::InvalidFlag {
            value: token.to_string(),
        }),
    }
}

/// Compiled patterns deciding which files stay out of the inventory.
pub struct ExclusionRules {
    vcs_dir: String,
    excluded_names: Vec<Pattern>,
}

impl ExclusionRules {
    /// Builds the rules for a program called `program_name`.
    ///
    /// # Errors
    ///
    /// Returns `AuditError::Pattern` if a generated glob does not compile.
    pub fn new(program_name: &str) -> AuditResult<Self> {
        let program = Pattern::escape(&program_name.to_lowercase());
        let globs = [
            program.clone(),
            format!("{}.*", program),
            format!("{}*", Pattern::escape(REPORT_PREFIX)),
        ];

        let excluded_names = globs
            .iter()
            .map(|glob| {
                Pattern::new(glob).map_err(|e| AuditError::Pattern {
                    pattern: glob.clone(),
                    reason: e.to_string(),
                })
            })
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Self {
            vcs_dir: VCS_DIR.to_string(),
            excluded_names,
        })
    }

    /// Builds the rules for this binary.
    pub fn for_this_program() -> AuditResult<Self> {
        Self::new(PROGRAM_NAME)
    }

    /// Returns true if a directory with this name must not be descended into.
    pub fn is_excluded_dir(&self, dir_name: &str) -> bool {
        dir_name.eq_ignore_ascii_case(&self.vcs_dir)
    }

    /// Returns true if a file with this name belongs in the inventory.
    ///
    /// The comparison is done on the lowercased name.
    pub fn should_include(&self, file_name: &str) -> bool {
        let lowered = file_name.to_lowercase();
        !self
            .excluded_names
            .iter()
            .any(|pattern| pattern.matches(&lowered))
    }

    /// Returns true if any component of `path` is an excluded directory.
    ///
    /// Used on the walk root itself, so a run started inside `.git` indexes
    /// nothing.
    pub fn is_inside_excluded_dir(&self, path: &Path) -> bool {
        path.components()
            .any(|component| self.is_excluded_dir(&component.as_os_str().to_string_lossy()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = RunConfig::default();
        assert!(!config.include_hash);
        assert!(config.include_size);
        assert!(config.csv_format);
    }

    #[test]
    fn test_parse_flag_accepts_common_spellings() {
        for token in ["true", "TRUE", "Yes", "y", "on", "1", " t "] {
            assert!(parse_flag(token).unwrap(), "{token} should be true");
        }
        for token in ["false", "False", "NO", "n", "off", "0", "F"] {
            assert!(!parse_flag(token).unwrap(), "{token} should be false");
        }
    }

    #[test]
    fn test_parse_flag_rejects_unknown_tokens() {
        for token in ["maybe", "", "2", "truthy", "-1"] {
            assert!(matches!(
                parse_flag(token),
                Err(AuditError::InvalidFlag { .. })
            ));
        }
    }

    #[test]
    fn test_from_tokens_partial_keeps_defaults() {
        let config = RunConfig::from_tokens(&["true"]).unwrap();
        assert_eq!(
            config,
            RunConfig {
                include_hash: true,
                include_size: true,
                csv_format: true,
            }
        );
    }

    #[test]
    fn test_from_tokens_all_three() {
        let config = RunConfig::from_tokens(&["no", "no", "no"]).unwrap();
        assert_eq!(
            config,
            RunConfig {
                include_hash: false,
                include_size: false,
                csv_format: false,
            }
        );
    }

    #[test]
    fn test_from_tokens_bad_third_flag() {
        let err = RunConfig::from_tokens(&["false", "false", "maybe"]).unwrap_err();
        match err {
            AuditError::InvalidFlag { value } => assert_eq!(value, "maybe"),
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_excludes_program_binary() {
        let rules = ExclusionRules::new("file-audit").unwrap();
        assert!(!rules.should_include("file-audit"));
        assert!(!rules.should_include("File-Audit.exe"));
        assert!(rules.should_include("file-auditor.txt"));
    }

    #[test]
    fn test_excludes_previous_reports() {
        let rules = ExclusionRules::new("file-audit").unwrap();
        assert!(!rules.should_include("file_audit_01022024_101112.csv"));
        assert!(!rules.should_include("FILE_AUDIT_01022024_101112.TXT"));
        assert!(rules.should_include("my_file_audit.csv"));
    }

    #[test]
    fn test_program_name_with_glob_characters_is_literal() {
        let rules = ExclusionRules::new("tool[1]").unwrap();
        assert!(!rules.should_include("tool[1]"));
        assert!(rules.should_include("tool1"));
    }

    #[test]
    fn test_vcs_dir_match_is_exact_segment() {
        let rules = ExclusionRules::for_this_program().unwrap();
        assert!(rules.is_excluded_dir(".git"));
        assert!(rules.is_excluded_dir(".GIT"));
        assert!(!rules.is_excluded_dir(".github"));
        assert!(!rules.is_excluded_dir("git"));
    }

    #[test]
    fn test_default_rules_match_package_name() {
        let rules = ExclusionRules::for_this_program().unwrap();
        assert!(!rules.should_include(PROGRAM_NAME));
    }

    #[test]
    fn test_inside_excluded_dir_checks_every_component() {
        let rules = ExclusionRules::for_this_program().unwrap();
        assert!(rules.is_inside_excluded_dir(Path::new("/repo/.git/hooks")));
        assert!(rules.is_inside_excluded_dir(Path::new("/repo/.GIT")));
        assert!(!rules.is_inside_excluded_dir(Path::new("/repo/.github/workflows")));
        assert!(!rules.is_inside_excluded_dir(Path::new("/repo/src")));
    }
}
