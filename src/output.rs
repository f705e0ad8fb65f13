//! Console output and progress display.
//!
//! All user-facing notices go through [`OutputFormatter`] so that styling
//! stays consistent between the progress lines and fatal errors.

use colored::*;
use indicatif::{ProgressBar, ProgressStyle};
use std::path::Path;

/// Prints progress notices and builds the write-phase progress bar.
pub struct OutputFormatter;

impl OutputFormatter {
    /// Prints a progress notice in cyan.
    ///
    /// # Example
    ///
    /// ```no_run
    /// use file_audit::output::OutputFormatter;
    /// OutputFormatter::info("Collecting files...");
    /// ```
    pub fn info(message: &str) {
        println!("{}", message.cyan());
    }

    /// Prints a success message in green.
    pub fn success(message: &str) {
        println!("{}", message.green());
    }

    /// Prints an error message in red with an X mark.
    pub fn error(message: &str) {
        eprintln!("{} {}", "✗".red(), message);
    }

    /// Prints the final notice naming the generated report.
    pub fn report_done(report_path: &Path) {
        let name = report_path
            .file_name()
            .map(|n| n.to_string_lossy().to_string())
            .unwrap_or_else(|| report_path.display().to_string());
        Self::success(&format!(
            "Done! Current locations of all files have been logged to {}",
            name
        ));
    }

    /// Creates a progress bar over `total` report entries.
    ///
    /// The bar draws to stderr and stays invisible when stderr is not a
    /// terminal.
    pub fn create_progress_bar(total: u64) -> ProgressBar {
        let pb = ProgressBar::new(total);
        if let Ok(style) =
            ProgressStyle::default_bar().template("{spinner:.cyan} [{bar:40.cyan/blue}] {pos}/{len} {msg}")
        {
            pb.set_style(style.progress_chars("█▓░"));
        }
        pb
    }
}
