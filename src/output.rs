//! Output formatting and styling.
//!
//! Centralizes the CLI's presentation layer: colored status lines, the
//! progress bar over the copy phase, and the end-of-run summary table.
//! Per-file success/failure lines go through `tracing`, not this module;
//! this is only the human-facing dressing around them.

use colored::*;
use indicatif::{ProgressBar, ProgressStyle};
use std::collections::HashMap;

/// Styled console output helpers.
pub struct OutputFormatter;

impl OutputFormatter {
    /// Prints a success message in green with a checkmark.
    pub fn success(message: &str) {
        println!("{} {}", "✓".green(), message);
    }

    /// Prints an error message in red with an X mark.
    pub fn error(message: &str) {
        eprintln!("{} {}", "✗".red(), message);
    }

    /// Prints a warning message in yellow with a warning symbol.
    pub fn warning(message: &str) {
        println!("{} {}", "⚠".yellow(), message);
    }

    /// Prints an info message in cyan.
    pub fn info(message: &str) {
        println!("{}", message.cyan());
    }

    /// Prints a regular message without styling.
    pub fn plain(message: &str) {
        println!("{}", message);
    }

    /// Prints a section header.
    pub fn header(header: &str) {
        println!("\n{}", header.bold());
    }

    /// Prints a dry-run notice message.
    pub fn dry_run_notice(message: &str) {
        println!("{}", format!("[DRY RUN] {}", message).yellow());
    }

    /// Creates a progress bar for the copy phase.
    pub fn create_progress_bar(total: u64) -> ProgressBar {
        let pb = ProgressBar::new(total);
        pb.set_style(
            ProgressStyle::default_bar()
                .template("{spinner:.cyan} [{bar:40.cyan/blue}] {pos}/{len} {msg}")
                .expect("Invalid progress bar template")
                .progress_chars("█▓░"),
        );
        pb
    }

    /// Prints the end-of-run summary: files per bucket, totals, failures.
    ///
    /// # Example
    ///
    /// ```no_run
    /// use extidy::output::OutputFormatter;
    /// use std::collections::HashMap;
    ///
    /// let mut counts = HashMap::new();
    /// counts.insert("txt".to_string(), 12);
    /// counts.insert("no_extension".to_string(), 3);
    /// OutputFormatter::summary_table(&counts, 15, 0);
    /// ```
    pub fn summary_table(bucket_counts: &HashMap<String, usize>, copied: usize, failed: usize) {
        Self::header("SUMMARY");

        // Sort bucket names for stable output
        let mut buckets: Vec<_> = bucket_counts.iter().collect();
        buckets.sort_by_key(|&(name, _)| name);

        let max_bucket_len = buckets
            .iter()
            .map(|(name, _)| name.len())
            .max()
            .unwrap_or(0)
            .max(6); // At least "Bucket" width

        println!(
            "{:<width$} | {}",
            "Bucket".bold(),
            "Files".bold(),
            width = max_bucket_len
        );
        println!("{}", "-".repeat(max_bucket_len + 10));

        for (bucket, count) in &buckets {
            println!(
                "{:<width$} | {}",
                bucket,
                count.to_string().green(),
                width = max_bucket_len
            );
        }

        println!("{}", "-".repeat(max_bucket_len + 10));
        println!(
            "{:<width$} | {} {}",
            "Total".bold(),
            copied.to_string().green().bold(),
            if copied == 1 { "file" } else { "files" },
            width = max_bucket_len
        );

        if failed > 0 {
            println!(
                "{:<width$} | {} {}",
                "Failed".bold(),
                failed.to_string().red().bold(),
                if failed == 1 { "file" } else { "files" },
                width = max_bucket_len
            );
        }
    }
}
