//! Command-line interface module for extidy.
//!
//! This module handles all CLI-related functionality including:
//! - Argument parsing and validation
//! - Organization orchestration
//! - Dry-run analysis
//! - Rendering copy events as log lines, progress, and the summary table

use crate::bucket::Bucket;
use crate::config::{CompiledFilters, FilterConfig};
use crate::organizer::{CopyEvent, Organizer};
use crate::output::OutputFormatter;
use clap::Parser;
use std::collections::HashMap;
use std::path::PathBuf;
use tracing::{error, info};

/// Copy every file under a source tree into extension-named subdirectories
/// of an output directory.
#[derive(Debug, Parser)]
#[command(name = "extidy", version, about)]
pub struct Cli {
    /// Source directory to organize
    #[arg(value_name = "SOURCE")]
    pub source: PathBuf,

    /// Destination root for the extension buckets
    #[arg(value_name = "OUTPUT")]
    pub output: PathBuf,

    /// Analyze only; print what would be copied without touching anything
    #[arg(short = 'n', long)]
    pub dry_run: bool,

    /// Number of copy workers (default: available parallelism, capped at 8)
    #[arg(short = 'w', long, value_name = "NUM")]
    pub workers: Option<usize>,

    /// Filter configuration file
    #[arg(short, long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Enable debug logging
    #[arg(short, long)]
    pub verbose: bool,
}

/// Runs the CLI application with the given arguments.
///
/// This is the main entry point for CLI operations. Fatal errors (missing
/// source, bad configuration) come back as `Err`; per-file copy failures do
/// not. Those are rendered as log lines and counted in the summary.
///
/// # Examples
///
/// ```no_run
/// use clap::Parser;
/// use extidy::cli::{Cli, run_cli};
///
/// let cli = Cli::parse_from(["extidy", "/home/user/inbox", "/home/user/sorted"]);
/// if let Err(e) = run_cli(&cli) {
///     eprintln!("Error: {}", e);
/// }
/// ```
pub fn run_cli(cli: &Cli) -> Result<(), String> {
    let config = FilterConfig::load(cli.config.as_deref())
        .map_err(|e| format!("Error loading configuration: {}", e))?;
    let filters = config
        .compile()
        .map_err(|e| format!("Error compiling filters: {}", e))?;

    let organizer = Organizer::new(&cli.source, &cli.output).with_workers(cli.workers);

    if cli.dry_run {
        dry_run(&organizer, &filters)
    } else {
        organize(&organizer, &filters)
    }
}

/// Walks the source tree and copies every discovered file concurrently.
///
/// Each file's outcome is rendered as it happens: an INFO line per copy, an
/// ERROR line per failure, and a progress bar across the whole batch. The
/// run ends with a per-bucket summary table.
fn organize(organizer: &Organizer, filters: &CompiledFilters) -> Result<(), String> {
    OutputFormatter::info(&format!(
        "Organizing {} into {}",
        organizer.source().display(),
        organizer.destination().display()
    ));

    let files = organizer
        .discover(filters)
        .map_err(|e| format!("Error: {}", e))?;

    if files.is_empty() {
        OutputFormatter::plain("No files to copy.");
        return Ok(());
    }

    let pb = OutputFormatter::create_progress_bar(files.len() as u64);
    let summary = organizer
        .copy_files(&files, &|event| {
            match event {
                CopyEvent::Copied(record) => {
                    info!(
                        "Copied: {} -> {}",
                        record.source.display(),
                        record.destination.display()
                    );
                }
                CopyEvent::Failed { source, error } => {
                    error!("Failed to copy {}: {}", source.display(), error);
                }
            }
            pb.inc(1);
        })
        .map_err(|e| format!("Error: {}", e))?;
    pb.finish_and_clear();

    OutputFormatter::summary_table(&summary.bucket_counts, summary.copied, summary.failed);

    if summary.failed > 0 {
        OutputFormatter::warning("Some files could not be copied. Please review errors above.");
    } else {
        OutputFormatter::success("Organization complete!");
    }

    Ok(())
}

/// Analyzes the source tree without copying anything.
///
/// Prints the bucket each file would land in and the same summary table the
/// real run would produce.
fn dry_run(organizer: &Organizer, filters: &CompiledFilters) -> Result<(), String> {
    OutputFormatter::dry_run_notice(&format!(
        "Analyzing contents of: {}",
        organizer.source().display()
    ));

    let files = organizer
        .discover(filters)
        .map_err(|e| format!("Error: {}", e))?;

    if files.is_empty() {
        OutputFormatter::plain("No files to copy.");
        return Ok(());
    }

    let mut bucket_counts: HashMap<String, usize> = HashMap::new();
    for file in &files {
        let bucket = Bucket::from_file_name(file);
        OutputFormatter::plain(&format!(
            " - {} -> {}/",
            file.display(),
            bucket.dir_name()
        ));
        *bucket_counts.entry(bucket.dir_name().to_string()).or_insert(0) += 1;
    }

    OutputFormatter::summary_table(&bucket_counts, files.len(), 0);
    OutputFormatter::dry_run_notice("No files were copied.");

    Ok(())
}
