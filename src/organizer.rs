//! Concurrent fan-out over the discovered files.
//!
//! The [`Organizer`] ties the pieces together: pre-flight check on the
//! source root, tree walk, then one copy task per file dispatched onto a
//! bounded worker pool. Per-file failures are contained: a failing copy is
//! reported as an event and never aborts its siblings or the run.
//!
//! Rendering is deliberately kept out of this module. Callers receive a
//! [`CopyEvent`] per file through a callback while the run is in flight and
//! an [`OrganizeSummary`] at the end, so the core can be tested without
//! capturing log output.

use crate::config::CompiledFilters;
use crate::file_copier::{CopyRecord, FileCopier, OrganizeError, OrganizeResult};
use crate::walker;
use rayon::ThreadPoolBuilder;
use rayon::prelude::*;
use std::collections::HashMap;
use std::path::{Path, PathBuf};

/// Per-file outcome, surfaced to the caller as soon as the copy finishes.
///
/// Events from distinct files may arrive in any order and from multiple
/// worker threads; the callback passed to [`Organizer::copy_files`] must be
/// `Sync`.
#[derive(Debug)]
pub enum CopyEvent {
    /// The file was copied into its bucket.
    Copied(CopyRecord),
    /// The copy failed; siblings are unaffected.
    Failed {
        source: PathBuf,
        error: OrganizeError,
    },
}

/// Aggregate result of a completed run.
#[derive(Debug, Default)]
pub struct OrganizeSummary {
    /// Number of files copied successfully.
    pub copied: usize,
    /// Number of files whose copy failed.
    pub failed: usize,
    /// Successful copies per bucket name.
    pub bucket_counts: HashMap<String, usize>,
}

/// Organizes a source tree into extension buckets under a destination root.
pub struct Organizer {
    source: PathBuf,
    destination: PathBuf,
    workers: Option<usize>,
}

impl Organizer {
    /// Creates an organizer for a source/destination pair.
    pub fn new(source: impl Into<PathBuf>, destination: impl Into<PathBuf>) -> Self {
        Self {
            source: source.into(),
            destination: destination.into(),
            workers: None,
        }
    }

    /// Overrides the copy worker count. `None` keeps the default, which is
    /// the machine's available parallelism capped at 8.
    pub fn with_workers(mut self, workers: Option<usize>) -> Self {
        self.workers = workers;
        self
    }

    /// The source root this organizer reads from.
    pub fn source(&self) -> &Path {
        &self.source
    }

    /// The destination root buckets are created under.
    pub fn destination(&self) -> &Path {
        &self.destination
    }

    /// Validates the source root and collects the files to copy.
    ///
    /// A missing (or non-directory) source is the one fatal, pre-flight
    /// error: it aborts before any traversal and before anything is created
    /// under the destination.
    pub fn discover(&self, filters: &CompiledFilters) -> OrganizeResult<Vec<PathBuf>> {
        if !self.source.is_dir() {
            return Err(OrganizeError::InvalidSourcePath {
                path: self.source.clone(),
                source: std::io::Error::new(
                    std::io::ErrorKind::NotFound,
                    "source directory does not exist",
                ),
            });
        }

        Ok(walker::collect_files(&self.source, filters))
    }

    /// Copies the given files into their buckets, concurrently.
    ///
    /// Every file is attempted exactly once on a fixed-size worker pool;
    /// there is no retry and no ordering guarantee between files. `on_event`
    /// is invoked once per file from whichever worker finished it.
    pub fn copy_files(
        &self,
        files: &[PathBuf],
        on_event: &(dyn Fn(&CopyEvent) + Sync),
    ) -> OrganizeResult<OrganizeSummary> {
        let pool = ThreadPoolBuilder::new()
            .num_threads(worker_limit(self.workers))
            .build()
            .map_err(|e| OrganizeError::WorkerPoolFailed {
                reason: e.to_string(),
            })?;

        let outcomes: Vec<Option<String>> = pool.install(|| {
            files
                .par_iter()
                .map(|path| match FileCopier::copy_to_bucket(&self.destination, path) {
                    Ok(record) => {
                        let bucket = record.bucket.dir_name().to_string();
                        on_event(&CopyEvent::Copied(record));
                        Some(bucket)
                    }
                    Err(error) => {
                        on_event(&CopyEvent::Failed {
                            source: path.clone(),
                            error,
                        });
                        None
                    }
                })
                .collect()
        });

        let mut summary = OrganizeSummary::default();
        for outcome in outcomes {
            match outcome {
                Some(bucket) => {
                    summary.copied += 1;
                    *summary.bucket_counts.entry(bucket).or_insert(0) += 1;
                }
                None => summary.failed += 1,
            }
        }

        Ok(summary)
    }

    /// Discovers and copies in one step.
    pub fn run(
        &self,
        filters: &CompiledFilters,
        on_event: &(dyn Fn(&CopyEvent) + Sync),
    ) -> OrganizeResult<OrganizeSummary> {
        let files = self.discover(filters)?;
        self.copy_files(&files, on_event)
    }
}

/// Resolve the worker count: an explicit request is clamped to the CPU
/// count, the default is available parallelism capped at 8.
fn worker_limit(requested: Option<usize>) -> usize {
    let cpus = std::thread::available_parallelism()
        .map(|v| v.get())
        .unwrap_or(1);

    match requested {
        Some(n) => n.clamp(1, cpus),
        None => cpus.clamp(1, 8),
    }
}
