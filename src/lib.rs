//! extidy - copy a directory tree into extension-named buckets
//!
//! This library recursively scans a source directory, derives an extension
//! bucket for every regular file found, and copies each file into
//! `output/<bucket>/` on a bounded worker pool. Filtering rules can be
//! supplied via a TOML configuration file.

pub mod bucket;
pub mod cli;
pub mod config;
pub mod file_copier;
pub mod organizer;
pub mod output;
pub mod walker;

pub use bucket::{Bucket, NO_EXTENSION_BUCKET};
pub use config::{CompiledFilters, ConfigError, FilterConfig};
pub use file_copier::{CopyRecord, FileCopier, OrganizeError, OrganizeResult};
pub use organizer::{CopyEvent, OrganizeSummary, Organizer};

pub use cli::{Cli, run_cli};
