//! Recursive discovery of source files.
//!
//! Walks the source tree to unbounded depth and collects every entry that is
//! a regular file (or a symlink resolving to one) and passes the filter
//! rules. Traversal is read-only; unreadable entries are skipped with a
//! warning rather than aborting the walk.

use crate::config::CompiledFilters;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};
use walkdir::WalkDir;

/// Collect the files under `root` that should be copied.
///
/// The returned order is whatever the underlying directory iteration yields;
/// callers must not rely on it. Directory symlinks are not descended into,
/// but a symlink whose target is a regular file is included, matching the
/// "is, or resolves to, a regular file" check.
pub fn collect_files(root: &Path, filters: &CompiledFilters) -> Vec<PathBuf> {
    let mut files = Vec::new();

    for entry in WalkDir::new(root) {
        let entry = match entry {
            Ok(entry) => entry,
            Err(e) => {
                warn!("Skipping unreadable entry: {}", e);
                continue;
            }
        };

        let path = entry.path();
        // is_file() stats through symlinks; directories and broken links
        // both fail this check.
        if !path.is_file() {
            continue;
        }

        let rel_path = path.strip_prefix(root).unwrap_or(path);
        if filters.should_include(rel_path) {
            files.push(path.to_path_buf());
        } else {
            debug!("Filtered out: {}", path.display());
        }
    }

    files
}
