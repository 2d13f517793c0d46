/// Single-file copy into an extension bucket.
///
/// This module owns the error type for the copy pipeline and the primitive
/// that copies one file into `destination_root/<bucket>/<file_name>`,
/// creating the bucket directory as needed. It is the unit of work the
/// concurrent fan-out in [`crate::organizer`] dispatches per file.
use crate::bucket::Bucket;
use filetime::FileTime;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

/// Errors that can occur while organizing a source tree.
#[derive(Debug)]
pub enum OrganizeError {
    /// The source root path is missing or not a directory.
    InvalidSourcePath {
        path: PathBuf,
        source: std::io::Error,
    },
    /// Failed to create a bucket directory.
    DirectoryCreationFailed {
        path: PathBuf,
        source: std::io::Error,
    },
    /// Failed to copy a file into its bucket directory.
    FileCopyFailed {
        source: PathBuf,
        destination: PathBuf,
        source_error: std::io::Error,
    },
    /// The copy worker pool could not be constructed.
    WorkerPoolFailed { reason: String },
}

impl std::fmt::Display for OrganizeError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidSourcePath { path, source } => {
                write!(f, "Invalid source path {}: {}", path.display(), source)
            }
            Self::DirectoryCreationFailed { path, source } => {
                write!(
                    f,
                    "Failed to create directory {}: {}",
                    path.display(),
                    source
                )
            }
            Self::FileCopyFailed {
                source,
                destination,
                source_error,
            } => {
                write!(
                    f,
                    "Failed to copy {} to {}: {}",
                    source.display(),
                    destination.display(),
                    source_error
                )
            }
            Self::WorkerPoolFailed { reason } => {
                write!(f, "Failed to start copy workers: {}", reason)
            }
        }
    }
}

impl std::error::Error for OrganizeError {}

/// Result type for organize operations.
pub type OrganizeResult<T> = Result<T, OrganizeError>;

/// Record of one completed copy.
#[derive(Debug, Clone)]
pub struct CopyRecord {
    /// The source file that was copied.
    pub source: PathBuf,
    /// The path the file was copied to.
    pub destination: PathBuf,
    /// The bucket the file landed in.
    pub bucket: Bucket,
}

/// Copies files into extension-bucket directories under a destination root.
pub struct FileCopier;

impl FileCopier {
    /// Copies a file into its extension bucket under `destination_root`.
    ///
    /// The bucket directory is created if missing, including intermediate
    /// directories. Creation is idempotent: a pre-existing directory, even
    /// one created concurrently by a sibling copy task targeting the same
    /// bucket, is not an error. An existing destination file with the same
    /// name is silently overwritten (last write wins).
    ///
    /// The copy preserves content bytes, permissions, and file times.
    ///
    /// # Arguments
    ///
    /// * `destination_root` - The root directory bucket subdirectories live in
    /// * `file_path` - The full path to the source file
    ///
    /// # Returns
    ///
    /// Returns `Ok(CopyRecord)` describing the copy, or an `OrganizeError`
    /// if directory creation or the copy itself fails.
    pub fn copy_to_bucket(destination_root: &Path, file_path: &Path) -> OrganizeResult<CopyRecord> {
        let bucket = Bucket::from_file_name(file_path);
        let bucket_dir = destination_root.join(bucket.dir_name());

        fs::create_dir_all(&bucket_dir).map_err(|e| OrganizeError::DirectoryCreationFailed {
            path: bucket_dir.clone(),
            source: e,
        })?;

        let file_name = file_path
            .file_name()
            .ok_or_else(|| OrganizeError::FileCopyFailed {
                source: file_path.to_path_buf(),
                destination: bucket_dir.clone(),
                source_error: std::io::Error::new(
                    std::io::ErrorKind::InvalidInput,
                    "file has no name component",
                ),
            })?;

        let destination = bucket_dir.join(file_name);

        copy_with_metadata(file_path, &destination).map_err(|e| OrganizeError::FileCopyFailed {
            source: file_path.to_path_buf(),
            destination: destination.clone(),
            source_error: e,
        })?;

        Ok(CopyRecord {
            source: file_path.to_path_buf(),
            destination,
            bucket,
        })
    }
}

/// Byte-for-byte copy that also carries over permissions and file times,
/// the equivalent of a "copy with metadata" primitive rather than a
/// content-only copy.
fn copy_with_metadata(source: &Path, destination: &Path) -> io::Result<()> {
    fs::copy(source, destination)?;

    let metadata = fs::metadata(source)?;
    fs::set_permissions(destination, metadata.permissions())?;

    let atime = FileTime::from_last_access_time(&metadata);
    let mtime = FileTime::from_last_modification_time(&metadata);
    filetime::set_file_times(destination, atime, mtime)?;

    Ok(())
}
