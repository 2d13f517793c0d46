/// Extension bucket derivation for organizing files by filename suffix.
///
/// A bucket is the name of the destination subdirectory a file is copied
/// into: the part of the file name after the last `.`, lower-cased. Files
/// without a usable extension all share the [`NO_EXTENSION_BUCKET`] bucket.
///
/// # Examples
///
/// ```
/// use extidy::bucket::Bucket;
/// use std::path::Path;
///
/// assert_eq!(Bucket::from_file_name(Path::new("photo.PNG")).dir_name(), "png");
/// assert_eq!(Bucket::from_file_name(Path::new("README")).dir_name(), "no_extension");
/// assert_eq!(Bucket::from_file_name(Path::new("backup.tar.gz")).dir_name(), "gz");
/// ```
use std::fmt;
use std::path::Path;

/// Bucket name used for files without an extension.
pub const NO_EXTENSION_BUCKET: &str = "no_extension";

/// A destination bucket derived from a file name's extension.
///
/// Buckets map 1:1 to subdirectories of the output root. They are cheap to
/// derive and are recomputed per file rather than cached anywhere.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Bucket(String);

impl Bucket {
    /// Derives the bucket for a file from its name.
    ///
    /// The extension is the substring after the last `.` of the file name,
    /// normalized to lower case. A name with no `.`, a name ending in `.`,
    /// or a dotfile with no further `.` (e.g. `.bashrc`) has no usable
    /// extension and lands in [`NO_EXTENSION_BUCKET`].
    pub fn from_file_name(path: &Path) -> Self {
        let ext = path
            .extension()
            .map(|e| e.to_string_lossy().to_lowercase())
            .unwrap_or_default();

        if ext.is_empty() {
            Bucket(NO_EXTENSION_BUCKET.to_string())
        } else {
            Bucket(ext)
        }
    }

    /// Returns the name of the destination subdirectory for this bucket.
    pub fn dir_name(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Bucket {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn bucket(name: &str) -> String {
        Bucket::from_file_name(Path::new(name)).dir_name().to_string()
    }

    #[test]
    fn test_simple_extension() {
        assert_eq!(bucket("notes.txt"), "txt");
        assert_eq!(bucket("song.mp3"), "mp3");
    }

    #[test]
    fn test_extension_is_lowercased() {
        assert_eq!(bucket("A.TXT"), "txt");
        assert_eq!(bucket("photo.JPeG"), "jpeg");
    }

    #[test]
    fn test_case_variants_share_a_bucket() {
        assert_eq!(bucket("A.TXT"), bucket("b.txt"));
    }

    #[test]
    fn test_no_extension() {
        assert_eq!(bucket("README"), NO_EXTENSION_BUCKET);
        assert_eq!(bucket("Makefile"), NO_EXTENSION_BUCKET);
    }

    #[test]
    fn test_trailing_dot_has_empty_extension() {
        assert_eq!(bucket("file."), NO_EXTENSION_BUCKET);
    }

    #[test]
    fn test_dotfile_has_no_extension() {
        assert_eq!(bucket(".bashrc"), NO_EXTENSION_BUCKET);
    }

    #[test]
    fn test_dotfile_with_extension() {
        assert_eq!(bucket(".config.toml"), "toml");
    }

    #[test]
    fn test_only_last_suffix_counts() {
        assert_eq!(bucket("backup.tar.gz"), "gz");
        assert_eq!(bucket("report.final.PDF"), "pdf");
    }

    #[test]
    fn test_full_path_uses_file_name_only() {
        assert_eq!(bucket("some/dir.d/data.csv"), "csv");
    }

    #[test]
    fn test_display_matches_dir_name() {
        let b = Bucket::from_file_name(Path::new("x.log"));
        assert_eq!(b.to_string(), b.dir_name());
    }
}
