//! File filtering and exclusion configuration.
//!
//! Loads optional filter rules from a TOML file and compiles them into
//! structures the walker can match discovered files against. Supported
//! strategies:
//! - Exact filename matching
//! - Glob pattern matching against the path relative to the source root
//! - File extension matching
//! - Regex matching against the file name
//! - Include (whitelist) rules that override exclude rules
//!
//! By default nothing is excluded: every regular file under the source tree
//! is copied, hidden files included.
//!
//! # Configuration File Format
//!
//! ```toml
//! [filters]
//! include_hidden_files = true
//!
//! [filters.exclude]
//! filenames = [".DS_Store", "Thumbs.db"]
//! patterns = ["*.tmp", "node_modules/**"]
//! extensions = ["bak", "tmp"]
//! regex = []
//!
//! [filters.include]
//! patterns = []
//! ```

use glob::Pattern;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fs;
use std::path::{Path, PathBuf};

/// Errors that can occur during configuration loading and filter compilation.
#[derive(Debug, Clone)]
pub enum ConfigError {
    /// Configuration file not found at the specified path.
    ConfigNotFound(PathBuf),
    /// Invalid TOML syntax or structure.
    ConfigInvalid(String),
    /// Invalid glob pattern provided.
    InvalidGlobPattern(String),
    /// Invalid regex pattern provided with the actual error reason.
    InvalidRegexPattern {
        /// The regex pattern that failed to compile.
        pattern: String,
        /// The reason why the pattern is invalid.
        reason: String,
    },
    /// IO error while reading configuration.
    IoError(String),
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConfigError::ConfigNotFound(path) => {
                write!(f, "Configuration file not found: {}", path.display())
            }
            ConfigError::ConfigInvalid(msg) => write!(f, "Invalid configuration: {}", msg),
            ConfigError::InvalidGlobPattern(pattern) => {
                write!(f, "Invalid glob pattern '{}'", pattern)
            }
            ConfigError::InvalidRegexPattern { pattern, reason } => {
                write!(f, "Invalid regex pattern '{}': {}", pattern, reason)
            }
            ConfigError::IoError(msg) => write!(f, "IO error reading configuration: {}", msg),
        }
    }
}

impl std::error::Error for ConfigError {}

/// Filter configuration, deserialized from a TOML file.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FilterConfig {
    pub filters: FilterRules,
}

/// Root-level filter rules.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FilterRules {
    /// Whether to copy hidden files and files inside hidden directories
    /// (names starting with "."). Defaults to true: a copy organizer should
    /// pick up everything unless told otherwise.
    #[serde(default = "default_include_hidden_files")]
    pub include_hidden_files: bool,

    /// Rules for excluding files.
    #[serde(default)]
    pub exclude: ExcludeRules,

    /// Rules for including files (whitelist, overrides exclude rules).
    #[serde(default)]
    pub include: IncludeRules,
}

fn default_include_hidden_files() -> bool {
    true
}

/// Rules for excluding files from the copy.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ExcludeRules {
    /// Exact filenames to exclude (e.g., ".DS_Store", "Thumbs.db").
    #[serde(default)]
    pub filenames: Vec<String>,

    /// Glob patterns to exclude, matched against the path relative to the
    /// source root (e.g., "*.tmp", "node_modules/**").
    #[serde(default)]
    pub patterns: Vec<String>,

    /// File extensions to exclude (e.g., "bak", "tmp", "log").
    #[serde(default)]
    pub extensions: Vec<String>,

    /// Regex patterns to exclude, matched against the file name.
    #[serde(default)]
    pub regex: Vec<String>,
}

/// Rules for including files, overriding exclude rules (whitelist).
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct IncludeRules {
    /// Glob patterns that override exclude rules.
    #[serde(default)]
    pub patterns: Vec<String>,
}

impl FilterConfig {
    /// Load configuration from a file, with fallback to defaults.
    ///
    /// Attempts to load configuration in the following order:
    /// 1. If `config_path` is provided, load from that file
    /// 2. Look for `.extidyrc.toml` in the current directory
    /// 3. Look for `~/.config/extidy/config.toml` in the home directory
    /// 4. Fall back to the default (include-everything) configuration
    ///
    /// # Errors
    ///
    /// Returns an error if a configuration file is explicitly provided but
    /// cannot be read or parsed.
    pub fn load(config_path: Option<&Path>) -> Result<Self, ConfigError> {
        if let Some(path) = config_path {
            return Self::load_from_file(path);
        }

        let local_config = PathBuf::from(".extidyrc.toml");
        if local_config.exists() {
            return Self::load_from_file(&local_config);
        }

        if let Ok(home) = std::env::var("HOME") {
            let home_config = PathBuf::from(home)
                .join(".config")
                .join("extidy")
                .join("config.toml");
            if home_config.exists() {
                return Self::load_from_file(&home_config);
            }
        }

        Ok(Self::default())
    }

    fn load_from_file(path: &Path) -> Result<Self, ConfigError> {
        if !path.exists() {
            return Err(ConfigError::ConfigNotFound(path.to_path_buf()));
        }

        let content = fs::read_to_string(path).map_err(|e| ConfigError::IoError(e.to_string()))?;

        toml::from_str(&content).map_err(|e| ConfigError::ConfigInvalid(e.to_string()))
    }

    /// Compile configuration into matchers usable during traversal.
    ///
    /// # Errors
    ///
    /// Returns an error if any glob or regex patterns are invalid, so a bad
    /// configuration aborts the run before any file is touched.
    pub fn compile(self) -> Result<CompiledFilters, ConfigError> {
        CompiledFilters::new(self.filters)
    }
}

impl Default for FilterConfig {
    fn default() -> Self {
        Self {
            filters: FilterRules {
                include_hidden_files: true,
                exclude: ExcludeRules::default(),
                include: IncludeRules::default(),
            },
        }
    }
}

/// Pre-compiled filter rules for efficient matching during traversal.
///
/// Glob and regex patterns are compiled once here so that per-file matching
/// never reparses them.
pub struct CompiledFilters {
    include_hidden_files: bool,
    exclude_filenames: HashSet<String>,
    exclude_extensions: HashSet<String>,
    exclude_patterns: Vec<Pattern>,
    exclude_regexes: Vec<Regex>,
    include_patterns: Vec<Pattern>,
}

impl CompiledFilters {
    fn new(rules: FilterRules) -> Result<Self, ConfigError> {
        let exclude_patterns = rules
            .exclude
            .patterns
            .iter()
            .map(|pattern| {
                Pattern::new(pattern).map_err(|_| ConfigError::InvalidGlobPattern(pattern.clone()))
            })
            .collect::<Result<Vec<_>, _>>()?;

        let include_patterns = rules
            .include
            .patterns
            .iter()
            .map(|pattern| {
                Pattern::new(pattern).map_err(|_| ConfigError::InvalidGlobPattern(pattern.clone()))
            })
            .collect::<Result<Vec<_>, _>>()?;

        let exclude_regexes = rules
            .exclude
            .regex
            .iter()
            .map(|pattern| {
                Regex::new(pattern).map_err(|e| ConfigError::InvalidRegexPattern {
                    pattern: pattern.clone(),
                    reason: e.to_string(),
                })
            })
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Self {
            include_hidden_files: rules.include_hidden_files,
            exclude_filenames: rules.exclude.filenames.into_iter().collect(),
            exclude_extensions: rules
                .exclude
                .extensions
                .iter()
                .map(|ext| ext.to_lowercase())
                .collect(),
            exclude_patterns,
            exclude_regexes,
            include_patterns,
        })
    }

    /// Check whether a file should be copied.
    ///
    /// `rel_path` is the file's path relative to the source root; glob
    /// patterns and the hidden check see the whole relative path, so a rule
    /// like `build/**` or a hidden ancestor directory applies to everything
    /// underneath it.
    ///
    /// Checks are performed in this order, with early termination:
    /// 1. Include patterns (whitelist) - if matched, always include
    /// 2. Hidden component filter - if any component is hidden and hidden
    ///    files are disabled, exclude
    /// 3. Exact filename match - if matched, exclude
    /// 4. File extension match - if matched, exclude
    /// 5. Glob pattern match - if matched, exclude
    /// 6. Regex pattern match - if matched, exclude
    /// 7. Default: include
    pub fn should_include(&self, rel_path: &Path) -> bool {
        let file_name = rel_path
            .file_name()
            .map(|n| n.to_string_lossy())
            .unwrap_or_default();

        if self.matches_include_patterns(rel_path) {
            return true;
        }

        if !self.include_hidden_files && has_hidden_component(rel_path) {
            return false;
        }

        if self.exclude_filenames.contains(file_name.as_ref()) {
            return false;
        }

        if let Some(ext) = rel_path.extension() {
            let ext_lower = ext.to_string_lossy().to_lowercase();
            if self.exclude_extensions.contains(&ext_lower) {
                return false;
            }
        }

        if self.matches_exclude_patterns(rel_path) {
            return false;
        }

        if self.matches_exclude_regex(&file_name) {
            return false;
        }

        true
    }

    fn matches_include_patterns(&self, rel_path: &Path) -> bool {
        self.include_patterns
            .iter()
            .any(|pattern| pattern.matches_path(rel_path))
    }

    fn matches_exclude_patterns(&self, rel_path: &Path) -> bool {
        self.exclude_patterns
            .iter()
            .any(|pattern| pattern.matches_path(rel_path))
    }

    fn matches_exclude_regex(&self, file_name: &str) -> bool {
        self.exclude_regexes
            .iter()
            .any(|regex| regex.is_match(file_name))
    }
}

/// True if any component of the path starts with a dot.
fn has_hidden_component(path: &Path) -> bool {
    path.components()
        .any(|c| c.as_os_str().to_string_lossy().starts_with('.'))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn compile(rules: FilterRules) -> CompiledFilters {
        FilterConfig { filters: rules }.compile().unwrap()
    }

    #[test]
    fn test_default_config_includes_everything() {
        let compiled = FilterConfig::default().compile().unwrap();

        assert!(compiled.should_include(Path::new("file.txt")));
        assert!(compiled.should_include(Path::new(".DS_Store")));
        assert!(compiled.should_include(Path::new(".hidden/inner.txt")));
        assert!(compiled.should_include(Path::new("a/b/c/deep.bin")));
    }

    #[test]
    fn test_hidden_files_excluded_when_disabled() {
        let compiled = compile(FilterRules {
            include_hidden_files: false,
            exclude: ExcludeRules::default(),
            include: IncludeRules::default(),
        });

        assert!(!compiled.should_include(Path::new(".gitignore")));
        assert!(!compiled.should_include(Path::new(".git/config")));
        assert!(!compiled.should_include(Path::new("src/.cache/blob")));
        assert!(compiled.should_include(Path::new("src/main.rs")));
    }

    #[test]
    fn test_exclude_exact_filename() {
        let compiled = compile(FilterRules {
            include_hidden_files: true,
            exclude: ExcludeRules {
                filenames: vec!["Thumbs.db".to_string()],
                ..Default::default()
            },
            include: IncludeRules::default(),
        });

        assert!(!compiled.should_include(Path::new("Thumbs.db")));
        assert!(!compiled.should_include(Path::new("photos/Thumbs.db")));
        assert!(compiled.should_include(Path::new("image.jpg")));
    }

    #[test]
    fn test_exclude_extensions_case_insensitive() {
        let compiled = compile(FilterRules {
            include_hidden_files: true,
            exclude: ExcludeRules {
                extensions: vec!["bak".to_string(), "TMP".to_string()],
                ..Default::default()
            },
            include: IncludeRules::default(),
        });

        assert!(!compiled.should_include(Path::new("file.bak")));
        assert!(!compiled.should_include(Path::new("file.BAK")));
        assert!(!compiled.should_include(Path::new("file.tmp")));
        assert!(compiled.should_include(Path::new("file.txt")));
    }

    #[test]
    fn test_exclude_glob_patterns_match_relative_paths() {
        let compiled = compile(FilterRules {
            include_hidden_files: true,
            exclude: ExcludeRules {
                patterns: vec!["*.cache".to_string(), "node_modules/**".to_string()],
                ..Default::default()
            },
            include: IncludeRules::default(),
        });

        assert!(!compiled.should_include(Path::new("file.cache")));
        assert!(!compiled.should_include(Path::new("node_modules/pkg/index.js")));
        assert!(compiled.should_include(Path::new("file.txt")));
        assert!(compiled.should_include(Path::new("my_node_modules/pkg/index.js")));
    }

    #[test]
    fn test_glob_respects_directory_boundaries() {
        let compiled = compile(FilterRules {
            include_hidden_files: true,
            exclude: ExcludeRules {
                patterns: vec!["**/logs/**".to_string()],
                ..Default::default()
            },
            include: IncludeRules::default(),
        });

        assert!(!compiled.should_include(Path::new("logs/file.txt")));
        assert!(!compiled.should_include(Path::new("app/logs/file.txt")));
        assert!(compiled.should_include(Path::new("my_logs/file.txt")));
    }

    #[test]
    fn test_exclude_regex_matches_file_name() {
        let compiled = compile(FilterRules {
            include_hidden_files: true,
            exclude: ExcludeRules {
                regex: vec![r"^~\$".to_string()],
                ..Default::default()
            },
            include: IncludeRules::default(),
        });

        assert!(!compiled.should_include(Path::new("docs/~$report.docx")));
        assert!(compiled.should_include(Path::new("docs/report.docx")));
    }

    #[test]
    fn test_include_overrides_exclude() {
        let compiled = compile(FilterRules {
            include_hidden_files: true,
            exclude: ExcludeRules {
                extensions: vec!["log".to_string()],
                ..Default::default()
            },
            include: IncludeRules {
                patterns: vec!["keep/**".to_string()],
            },
        });

        assert!(compiled.should_include(Path::new("keep/build.log")));
        assert!(!compiled.should_include(Path::new("other/build.log")));
    }

    #[test]
    fn test_invalid_regex_returns_error() {
        let config = FilterConfig {
            filters: FilterRules {
                include_hidden_files: true,
                exclude: ExcludeRules {
                    regex: vec!["[invalid(".to_string()],
                    ..Default::default()
                },
                include: IncludeRules::default(),
            },
        };

        assert!(config.compile().is_err());
    }

    #[test]
    fn test_invalid_glob_pattern_returns_error() {
        let config = FilterConfig {
            filters: FilterRules {
                include_hidden_files: true,
                exclude: ExcludeRules {
                    patterns: vec!["[invalid".to_string()],
                    ..Default::default()
                },
                include: IncludeRules::default(),
            },
        };

        assert!(config.compile().is_err());
    }

    #[test]
    fn test_load_missing_explicit_config_is_an_error() {
        let result = FilterConfig::load(Some(Path::new("/definitely/not/here.toml")));
        assert!(matches!(result, Err(ConfigError::ConfigNotFound(_))));
    }

    #[test]
    fn test_parse_config_from_toml() {
        let toml_str = r#"
            [filters]
            include_hidden_files = false

            [filters.exclude]
            extensions = ["tmp"]
        "#;
        let config: FilterConfig = toml::from_str(toml_str).unwrap();
        assert!(!config.filters.include_hidden_files);
        assert_eq!(config.filters.exclude.extensions, vec!["tmp"]);

        let compiled = config.compile().unwrap();
        assert!(!compiled.should_include(Path::new("scratch.tmp")));
        assert!(!compiled.should_include(Path::new(".env")));
    }
}
