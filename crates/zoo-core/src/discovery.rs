//! Source file discovery for C# linting
//!
//! Directories are walked with `walkdir`; every file is matched against the
//! configured include/exclude globs, relative to the discovery root.
//! Patterns listed in a `.zooignore` file at the root are treated as extra
//! excludes.

use crate::config::FilesConfiguration;
use crate::error::ZooError;
use crate::result::Result;
use glob::{MatchOptions, Pattern};
use std::collections::BTreeSet;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};
use walkdir::WalkDir;

/// Name of the per-project ignore file
pub const IGNORE_FILE_NAME: &str = ".zooignore";

/// Trait for file discovery functionality
pub trait FileDiscovery {
    /// Expand `paths` (files or directories) into the C# files to lint
    fn discover_files(&self, paths: &[PathBuf]) -> Result<Vec<PathBuf>>;

    /// Check if a file under a walked directory should be linted
    fn should_include(&self, path: &Path) -> bool;
}

/// Default implementation of file discovery
#[derive(Debug, Clone)]
pub struct DefaultFileDiscovery {
    /// Root that relative patterns are matched against
    pub root_dir: PathBuf,
    include: Vec<Pattern>,
    exclude: Vec<Pattern>,
}

impl DefaultFileDiscovery {
    /// Create a discovery rooted at `root_dir` using the `[files]` configuration
    pub fn new(root_dir: impl Into<PathBuf>, files: &FilesConfiguration) -> Result<Self> {
        Self::with_patterns(root_dir, &files.include, &files.exclude)
    }

    pub fn with_patterns(
        root_dir: impl Into<PathBuf>,
        include: &[String],
        exclude: &[String],
    ) -> Result<Self> {
        let root_dir = root_dir.into();
        let mut exclude = compile_patterns(exclude)?;
        exclude.extend(load_ignore_patterns(&root_dir));

        Ok(Self {
            include: compile_patterns(include)?,
            exclude,
            root_dir,
        })
    }

    fn relative<'a>(&self, path: &'a Path) -> &'a Path {
        path.strip_prefix(&self.root_dir)
            .ok()
            .or_else(|| path.strip_prefix("./").ok())
            .unwrap_or(path)
    }

    fn is_excluded(&self, path: &Path) -> bool {
        let relative = self.relative(path);
        self.exclude
            .iter()
            .any(|pattern| pattern.matches_path_with(relative, match_options()))
    }

    fn walk(&self, dir: &Path, files: &mut BTreeSet<PathBuf>) {
        let walker = WalkDir::new(dir)
            .follow_links(false)
            .into_iter()
            .filter_entry(|entry| entry.depth() == 0 || !is_hidden(entry.file_name()));

        for entry in walker {
            match entry {
                Ok(entry) if entry.file_type().is_file() => {
                    if self.should_include(entry.path()) {
                        files.insert(entry.into_path());
                    }
                }
                Ok(_) => {}
                Err(e) => warn!("Skipping unreadable entry: {}", e),
            }
        }
    }
}

impl FileDiscovery for DefaultFileDiscovery {
    fn discover_files(&self, paths: &[PathBuf]) -> Result<Vec<PathBuf>> {
        let mut files = BTreeSet::new();

        for path in paths {
            if path.is_dir() {
                debug!("Discovering C# files in {}", path.display());
                self.walk(path, &mut files);
            } else if path.is_file() {
                // explicit files skip the include globs but not the excludes
                if !self.is_excluded(path) {
                    files.insert(path.clone());
                }
            } else {
                return Err(ZooError::io_error(
                    path,
                    std::io::Error::new(std::io::ErrorKind::NotFound, "path does not exist"),
                ));
            }
        }

        debug!("Discovered {} C# files", files.len());
        Ok(files.into_iter().collect())
    }

    fn should_include(&self, path: &Path) -> bool {
        let relative = self.relative(path);
        let included = self
            .include
            .iter()
            .any(|pattern| pattern.matches_path_with(relative, match_options()));
        included && !self.is_excluded(path)
    }
}

fn match_options() -> MatchOptions {
    MatchOptions {
        case_sensitive: true,
        require_literal_separator: false,
        require_literal_leading_dot: false,
    }
}

fn compile_patterns(patterns: &[String]) -> Result<Vec<Pattern>> {
    patterns
        .iter()
        .map(|p| Pattern::new(p).map_err(|e| ZooError::glob_error(p, e.to_string())))
        .collect()
}

/// Glob patterns from `.zooignore`; directory entries (`gen/`) cover their contents
fn load_ignore_patterns(root_dir: &Path) -> Vec<Pattern> {
    let ignore_path = root_dir.join(IGNORE_FILE_NAME);
    let Ok(content) = std::fs::read_to_string(&ignore_path) else {
        return Vec::new();
    };

    let patterns: Vec<Pattern> = content
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty() && !line.starts_with('#'))
        .filter_map(|line| {
            let glob = if line.ends_with('/') {
                format!("{line}**")
            } else if !line.contains('/') {
                format!("**/{line}")
            } else {
                line.to_string()
            };
            match Pattern::new(&glob) {
                Ok(pattern) => Some(pattern),
                Err(e) => {
                    warn!("Ignoring invalid pattern '{}' in {}: {}", line, IGNORE_FILE_NAME, e);
                    None
                }
            }
        })
        .collect();

    debug!("Loaded {} patterns from {}", patterns.len(), ignore_path.display());
    patterns
}

fn is_hidden(name: &std::ffi::OsStr) -> bool {
    name.to_str().is_some_and(|name| name.starts_with('.'))
}
