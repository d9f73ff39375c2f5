use std::path::{Component, Path, PathBuf};

use globset::{Glob, GlobBuilder, GlobMatcher};
use tracing::info;
use walkdir::WalkDir;

use crate::error::LinterError;

const GLOB_META: &[char] = &['*', '?', '[', '{'];

/// Resolves a glob pattern to the files it matches.
///
/// Relative patterns are matched against paths relative to the base
/// directory and the returned paths stay relative to it. Wildcards never
/// match hidden files or directories, even `.*`; a pattern without glob
/// syntax returns its path as long as the file exists.
pub struct FileFinder {
    matcher: GlobMatcher,
    root: PathBuf,
    literal: bool,
}

impl FileFinder {
    pub fn new(pattern: &str) -> Result<Self, LinterError> {
        let pattern = pattern.strip_prefix("./").unwrap_or(pattern);
        let matcher = GlobBuilder::new(pattern)
            .literal_separator(true)
            .build()
            .map(|glob: Glob| glob.compile_matcher())
            .map_err(|e| LinterError::pattern(format!("'{}': {}", pattern, e)))?;

        let (root, literal) = Self::literal_root(pattern);
        Ok(Self {
            matcher,
            root,
            literal,
        })
    }

    /// Splits off the leading components of `pattern` that contain no glob syntax.
    fn literal_root(pattern: &str) -> (PathBuf, bool) {
        let mut root = PathBuf::new();
        for component in Path::new(pattern).components() {
            if let Component::Normal(part) = component
                && part.to_string_lossy().contains(GLOB_META)
            {
                return (root, false);
            }
            root.push(component);
        }
        (root, true)
    }

    /// Returns matching files under `base_dir`, sorted.
    pub fn discover_files(&self, base_dir: &Path) -> Result<Vec<PathBuf>, LinterError> {
        if self.literal {
            let full = base_dir.join(&self.root);
            let files = if full.is_file() {
                vec![self.root.clone()]
            } else {
                Vec::new()
            };
            info!("Discovered {} files to lint", files.len());
            return Ok(files);
        }

        let walk_root = base_dir.join(&self.root);
        let mut files = Vec::new();

        if !walk_root.is_dir() {
            info!("Discovered 0 files to lint");
            return Ok(files);
        }

        let walker = WalkDir::new(&walk_root)
            .follow_links(false)
            .into_iter()
            .filter_entry(|entry| entry.depth() == 0 || !is_hidden(entry.file_name()));

        for entry in walker {
            let entry = entry.map_err(|e| LinterError::file(e.to_string()))?;
            if !entry.file_type().is_file() {
                continue;
            }

            let candidate = if self.root.is_absolute() {
                entry.path().to_path_buf()
            } else {
                match entry.path().strip_prefix(base_dir) {
                    Ok(relative) => clean(relative),
                    Err(_) => continue,
                }
            };

            if self.matcher.is_match(&candidate) {
                files.push(candidate);
            }
        }

        files.sort();
        files.dedup();

        info!("Discovered {} files to lint", files.len());
        Ok(files)
    }
}

fn is_hidden(name: &std::ffi::OsStr) -> bool {
    name.to_string_lossy().starts_with('.')
}

fn clean(path: &Path) -> PathBuf {
    path.components()
        .filter(|c| !matches!(c, Component::CurDir))
        .collect()
}
