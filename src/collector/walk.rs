use crate::collector::{PathCollector, PathSet};
use crate::utils::{file_extension, make_absolute};
use anyhow::{Context, Result};
use std::fs::{self, Metadata};
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use tracing::{Level, debug, span};
use walkdir::WalkDir;

/// Collects files by walking include roots and filtering on extension.
///
/// Include entries that are files are taken as-is, whatever their extension.
/// Directories are walked recursively and only files whose extension is
/// listed in `extensions` are kept. Exclude entries remove a whole subtree
/// (directories) or a single path (files). Missing include or exclude
/// entries are ignored; any other metadata or walk error aborts collection.
///
/// Symbolic links met while walking are not followed, and only regular
/// files are collected, so a symlink to a file inside a walked directory is
/// skipped. A symlink named directly in `include` is resolved like any
/// other explicit path.
#[derive(Debug, Clone, Default)]
pub struct WalkCollector {
    /// Files or directories to collect from.
    pub include: Vec<PathBuf>,
    /// Files or directories to leave out.
    pub exclude: Vec<PathBuf>,
    /// Allowed extensions for walked files, without the leading dot.
    pub extensions: Vec<String>,
}

impl WalkCollector {
    #[must_use]
    pub fn new(include: Vec<PathBuf>, exclude: Vec<PathBuf>, extensions: Vec<String>) -> Self {
        Self {
            include,
            exclude,
            extensions,
        }
    }

    fn walk_directory(&self, dir: &Path, found: &mut PathSet) -> Result<()> {
        for entry in WalkDir::new(dir).follow_links(false) {
            let entry = entry.with_context(|| format!("Failed to walk {}", dir.display()))?;
            if !entry.file_type().is_file() {
                continue;
            }
            let matches = entry
                .file_name()
                .to_str()
                .and_then(file_extension)
                .is_some_and(|ext| self.extensions.iter().any(|allowed| allowed == ext));
            if matches {
                found.add(make_absolute(entry.path())?);
            }
        }
        Ok(())
    }
}

impl PathCollector for WalkCollector {
    fn collect_paths(&self) -> Result<Vec<PathBuf>> {
        let span = span!(Level::DEBUG, "walk_collect", include = self.include.len());
        let _guard = span.enter();

        let mut found = PathSet::new();
        for include in &self.include {
            let Some(metadata) = stat_if_exists(include)? else {
                debug!(path = %include.display(), "Include path does not exist, skipping");
                continue;
            };
            if metadata.is_dir() {
                self.walk_directory(include, &mut found)?;
            } else {
                found.add(make_absolute(include)?);
            }
        }

        for exclude in &self.exclude {
            let Some(metadata) = stat_if_exists(exclude)? else {
                debug!(path = %exclude.display(), "Exclude path does not exist, skipping");
                continue;
            };
            let absolute = make_absolute(exclude)?;
            let removed = if metadata.is_dir() {
                found.remove_where(|path| path.starts_with(&absolute))
            } else {
                usize::from(found.remove(&absolute))
            };
            debug!(path = %absolute.display(), removed, "Applied exclude");
        }

        debug!(collected = found.len(), "Walk collection complete");
        Ok(found.into_sorted_vec())
    }
}

/// Returns the metadata of `path`, or `None` when it does not exist.
fn stat_if_exists(path: &Path) -> Result<Option<Metadata>> {
    match fs::metadata(path) {
        Ok(metadata) => Ok(Some(metadata)),
        Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
        Err(e) => Err(e).with_context(|| format!("Failed to stat {}", path.display())),
    }
}
