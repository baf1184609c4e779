use crate::collector::{PathCollector, PathSet};
use crate::utils::{clean_pattern, make_absolute};
use anyhow::{Context, Result};
use globset::{GlobBuilder, GlobMatcher};
use std::path::PathBuf;
use tracing::{Level, debug, span, warn};

/// Collects files by expanding glob patterns.
///
/// Include patterns are expanded against the filesystem; `**` matches any
/// number of directories. A candidate is dropped when its absolute path
/// matches any exclude pattern. Exclude patterns therefore need to match
/// absolute paths, e.g. `**/generated/**` or `/repo/vendor/**`.
#[derive(Debug, Clone, Default)]
pub struct GlobCollector {
    /// Patterns whose matches are candidates for formatting.
    pub include: Vec<String>,
    /// Patterns tested against each candidate's absolute path.
    pub exclude: Vec<String>,
}

impl GlobCollector {
    #[must_use]
    pub fn new(include: Vec<String>, exclude: Vec<String>) -> Self {
        Self { include, exclude }
    }

    fn compile_excludes(&self) -> Result<Vec<GlobMatcher>> {
        self.exclude
            .iter()
            .map(|pattern| {
                let cleaned = clean_pattern(pattern);
                GlobBuilder::new(&cleaned)
                    .literal_separator(true)
                    .build()
                    .map(|glob| glob.compile_matcher())
                    .with_context(|| format!("Invalid exclude pattern: {pattern}"))
            })
            .collect()
    }

    fn expand_includes(&self) -> Result<Vec<PathBuf>> {
        let mut candidates = Vec::new();
        for pattern in &self.include {
            let paths = ::glob::glob(pattern)
                .with_context(|| format!("Invalid include pattern: {pattern}"))?;
            for entry in paths {
                let path = entry.with_context(|| format!("Failed to expand pattern: {pattern}"))?;
                if path.is_dir() {
                    continue;
                }
                candidates.push(path);
            }
        }
        Ok(candidates)
    }
}

impl PathCollector for GlobCollector {
    fn collect_paths(&self) -> Result<Vec<PathBuf>> {
        let span = span!(Level::DEBUG, "glob_collect", include = self.include.len());
        let _guard = span.enter();

        let excludes = self.compile_excludes()?;
        let candidates = self.expand_includes()?;
        debug!(candidates = candidates.len(), "Expanded include patterns");

        let mut found = PathSet::new();
        for candidate in candidates {
            if excludes.is_empty() {
                found.add(candidate);
                continue;
            }
            let absolute = match make_absolute(&candidate) {
                Ok(path) => path,
                Err(e) => {
                    warn!(path = %candidate.display(), error = %e, "Could not resolve absolute path, skipping");
                    continue;
                }
            };
            if let Some(matcher) = excludes.iter().find(|m| m.is_match(&absolute)) {
                debug!(
                    path = %absolute.display(),
                    pattern = matcher.glob().glob(),
                    "Excluded by pattern"
                );
                continue;
            }
            found.add(candidate);
        }

        debug!(collected = found.len(), "Glob collection complete");
        Ok(found.into_sorted_vec())
    }
}
