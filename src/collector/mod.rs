//! Path collection: turning include/exclude rules into an ordered file list.
//!
//! Two strategies implement [`PathCollector`]:
//!
//! - [`WalkCollector`]: literal paths, recursive directory walk filtered by
//!   extension, subtree or single-file exclusion.
//! - [`GlobCollector`]: glob pattern expansion with `**`, exclusion by glob
//!   match against the candidate's absolute path.
//!
//! In both, exclusion wins over inclusion and the result contains each path
//! once, in sorted order.

/// Glob-pattern based collection
pub mod glob;
/// Deterministically ordered set of unique paths
pub mod path_set;
/// Directory-walk based collection
pub mod walk;

pub use self::glob::GlobCollector;
pub use path_set::PathSet;
pub use walk::WalkCollector;

use crate::config::Config;
use anyhow::Result;
use std::path::PathBuf;

/// Resolves include/exclude rules to the concrete files to process.
pub trait PathCollector {
    /// Returns every matching file once, in a deterministic order.
    ///
    /// # Errors
    ///
    /// Returns an error if a pattern is malformed or the filesystem cannot be
    /// read. Include paths that do not exist are not an error.
    fn collect_paths(&self) -> Result<Vec<PathBuf>>;
}

/// Builds the collector selected by `config.doublestar`.
#[must_use]
pub fn from_config(config: &Config) -> Box<dyn PathCollector> {
    if config.doublestar {
        Box::new(GlobCollector::new(
            config.include.clone(),
            config.exclude.clone(),
        ))
    } else {
        Box::new(WalkCollector::new(
            config.include.iter().map(PathBuf::from).collect(),
            config.exclude.iter().map(PathBuf::from).collect(),
            config.extensions.clone(),
        ))
    }
}
