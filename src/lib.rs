//! # tidyfmt - Batch Text Formatter
//!
//! tidyfmt collects files from literal paths or glob patterns, runs each
//! through a pluggable formatter, and either writes the results back, reports
//! the differences (lint), or previews the changes (dry run).
//!
//! ## Architecture
//!
//! - [`collector`]: include/exclude path collection (walk and glob modes)
//! - [`formatter`]: the formatter trait, factories and the built-in `basic` formatter
//! - [`engine`]: sequential formatting with per-file error isolation
//! - [`diff`]: per-file diff model and unified diff rendering
//! - [`config`]: `.tidyfmt.toml` parsing, discovery and validation
//! - [`output`]: report rendering and status messages
//! - [`commands`]: the run modes behind the CLI
//!
//! ## Example Usage
//!
//! ```no_run
//! use tidyfmt::FormatContext;
//!
//! # fn main() -> anyhow::Result<()> {
//! let ctx = FormatContext::new(None)?;
//! let outcome = tidyfmt::commands::lint::execute(&ctx, &mut std::io::stdout())?;
//! println!("{outcome:?}");
//! # Ok(())
//! # }
//! ```

/// Command-line interface definitions (argument parsing structures).
pub mod cli;

/// Path collection from include and exclude rules.
pub mod collector;

/// Run modes: format, lint, dry run and stdin.
pub mod commands;

/// Configuration parsing, validation, and discovery.
pub mod config;

/// Diff model and unified diff generation.
pub mod diff;

/// Sequential formatting engine and its error aggregate.
pub mod engine;

/// Formatter trait, factories and built-in formatters.
pub mod formatter;

/// Subscriber setup for `tracing`.
pub mod logging;

/// Report rendering and status messages.
pub mod output;

/// Utility functions and helpers.
pub mod utils;

use anyhow::{Context, Result};
use collector::PathCollector;
use diff::UnifiedDiffConfig;
use engine::SequentialEngine;
use formatter::FormatterRegistry;
use std::path::{Path, PathBuf};

/// Current version of the tidyfmt binary.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Settings given on the command line that replace or extend the
/// configuration file.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Overrides {
    /// Replaces `include` when non-empty.
    pub paths: Vec<String>,
    /// Forces glob mode when set.
    pub doublestar: bool,
    /// Appended to `exclude`.
    pub exclude: Vec<String>,
    /// Replaces `extensions` when given.
    pub extensions: Option<Vec<String>>,
}

/// Central context for a tidyfmt run.
///
/// Holds the resolved configuration and the presentation settings every
/// command needs.
#[derive(Debug, Clone)]
pub struct FormatContext {
    /// Configuration file that was loaded, if any.
    pub config_path: Option<PathBuf>,

    /// Effective configuration, overrides included.
    pub config: config::Config,

    /// Whether reports list file names only.
    pub quiet: bool,

    /// Whether reports are colourised.
    pub colorize: bool,
}

impl FormatContext {
    /// Creates a context by discovering the configuration.
    ///
    /// `explicit` is the `--conf` path; without it `.tidyfmt.toml` in the
    /// current directory and then the user configuration directory are tried.
    ///
    /// # Errors
    ///
    /// Returns an error if the current directory is unavailable or a
    /// configuration file cannot be loaded.
    pub fn new(explicit: Option<&Path>) -> Result<Self> {
        let cwd = std::env::current_dir().context("Failed to get current directory")?;
        let user_dir = dirs::config_dir();
        let (config, config_path) = config::Config::discover(explicit, &cwd, user_dir.as_deref())?;
        if let Some(path) = &config_path {
            tracing::debug!(path = %path.display(), "Loaded configuration");
        }

        Ok(Self {
            config_path,
            config,
            quiet: false,
            colorize: colored::control::SHOULD_COLORIZE.should_colorize(),
        })
    }

    /// Creates a context around an already loaded configuration.
    #[must_use]
    pub fn from_config(config: config::Config) -> Self {
        Self {
            config_path: None,
            config,
            quiet: false,
            colorize: false,
        }
    }

    /// Applies command-line overrides and re-validates the result.
    ///
    /// # Errors
    ///
    /// Returns an error if the combined configuration is invalid.
    pub fn apply_overrides(&mut self, overrides: &Overrides) -> Result<()> {
        if !overrides.paths.is_empty() {
            self.config.include.clone_from(&overrides.paths);
        }
        if overrides.doublestar {
            self.config.doublestar = true;
        }
        self.config.exclude.extend(overrides.exclude.iter().cloned());
        if let Some(extensions) = &overrides.extensions {
            self.config.extensions.clone_from(extensions);
        }
        config::parser::validate_config(&self.config)
    }

    /// The collector selected by `doublestar`.
    #[must_use]
    pub fn collector(&self) -> Box<dyn PathCollector> {
        collector::from_config(&self.config)
    }

    /// An engine running the configured formatter.
    ///
    /// # Errors
    ///
    /// Returns an error if the formatter type is unknown or its options are
    /// invalid.
    pub fn engine(&self) -> Result<SequentialEngine> {
        let formatter = FormatterRegistry::with_builtin().build(&self.config.formatter)?;
        Ok(SequentialEngine::new(
            formatter,
            self.config.line_ending,
            self.quiet,
        ))
    }

    /// Diff rendering settings for reports.
    #[must_use]
    pub fn diff_config(&self) -> UnifiedDiffConfig {
        UnifiedDiffConfig {
            algorithm: diff::config_to_algorithm(&self.config.diff_algorithm),
            colorize: self.colorize,
            ..UnifiedDiffConfig::default()
        }
    }
}
