pub mod parser;

use crate::diff::LineSeparator;
use anyhow::Result;
use serde::Deserialize;
use std::path::{Path, PathBuf};

/// File name looked up in the current directory.
pub const LOCAL_CONFIG_FILE: &str = ".tidyfmt.toml";

/// Path of the user-level configuration below the platform config directory.
pub const USER_CONFIG_PATH: &str = "tidyfmt/config.toml";

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    /// Line separator used when writing formatted files.
    pub line_ending: LineSeparator,
    /// Use glob patterns (`true`) or literal paths with a directory walk (`false`).
    pub doublestar: bool,
    /// Paths or patterns to format.
    pub include: Vec<String>,
    /// Paths or patterns to leave out. Wins over `include`.
    pub exclude: Vec<String>,
    /// Extensions picked up while walking directories (walk mode only).
    pub extensions: Vec<String>,
    /// Algorithm for rendering differences.
    pub diff_algorithm: DiffAlgorithm,
    pub formatter: FormatterSettings,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DiffAlgorithm {
    #[default]
    Myers,
    Patience,
}

/// The `[formatter]` table: a `type` plus formatter-specific options.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct FormatterSettings {
    #[serde(rename = "type", default = "default_formatter_type")]
    pub kind: String,
    /// Every other key, decoded later by the formatter's factory.
    #[serde(flatten)]
    pub options: toml::Table,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            line_ending: LineSeparator::Default,
            doublestar: false,
            include: vec![".".to_string()],
            exclude: Vec::new(),
            extensions: default_extensions(),
            diff_algorithm: DiffAlgorithm::Myers,
            formatter: FormatterSettings::default(),
        }
    }
}

impl Default for FormatterSettings {
    fn default() -> Self {
        Self {
            kind: default_formatter_type(),
            options: toml::Table::new(),
        }
    }
}

impl Config {
    /// Load configuration from a file
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read, is not valid TOML, has
    /// unknown keys or fails validation.
    pub fn load(path: &Path) -> Result<Self> {
        parser::parse_config_file(path)
    }

    /// Finds and loads the configuration to use.
    ///
    /// `explicit` must exist when given. Otherwise [`LOCAL_CONFIG_FILE`] in
    /// `cwd` is tried, then [`USER_CONFIG_PATH`] below `user_config_dir`.
    /// Without any file the defaults are used. Returns the file that was
    /// loaded, if any.
    ///
    /// # Errors
    ///
    /// Returns an error if the explicit file is missing or a found file
    /// cannot be loaded.
    pub fn discover(
        explicit: Option<&Path>,
        cwd: &Path,
        user_config_dir: Option<&Path>,
    ) -> Result<(Self, Option<PathBuf>)> {
        if let Some(path) = explicit {
            if !path.exists() {
                anyhow::bail!("Configuration file not found: {}", path.display());
            }
            return Ok((Self::load(path)?, Some(path.to_path_buf())));
        }

        let candidates = std::iter::once(cwd.join(LOCAL_CONFIG_FILE))
            .chain(user_config_dir.map(|dir| dir.join(USER_CONFIG_PATH)));
        for candidate in candidates {
            if candidate.is_file() {
                return Ok((Self::load(&candidate)?, Some(candidate)));
            }
        }
        Ok((Self::default(), None))
    }
}

fn default_formatter_type() -> String {
    "basic".to_string()
}

fn default_extensions() -> Vec<String> {
    vec!["yaml".to_string(), "yml".to_string()]
}
