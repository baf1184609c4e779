//! Pluggable content formatters.
//!
//! The engine only knows the [`Formatter`] trait: bytes in, bytes out. A
//! [`FormatterFactory`] builds a formatter from defaults or from the
//! `[formatter]` table of the configuration file, and a
//! [`FormatterRegistry`] selects the factory by its `type` name.

/// Whitespace-normalising formatter
pub mod basic;

pub use basic::{BasicConfig, BasicFormatter, BasicFormatterFactory};

use crate::config::FormatterSettings;
use anyhow::{Result, anyhow};
use std::collections::BTreeMap;
use tracing::debug;

/// Maps raw file content to formatted content.
///
/// Implementations must be deterministic: the same input and configuration
/// always produce the same output.
pub trait Formatter {
    /// Name used in logs and error messages.
    fn name(&self) -> &str;

    /// Formats `content`.
    ///
    /// # Errors
    ///
    /// Returns an error if the content is malformed for this formatter.
    fn format(&self, content: &[u8]) -> Result<Vec<u8>>;
}

/// Builds formatters of one type.
pub trait FormatterFactory {
    /// The `type` value that selects this factory in configuration.
    fn formatter_type(&self) -> &'static str;

    /// A formatter with default options.
    fn new_default(&self) -> Box<dyn Formatter>;

    /// A formatter configured from an open-ended key/value table.
    ///
    /// # Errors
    ///
    /// Returns an error if the table contains unknown keys or values of the
    /// wrong type.
    fn new_with_config(&self, options: &toml::Table) -> Result<Box<dyn Formatter>>;
}

/// The formatter factories available by name.
pub struct FormatterRegistry {
    factories: BTreeMap<&'static str, Box<dyn FormatterFactory>>,
}

impl FormatterRegistry {
    /// An empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self {
            factories: BTreeMap::new(),
        }
    }

    /// A registry holding every built-in formatter.
    #[must_use]
    pub fn with_builtin() -> Self {
        let mut registry = Self::new();
        registry.register(Box::new(BasicFormatterFactory));
        registry
    }

    /// Adds a factory, replacing any with the same type name.
    pub fn register(&mut self, factory: Box<dyn FormatterFactory>) {
        self.factories.insert(factory.formatter_type(), factory);
    }

    /// Registered type names, sorted.
    #[must_use]
    pub fn types(&self) -> Vec<&'static str> {
        self.factories.keys().copied().collect()
    }

    /// Builds the formatter described by `settings`.
    ///
    /// Uses the factory's defaults when no options are given.
    ///
    /// # Errors
    ///
    /// Returns an error if the type is unknown or its options do not decode.
    pub fn build(&self, settings: &FormatterSettings) -> Result<Box<dyn Formatter>> {
        let factory = self.factories.get(settings.kind.as_str()).ok_or_else(|| {
            anyhow!(
                "Unknown formatter type '{}' (available: {})",
                settings.kind,
                self.types().join(", ")
            )
        })?;
        debug!(formatter = %settings.kind, options = settings.options.len(), "Building formatter");
        if settings.options.is_empty() {
            Ok(factory.new_default())
        } else {
            factory.new_with_config(&settings.options)
        }
    }
}

impl Default for FormatterRegistry {
    fn default() -> Self {
        Self::with_builtin()
    }
}
