use super::Config;
use anyhow::{Context, Result};
use std::path::Path;

/// Reads, parses and validates a configuration file.
///
/// # Errors
///
/// Returns an error if the file cannot be read or [`parse_config_str`] fails.
pub fn parse_config_file(path: &Path) -> Result<Config> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read config file: {}", path.display()))?;
    parse_config_str(&content)
        .with_context(|| format!("Invalid config file: {}", path.display()))
}

/// Parses and validates configuration text.
///
/// # Errors
///
/// Returns an error for malformed TOML, unknown top-level keys or a value
/// rejected by [`validate_config`].
pub fn parse_config_str(content: &str) -> Result<Config> {
    let config: Config = toml::from_str(content).context("Failed to parse TOML config")?;

    // Validation errors are returned as-is, not wrapped
    validate_config(&config)?;
    Ok(config)
}

/// Checks values that parse but cannot be used.
///
/// # Errors
///
/// Returns an error if `include` is empty, an extension is empty or starts
/// with a dot, or the formatter type is blank.
pub fn validate_config(config: &Config) -> Result<()> {
    if config.include.is_empty() {
        anyhow::bail!("At least one include path or pattern is required");
    }

    for extension in &config.extensions {
        if extension.is_empty() {
            anyhow::bail!("Extensions must not be empty");
        }
        if extension.starts_with('.') {
            anyhow::bail!("Extension '{extension}' must not start with '.'");
        }
    }

    if config.formatter.kind.trim().is_empty() {
        anyhow::bail!("Formatter type must not be empty");
    }

    Ok(())
}
