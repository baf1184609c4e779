//! The formatting engine.
//!
//! [`SequentialEngine`] reads and formats files one at a time, in the order
//! the collector produced them. A failure on one file is recorded and the
//! next file is processed; failures are reported together once every file
//! has been attempted.
//!
//! Three modes are built on [`SequentialEngine::format_all`]:
//!
//! - [`format`](SequentialEngine::format): write changes back, only if no
//!   file failed.
//! - [`lint`](SequentialEngine::lint): report differences.
//! - [`dry_run`](SequentialEngine::dry_run): report pending changes as advice.

/// Per-file failures and their aggregate
pub mod errors;

pub use errors::{EngineError, FormatError, FormatErrors};

use crate::diff::{FileDiff, FileDiffs, LineSeparator};
use crate::formatter::Formatter;
use anyhow::{Context, Result};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{Level, debug, info, span, warn};

/// Message for lint output listing full differences.
pub const LINT_MESSAGE: &str = "The following formatting differences were found:";
/// Message for lint output in quiet mode.
pub const LINT_QUIET_MESSAGE: &str = "The following files had formatting differences:";
/// Message for dry-run output in quiet mode.
pub const DRY_RUN_QUIET_MESSAGE: &str = "The following files will have formatting changes:";

/// Result of a lint or dry run, for a presenter to render.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EngineOutput {
    /// Heading for the report. May be empty.
    pub message: String,
    /// Every diff of the run, changed or not.
    pub files: FileDiffs,
    /// Whether only file names should be shown.
    pub quiet: bool,
}

/// Formats files one after another.
pub struct SequentialEngine {
    formatter: Box<dyn Formatter>,
    line_sep: LineSeparator,
    quiet: bool,
}

impl SequentialEngine {
    #[must_use]
    pub fn new(formatter: Box<dyn Formatter>, line_sep: LineSeparator, quiet: bool) -> Self {
        Self {
            formatter,
            line_sep,
            quiet,
        }
    }

    #[must_use]
    pub const fn line_separator(&self) -> LineSeparator {
        self.line_sep
    }

    /// Formats content that did not come from a collected file.
    ///
    /// # Errors
    ///
    /// Returns the formatter's error unchanged.
    pub fn format_content(&self, content: &[u8]) -> Result<Vec<u8>> {
        self.formatter.format(content)
    }

    /// Formats every path, isolating failures.
    ///
    /// Each path yields either one diff or one error. Diffs keep the order
    /// of `paths`.
    pub fn format_all(&self, paths: &[PathBuf]) -> (FileDiffs, FormatErrors) {
        let span = span!(
            Level::DEBUG,
            "format_all",
            files = paths.len(),
            formatter = self.formatter.name()
        );
        let _guard = span.enter();

        let mut diffs = FileDiffs::new();
        let mut errors = FormatErrors::new();
        for path in paths {
            match self.format_file(path) {
                Ok(diff) => {
                    debug!(path = %path.display(), changed = diff.is_changed(), "Formatted file");
                    diffs.add(diff);
                }
                Err(cause) => {
                    warn!(path = %path.display(), error = %format!("{cause:#}"), "Failed to format file");
                    errors.push(FormatError::new(path, cause));
                }
            }
        }

        info!(
            formatted = diffs.len(),
            changed = diffs.changed_count(),
            failed = errors.len(),
            "Formatting pass complete"
        );
        (diffs, errors)
    }

    /// Formats every path and writes the changed files.
    ///
    /// Nothing is written if any file fails to read or format. Returns the
    /// number of files written.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::Format`] with every failure, or
    /// [`EngineError::Apply`] if a write fails.
    pub fn format(&self, paths: &[PathBuf]) -> Result<usize, EngineError> {
        let (diffs, errors) = self.format_all(paths);
        errors.into_result()?;
        diffs.apply_all().map_err(EngineError::Apply)?;
        Ok(diffs.changed_count())
    }

    /// Formats every path and reports files whose formatting differs.
    ///
    /// Returns `Ok(None)` when nothing would change.
    ///
    /// # Errors
    ///
    /// Returns every failure if any file fails to read or format.
    pub fn lint(&self, paths: &[PathBuf]) -> Result<Option<EngineOutput>, FormatErrors> {
        let (diffs, errors) = self.format_all(paths);
        errors.into_result()?;
        if diffs.changed_count() == 0 {
            return Ok(None);
        }
        let message = if self.quiet {
            LINT_QUIET_MESSAGE
        } else {
            LINT_MESSAGE
        };
        Ok(Some(self.output(message, diffs)))
    }

    /// Formats every path and reports what `format` would change.
    ///
    /// Pending changes are never an error. Returns `Ok(None)` when nothing
    /// would change.
    ///
    /// # Errors
    ///
    /// Returns every failure if any file fails to read or format.
    pub fn dry_run(&self, paths: &[PathBuf]) -> Result<Option<EngineOutput>, FormatErrors> {
        let (diffs, errors) = self.format_all(paths);
        errors.into_result()?;
        if diffs.changed_count() == 0 {
            return Ok(None);
        }
        let message = if self.quiet { DRY_RUN_QUIET_MESSAGE } else { "" };
        Ok(Some(self.output(message, diffs)))
    }

    fn format_file(&self, path: &Path) -> Result<FileDiff> {
        let original =
            fs::read(path).with_context(|| format!("Failed to read {}", path.display()))?;
        let formatted = self.format_content(&original)?;
        Ok(FileDiff::new(path, original, formatted, self.line_sep))
    }

    fn output(&self, message: &str, files: FileDiffs) -> EngineOutput {
        EngineOutput {
            message: message.to_string(),
            files,
            quiet: self.quiet,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::formatter::BasicFormatter;
    use tempfile::TempDir;

    /// Uppercases content; rejects anything containing `!`.
    struct ShoutFormatter;

    impl Formatter for ShoutFormatter {
        fn name(&self) -> &str {
            "shout"
        }

        fn format(&self, content: &[u8]) -> Result<Vec<u8>> {
            if content.contains(&b'!') {
                anyhow::bail!("unexpected '!'");
            }
            Ok(content.to_ascii_uppercase())
        }
    }

    fn engine(quiet: bool) -> SequentialEngine {
        SequentialEngine::new(Box::new(ShoutFormatter), LineSeparator::Default, quiet)
    }

    fn files(temp: &TempDir, contents: &[(&str, &str)]) -> Vec<PathBuf> {
        contents
            .iter()
            .map(|(name, content)| {
                let path = temp.path().join(name);
                fs::write(&path, content).unwrap();
                path
            })
            .collect()
    }

    #[test]
    fn test_format_content_delegates() {
        assert_eq!(engine(false).format_content(b"abc").unwrap(), b"ABC");
    }

    #[test]
    fn test_format_all_isolates_failures() {
        let temp = TempDir::new().unwrap();
        let mut paths = files(&temp, &[("a", "a"), ("b", "b!"), ("c", "C")]);
        paths.push(temp.path().join("missing"));

        let (diffs, errors) = engine(false).format_all(&paths);

        assert_eq!(diffs.len(), 2);
        assert_eq!(errors.len(), 2);
        assert_eq!(errors.paths(), vec![paths[1].as_path(), paths[3].as_path()]);
        assert_eq!(diffs.changed_paths(), vec![paths[0].as_path()]);
    }

    #[test]
    fn test_format_writes_nothing_on_error() {
        let temp = TempDir::new().unwrap();
        let paths = files(&temp, &[("a", "a"), ("b", "b!")]);

        let err = engine(false).format(&paths).unwrap_err();

        assert_eq!(err.format_errors().map(FormatErrors::len), Some(1));
        assert_eq!(fs::read_to_string(&paths[0]).unwrap(), "a");
    }

    #[test]
    fn test_format_applies_changes() {
        let temp = TempDir::new().unwrap();
        let paths = files(&temp, &[("a", "a\n"), ("b", "B\n")]);

        assert_eq!(engine(false).format(&paths).unwrap(), 1);

        assert_eq!(fs::read_to_string(&paths[0]).unwrap(), "A\n");
        assert_eq!(fs::read_to_string(&paths[1]).unwrap(), "B\n");
    }

    #[test]
    fn test_format_uses_line_separator() {
        let temp = TempDir::new().unwrap();
        let paths = files(&temp, &[("a.txt", "x  \ny\n")]);
        let engine = SequentialEngine::new(
            Box::new(BasicFormatter::default()),
            LineSeparator::Crlf,
            false,
        );

        engine.format(&paths).unwrap();

        assert_eq!(fs::read(&paths[0]).unwrap(), b"x\r\ny\r\n");
    }

    #[test]
    fn test_lint_clean_returns_none() {
        let temp = TempDir::new().unwrap();
        let paths = files(&temp, &[("a", "A"), ("b", "B")]);

        assert!(engine(false).lint(&paths).unwrap().is_none());
    }

    #[test]
    fn test_lint_messages() {
        let temp = TempDir::new().unwrap();
        let paths = files(&temp, &[("a", "a")]);

        let verbose = engine(false).lint(&paths).unwrap().unwrap();
        assert_eq!(verbose.message, LINT_MESSAGE);
        assert!(!verbose.quiet);

        let quiet = engine(true).lint(&paths).unwrap().unwrap();
        assert_eq!(quiet.message, LINT_QUIET_MESSAGE);
        assert!(quiet.quiet);
        assert_eq!(quiet.files.changed_count(), 1);
        assert_eq!(fs::read_to_string(&paths[0]).unwrap(), "a");
    }

    #[test]
    fn test_lint_reports_errors_instead_of_output() {
        let temp = TempDir::new().unwrap();
        let paths = files(&temp, &[("a", "a"), ("b", "!")]);

        let errors = engine(false).lint(&paths).unwrap_err();
        assert_eq!(errors.paths(), vec![paths[1].as_path()]);
    }

    #[test]
    fn test_dry_run_never_fails_on_changes() {
        let temp = TempDir::new().unwrap();
        let paths = files(&temp, &[("a", "a"), ("b", "B")]);

        let output = engine(true).dry_run(&paths).unwrap().unwrap();
        assert_eq!(output.message, DRY_RUN_QUIET_MESSAGE);
        assert_eq!(output.files.len(), 2);

        let output = engine(false).dry_run(&paths).unwrap().unwrap();
        assert!(output.message.is_empty());
        assert_eq!(fs::read_to_string(&paths[0]).unwrap(), "a");
    }

    #[test]
    fn test_dry_run_clean_and_failing() {
        let temp = TempDir::new().unwrap();
        let clean = files(&temp, &[("a", "A")]);
        assert!(engine(false).dry_run(&clean).unwrap().is_none());

        let failing = files(&temp, &[("b", "!")]);
        assert_eq!(engine(false).dry_run(&failing).unwrap_err().len(), 1);
    }
}
