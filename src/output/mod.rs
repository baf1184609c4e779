//! Rendering of engine results and status messages for the tidyfmt CLI.
//!
//! Reports ([`present`], [`present_errors`]) go to a caller-supplied writer.
//! Status messages go to stderr:
//! - Dimmed colors for routine messages
//! - Bold colors for warnings and errors
//! - Verbosity control (quiet, normal, verbose)

use crate::diff::{UnifiedDiffConfig, generate_unified_diff};
use crate::engine::{EngineOutput, FormatErrors};
use anyhow::Result;
use colored::Colorize;
use std::io::Write;
use std::sync::atomic::{AtomicU8, Ordering};

/// Verbosity level for output messages.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Verbosity {
    /// Suppress informational messages, show only warnings and errors.
    Quiet = 0,
    /// Default verbosity level, show all standard messages.
    Normal = 1,
    /// Show verbose debug messages in addition to standard output.
    Verbose = 2,
}

/// Global verbosity setting (default: Normal).
static VERBOSITY: AtomicU8 = AtomicU8::new(1);

/// Sets the global verbosity level for all output functions.
pub fn set_verbosity(level: Verbosity) {
    VERBOSITY.store(level as u8, Ordering::Relaxed);
}

/// Gets the current global verbosity level.
pub fn get_verbosity() -> Verbosity {
    match VERBOSITY.load(Ordering::Relaxed) {
        0 => Verbosity::Quiet,
        2 => Verbosity::Verbose,
        _ => Verbosity::Normal,
    }
}

/// Prints a success message in green (respects quiet mode).
pub fn success(message: &str) {
    if get_verbosity() == Verbosity::Quiet {
        return;
    }
    eprintln!("{}", message.green());
}

/// Prints a warning message in bold yellow (always shown).
pub fn warning(message: &str) {
    eprintln!("{}", message.yellow().bold());
}

/// Prints an informational message in dimmed color (respects quiet mode).
pub fn info(message: &str) {
    if get_verbosity() == Verbosity::Quiet {
        return;
    }
    eprintln!("{}", message.dimmed());
}

/// Prints a verbose debug message (only in verbose mode).
pub fn verbose(message: &str) {
    if get_verbosity() != Verbosity::Verbose {
        return;
    }
    eprintln!("{}", message.dimmed());
}

/// Writes a lint or dry-run report.
///
/// The message comes first when non-empty. In quiet mode every changed path
/// follows on its own line; otherwise a unified diff of every changed file.
/// Unchanged files are never shown.
///
/// # Errors
///
/// Returns an error if writing fails.
pub fn present(
    output: &EngineOutput,
    diff_config: &UnifiedDiffConfig,
    writer: &mut dyn Write,
) -> Result<()> {
    if !output.message.is_empty() {
        if diff_config.colorize {
            writeln!(writer, "{}", output.message.bold())?;
        } else {
            writeln!(writer, "{}", output.message)?;
        }
    }

    for file in output.files.changed() {
        if output.quiet {
            writeln!(writer, "{}", file.path.display())?;
        } else {
            generate_unified_diff(file, diff_config, writer)?;
        }
    }
    Ok(())
}

/// Writes every per-file failure, one per line, after a summary line.
///
/// # Errors
///
/// Returns an error if writing fails.
pub fn present_errors(errors: &FormatErrors, colorize: bool, writer: &mut dyn Write) -> Result<()> {
    let summary = format!(
        "encountered errors formatting {} {}:",
        errors.len(),
        if errors.len() == 1 { "file" } else { "files" }
    );
    if colorize {
        writeln!(writer, "{}", summary.red().bold())?;
    } else {
        writeln!(writer, "{summary}")?;
    }
    for error in errors {
        writeln!(writer, "  {}: {:#}", error.path.display(), error.cause)?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::diff::{FileDiff, FileDiffs, LineSeparator};
    use crate::engine::{FormatError, LINT_QUIET_MESSAGE};

    fn sample_output(quiet: bool, message: &str) -> EngineOutput {
        let files: FileDiffs = vec![
            FileDiff::new("a.yaml", b"k: v  \n".to_vec(), b"k: v\n".to_vec(), LineSeparator::Default),
            FileDiff::new("b.yaml", b"ok\n".to_vec(), b"ok\n".to_vec(), LineSeparator::Default),
        ]
        .into_iter()
        .collect();
        EngineOutput {
            message: message.to_string(),
            files,
            quiet,
        }
    }

    fn render(output: &EngineOutput) -> String {
        let mut buf = Vec::new();
        present(output, &UnifiedDiffConfig::default(), &mut buf).unwrap();
        String::from_utf8(buf).unwrap()
    }

    #[test]
    fn test_quiet_lists_changed_paths_only() {
        let text = render(&sample_output(true, LINT_QUIET_MESSAGE));
        assert_eq!(text, format!("{LINT_QUIET_MESSAGE}\na.yaml\n"));
    }

    #[test]
    fn test_verbose_shows_diffs() {
        let text = render(&sample_output(false, ""));
        assert!(text.starts_with("--- a/a.yaml"));
        assert!(text.contains("-k: v  "));
        assert!(text.contains("+k: v"));
        assert!(!text.contains("b.yaml"));
    }

    #[test]
    fn test_present_errors_lists_every_file() {
        let errors: FormatErrors = vec![
            FormatError::new("x.yaml", anyhow::anyhow!("bad")),
            FormatError::new("y.yaml", anyhow::anyhow!("worse")),
        ]
        .into_iter()
        .collect();
        let mut buf = Vec::new();
        present_errors(&errors, false, &mut buf).unwrap();
        let text = String::from_utf8(buf).unwrap();
        assert!(text.starts_with("encountered errors formatting 2 files:"));
        assert!(text.contains("  x.yaml: bad\n"));
        assert!(text.contains("  y.yaml: worse\n"));
    }

    #[test]
    fn test_verbosity_round_trip() {
        let levels = [Verbosity::Quiet, Verbosity::Normal, Verbosity::Verbose];
        for level in &levels {
            set_verbosity(*level);
            assert_eq!(get_verbosity(), *level);
        }
        set_verbosity(Verbosity::Normal);
    }
}
