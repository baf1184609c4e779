use crate::diff::FileDiff;
use anyhow::Result;
use colored::{ColoredString, Colorize};
use similar::{Algorithm, ChangeTag, TextDiff};
use std::io::Write;
use tracing::{Level, debug, span};

/// Configuration for unified diff generation
#[derive(Debug, Clone, Copy)]
pub struct UnifiedDiffConfig {
    /// Number of context lines around changes (typically 3)
    pub context_lines: usize,
    /// Diff algorithm to use
    pub algorithm: Algorithm,
    /// Whether to colorize the output
    pub colorize: bool,
}

impl Default for UnifiedDiffConfig {
    fn default() -> Self {
        Self {
            context_lines: 3,
            algorithm: Algorithm::Myers,
            colorize: false,
        }
    }
}

/// Write a git-style unified diff of one file's original and rendered content.
///
/// The same path is used for both headers (`--- a/path`, `+++ b/path`).
/// Hunks are omitted when the content is identical. Returns the number of
/// inserted plus deleted lines.
///
/// # Errors
///
/// Returns an error if writing to the output writer fails.
pub fn generate_unified_diff(
    file: &FileDiff,
    config: &UnifiedDiffConfig,
    writer: &mut dyn Write,
) -> Result<usize> {
    let span = span!(
        Level::DEBUG,
        "diff_generation",
        path = %file.path.display(),
        algorithm = ?config.algorithm,
        context = config.context_lines
    );
    let _guard = span.enter();

    let original = file.original_text();
    let rendered = file.rendered_text();
    let diff = TextDiff::configure()
        .algorithm(config.algorithm)
        .diff_lines(&original, &rendered);

    let path = file.path.display();
    let paint = |text: String, style: fn(&str) -> ColoredString| -> String {
        if config.colorize {
            style(&text).to_string()
        } else {
            text
        }
    };

    writeln!(writer, "{}", paint(format!("--- a/{path}"), |s| s.red()))?;
    writeln!(writer, "{}", paint(format!("+++ b/{path}"), |s| s.green()))?;

    let mut changed_lines = 0;
    for hunk in diff
        .unified_diff()
        .context_radius(config.context_lines)
        .iter_hunks()
    {
        writeln!(writer, "{}", paint(hunk.header().to_string(), |s| s.cyan()))?;

        for change in hunk.iter_changes() {
            let line = match change.tag() {
                ChangeTag::Delete => {
                    changed_lines += 1;
                    paint(format!("-{change}"), |s| s.red())
                }
                ChangeTag::Insert => {
                    changed_lines += 1;
                    paint(format!("+{change}"), |s| s.green())
                }
                ChangeTag::Equal => format!(" {change}"),
            };
            write!(writer, "{line}")?;
            if change.missing_newline() {
                writeln!(writer)?;
                writeln!(writer, "\\ No newline at end of file")?;
            }
        }
    }

    debug!(changed_lines, "Diff generation complete");
    Ok(changed_lines)
}
