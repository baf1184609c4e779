//! Diff model for one formatting run.
//!
//! A [`FileDiff`] pairs the content read from disk with the formatter's output
//! and the line separator it will be written with. [`FileDiffs`] holds one
//! entry per successfully formatted file, in processing order, and knows how
//! to count and apply the entries that changed.
//!
//! Text rendering of a diff for humans lives in [`unified`].

/// Unified diff generation for text files
pub mod unified;

pub use unified::{UnifiedDiffConfig, generate_unified_diff};

use anyhow::{Context, Result};
use serde::Deserialize;
use similar::Algorithm;
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// Convert `DiffAlgorithm` config enum to `similar::Algorithm`
#[must_use]
pub const fn config_to_algorithm(algo: &crate::config::DiffAlgorithm) -> Algorithm {
    match algo {
        crate::config::DiffAlgorithm::Myers => Algorithm::Myers,
        crate::config::DiffAlgorithm::Patience => Algorithm::Patience,
    }
}

/// Line-break convention used when a formatted file is written back.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LineSeparator {
    /// `\n`
    Lf,
    /// `\r\n`
    Crlf,
    /// Write the formatter's output unchanged.
    #[default]
    Default,
}

impl LineSeparator {
    /// Rewrites every line break in `content` to this separator.
    ///
    /// `Default` returns the content unchanged. A lone `\r` is not treated as
    /// a line break.
    #[must_use]
    pub fn apply(self, content: &[u8]) -> Vec<u8> {
        let sep: &[u8] = match self {
            Self::Default => return content.to_vec(),
            Self::Lf => b"\n",
            Self::Crlf => b"\r\n",
        };
        let mut out = Vec::with_capacity(content.len());
        let mut i = 0;
        while i < content.len() {
            match content[i] {
                b'\r' if content.get(i + 1) == Some(&b'\n') => {
                    out.extend_from_slice(sep);
                    i += 2;
                }
                b'\n' => {
                    out.extend_from_slice(sep);
                    i += 1;
                }
                byte => {
                    out.push(byte);
                    i += 1;
                }
            }
        }
        out
    }
}

impl fmt::Display for LineSeparator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Lf => "lf",
            Self::Crlf => "crlf",
            Self::Default => "default",
        };
        f.write_str(name)
    }
}

/// Original and formatted content of one file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileDiff {
    /// File the content was read from and will be written to.
    pub path: PathBuf,
    /// Bytes read from disk.
    pub original: Vec<u8>,
    /// Bytes returned by the formatter.
    pub formatted: Vec<u8>,
    /// Separator applied to `formatted` when writing.
    pub line_sep: LineSeparator,
}

impl FileDiff {
    #[must_use]
    pub fn new(
        path: impl Into<PathBuf>,
        original: Vec<u8>,
        formatted: Vec<u8>,
        line_sep: LineSeparator,
    ) -> Self {
        Self {
            path: path.into(),
            original,
            formatted,
            line_sep,
        }
    }

    /// The bytes that would land on disk: `formatted` with the line separator applied.
    #[must_use]
    pub fn rendered(&self) -> Vec<u8> {
        self.line_sep.apply(&self.formatted)
    }

    /// Whether writing this diff would change the file.
    #[must_use]
    pub fn is_changed(&self) -> bool {
        self.rendered() != self.original
    }

    /// Original content as text, replacing invalid UTF-8.
    #[must_use]
    pub fn original_text(&self) -> String {
        String::from_utf8_lossy(&self.original).into_owned()
    }

    /// Rendered content as text, replacing invalid UTF-8.
    #[must_use]
    pub fn rendered_text(&self) -> String {
        String::from_utf8_lossy(&self.rendered()).into_owned()
    }

    /// Writes the rendered content to `path`, truncating the file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be written.
    pub fn apply(&self) -> Result<()> {
        fs::write(&self.path, self.rendered())
            .with_context(|| format!("Failed to write formatted file: {}", self.path.display()))
    }
}

/// All diffs produced by one run, in processing order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FileDiffs {
    diffs: Vec<FileDiff>,
}

impl FileDiffs {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, diff: FileDiff) {
        self.diffs.push(diff);
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.diffs.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.diffs.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, FileDiff> {
        self.diffs.iter()
    }

    /// Diffs whose content would change on disk.
    pub fn changed(&self) -> impl Iterator<Item = &FileDiff> {
        self.diffs.iter().filter(|diff| diff.is_changed())
    }

    #[must_use]
    pub fn changed_count(&self) -> usize {
        self.changed().count()
    }

    /// Paths of the changed diffs, in order.
    #[must_use]
    pub fn changed_paths(&self) -> Vec<&Path> {
        self.changed().map(|diff| diff.path.as_path()).collect()
    }

    /// Writes every changed diff back to disk.
    ///
    /// Unchanged files are not touched. Stops at the first failed write;
    /// files written before it keep their new content.
    ///
    /// # Errors
    ///
    /// Returns an error naming the file that could not be written.
    pub fn apply_all(&self) -> Result<()> {
        let mut written = 0usize;
        for diff in self.changed() {
            diff.apply()?;
            debug!(path = %diff.path.display(), "Wrote formatted file");
            written += 1;
        }
        info!(written, total = self.diffs.len(), "Applied formatting changes");
        Ok(())
    }
}

impl FromIterator<FileDiff> for FileDiffs {
    fn from_iter<I: IntoIterator<Item = FileDiff>>(iter: I) -> Self {
        Self {
            diffs: iter.into_iter().collect(),
        }
    }
}

impl IntoIterator for FileDiffs {
    type Item = FileDiff;
    type IntoIter = std::vec::IntoIter<FileDiff>;

    fn into_iter(self) -> Self::IntoIter {
        self.diffs.into_iter()
    }
}

impl<'a> IntoIterator for &'a FileDiffs {
    type Item = &'a FileDiff;
    type IntoIter = std::slice::Iter<'a, FileDiff>;

    fn into_iter(self) -> Self::IntoIter {
        self.diffs.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_line_separator_apply() {
        assert_eq!(LineSeparator::Lf.apply(b"a\r\nb\n"), b"a\nb\n");
        assert_eq!(LineSeparator::Crlf.apply(b"a\nb\r\n"), b"a\r\nb\r\n");
        assert_eq!(LineSeparator::Default.apply(b"a\r\nb\n"), b"a\r\nb\n");
        assert_eq!(LineSeparator::Lf.apply(b"a\rb"), b"a\rb");
    }

    #[test]
    fn test_changed_compares_rendered_content() {
        let same = FileDiff::new("a", b"x\r\n".to_vec(), b"x\n".to_vec(), LineSeparator::Crlf);
        assert!(!same.is_changed());

        let differs = FileDiff::new("b", b"x\n".to_vec(), b"x\n".to_vec(), LineSeparator::Crlf);
        assert!(differs.is_changed());
    }

    #[test]
    fn test_changed_count() {
        let diffs: FileDiffs = vec![
            FileDiff::new("a", b"1\n".to_vec(), b"1\n".to_vec(), LineSeparator::Default),
            FileDiff::new("b", b"2 \n".to_vec(), b"2\n".to_vec(), LineSeparator::Default),
            FileDiff::new("c", b"3".to_vec(), b"3\n".to_vec(), LineSeparator::Default),
        ]
        .into_iter()
        .collect();

        assert_eq!(diffs.len(), 3);
        assert_eq!(diffs.changed_count(), 2);
        assert_eq!(diffs.changed_paths(), vec![Path::new("b"), Path::new("c")]);
    }

    #[test]
    fn test_apply_all_writes_only_changed_files() -> Result<()> {
        let temp = TempDir::new()?;
        let changed = temp.path().join("changed.txt");
        let untouched = temp.path().join("untouched.txt");
        fs::write(&changed, "a  \n")?;
        fs::write(&untouched, "b\n")?;

        let mut diffs = FileDiffs::new();
        diffs.add(FileDiff::new(&changed, b"a  \n".to_vec(), b"a\n".to_vec(), LineSeparator::Crlf));
        diffs.add(FileDiff::new(&untouched, b"b\n".to_vec(), b"b\n".to_vec(), LineSeparator::Default));

        // Replace the unchanged file with a directory: writing it would fail.
        fs::remove_file(&untouched)?;
        fs::create_dir(&untouched)?;

        diffs.apply_all()?;
        assert_eq!(fs::read(&changed)?, b"a\r\n");
        assert!(untouched.is_dir());
        Ok(())
    }

    #[test]
    fn test_apply_all_reports_failing_path() {
        let temp = TempDir::new().unwrap();
        let target = temp.path().join("missing-dir").join("file.txt");

        let mut diffs = FileDiffs::new();
        diffs.add(FileDiff::new(&target, b"old".to_vec(), b"new".to_vec(), LineSeparator::Default));

        let err = diffs.apply_all().unwrap_err();
        assert!(err.to_string().contains("file.txt"));
    }
}
