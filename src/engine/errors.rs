use std::fmt;
use std::path::{Path, PathBuf};

/// A failure to read or format one file.
#[derive(Debug)]
pub struct FormatError {
    /// File that failed.
    pub path: PathBuf,
    /// Underlying read or formatter error.
    pub cause: anyhow::Error,
}

impl FormatError {
    #[must_use]
    pub fn new(path: impl Into<PathBuf>, cause: anyhow::Error) -> Self {
        Self {
            path: path.into(),
            cause,
        }
    }
}

impl fmt::Display for FormatError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {:#}", self.path.display(), self.cause)
    }
}

impl std::error::Error for FormatError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        Some(self.cause.as_ref())
    }
}

/// Every per-file failure of a run.
///
/// An empty aggregate means every file was formatted. A non-empty one is an
/// error value in its own right and names every failing file when displayed.
#[derive(Debug, Default)]
pub struct FormatErrors {
    errors: Vec<FormatError>,
}

impl FormatErrors {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, error: FormatError) {
        self.errors.push(error);
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.errors.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, FormatError> {
        self.errors.iter()
    }

    /// Paths of the failing files, in processing order.
    #[must_use]
    pub fn paths(&self) -> Vec<&Path> {
        self.errors.iter().map(|e| e.path.as_path()).collect()
    }

    /// `Ok(())` when empty, otherwise the aggregate itself as the error.
    ///
    /// # Errors
    ///
    /// Returns `self` if it holds at least one failure.
    pub fn into_result(self) -> Result<(), Self> {
        if self.is_empty() { Ok(()) } else { Err(self) }
    }
}

impl fmt::Display for FormatErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let noun = if self.errors.len() == 1 { "file" } else { "files" };
        write!(f, "encountered errors formatting {} {noun}:", self.errors.len())?;
        for error in &self.errors {
            write!(f, "\n  {error}")?;
        }
        Ok(())
    }
}

impl std::error::Error for FormatErrors {}

impl FromIterator<FormatError> for FormatErrors {
    fn from_iter<I: IntoIterator<Item = FormatError>>(iter: I) -> Self {
        Self {
            errors: iter.into_iter().collect(),
        }
    }
}

impl IntoIterator for FormatErrors {
    type Item = FormatError;
    type IntoIter = std::vec::IntoIter<FormatError>;

    fn into_iter(self) -> Self::IntoIter {
        self.errors.into_iter()
    }
}

impl<'a> IntoIterator for &'a FormatErrors {
    type Item = &'a FormatError;
    type IntoIter = std::slice::Iter<'a, FormatError>;

    fn into_iter(self) -> Self::IntoIter {
        self.errors.iter()
    }
}

/// Why a `format` run did not complete.
#[derive(Debug)]
pub enum EngineError {
    /// One or more files could not be read or formatted; nothing was written.
    Format(FormatErrors),
    /// Writing a formatted file failed; earlier files may already be written.
    Apply(anyhow::Error),
}

impl EngineError {
    /// The per-file failures, if that is what stopped the run.
    #[must_use]
    pub const fn format_errors(&self) -> Option<&FormatErrors> {
        match self {
            Self::Format(errors) => Some(errors),
            Self::Apply(_) => None,
        }
    }
}

impl fmt::Display for EngineError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Format(errors) => write!(f, "{errors}"),
            Self::Apply(e) => write!(f, "failed to apply formatting changes: {e:#}"),
        }
    }
}

impl std::error::Error for EngineError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Format(errors) => Some(errors),
            Self::Apply(e) => Some(e.as_ref()),
        }
    }
}

impl From<FormatErrors> for EngineError {
    fn from(errors: FormatErrors) -> Self {
        Self::Format(errors)
    }
}
