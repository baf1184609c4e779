pub mod dry_run;
pub mod format;
pub mod lint;
pub mod stdin;

use crate::FormatContext;
use crate::output;
use anyhow::{Context, Result};
use std::path::PathBuf;
use tracing::{Level, info, span};

/// How a run ended when it did not fail.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    /// Nothing to change, or changes written.
    Clean,
    /// Lint found files whose formatting differs.
    Differences,
}

impl Outcome {
    /// Process exit code for this outcome.
    #[must_use]
    pub const fn exit_code(self) -> i32 {
        match self {
            Self::Clean => 0,
            Self::Differences => 1,
        }
    }
}

/// Collects the files to process with the context's collector.
pub(crate) fn collect(ctx: &FormatContext) -> Result<Vec<PathBuf>> {
    let span = span!(
        Level::DEBUG,
        "collect",
        doublestar = ctx.config.doublestar,
        include = ctx.config.include.len(),
        exclude = ctx.config.exclude.len()
    );
    let _guard = span.enter();

    let paths = ctx
        .collector()
        .collect_paths()
        .context("Failed to collect paths")?;
    info!(count = paths.len(), "Collected paths");
    if paths.is_empty() {
        output::warning("No files matched the include rules");
    }
    Ok(paths)
}
