use crate::FormatContext;
use anyhow::{Context, Result};
use std::io::{Read, Write};
use tracing::debug;

/// Formats everything read from `reader` and writes the result to `writer`.
///
/// No files are collected. The configured line ending is applied.
///
/// # Errors
///
/// Returns an error if reading, formatting or writing fails.
pub fn execute(ctx: &FormatContext, reader: &mut dyn Read, writer: &mut dyn Write) -> Result<()> {
    let mut content = Vec::new();
    reader
        .read_to_end(&mut content)
        .context("Failed to read standard input")?;
    debug!(bytes = content.len(), "Formatting standard input");

    let engine = ctx.engine()?;
    let formatted = engine
        .format_content(&content)
        .context("Failed to format standard input")?;
    writer
        .write_all(&engine.line_separator().apply(&formatted))
        .context("Failed to write formatted output")?;
    writer.flush()?;
    Ok(())
}
