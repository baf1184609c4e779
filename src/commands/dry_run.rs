use crate::FormatContext;
use crate::output;
use anyhow::Result;
use std::io::Write;

/// Shows what formatting would change, without writing anything.
///
/// Pending changes are advice, not failure.
///
/// # Errors
///
/// Returns the [`FormatErrors`](crate::engine::FormatErrors) aggregate if any
/// file fails, or an error if collection or writing the report fails.
pub fn execute(ctx: &FormatContext, writer: &mut dyn Write) -> Result<()> {
    let paths = super::collect(ctx)?;
    let engine = ctx.engine()?;

    match engine.dry_run(&paths)? {
        Some(report) => output::present(&report, &ctx.diff_config(), writer)?,
        None => output::info("No changes to make"),
    }
    Ok(())
}
