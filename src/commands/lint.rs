use super::Outcome;
use crate::FormatContext;
use crate::output;
use anyhow::Result;
use std::io::Write;

/// Reports files whose formatting differs, without writing them.
///
/// The report goes to `writer`. Returns [`Outcome::Differences`] when at
/// least one file would change.
///
/// # Errors
///
/// Returns the [`FormatErrors`](crate::engine::FormatErrors) aggregate if any
/// file fails, or an error if collection or writing the report fails.
pub fn execute(ctx: &FormatContext, writer: &mut dyn Write) -> Result<Outcome> {
    let paths = super::collect(ctx)?;
    let engine = ctx.engine()?;

    match engine.lint(&paths)? {
        Some(report) => {
            output::present(&report, &ctx.diff_config(), writer)?;
            Ok(Outcome::Differences)
        }
        None => {
            output::success("No formatting differences found");
            Ok(Outcome::Clean)
        }
    }
}
