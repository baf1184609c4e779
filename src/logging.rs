use anyhow::{Context, Result};
use std::io::IsTerminal;
use tracing_subscriber::EnvFilter;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

/// Environment variable holding a `tracing` filter directive.
pub const LOG_ENV: &str = "TIDYFMT_LOG";

/// Installs the global subscriber writing to stderr.
///
/// `TIDYFMT_LOG` wins when set; otherwise the level is `warn`, or `debug`
/// with `verbose`.
///
/// # Errors
///
/// Returns an error if the filter directive is invalid or a subscriber is
/// already installed.
pub fn init(verbose: bool) -> Result<()> {
    use tracing_subscriber::fmt;

    let filter = filter_from(std::env::var(LOG_ENV).ok().as_deref(), verbose)?;

    tracing_subscriber::registry()
        .with(
            fmt::layer()
                .with_writer(std::io::stderr)
                .with_ansi(std::io::stderr().is_terminal())
                .with_target(verbose),
        )
        .with(filter)
        .try_init()
        .context("Failed to initialize logging")
}

fn filter_from(directive: Option<&str>, verbose: bool) -> Result<EnvFilter> {
    match directive {
        Some(directive) if !directive.trim().is_empty() => EnvFilter::try_new(directive)
            .with_context(|| format!("Invalid {LOG_ENV} value: {directive}")),
        _ => Ok(EnvFilter::new(if verbose { "debug" } else { "warn" })),
    }
}
