//! Command-line interface definitions for tidyfmt.
//!
//! The CLI definitions are shared between the main binary and build tools
//! (like xtask) for man page generation.

use clap::Parser;
use clap_complete::Shell;
use std::path::PathBuf;

/// Main CLI structure for tidyfmt.
#[derive(Parser, Debug)]
#[command(
    name = "tidyfmt",
    version = crate::VERSION,
    about = "Batch whitespace formatter with lint and dry-run modes",
    long_about = "Collects files by literal path or glob pattern, formats them, and \
                  writes the results back, reports differences (--lint) or previews \
                  changes (--dry)."
)]
pub struct Cli {
    /// Paths (or patterns with --doublestar) to format; overrides `include`
    pub paths: Vec<String>,

    /// Configuration file to use instead of discovering one
    #[arg(long = "conf", value_name = "FILE", env = "TIDYFMT_CONFIG")]
    pub config: Option<PathBuf>,

    /// Report formatting differences and exit non-zero if any are found
    #[arg(long, conflicts_with = "dry")]
    pub lint: bool,

    /// Show what would change without writing anything
    #[arg(long)]
    pub dry: bool,

    /// Only list file names in reports and suppress informational messages
    #[arg(short, long)]
    pub quiet: bool,

    /// Show verbose output and debug logging
    #[arg(short, long)]
    pub verbose: bool,

    /// Format standard input and write the result to standard output
    #[arg(long = "in", conflicts_with_all = ["lint", "dry"])]
    pub stdin: bool,

    /// Treat paths as glob patterns (`**` matches across directories)
    #[arg(long)]
    pub doublestar: bool,

    /// Path or pattern to exclude; may be repeated
    #[arg(long, value_name = "PATH")]
    pub exclude: Vec<String>,

    /// Extensions to pick up while walking directories
    #[arg(long, value_delimiter = ',', value_name = "EXT")]
    pub extensions: Option<Vec<String>>,

    /// Generate a shell completion script and exit
    #[arg(long, value_enum, value_name = "SHELL")]
    pub completion: Option<Shell>,
}

impl Cli {
    /// The run mode selected by the flags.
    #[must_use]
    pub const fn mode(&self) -> Mode {
        if self.stdin {
            Mode::Stdin
        } else if self.lint {
            Mode::Lint
        } else if self.dry {
            Mode::DryRun
        } else {
            Mode::Format
        }
    }
}

/// What a run does with the collected files.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    /// Write formatted content back.
    Format,
    /// Report differences; non-zero exit when any exist.
    Lint,
    /// Report pending changes.
    DryRun,
    /// Format stdin to stdout, ignoring collection.
    Stdin,
}
