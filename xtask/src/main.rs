//! xtask for tidyfmt - build automation and tooling
//!
//! This binary provides development tasks like man page generation.

use anyhow::{Context, Result};
use clap::{CommandFactory, Parser};
use std::fs;
use std::path::Path;
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "xtask", about = "Build automation for tidyfmt")]
enum Task {
    /// Generate the man page from clap definitions
    GenerateManPages {
        /// Output directory for man pages (default: ./man)
        #[arg(short, long, default_value = "man")]
        output: PathBuf,
    },
}

fn main() -> Result<()> {
    let task = Task::parse();

    match task {
        Task::GenerateManPages { output } => generate_man_pages(&output)?,
    }

    Ok(())
}

fn generate_man_pages(output_dir: &Path) -> Result<()> {
    fs::create_dir_all(output_dir)
        .with_context(|| format!("Failed to create directory: {}", output_dir.display()))?;

    // tidyfmt has no subcommands, so one page covers every flag
    let cmd = tidyfmt::cli::Cli::command();
    let man_path = output_dir.join("tidyfmt.1");
    let man_file = fs::File::create(&man_path)
        .with_context(|| format!("Failed to create man page: {}", man_path.display()))?;

    clap_mangen::Man::new(cmd).render(&mut std::io::BufWriter::new(man_file))?;

    println!("✓ Generated: {}", man_path.display());
    println!("\nTo view the man page:");
    println!("  man {}", man_path.display());
    Ok(())
}
