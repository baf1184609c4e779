use anyhow::Result;
use clap::{CommandFactory, Parser};
use clap_complete::{Generator, generate};
use colored::Colorize;
use std::io;
use std::process;
use tidyfmt::cli::{Cli, Mode};
use tidyfmt::commands::{self, Outcome};
use tidyfmt::engine::FormatErrors;
use tidyfmt::output::{self, Verbosity};
use tidyfmt::{FormatContext, Overrides, logging};

fn main() {
    match run() {
        Ok(outcome) => process::exit(outcome.exit_code()),
        Err(e) => {
            if let Some(errors) = e.downcast_ref::<FormatErrors>() {
                let colorize = colored::control::SHOULD_COLORIZE.should_colorize();
                if output::present_errors(errors, colorize, &mut io::stderr()).is_err() {
                    eprintln!("{} {errors}", "Error:".red().bold());
                }
            } else {
                eprintln!("{} {e:#}", "Error:".red().bold());
            }
            process::exit(1);
        }
    }
}

fn run() -> Result<Outcome> {
    let cli = Cli::parse();

    if let Some(shell) = cli.completion {
        print_completions(shell, &mut Cli::command());
        return Ok(Outcome::Clean);
    }

    logging::init(cli.verbose)?;
    output::set_verbosity(if cli.quiet {
        Verbosity::Quiet
    } else if cli.verbose {
        Verbosity::Verbose
    } else {
        Verbosity::Normal
    });

    let mut ctx = FormatContext::new(cli.config.as_deref())?;
    ctx.quiet = cli.quiet;
    ctx.apply_overrides(&Overrides {
        paths: cli.paths.clone(),
        doublestar: cli.doublestar,
        exclude: cli.exclude.clone(),
        extensions: cli.extensions.clone(),
    })?;
    if let Some(path) = &ctx.config_path {
        output::verbose(&format!("Using configuration {}", path.display()));
    }

    let mut stdout = io::stdout().lock();
    match cli.mode() {
        Mode::Format => commands::format::execute(&ctx).map(|()| Outcome::Clean),
        Mode::Lint => commands::lint::execute(&ctx, &mut stdout),
        Mode::DryRun => commands::dry_run::execute(&ctx, &mut stdout).map(|()| Outcome::Clean),
        Mode::Stdin => commands::stdin::execute(&ctx, &mut io::stdin().lock(), &mut stdout)
            .map(|()| Outcome::Clean),
    }
}

fn print_completions<G: Generator>(g: G, cmd: &mut clap::Command) {
    generate(g, cmd, cmd.get_name().to_string(), &mut io::stdout());
}
