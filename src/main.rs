//! `run-suite`: run conformance suites of an external harness against an interpreter

use anyhow::{Context, Result};
use clap::Parser;
use std::io::Write;
use std::path::PathBuf;
use suite_runner::{overall_status, OutputMode, Overrides, Runner, Settings, Suite, KNOWN_SUITES};
use tracing::debug;

/// Log filter directive variable
const LOG_VAR: &str = "RUN_SUITE_LOG";

#[derive(Parser)]
#[command(name = "run-suite")]
#[command(about = "Run named conformance suites of an external harness against an interpreter")]
#[command(version)]
struct Cli {
    /// Suites to run, e.g. chap09_control
    suites: Vec<String>,

    /// Harness base directory (overrides HARNESS_HOME)
    #[arg(long, value_name = "DIR")]
    harness_home: Option<PathBuf>,

    /// Interpreter executable under test (overrides TARGET_BIN)
    #[arg(long, value_name = "PATH")]
    target: Option<PathBuf>,

    /// Program that runs the harness (overrides HARNESS_PROGRAM)
    #[arg(long, value_name = "PROGRAM")]
    harness: Option<PathBuf>,

    /// Harness entry file, relative to the base directory (overrides HARNESS_ENTRY)
    #[arg(long, value_name = "PATH", conflicts_with = "no_entry")]
    entry: Option<PathBuf>,

    /// Run the harness program without an entry file argument
    #[arg(long)]
    no_entry: bool,

    /// Run every suite even after one fails
    #[arg(long)]
    keep_going: bool,

    /// Let the harness write directly to the terminal
    #[arg(long)]
    no_capture: bool,

    /// Print the invocation for each suite without running it
    #[arg(long)]
    dry_run: bool,

    /// List known suites and exit
    #[arg(long)]
    list: bool,

    /// Enable debug logging
    #[arg(short, long)]
    verbose: bool,
}

fn init_tracing(verbose: bool) {
    let default_level = if verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_env(LOG_VAR)
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(default_level)),
        )
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

fn list_suites() {
    for info in KNOWN_SUITES {
        println!("{:<20} {}", info.name, info.topic);
    }
}

fn run(cli: Cli) -> Result<i32> {
    if cli.list {
        list_suites();
        return Ok(0);
    }

    if cli.suites.is_empty() {
        return Err(suite_runner::Error::configuration(
            "No suite given. Use --list to see known suites",
        )
        .into());
    }

    let suites = cli
        .suites
        .iter()
        .map(|name| Suite::parse(name))
        .collect::<suite_runner::Result<Vec<_>>>()?;

    let overrides = Overrides {
        harness_home: cli.harness_home,
        target: cli.target,
        harness_program: cli.harness,
        harness_entry: cli.entry,
        no_entry: cli.no_entry,
    };
    let settings = Settings::from_env(&overrides)?;
    debug!(?settings, "resolved settings");

    let mode = if cli.no_capture {
        OutputMode::Inherit
    } else {
        OutputMode::Capture
    };
    let runner = Runner::new(settings)
        .output_mode(mode)
        .keep_going(cli.keep_going);

    if cli.dry_run {
        for suite in &suites {
            let request = runner.prepare(suite)?;
            println!("cd {}", request.base_dir.display());
            println!("{}", request.display_command());
        }
        return Ok(0);
    }

    let outcomes = runner
        .run_all(&suites, |outcome| {
            std::io::stdout().write_all(&outcome.stdout)?;
            std::io::stdout().flush()?;
            std::io::stderr().write_all(&outcome.stderr)?;
            Ok(())
        })
        .context("suite run aborted")?;

    Ok(overall_status(&outcomes))
}

fn main() {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let code = match run(cli) {
        Ok(status) => status,
        Err(err) => {
            eprintln!("run-suite: {:#}", err);
            err.downcast_ref::<suite_runner::Error>()
                .map(suite_runner::Error::exit_code)
                .unwrap_or(1)
        }
    };

    std::process::exit(code);
}
