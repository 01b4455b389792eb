//! # treesh Main Entry Point
//!
//! File: cli/src/main.rs
//!
//! ## Overview
//!
//! This file serves as the main entry point for the treesh shell.
//! It handles:
//! - Command-line argument parsing using Clap
//! - Setting up the logging system based on verbosity flags
//! - Loading the configuration and building the starting `ShellContext`
//! - Handing control to the interactive loop or running `-c` lines
//!
//! ## Examples
//!
//! ```bash
//! # Interactive shell in the current directory
//! treesh
//!
//! # Run two commands against another directory, with debug logs
//! treesh -vv --dir ~/projects -c "tree 1" -c "findlike .toml -r"
//! ```
//!
//! Startup flow:
//! 1. Parse command-line args via Clap
//! 2. Configure logging based on verbosity level
//! 3. Load configuration and resolve the starting directory
//! 4. Run the script or the interactive loop
//!
//! Startup failures (bad config, missing `--dir`) print `Error: ...` and exit
//! with status 1. Once the shell runs, command failures are printed and the
//! shell carries on.
//!
use clap::Parser;
use std::io;
use std::path::PathBuf;
use tracing_subscriber::{fmt, EnvFilter};

mod commands; // Shell commands and the dispatcher
mod common; // Shared utilities (fs, process, ui)
mod core; // Core infrastructure (errors, config, context)
mod repl; // Interactive and scripted loops

use crate::core::config::load_config;
use crate::core::context::ShellContext;
use repl::Terminal;

/// Defines the command-line arguments using Clap's derive macros.
#[derive(Parser, Debug)]
#[command(
    name = "treesh",
    about = "A small interactive shell for directory trees",
    long_about = "An interactive shell for copying, searching, renaming and inspecting directory trees.\n\
                  Type `help` at the prompt for the command list.",
    version
)]
struct Cli {
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Starting working directory (default: config `start_dir`, else the current directory).
    #[arg(short, long, value_name = "DIR")]
    dir: Option<PathBuf>,

    /// Configuration file to use instead of the per-user one.
    #[arg(long, value_name = "FILE", env = "TREESH_CONFIG")]
    config: Option<PathBuf>,

    /// Disable coloured output.
    #[arg(long)]
    no_color: bool,

    /// Run this command line and exit instead of starting the prompt. Repeatable.
    #[arg(short = 'c', long = "command", value_name = "COMMAND")]
    commands: Vec<String>,
}

fn init_logging(verbose: u8) {
    let log_level = match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(log_level));
    fmt::Subscriber::builder()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .compact()
        .init();
}

fn run(cli: Cli) -> anyhow::Result<()> {
    let config = load_config(cli.config.as_deref())?;
    let term = Terminal {
        color: config.display.color && !cli.no_color,
    };

    let start = match cli.dir.clone().or_else(|| config.start_dir()) {
        Some(dir) => dir,
        None => std::env::current_dir()?,
    };
    let mut ctx = ShellContext::new(&start, config)?;
    tracing::info!("Starting in {}", ctx.cwd().display());

    let mut stdout = io::stdout().lock();
    if cli.commands.is_empty() {
        repl::run_interactive(&mut ctx, io::stdin().lock(), &mut stdout, term)
    } else {
        repl::run_script(&mut ctx, &cli.commands, &mut stdout, term)
    }
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    tracing::debug!("Parsed CLI arguments: {:?}", cli);

    if let Err(e) = run(cli) {
        tracing::error!("treesh failed: {:?}", e);
        eprintln!("Error: {:#}", e);
        std::process::exit(1);
    }

    Ok(())
}
