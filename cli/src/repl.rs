//! # treesh Read-Eval-Print Loop
//!
//! File: cli/src/repl.rs
//!
//! ## Overview
//!
//! Drives the dispatcher from two sources:
//!
//! - **Interactive**: prints the prompt, reads one line, dispatches it, prints the
//!   response, and repeats until an exit command or end of input.
//! - **Script** (`-c`): dispatches the given lines in order without a prompt,
//!   stopping early at an exit command.
//!
//! The prompt names the user, the host and the local time:
//!
//! ```text
//! alice @ build-box (2024-05-01 09:30:12)
//! >
//! ```
//!
//! Both loops are generic over their reader and writer so tests can drive them
//! with in-memory buffers.
//!
use crate::commands::{self, Dispatch};
use crate::common::ui::{self, Tone};
use crate::core::context::ShellContext;
use anyhow::Context;
use chrono::Local;
use std::env;
use std::io::{BufRead, Write};
use tracing::info;

/// Rendering options for the loop.
#[derive(Debug, Clone, Copy)]
pub struct Terminal {
    pub color: bool,
}

fn first_env(names: &[&str]) -> Option<String> {
    names
        .iter()
        .filter_map(|name| env::var(name).ok())
        .find(|value| !value.trim().is_empty())
}

fn user_name() -> String {
    first_env(&["USER", "USERNAME", "LOGNAME"]).unwrap_or_else(|| "user".to_string())
}

fn host_name() -> String {
    first_env(&["HOSTNAME", "COMPUTERNAME", "USERDOMAIN"])
        .unwrap_or_else(|| "localhost".to_string())
}

/// The two-line prompt shown before each interactive read.
pub fn prompt() -> String {
    format!(
        "{} @ {} ({})\n> ",
        user_name(),
        host_name(),
        Local::now().format("%Y-%m-%d %H:%M:%S")
    )
}

/// Dispatches `line` and writes its outcome. Returns `false` once the shell
/// should stop.
fn step<W: Write>(
    ctx: &mut ShellContext,
    line: &str,
    out: &mut W,
    term: Terminal,
) -> anyhow::Result<bool> {
    match commands::execute(ctx, line) {
        Dispatch::Exit => return Ok(false),
        Dispatch::Clear => {
            if term.color {
                write!(out, "{}", ui::CLEAR_SCREEN)?;
            }
        }
        Dispatch::Output(response) => {
            write!(out, "{}", response.render(term.color))?;
        }
    }
    out.flush().context("Failed to flush output")?;
    Ok(true)
}

/// Runs the interactive loop until an exit command or end of input.
pub fn run_interactive<R: BufRead, W: Write>(
    ctx: &mut ShellContext,
    input: R,
    out: &mut W,
    term: Terminal,
) -> anyhow::Result<()> {
    let mut lines = input.lines();
    loop {
        write!(out, "{}", ui::paint(&prompt(), Tone::Rule, term.color))?;
        out.flush().context("Failed to flush prompt")?;

        let Some(line) = lines.next() else {
            info!("End of input, leaving the shell");
            writeln!(out)?;
            return Ok(());
        };
        let line = line.context("Failed to read from standard input")?;
        if !step(ctx, &line, out, term)? {
            return Ok(());
        }
    }
}

/// Runs each of `script` in order, without a prompt.
pub fn run_script<W: Write>(
    ctx: &mut ShellContext,
    script: &[String],
    out: &mut W,
    term: Terminal,
) -> anyhow::Result<()> {
    for line in script {
        if !step(ctx, line, out, term)? {
            break;
        }
    }
    Ok(())
}
