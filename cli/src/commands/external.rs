//! # treesh External Commands (`!`)
//!
//! File: cli/src/commands/external.rs
//!
//! `! command line...` hands the rest of the line to the platform shell, runs it
//! in the working directory and prints what it wrote: stdout as plain lines,
//! stderr as error lines. A non-zero exit status is logged, not reported as a
//! treesh failure.
//!
use crate::common::process::run_shell_capture;
use crate::common::ui::Response;
use crate::core::context::ShellContext;
use crate::core::error::{Result, ShellError};
use tracing::warn;

pub fn handle_external(ctx: &ShellContext, args: &[String]) -> Result<Response> {
    if args.is_empty() {
        anyhow::bail!(ShellError::usage("Expected a command"));
    }
    let command_line = args.join(" ");
    let output = run_shell_capture(&command_line, ctx.cwd())?;
    if output.code != Some(0) {
        warn!("'{}' exited with {:?}", command_line, output.code);
    }

    let mut response = Response::new();
    for line in output.stdout.lines() {
        response.plain(line);
    }
    for line in output.stderr.lines() {
        response.error(line);
    }
    Ok(response)
}
