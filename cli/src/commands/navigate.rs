//! # treesh Navigation (`ls`, `cwd`, `cd`, `read`)
//!
//! File: cli/src/commands/navigate.rs
//!
//! ## Overview
//!
//! Read-only commands for moving around and looking at things:
//!
//! - `ls` / `dir` prints the working directory as two tables, directories then
//!   files, with size and the modified, accessed and created timestamps.
//! - `cwd` prints the working directory.
//! - `cd path` moves the shell's working directory (the process directory is
//!   left unchanged).
//! - `read path` prints a text file.
//!
use crate::common::fs::{io, path, walk};
use crate::common::ui::Response;
use crate::core::context::ShellContext;
use crate::core::error::{Result, ShellError};
use chrono::{DateTime, Local};
use std::fs::Metadata;
use std::io::Result as IoResult;
use std::path::Path;
use std::time::SystemTime;

const RULE_WIDTH: usize = 125;

fn row(name: &str, size: &str, modified: &str, accessed: &str, created: &str) -> String {
    format!(
        "{:<20} {:<25} {:<25} {:<25} {:<25}",
        name, size, modified, accessed, created
    )
    .trim_end()
    .to_string()
}

fn timestamp(time: IoResult<SystemTime>) -> String {
    match time {
        Ok(t) => DateTime::<Local>::from(t)
            .format("%Y-%m-%d %H:%M:%S")
            .to_string(),
        // Creation time is not recorded on every platform or filesystem.
        Err(_) => "-".to_string(),
    }
}

fn entry_row(path: &Path, metadata: Option<&Metadata>, is_dir: bool) -> String {
    let mut name = path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default();
    if is_dir {
        name.push('/');
    }
    let Some(md) = metadata else {
        return row(&name, "", "-", "-", "-");
    };
    let size = if is_dir {
        String::new()
    } else {
        format!("{}B", md.len())
    };
    row(
        &name,
        &size,
        &timestamp(md.modified()),
        &timestamp(md.accessed()),
        &timestamp(md.created()),
    )
}

/// Builds the `ls` tables for `dir`.
pub fn list(dir: &Path) -> Result<Response> {
    let listing = walk::list_dir(dir)?;
    let mut response = Response::new();

    response.info("Directories:");
    response.success(row("Name", "", "Modified", "Accessed", "Created"));
    for d in &listing.dirs {
        let md = std::fs::metadata(d).ok();
        response.highlight(entry_row(d, md.as_ref(), true));
    }

    response.rule("-".repeat(RULE_WIDTH));

    response.info("Files:");
    response.success(row("Name", "Size", "Modified", "Accessed", "Created"));
    for f in &listing.files {
        let md = std::fs::metadata(f).ok();
        response.highlight(entry_row(f, md.as_ref(), false));
    }
    Ok(response)
}

/// Handles `ls` / `dir`.
pub fn handle_list(ctx: &ShellContext, _args: &[String]) -> Result<Response> {
    list(ctx.cwd())
}

/// Handles `cwd`.
pub fn handle_cwd(ctx: &ShellContext, _args: &[String]) -> Result<Response> {
    let mut response = Response::new();
    response.plain(ctx.cwd().display().to_string());
    Ok(response)
}

/// Handles `cd path`. Arguments are joined with spaces; `..` goes up a level.
pub fn handle_cd(ctx: &mut ShellContext, args: &[String]) -> Result<Response> {
    if args.is_empty() {
        anyhow::bail!(ShellError::usage("Expected directory path"));
    }
    let target = path::resolve_joined(ctx.cwd(), args);
    ctx.set_cwd(&target)?;
    Ok(Response::new())
}

/// Handles `read path`: one output line per line of the file.
pub fn handle_read(ctx: &ShellContext, args: &[String]) -> Result<Response> {
    if args.is_empty() {
        anyhow::bail!(ShellError::usage("Expected filename"));
    }
    let target = path::resolve_joined(ctx.cwd(), args);
    let content = io::read_file_to_string(&target)?;

    let mut response = Response::new();
    for line in content.lines() {
        response.plain(line);
    }
    Ok(response)
}
