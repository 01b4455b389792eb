//! # treesh Command Modules
//!
//! File: cli/src/commands/mod.rs
//!
//! ## Overview
//!
//! This module groups the shell commands and owns the dispatcher that maps one
//! typed line to exactly one handler.
//!
//! ## Architecture
//!
//! - A line is split on whitespace; the first word is the command name
//!   (case-insensitive), the rest are its arguments.
//! - Every handler has the shape `fn(&ShellContext, &[String]) -> Result<Response>`
//!   (`cd` takes the context mutably). Handlers never print; the caller renders the
//!   returned [`Response`].
//! - An `Err` from a handler becomes a single red line. No failure ends the shell;
//!   only the exit commands (or end of input) do.
//!
//! ## Command Groups
//!
//! - `backup`: `backup`, `empty` (recursive copy and move)
//! - `search`: `find`, `findlike`
//! - `tree`: `tree`
//! - `mutate`: `prefix`, `suffix`, `rm` / `del`
//! - `navigate`: `ls` / `dir`, `cwd`, `cd`, `read`
//! - `convert`: `bin2dec`, `oct2dec`, `hex2dec`, `dec2bin`, `dec2oct`, `dec2hex`
//! - `external`: `!`
//!

/// Recursive copy (`backup`) and move-then-leave-shells (`empty`).
pub mod backup;
/// Number base conversions.
pub mod convert;
/// Running a line through the platform shell.
pub mod external;
/// Renaming and deletion.
pub mod mutate;
/// Listing, moving between and reading from directories.
pub mod navigate;
/// Exact and substring file search.
pub mod search;
/// Depth-limited tree rendering.
pub mod tree;

use crate::common::ui::Response;
use crate::core::context::ShellContext;
use crate::core::error::Result;
use convert::Radix;
use tracing::{debug, error};

/// What the loop should do after a line has been handled.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Dispatch {
    Output(Response),
    Clear,
    Exit,
}

const HELP: &[(&str, &str)] = &[
    ("backup <src> [dst]", "Copy a file or directory tree into dst (default: here)"),
    ("empty <dir>", "Move every file under dir here, keeping the directory layout"),
    ("find <name> [-r]", "Print the first file named exactly <name>"),
    ("findlike <text> [-r]", "Print every file whose path contains <text>"),
    ("tree [depth]", "Show the directory tree"),
    ("prefix <text>", "Prepend <text> to every file name here"),
    ("suffix <text>", "Append <text> to every file stem here"),
    ("rm, del <path>", "Delete a file or directory"),
    ("ls, dir", "List directories and files"),
    ("cwd", "Print the working directory"),
    ("cd <path>", "Change the working directory"),
    ("read <file>", "Print a file"),
    ("bin2dec, oct2dec, hex2dec <n>", "Convert to decimal"),
    ("dec2bin, dec2oct, dec2hex <n>", "Convert from decimal"),
    ("! <command>", "Run a command through the system shell"),
    ("cls, clear", "Clear the screen"),
    ("exit, kill, quit", "Leave treesh"),
    ("help", "Show this list"),
];

fn help() -> Response {
    let mut response = Response::new();
    response.info("Commands:");
    for (usage, summary) in HELP {
        response.plain(format!("  {:<32} {}", usage, summary));
    }
    response.info("With -r, find and findlike print paths relative to the working directory.");
    response
}

fn unknown() -> Response {
    Response::from_error("Unknown internal or external command")
}

/// Splits a typed line into words.
pub fn tokenize(line: &str) -> Vec<String> {
    line.split_whitespace().map(str::to_string).collect()
}

fn run(ctx: &mut ShellContext, name: &str, args: &[String]) -> Option<Result<Response>> {
    let result = match name {
        "backup" => backup::handle_backup(ctx, args),
        "empty" => backup::handle_empty(ctx, args),
        "find" => search::handle_find(ctx, args),
        "findlike" => search::handle_findlike(ctx, args),
        "tree" => tree::handle_tree(ctx, args),
        "prefix" => mutate::handle_prefix(ctx, args),
        "suffix" => mutate::handle_suffix(ctx, args),
        "rm" | "del" => mutate::handle_remove(ctx, args),
        "ls" | "dir" => navigate::handle_list(ctx, args),
        "cwd" => navigate::handle_cwd(ctx, args),
        "cd" => navigate::handle_cd(ctx, args),
        "read" => navigate::handle_read(ctx, args),
        "bin2dec" => convert::handle_to_decimal(Radix::Binary, args),
        "oct2dec" => convert::handle_to_decimal(Radix::Octal, args),
        "hex2dec" => convert::handle_to_decimal(Radix::Hex, args),
        "dec2bin" => convert::handle_from_decimal(Radix::Binary, args),
        "dec2oct" => convert::handle_from_decimal(Radix::Octal, args),
        "dec2hex" => convert::handle_from_decimal(Radix::Hex, args),
        "!" => external::handle_external(ctx, args),
        "help" => Ok(help()),
        _ => return None,
    };
    Some(result)
}

/// Handles one typed line against `ctx`.
pub fn execute(ctx: &mut ShellContext, line: &str) -> Dispatch {
    let words = tokenize(line);
    let Some((name, args)) = words.split_first() else {
        return Dispatch::Output(Response::new());
    };
    let name = name.to_lowercase();
    debug!("Dispatching '{}' with {:?}", name, args);

    match name.as_str() {
        "exit" | "kill" | "quit" => return Dispatch::Exit,
        "cls" | "clear" => return Dispatch::Clear,
        _ => {}
    }

    match run(ctx, &name, args) {
        None => Dispatch::Output(unknown()),
        Some(Ok(response)) => Dispatch::Output(response),
        Some(Err(e)) => {
            error!("'{}' failed: {:?}", name, e);
            Dispatch::Output(Response::from_error(format!("{:#}", e)))
        }
    }
}
