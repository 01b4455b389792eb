//! # treesh Mutations (`prefix`, `suffix`, `rm`)
//!
//! File: cli/src/commands/mutate.rs
//!
//! ## Overview
//!
//! Operations on a single directory level or a single path:
//!
//! - `prefix p` / `suffix s` rename every file directly inside the working
//!   directory (subdirectories and their contents are left alone). `prefix`
//!   puts `p` in front of the whole name; `suffix` puts `s` between the stem and
//!   the extension (`report.txt` + `_v2` = `report_v2.txt`). Each file is copied
//!   to its new name and the original removed afterwards. Processing is best
//!   effort: a failed file is reported and the rest continue, and files already
//!   renamed stay renamed.
//! - `rm path` / `del path` deletes a file, or a directory with everything in it.
//!   Deleting the working directory itself or one of its parents is refused.
//!
use crate::common::fs::copy::{copy_file, Overwrite};
use crate::common::fs::{path, walk};
use crate::common::ui::Response;
use crate::core::context::ShellContext;
use crate::core::error::{error_chain, Result, ShellError};
use std::ffi::OsString;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{info, warn};

/// Text added to every file name by `prefix` / `suffix`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Affix {
    Prefix(String),
    Suffix(String),
}

impl Affix {
    fn text(&self) -> &str {
        match self {
            Affix::Prefix(t) | Affix::Suffix(t) => t,
        }
    }

    fn kind(&self) -> &'static str {
        match self {
            Affix::Prefix(_) => "prefix",
            Affix::Suffix(_) => "suffix",
        }
    }

    /// Rejects an empty affix or one that would move files to another directory.
    fn validate(&self) -> std::result::Result<(), ShellError> {
        let text = self.text();
        if text.is_empty() {
            return Err(ShellError::usage(format!("Expected {}", self.kind())));
        }
        if text.contains('/') || text.contains(std::path::MAIN_SEPARATOR) {
            return Err(ShellError::usage(format!(
                "The {} must not contain a path separator",
                self.kind()
            )));
        }
        Ok(())
    }

    /// New file name for `file`, or `None` if it has no name component.
    pub fn apply(&self, file: &Path) -> Option<OsString> {
        let name = file.file_name()?;
        match self {
            Affix::Prefix(prefix) => {
                let mut renamed = OsString::from(prefix);
                renamed.push(name);
                Some(renamed)
            }
            Affix::Suffix(suffix) => {
                let mut renamed = file.file_stem()?.to_os_string();
                renamed.push(suffix);
                if let Some(ext) = file.extension() {
                    renamed.push(".");
                    renamed.push(ext);
                }
                Some(renamed)
            }
        }
    }
}

/// Outcome of renaming one file.
#[derive(Debug)]
pub struct RenameEntry {
    pub from: PathBuf,
    pub to: PathBuf,
    pub status: std::result::Result<(), ShellError>,
}

fn rename_one(from: &Path, to: &Path) -> std::result::Result<(), ShellError> {
    copy_file(from, to, Overwrite::Refuse)?;
    fs::remove_file(from).map_err(|e| ShellError::io("remove", from, e))
}

/// Renames every file directly inside `dir` by adding `affix`.
///
/// # Errors
///
/// Returns an `Err` before touching anything when the affix is invalid or `dir`
/// cannot be listed. Per-file failures are in the returned entries.
pub fn rename_files(dir: &Path, affix: &Affix) -> Result<Vec<RenameEntry>> {
    affix.validate()?;
    let listing = walk::list_dir(dir)?;

    let mut entries = Vec::with_capacity(listing.files.len());
    for from in listing.files {
        let Some(new_name) = affix.apply(&from) else {
            continue;
        };
        let to = dir.join(new_name);
        let status = rename_one(&from, &to);
        if let Err(e) = &status {
            warn!("{}", error_chain(e));
        }
        entries.push(RenameEntry { from, to, status });
    }
    info!(
        "Added {} {:?} to {} files in {:?}",
        affix.kind(),
        affix.text(),
        entries.iter().filter(|e| e.status.is_ok()).count(),
        dir
    );
    Ok(entries)
}

fn rename_response(entries: &[RenameEntry]) -> Response {
    let mut response = Response::new();
    let mut renamed = 0;
    for entry in entries {
        match &entry.status {
            Ok(()) => {
                renamed += 1;
                response.plain(format!(
                    "Renamed '{}' to '{}'",
                    file_label(&entry.from),
                    file_label(&entry.to)
                ));
            }
            Err(e) => {
                response.error(error_chain(e));
            }
        }
    }
    response.info(format!("Renamed {} of {} files", renamed, entries.len()));
    response
}

/// What `remove` deleted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Removed {
    File,
    Directory,
}

/// Deletes `target`: a file, a symlink, or a directory with all its contents.
///
/// # Errors
///
/// - `ShellError::Usage` if `target` is `cwd` or one of its ancestors
/// - `ShellError::NotFound` if nothing exists at `target`
/// - `ShellError::Io` if the deletion fails
pub fn remove(target: &Path, cwd: &Path) -> Result<Removed> {
    if path::is_base_or_ancestor_of(target, cwd) {
        anyhow::bail!(ShellError::usage(
            "Refusing to remove the current directory or one of its parents"
        ));
    }
    // Not following symlinks: a link to a directory is removed as a link.
    let metadata = match fs::symlink_metadata(target) {
        Ok(md) => md,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
            anyhow::bail!(ShellError::not_found(target));
        }
        Err(e) => anyhow::bail!(ShellError::io("delete", target, e)),
    };

    if metadata.is_dir() {
        fs::remove_dir_all(target).map_err(|e| ShellError::io("delete", target, e))?;
        info!("Removed directory {:?}", target);
        Ok(Removed::Directory)
    } else {
        fs::remove_file(target).map_err(|e| ShellError::io("delete", target, e))?;
        info!("Removed file {:?}", target);
        Ok(Removed::File)
    }
}

fn file_label(path: &Path) -> String {
    path.file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}

/// Handles `prefix p`.
pub fn handle_prefix(ctx: &ShellContext, args: &[String]) -> Result<Response> {
    let affix = Affix::Prefix(args.first().cloned().unwrap_or_default());
    let entries = rename_files(ctx.cwd(), &affix)?;
    Ok(rename_response(&entries))
}

/// Handles `suffix s`.
pub fn handle_suffix(ctx: &ShellContext, args: &[String]) -> Result<Response> {
    let affix = Affix::Suffix(args.first().cloned().unwrap_or_default());
    let entries = rename_files(ctx.cwd(), &affix)?;
    Ok(rename_response(&entries))
}

/// Handles `rm path` / `del path`. Arguments are joined with spaces.
pub fn handle_remove(ctx: &ShellContext, args: &[String]) -> Result<Response> {
    if args.is_empty() {
        anyhow::bail!(ShellError::usage("Expected a file or directory name"));
    }
    let target = path::resolve_joined(ctx.cwd(), args);
    remove(&target, ctx.cwd())?;

    let mut response = Response::new();
    response.success(format!("Removed '{}' successfully", file_label(&target)));
    Ok(response)
}
