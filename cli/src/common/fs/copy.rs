//! # treesh File Copy Primitive
//!
//! File: cli/src/common/fs/copy.rs
//!
//! ## Overview
//!
//! Single-file copy used by every command that duplicates or moves content:
//! `backup`, `empty`, `prefix` and `suffix`. The recursion over directories lives
//! in the commands (on top of the tree walker); this module only copies one file
//! at a time so each file gets its own outcome.
//!
//! ## Architecture
//!
//! The copy itself is delegated to `fs_extra::file::copy`, configured through
//! [`Overwrite`]:
//! - `Overwrite::Replace` replaces an existing destination (backup, empty)
//! - `Overwrite::Refuse` fails if the destination exists (renames never clobber)
//!
//! Errors are wrapped into `ShellError::Copy`, which names both paths.
//!
use crate::core::error::ShellError;
use std::path::Path;
use tracing::debug;

/// What to do when the destination file already exists.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Overwrite {
    Replace,
    Refuse,
}

/// Copies the file at `source` to the file path `target`.
///
/// Returns the number of bytes copied.
///
/// # Errors
///
/// Returns `ShellError::Copy` if the source cannot be read, the target directory
/// does not exist, or the target exists and `overwrite` is `Overwrite::Refuse`.
pub fn copy_file(
    source: &Path,
    target: &Path,
    overwrite: Overwrite,
) -> Result<u64, ShellError> {
    let mut options = fs_extra::file::CopyOptions::new();
    options.overwrite = overwrite == Overwrite::Replace;
    options.skip_exist = false;

    let bytes = fs_extra::file::copy(source, target, &options).map_err(|e| ShellError::Copy {
        from: source.to_path_buf(),
        to: target.to_path_buf(),
        source: e,
    })?;
    debug!("Copied {} bytes from {:?} to {:?}", bytes, source, target);
    Ok(bytes)
}
