//! # treesh Filesystem I/O Operations
//!
//! File: cli/src/common/fs/io.rs
//!
//! ## Overview
//!
//! Small wrappers around `std::fs` used by the commands:
//! - **`ensure_dir_exists`**: creates a directory and its parents when missing and
//!   checks that an existing path really is a directory.
//! - **`read_file_to_string`**: reads a whole file for `read`, with context on failure.
//!
//! `ensure_dir_exists` returns a typed [`ShellError`] instead of an `anyhow`
//! error because traversals store its failures per directory in their reports.
//!
use crate::core::error::{Result, ShellError};
use anyhow::Context;
use std::fs;
use std::io;
use std::path::Path;
use tracing::{debug, info};

/// Ensures that a directory exists at the specified path.
///
/// If the path does not exist, this function creates it, including any missing
/// parent directories (similar to `mkdir -p`).
///
/// # Errors
///
/// Returns a `ShellError::Io` if:
/// - The path exists but is not a directory.
/// - Creating the directory fails (e.g., due to permissions).
pub fn ensure_dir_exists(path: &Path) -> std::result::Result<(), ShellError> {
    if !path.exists() {
        fs::create_dir_all(path).map_err(|e| ShellError::io("create directory", path, e))?;
        info!("Created directory: {:?}", path);
    } else if !path.is_dir() {
        return Err(ShellError::io(
            "create directory",
            path,
            io::Error::new(
                io::ErrorKind::AlreadyExists,
                "Path exists but is not a directory",
            ),
        ));
    } else {
        debug!("Directory already exists: {:?}", path);
    }
    Ok(())
}

/// Reads the entire content of a file into a string.
///
/// # Errors
///
/// Returns `ShellError::NotFound` when nothing exists at `path`, and an error
/// with context when the file cannot be read (permissions, not UTF-8, a directory).
pub fn read_file_to_string(path: &Path) -> Result<String> {
    if !path.exists() {
        anyhow::bail!(ShellError::not_found(path));
    }
    fs::read_to_string(path).with_context(|| {
        format!(
            "An error occurred while reading '{}'",
            path.file_name()
                .map(|n| n.to_string_lossy().into_owned())
                .unwrap_or_else(|| path.display().to_string())
        )
    })
}
