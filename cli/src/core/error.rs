//! # treesh Error Types
//!
//! File: cli/src/core/error.rs
//!
//! ## Overview
//!
//! This module defines the error taxonomy of the shell. Every command either
//! finishes, or fails with one of these errors, and control always returns to
//! the prompt afterwards: nothing here is fatal to the process.
//!
//! ## Architecture
//!
//! The error system consists of two main components:
//! - `ShellError`: A custom error enum using `thiserror` for the specific failure kinds
//! - `Result<T>`: A type alias for `anyhow::Result<T>` used by command handlers
//!
//! The failure kinds are:
//! - `Usage`: a required argument is missing or malformed; the operation never started
//! - `NotFound`: a referenced file or directory does not exist
//! - `Io` / `Copy`: a single filesystem step failed mid-operation
//! - `Cycle`: a symlinked directory points back at one of its own ancestors
//! - `Conversion`: a number could not be parsed in the requested base
//! - `Config`: the configuration file is invalid
//!
//! Traversal operations keep `ShellError` values per item in their reports, so a
//! failure on one file is shown next to the successes instead of aborting the run.
//!
//! ## Examples
//!
//! ```rust
//! if args.is_empty() {
//!     anyhow::bail!(ShellError::Usage("Expected a directory path".into()));
//! }
//!
//! fs::remove_file(&path).map_err(|e| ShellError::io("remove", &path, e))?;
//! ```
//!
use std::io;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Custom error type for the shell.
#[derive(Error, Debug)]
pub enum ShellError {
    #[error("{0}")]
    Usage(String),

    #[error("'{}' does not exist", display_name(.path))]
    NotFound { path: PathBuf },

    #[error("Failed to {action} '{}'", .path.display())]
    Io {
        action: &'static str,
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("Failed to copy '{}' to '{}'", .from.display(), .to.display())]
    Copy {
        from: PathBuf,
        to: PathBuf,
        #[source]
        source: fs_extra::error::Error,
    },

    #[error("Skipped '{}': it leads back to '{}'", .path.display(), .ancestor.display())]
    Cycle { path: PathBuf, ancestor: PathBuf },

    #[error("Conversion error: {0}")]
    Conversion(String),

    #[error("Configuration error: {0}")]
    Config(String),
}

impl ShellError {
    /// Shorthand for an `Io` failure on `path`.
    pub fn io(action: &'static str, path: &Path, source: io::Error) -> Self {
        ShellError::Io {
            action,
            path: path.to_path_buf(),
            source,
        }
    }

    pub fn not_found(path: &Path) -> Self {
        ShellError::NotFound {
            path: path.to_path_buf(),
        }
    }

    pub fn usage(message: impl Into<String>) -> Self {
        ShellError::Usage(message.into())
    }
}

/// Base name of a path for user-facing messages, falling back to the full path
/// when there is no final component (e.g. `..`).
fn display_name(path: &Path) -> String {
    path.file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}

/// Renders an error followed by its whole `source()` chain, separated by `": "`.
///
/// This is the per-item counterpart of `format!("{:#}", anyhow_error)`, used for
/// failures that are stored in traversal reports instead of being propagated.
pub fn error_chain(error: &(dyn std::error::Error + 'static)) -> String {
    let mut rendered = error.to_string();
    let mut source = error.source();
    while let Some(cause) = source {
        rendered.push_str(": ");
        rendered.push_str(&cause.to_string());
        source = cause.source();
    }
    rendered
}

/// Type alias for Result using anyhow::Error for command-level plumbing.
pub type Result<T> = anyhow::Result<T>;
