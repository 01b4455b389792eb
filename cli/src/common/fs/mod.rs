//! # treesh Filesystem Utilities (`common::fs`)
//!
//! File: cli/src/common/fs/mod.rs
//!
//! ## Overview
//!
//! Filesystem building blocks used by the commands:
//!
//! - **`path`**: Resolving user-typed fragments against the working directory and
//!   computing relative paths for display.
//! - **`walk`**: The depth-first tree walker (work-list based, bounded or
//!   unbounded, with per-subtree failure isolation) that backup, empty, find,
//!   findlike and tree are built on.
//! - **`copy`**: The single-file copy primitive (`fs_extra`) with explicit
//!   overwrite policy.
//! - **`io`**: Directory creation and whole-file reads.
//!
//! ```rust
//! use crate::common::fs::{path, walk::TreeWalker};
//!
//! let target = path::resolve(ctx.cwd(), "notes");
//! TreeWalker::new().walk(&target, &mut visitor)?;
//! ```
//!

/// Single-file copy with overwrite control.
pub mod copy;
/// Directory creation and file reads.
pub mod io;
/// Path joining, relative paths and lexical normalization.
pub mod path;
/// Depth-first directory traversal driven by a visitor.
pub mod walk;
