//! # treesh Common Utilities (`common`)
//!
//! File: cli/src/common/mod.rs
//!
//! ## Overview
//!
//! Shared utility modules used by the command handlers, kept apart from
//! command-specific logic (`commands::`) and core infrastructure (`core::`).
//!
//! - **`fs`**: Path resolution, the tree walker, file copy and basic I/O.
//! - **`process`**: Running a command line through the platform shell (`!`).
//! - **`ui`**: The toned-line `Response` that commands return, and ANSI rendering.
//!

/// Utilities for filesystem operations (paths, traversal, copying, I/O).
pub mod fs;
/// Running external commands and capturing their output.
pub mod process;
/// Command output model and terminal colouring.
pub mod ui;
