//! # treesh Core Infrastructure
//!
//! File: cli/src/core/mod.rs
//!
//! ## Overview
//!
//! This module aggregates the infrastructure shared by every command:
//! - `config`: Loading and validating the optional TOML configuration
//! - `context`: The working directory and configuration threaded through commands
//! - `error`: The shell's error taxonomy and `Result` alias
//!
//! ```rust
//! use crate::core::context::ShellContext;
//! use crate::core::error::{Result, ShellError};
//! ```
//!
pub mod config;
pub mod context;
pub mod error;
