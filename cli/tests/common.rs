//! # treesh Integration Test Common Helpers
//!
//! File: cli/tests/common.rs
//!
//! ## Overview
//!
//! Shared helpers for the integration tests in `cli/tests/`. Each test gets a
//! [`Sandbox`]: a temporary working tree plus an empty configuration file kept in
//! a separate temporary directory, so a developer's own `config.toml` never leaks
//! into the results and the config file never shows up in listings.
//!

// Different test files use different helpers.
#![allow(dead_code)]

pub use assert_cmd::Command;
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// Creates an `assert_cmd::Command` for the compiled `treesh` binary.
///
/// ## Panics
/// Panics if the `treesh` binary cannot be found via `Command::cargo_bin`.
pub fn treesh_cmd() -> Command {
    Command::cargo_bin("treesh").expect("Failed to find treesh binary for testing")
}

/// A temporary working tree and the configuration used to run treesh in it.
pub struct Sandbox {
    pub root: TempDir,
    config_dir: TempDir,
}

impl Sandbox {
    pub fn new() -> Self {
        Self::with_config("")
    }

    pub fn with_config(toml: &str) -> Self {
        let root = tempfile::tempdir().expect("Failed to create sandbox root");
        let config_dir = tempfile::tempdir().expect("Failed to create config dir");
        fs::write(config_dir.path().join("config.toml"), toml).expect("Failed to write config");
        Sandbox { root, config_dir }
    }

    /// A sandbox whose root path contains none of `avoid`, for tests that match
    /// text against full paths.
    pub fn avoiding(avoid: &[&str]) -> Self {
        for _ in 0..64 {
            let sandbox = Self::new();
            let root = sandbox.path().to_string_lossy().into_owned();
            if !avoid.iter().any(|a| root.contains(a)) {
                return sandbox;
            }
        }
        panic!("Temporary paths keep containing one of {:?}", avoid);
    }

    pub fn path(&self) -> &Path {
        self.root.path()
    }

    pub fn config_path(&self) -> PathBuf {
        self.config_dir.path().join("config.toml")
    }

    /// Writes `content` to `relative`, creating parent directories.
    pub fn file(&self, relative: &str, content: &str) -> &Self {
        let path = self.path().join(relative);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).expect("Failed to create parent dirs");
        }
        fs::write(path, content).expect("Failed to write sandbox file");
        self
    }

    /// `treesh --no-color --config <sandbox config> --dir <root>` with one `-c`
    /// per given line.
    pub fn run(&self, lines: &[&str]) -> Command {
        let mut cmd = treesh_cmd();
        cmd.env_remove("RUST_LOG")
            .arg("--no-color")
            .arg("--config")
            .arg(self.config_path())
            .arg("--dir")
            .arg(self.path());
        for line in lines {
            cmd.arg("-c").arg(line);
        }
        cmd
    }
}
