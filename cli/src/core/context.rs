//! # treesh Shell Context
//!
//! File: cli/src/core/context.rs
//!
//! The state carried from one command to the next: the working directory and the
//! loaded configuration. The shell never changes the process-wide current
//! directory; `cd` updates this value and every command resolves its paths
//! against it, so tests can run commands against separate roots side by side.
//!
use crate::core::config::ShellConfig;
use crate::core::error::{Result, ShellError};
use std::path::{Path, PathBuf};
use tracing::debug;

#[derive(Debug, Clone)]
pub struct ShellContext {
    cwd: PathBuf,
    pub config: ShellConfig,
}

impl ShellContext {
    /// Creates a context rooted at `cwd`, which must be an existing directory.
    /// The path is canonicalized so later relative-path output is stable.
    pub fn new(cwd: &Path, config: ShellConfig) -> Result<Self> {
        let cwd = canonical_dir(cwd)?;
        debug!("Shell context starts in {}", cwd.display());
        Ok(ShellContext { cwd, config })
    }

    pub fn cwd(&self) -> &Path {
        &self.cwd
    }

    /// Moves the context to `dir`. The directory must exist.
    pub fn set_cwd(&mut self, dir: &Path) -> Result<()> {
        self.cwd = canonical_dir(dir)?;
        debug!("Working directory is now {}", self.cwd.display());
        Ok(())
    }
}

fn canonical_dir(dir: &Path) -> Result<PathBuf> {
    if !dir.is_dir() {
        anyhow::bail!(ShellError::usage("No such directory"));
    }
    dir.canonicalize()
        .map_err(|e| ShellError::io("resolve directory", dir, e).into())
}
