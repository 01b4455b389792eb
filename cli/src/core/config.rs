//! # treesh Configuration
//!
//! File: cli/src/core/config.rs
//!
//! ## Overview
//!
//! Loads the optional TOML configuration file that tunes the shell: the
//! starting directory, how `tree` draws its output, and whether output is
//! coloured.
//!
//! Configuration sources (first match wins):
//! 1. An explicit `--config <FILE>` passed on the command line (must exist)
//! 2. The user file `<config dir>/treesh/config.toml` (located with `directories`)
//! 3. Default values defined in the code
//!
//! ```toml
//! start_dir = "~/work"
//!
//! [tree]
//! indent = "  "
//! marker = "└"
//! default_depth = 3
//!
//! [display]
//! color = false
//! ```
//!
use crate::core::error::{Result, ShellError};
use anyhow::Context;
use directories::ProjectDirs;
use serde::Deserialize;
use std::{
    fs,
    path::{Path, PathBuf},
};
use tracing::{debug, info};

/// Represents the main configuration structure, loaded from TOML files.
#[derive(Deserialize, Debug, Default, Clone, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct ShellConfig {
    /// Directory the shell starts in (can use ~). Expanded after loading.
    #[serde(default)]
    pub start_dir: Option<String>,
    #[serde(default)]
    pub tree: TreeConfig,
    #[serde(default)]
    pub display: DisplayConfig,
}

/// How `tree` renders a directory.
#[derive(Deserialize, Debug, Clone, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
pub struct TreeConfig {
    /// Indentation unit, repeated once per depth level.
    #[serde(default = "default_indent")]
    pub indent: String,
    /// Printed before the name of every entry below the root level.
    #[serde(default = "default_marker")]
    pub marker: String,
    /// Depth used when `tree` is called without an argument.
    #[serde(default = "default_depth")]
    pub default_depth: usize,
}

#[derive(Deserialize, Debug, Clone, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
pub struct DisplayConfig {
    #[serde(default = "default_color")]
    pub color: bool,
}

impl Default for TreeConfig {
    fn default() -> Self {
        TreeConfig {
            indent: default_indent(),
            marker: default_marker(),
            default_depth: default_depth(),
        }
    }
}

impl Default for DisplayConfig {
    fn default() -> Self {
        DisplayConfig {
            color: default_color(),
        }
    }
}

fn default_indent() -> String {
    "\t".to_string()
}
fn default_marker() -> String {
    "└".to_string()
}
fn default_depth() -> usize {
    2
}
fn default_color() -> bool {
    true
}

/// Loads the configuration, preferring `explicit` over the per-user file.
pub fn load_config(explicit: Option<&Path>) -> Result<ShellConfig> {
    let mut config = match explicit {
        Some(path) => {
            if !path.is_file() {
                anyhow::bail!(ShellError::Config(format!(
                    "config file '{}' does not exist",
                    path.display()
                )));
            }
            info!("Loading configuration from: {}", path.display());
            load_config_from_path(path)?
        }
        None => load_user_config()?.unwrap_or_default(),
    };
    expand_config_paths(&mut config);
    validate_config(&config)?;
    debug!("Final loaded configuration: {:?}", config);
    Ok(config)
}

fn load_user_config() -> Result<Option<ShellConfig>> {
    let Some(proj_dirs) = ProjectDirs::from("com", "treesh", "treesh") else {
        debug!("Could not determine user config directory.");
        return Ok(None);
    };
    let config_path = proj_dirs.config_dir().join("config.toml");
    if config_path.exists() {
        info!("Loading user configuration from: {}", config_path.display());
        load_config_from_path(&config_path).map(Some)
    } else {
        debug!(
            "User configuration file not found at {}",
            config_path.display()
        );
        Ok(None)
    }
}

fn load_config_from_path(path: &Path) -> Result<ShellConfig> {
    let content = fs::read_to_string(path)
        .with_context(|| format!("Failed to read configuration file: {}", path.display()))?;
    parse_config(&content)
        .with_context(|| format!("Failed to parse TOML from file: {}", path.display()))
}

fn parse_config(content: &str) -> Result<ShellConfig> {
    Ok(toml::from_str(content)?)
}

fn expand_config_paths(config: &mut ShellConfig) {
    if let Some(dir) = config.start_dir.as_mut() {
        *dir = shellexpand::tilde(dir).into_owned();
    }
}

fn validate_config(config: &ShellConfig) -> Result<()> {
    if config.tree.indent.is_empty() {
        anyhow::bail!(ShellError::Config(
            "tree.indent must not be empty".to_string()
        ));
    }
    Ok(())
}

impl ShellConfig {
    /// The configured start directory, if any.
    pub fn start_dir(&self) -> Option<PathBuf> {
        self.start_dir.as_ref().map(PathBuf::from)
    }
}
