//! # treesh Process Execution (`common::process`)
//!
//! File: cli/src/common/process.rs
//!
//! Runs a command line through the platform shell (`sh -c` on Unix, `cmd /C` on
//! Windows) inside the shell's working directory and captures stdout and stderr.
//! Used by the `!` command. The child's exit status is returned for logging only;
//! it never changes how treesh itself behaves.
//!
use crate::core::error::ShellError;
use std::path::Path;
use std::process::Command;
use tracing::debug;

/// Captured result of an external command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CapturedOutput {
    pub stdout: String,
    pub stderr: String,
    /// Exit code, `None` when the process was terminated by a signal.
    pub code: Option<i32>,
}

#[cfg(unix)]
fn shell_command(command_line: &str) -> Command {
    let mut cmd = Command::new("sh");
    cmd.arg("-c").arg(command_line);
    cmd
}

#[cfg(windows)]
fn shell_command(command_line: &str) -> Command {
    let mut cmd = Command::new("cmd.exe");
    cmd.arg("/C").arg(command_line);
    cmd
}

/// Runs `command_line` in `cwd` and waits for it to finish.
///
/// # Errors
///
/// Returns `ShellError::Io` when the platform shell cannot be started.
pub fn run_shell_capture(command_line: &str, cwd: &Path) -> Result<CapturedOutput, ShellError> {
    debug!("Running external command in {:?}: {}", cwd, command_line);
    let output = shell_command(command_line)
        .current_dir(cwd)
        .output()
        .map_err(|e| ShellError::io("run external command in", cwd, e))?;

    let captured = CapturedOutput {
        stdout: String::from_utf8_lossy(&output.stdout).into_owned(),
        stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
        code: output.status.code(),
    };
    debug!("External command exited with {:?}", captured.code);
    Ok(captured)
}
