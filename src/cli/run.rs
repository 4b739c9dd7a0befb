//! Wrapped command execution.
//!
//! Runs the wrapped CLI with the shim's own argument vector and hands its
//! exit code back.

use std::ffi::OsString;
use std::path::{Path, PathBuf};
use std::process::{Command, ExitStatus, Stdio};

use tracing::debug;

use crate::error::{ConfigError, Result};

/// Output of a wrapped run whose stdout was captured.
#[derive(Debug)]
pub struct Captured {
    /// Raw stdout bytes.
    pub stdout: Vec<u8>,
    /// Exit code, 1 when the process was killed by a signal.
    pub code: i32,
}

/// Locate the wrapped command on `PATH` (or as a path).
///
/// # Errors
///
/// Returns `ConfigError::CommandNotFound` if it cannot be found.
pub fn resolve(command: &str) -> Result<PathBuf> {
    which::which(command).map_err(|_| ConfigError::CommandNotFound(command.to_string()).into())
}

/// Run the command with inherited stdio.
pub fn passthrough(command: &Path, args: &[OsString]) -> Result<i32> {
    debug!(command = %command.display(), args = args.len(), "running wrapped command");
    let status = Command::new(command).args(args).status()?;
    Ok(exit_code(status))
}

/// Run the command capturing stdout; stdin and stderr stay inherited.
pub fn capture(command: &Path, args: &[OsString]) -> Result<Captured> {
    debug!(command = %command.display(), args = args.len(), "running wrapped command, capturing stdout");
    let output = Command::new(command)
        .args(args)
        .stdin(Stdio::inherit())
        .stderr(Stdio::inherit())
        .output()?;

    Ok(Captured {
        stdout: output.stdout,
        code: exit_code(output.status),
    })
}

fn exit_code(status: ExitStatus) -> i32 {
    status.code().unwrap_or(1)
}
