//! Executor abstraction for the external commands of a run.
//!
//! The [`CommandExecutor`] trait decouples pipeline sequencing from actually
//! spawning processes. Tests use recording executors that return scripted
//! exits without spawning anything.

use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::{Context, Result};
use tracing::instrument;

use crate::io::process::{ProcessExit, run_to_completion, shell_command};

/// Parameters for one command invocation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExecRequest {
    /// Working directory (the project root).
    pub workdir: PathBuf,
    /// Shell line to run.
    pub command: String,
}

impl ExecRequest {
    pub fn new(workdir: &Path, command: impl Into<String>) -> Self {
        Self {
            workdir: workdir.to_path_buf(),
            command: command.into(),
        }
    }
}

/// Runs one command line and waits for it.
pub trait CommandExecutor {
    /// Run the command to completion. `Err` means it could not be run at all.
    fn execute(&self, request: &ExecRequest) -> Result<ProcessExit>;
}

/// Executor that runs each line through `sh -c`.
#[derive(Debug, Clone, Default)]
pub struct ShellExecutor {
    /// Per-command timeout. `None` waits indefinitely.
    pub timeout: Option<Duration>,
}

impl ShellExecutor {
    pub fn new(timeout: Option<Duration>) -> Self {
        Self { timeout }
    }
}

impl CommandExecutor for ShellExecutor {
    #[instrument(skip_all, fields(command = %request.command))]
    fn execute(&self, request: &ExecRequest) -> Result<ProcessExit> {
        let cmd = shell_command(&request.command, &request.workdir);
        run_to_completion(cmd, self.timeout)
            .with_context(|| format!("run `{}`", request.command))
    }
}
