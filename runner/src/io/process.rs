//! Helpers for running shell lines as child processes.
//!
//! Children inherit stdout/stderr so tool output lands in the CI log as-is.
//! Nothing is captured. Each child leads its own process group so a timeout
//! can take down everything the shell line started.

use std::path::Path;
use std::process::{Child, Command, ExitStatus, Stdio};
use std::time::Duration;

use anyhow::{Context, Result};
use tracing::{debug, error, instrument, warn};
use wait_timeout::ChildExt;

/// Shell used to interpret command lines.
pub const SHELL: &str = "sh";

/// How a child process ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ProcessExit {
    /// Exit code, `None` if the process was terminated by a signal.
    pub code: Option<i32>,
    pub timed_out: bool,
}

impl ProcessExit {
    pub fn from_status(status: ExitStatus) -> Self {
        Self {
            code: status.code(),
            timed_out: false,
        }
    }

    pub fn success(&self) -> bool {
        !self.timed_out && self.code == Some(0)
    }
}

/// Build a `sh -c <line>` command rooted at `workdir`.
pub fn shell_command(line: &str, workdir: &Path) -> Command {
    let mut cmd = Command::new(SHELL);
    cmd.arg("-c")
        .arg(line)
        .current_dir(workdir)
        .stdin(Stdio::null())
        .stdout(Stdio::inherit())
        .stderr(Stdio::inherit());
    #[cfg(unix)]
    {
        use std::os::unix::process::CommandExt;
        cmd.process_group(0);
    }
    cmd
}

/// Kill `child` and every process in its group.
fn kill_group(child: &mut Child) -> Result<()> {
    #[cfg(unix)]
    {
        use nix::errno::Errno;
        use nix::sys::signal::{Signal, killpg};
        use nix::unistd::Pid;

        let pgid = Pid::from_raw(child.id() as i32);
        match killpg(pgid, Signal::SIGKILL) {
            // The group emptied out between the wait and the kill.
            Ok(()) | Err(Errno::ESRCH) => Ok(()),
            Err(errno) => Err(errno).context("kill process group"),
        }
    }
    #[cfg(not(unix))]
    {
        child.kill().context("kill command")
    }
}

/// Run `cmd` to completion.
///
/// Without a timeout this waits indefinitely. With one, the child is killed
/// once the timeout elapses and the exit is reported as `timed_out`.
#[instrument(skip_all, fields(timeout_secs = timeout.map(|t| t.as_secs())))]
pub fn run_to_completion(mut cmd: Command, timeout: Option<Duration>) -> Result<ProcessExit> {
    debug!("spawning child process");
    let mut child = match cmd.spawn() {
        Ok(c) => c,
        Err(e) => {
            error!(err = %e, "failed to spawn command");
            return Err(e).context("spawn command");
        }
    };

    let Some(timeout) = timeout else {
        let status = child.wait().context("wait for command")?;
        let exit = ProcessExit::from_status(status);
        debug!(exit_code = ?exit.code, success = exit.success(), "command finished");
        return Ok(exit);
    };

    let exit = match child.wait_timeout(timeout).context("wait for command")? {
        Some(status) => ProcessExit::from_status(status),
        None => {
            warn!(
                timeout_secs = timeout.as_secs(),
                "command timed out, killing"
            );
            kill_group(&mut child)?;
            let status = child.wait().context("wait command after kill")?;
            ProcessExit {
                code: status.code(),
                timed_out: true,
            }
        }
    };

    debug!(
        exit_code = ?exit.code,
        timed_out = exit.timed_out,
        success = exit.success(),
        "command finished"
    );
    Ok(exit)
}
