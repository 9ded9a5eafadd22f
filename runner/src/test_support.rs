//! Test-only helpers: temporary projects and a recording executor.

use std::cell::RefCell;
use std::collections::VecDeque;
use std::fs;
use std::path::Path;

use anyhow::{Result, anyhow};
use tempfile::TempDir;

use crate::core::defaults::CONFIG_FILE_NAME;
use crate::io::executor::{CommandExecutor, ExecRequest};
use crate::io::process::ProcessExit;

/// A temporary project directory.
pub struct TestProject {
    dir: TempDir,
}

impl TestProject {
    pub fn new() -> Result<Self> {
        Ok(Self {
            dir: tempfile::tempdir()?,
        })
    }

    pub fn path(&self) -> &Path {
        self.dir.path()
    }

    /// Write `ci.json` with the given raw contents.
    pub fn write_config(&self, raw: &str) -> Result<()> {
        fs::write(self.path().join(CONFIG_FILE_NAME), raw)?;
        Ok(())
    }
}

#[derive(Debug, Clone, Copy)]
enum Behavior {
    Exit,
    TimeOut,
    FailToStart,
}

/// Executor that records requests and replays scripted exit codes.
///
/// Once the scripted codes run out, every command exits with 0.
pub struct RecordingExecutor {
    behavior: Behavior,
    exit_codes: RefCell<VecDeque<i32>>,
    requests: RefCell<Vec<ExecRequest>>,
}

impl RecordingExecutor {
    fn new(behavior: Behavior, exit_codes: Vec<i32>) -> Self {
        Self {
            behavior,
            exit_codes: RefCell::new(exit_codes.into()),
            requests: RefCell::new(Vec::new()),
        }
    }

    pub fn succeeding() -> Self {
        Self::new(Behavior::Exit, Vec::new())
    }

    pub fn with_exit_codes(exit_codes: Vec<i32>) -> Self {
        Self::new(Behavior::Exit, exit_codes)
    }

    pub fn timing_out() -> Self {
        Self::new(Behavior::TimeOut, Vec::new())
    }

    pub fn failing_to_start() -> Self {
        Self::new(Behavior::FailToStart, Vec::new())
    }

    pub fn requests(&self) -> Vec<ExecRequest> {
        self.requests.borrow().clone()
    }

    pub fn commands(&self) -> Vec<String> {
        self.requests
            .borrow()
            .iter()
            .map(|request| request.command.clone())
            .collect()
    }
}

impl CommandExecutor for RecordingExecutor {
    fn execute(&self, request: &ExecRequest) -> Result<ProcessExit> {
        self.requests.borrow_mut().push(request.clone());
        match self.behavior {
            Behavior::Exit => Ok(ProcessExit {
                code: Some(self.exit_codes.borrow_mut().pop_front().unwrap_or(0)),
                timed_out: false,
            }),
            Behavior::TimeOut => Ok(ProcessExit {
                code: None,
                timed_out: true,
            }),
            Behavior::FailToStart => Err(anyhow!("spawn command: No such file or directory")),
        }
    }
}
