//! Orchestration for a single `ci-runner run`.
//!
//! A run is linear: resolve the project directory, load and validate the
//! effective configuration, install dependencies, run the inspection hooks,
//! run the enabled inspections, run the cleanup hooks. Only the first two
//! stages can fail the run. Every external command after that is
//! fire-and-forget: its exit is recorded and logged, never acted upon.

use std::path::{Path, PathBuf};

use tracing::{debug, info, instrument, warn};

use crate::core::plan::{Phase, Plan, PlannedStep};
use crate::core::value::ConfigTree;
use crate::error::RunError;
use crate::io::config::load_config;
use crate::io::executor::{CommandExecutor, ExecRequest};
use crate::io::project::resolve_project_dir;

/// A project whose configuration loaded and validated.
#[derive(Debug, Clone)]
pub struct PreparedRun {
    /// Canonical project root; every command runs here.
    pub root: PathBuf,
    /// Effective (merged) configuration. Not mutated after loading.
    pub config: ConfigTree,
    pub plan: Plan,
}

/// How a fire-and-forget step ended.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StepOutcome {
    /// The process exited; `None` if it was killed by a signal.
    Exited(Option<i32>),
    /// The per-step timeout elapsed and the process was killed.
    TimedOut,
    /// The process could not be started.
    NotStarted(String),
}

impl StepOutcome {
    pub fn succeeded(&self) -> bool {
        matches!(self, StepOutcome::Exited(Some(0)))
    }
}

/// Record of one executed step. The pipeline never branches on it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StepRecord {
    pub phase: Phase,
    pub command: String,
    /// Report files the step was expected to write.
    pub reports: Vec<String>,
    pub outcome: StepOutcome,
}

/// Outcome of a completed run.
#[derive(Debug, Clone)]
pub struct RunSummary {
    pub root: PathBuf,
    pub steps: Vec<StepRecord>,
}

impl RunSummary {
    pub fn failed_steps(&self) -> impl Iterator<Item = &StepRecord> {
        self.steps.iter().filter(|step| !step.outcome.succeeded())
    }
}

/// Resolve the project, load its configuration, and build the plan.
///
/// Nothing is executed. All fatal errors of a run surface here.
#[instrument(skip_all, fields(project = %project_dir.display()))]
pub fn prepare_run(project_dir: &Path) -> Result<PreparedRun, RunError> {
    let root = resolve_project_dir(project_dir)?;
    let config = load_config(&root)?;
    let plan = Plan::from_config(&config)?;

    for key in &plan.ignored_inspections {
        debug!(inspection = %key, "skipping unknown inspection");
    }
    info!(
        root = %root.display(),
        inspections = plan.inspections.len(),
        "configuration loaded"
    );

    Ok(PreparedRun { root, config, plan })
}

/// Run the full pipeline for `project_dir`.
pub fn run_pipeline<E: CommandExecutor>(
    project_dir: &Path,
    executor: &E,
) -> Result<RunSummary, RunError> {
    let prepared = prepare_run(project_dir)?;
    Ok(execute_plan(&prepared, executor))
}

/// Execute every planned step in order, regardless of earlier results.
pub fn execute_plan<E: CommandExecutor>(prepared: &PreparedRun, executor: &E) -> RunSummary {
    let steps = prepared
        .plan
        .steps()
        .into_iter()
        .map(|step| execute_step(executor, &prepared.root, step))
        .collect::<Vec<_>>();

    let failed = steps.iter().filter(|s| !s.outcome.succeeded()).count();
    info!(steps = steps.len(), failed, "run finished");

    RunSummary {
        root: prepared.root.clone(),
        steps,
    }
}

fn execute_step<E: CommandExecutor>(executor: &E, root: &Path, step: PlannedStep) -> StepRecord {
    info!(phase = %step.phase, command = %step.command, "running step");

    let outcome = match executor.execute(&ExecRequest::new(root, step.command.as_str())) {
        Ok(exit) if exit.timed_out => StepOutcome::TimedOut,
        Ok(exit) => StepOutcome::Exited(exit.code),
        Err(err) => StepOutcome::NotStarted(format!("{err:#}")),
    };

    if !step.reports.is_empty() {
        info!(phase = %step.phase, reports = ?step.reports, "expected reports");
    }

    match &outcome {
        StepOutcome::Exited(Some(0)) => debug!(phase = %step.phase, "step succeeded"),
        StepOutcome::Exited(code) => {
            warn!(phase = %step.phase, exit_code = ?code, "step failed, continuing");
        }
        StepOutcome::TimedOut => warn!(phase = %step.phase, "step timed out, continuing"),
        StepOutcome::NotStarted(err) => {
            warn!(phase = %step.phase, err = %err, "step could not start, continuing");
        }
    }

    StepRecord {
        phase: step.phase,
        command: step.command,
        reports: step.reports,
        outcome,
    }
}
