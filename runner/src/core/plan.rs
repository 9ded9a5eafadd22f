//! Turn an effective configuration tree into the ordered steps of a run.
//!
//! Building the plan is where the loosely typed tree is validated. Once a
//! plan exists, running it is pure sequencing: nothing in it can fail
//! validation later.

use std::fmt;

use super::command::build_command;
use super::inspection::{Inspection, InspectionKind};
use super::value::{ConfigTree, Section, ValidationError};

/// Installs project dependencies before anything else runs.
pub const DEPENDENCY_INSTALL_COMMAND: &str = "composer update";

/// Pipeline phase a step belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    InstallDependencies,
    InspectionHook,
    Inspection(InspectionKind),
    CleanupHook,
}

impl fmt::Display for Phase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Phase::InstallDependencies => f.write_str("install"),
            Phase::InspectionHook => f.write_str("hook:inspections"),
            Phase::Inspection(kind) => write!(f, "inspection:{kind}"),
            Phase::CleanupHook => f.write_str("hook:cleanup"),
        }
    }
}

/// One shell line to execute.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlannedStep {
    pub phase: Phase,
    pub command: String,
    /// Report files the step is expected to write. Empty for hooks and install.
    pub reports: Vec<String>,
}

impl PlannedStep {
    fn shell(phase: Phase, command: impl Into<String>) -> Self {
        Self {
            phase,
            command: command.into(),
            reports: Vec::new(),
        }
    }
}

/// Hook commands from `hooks.*`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Hooks {
    pub inspections: Vec<String>,
    pub cleanup: Vec<String>,
}

impl Hooks {
    pub fn from_config(tree: &ConfigTree) -> Result<Self, ValidationError> {
        let (prefix, hooks) = Section::new("", tree).section("hooks")?;
        let section = Section::new(&prefix, hooks);
        Ok(Self {
            inspections: section.list("inspections")?.to_vec(),
            cleanup: section.list("cleanup")?.to_vec(),
        })
    }
}

/// Validated, ordered view of an effective configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Plan {
    pub hooks: Hooks,
    /// Enabled inspections in [`InspectionKind::ALL`] order.
    pub inspections: Vec<Inspection>,
    /// Keys under `inspections` that are not a known kind.
    pub ignored_inspections: Vec<String>,
}

impl Plan {
    pub fn from_config(tree: &ConfigTree) -> Result<Self, ValidationError> {
        let hooks = Hooks::from_config(tree)?;
        let (_, section) = Section::new("", tree).section("inspections")?;

        let mut inspections = Vec::new();
        for kind in InspectionKind::ALL {
            if let Some(inspection) = Inspection::from_config(kind, section)? {
                inspections.push(inspection);
            }
        }

        let ignored_inspections = section
            .keys()
            .filter(|key| InspectionKind::from_key(key).is_none())
            .map(str::to_string)
            .collect();

        Ok(Self {
            hooks,
            inspections,
            ignored_inspections,
        })
    }

    /// Every step of a run, in execution order.
    pub fn steps(&self) -> Vec<PlannedStep> {
        let mut steps = vec![PlannedStep::shell(
            Phase::InstallDependencies,
            DEPENDENCY_INSTALL_COMMAND,
        )];
        steps.extend(
            self.hooks
                .inspections
                .iter()
                .map(|hook| PlannedStep::shell(Phase::InspectionHook, hook.as_str())),
        );
        steps.extend(self.inspections.iter().map(|inspection| PlannedStep {
            phase: Phase::Inspection(inspection.kind()),
            command: build_command(inspection).render(),
            reports: inspection
                .report_paths()
                .into_iter()
                .map(str::to_string)
                .collect(),
        }));
        steps.extend(
            self.hooks
                .cleanup
                .iter()
                .map(|hook| PlannedStep::shell(Phase::CleanupHook, hook.as_str())),
        );
        steps
    }
}
