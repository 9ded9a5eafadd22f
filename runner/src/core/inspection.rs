//! The closed set of inspections and their typed settings.
//!
//! The effective tree is loosely typed; this module turns the section of one
//! inspection into typed settings, checking that every field the command
//! needs is present. Only enabled inspections are checked beyond `enabled`.

use std::fmt;

use super::value::{ConfigTree, Section, ValidationError};

/// Inspection kinds, in the fixed order they run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum InspectionKind {
    MessDetector,
    StyleChecker,
    TestRunner,
}

impl InspectionKind {
    /// Execution order. User configuration cannot change it.
    pub const ALL: [InspectionKind; 3] = [
        InspectionKind::MessDetector,
        InspectionKind::StyleChecker,
        InspectionKind::TestRunner,
    ];

    /// Key of this inspection under `inspections` in the configuration tree.
    pub fn key(self) -> &'static str {
        match self {
            InspectionKind::MessDetector => "phpmd",
            InspectionKind::StyleChecker => "phpcs",
            InspectionKind::TestRunner => "phpunit",
        }
    }

    pub fn from_key(key: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|kind| kind.key() == key)
    }
}

impl fmt::Display for InspectionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

/// Fields shared by every inspection.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ToolSettings {
    pub executable: String,
    pub target_files: String,
    pub output_format: String,
    pub result_path: String,
}

impl ToolSettings {
    fn from_section(section: &Section<'_>) -> Result<Self, ValidationError> {
        Ok(Self {
            executable: section.str("path")?.to_string(),
            target_files: section.str("files")?.to_string(),
            output_format: section.str("format")?.to_string(),
            result_path: section.str("resultPath")?.to_string(),
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MessDetectorSettings {
    pub tool: ToolSettings,
    /// Rule sets, in declared order. Never empty.
    pub rule_sets: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StyleCheckerSettings {
    pub tool: ToolSettings,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CoverageSettings {
    pub format: String,
    pub result_path: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TestRunnerTarget {
    /// `-c <file>`: the configuration file lists the tests itself.
    ConfigurationFile(String),
    /// `--bootstrap "<bootstrap>" <files>`.
    Bootstrap { bootstrap: String, files: String },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TestRunnerSettings {
    pub executable: String,
    pub output_format: String,
    pub result_path: String,
    pub coverage: CoverageSettings,
    pub target: TestRunnerTarget,
}

/// An enabled inspection with validated settings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Inspection {
    MessDetector(MessDetectorSettings),
    StyleChecker(StyleCheckerSettings),
    TestRunner(TestRunnerSettings),
}

impl Inspection {
    pub fn kind(&self) -> InspectionKind {
        match self {
            Inspection::MessDetector(_) => InspectionKind::MessDetector,
            Inspection::StyleChecker(_) => InspectionKind::StyleChecker,
            Inspection::TestRunner(_) => InspectionKind::TestRunner,
        }
    }

    /// Report files the tool is expected to write, relative to the project.
    pub fn report_paths(&self) -> Vec<&str> {
        match self {
            Inspection::MessDetector(settings) => vec![settings.tool.result_path.as_str()],
            Inspection::StyleChecker(settings) => vec![settings.tool.result_path.as_str()],
            Inspection::TestRunner(settings) => vec![
                settings.result_path.as_str(),
                settings.coverage.result_path.as_str(),
            ],
        }
    }

    /// Read the section of `kind` from the `inspections` tree.
    ///
    /// Returns `Ok(None)` when the inspection is disabled.
    pub fn from_config(
        kind: InspectionKind,
        inspections: &ConfigTree,
    ) -> Result<Option<Self>, ValidationError> {
        let (prefix, tree) = Section::new("inspections", inspections).section(kind.key())?;
        let section = Section::new(&prefix, tree);
        if !section.bool("enabled")? {
            return Ok(None);
        }

        let inspection = match kind {
            InspectionKind::MessDetector => Inspection::MessDetector(mess_detector(&section)?),
            InspectionKind::StyleChecker => Inspection::StyleChecker(StyleCheckerSettings {
                tool: ToolSettings::from_section(&section)?,
            }),
            InspectionKind::TestRunner => Inspection::TestRunner(test_runner(&section)?),
        };
        Ok(Some(inspection))
    }
}

fn mess_detector(section: &Section<'_>) -> Result<MessDetectorSettings, ValidationError> {
    let tool = ToolSettings::from_section(section)?;
    let rule_sets = section.list("inspections")?;
    if rule_sets.is_empty() {
        return Err(ValidationError::new(
            section.path_of("inspections"),
            "at least one rule set is required",
        ));
    }
    if let Some(blank) = rule_sets.iter().position(|rule| rule.trim().is_empty()) {
        return Err(ValidationError::new(
            format!("{}[{blank}]", section.path_of("inspections")),
            "rule set name must not be empty",
        ));
    }
    Ok(MessDetectorSettings {
        tool,
        rule_sets: rule_sets.to_vec(),
    })
}

fn test_runner(section: &Section<'_>) -> Result<TestRunnerSettings, ValidationError> {
    let (coverage_prefix, coverage_tree) = section.section("coverage")?;
    let coverage = Section::new(&coverage_prefix, coverage_tree);

    // Only the branch that ends up on the command line is required.
    let target = match section.optional_str("configurationFile")? {
        Some(file) => TestRunnerTarget::ConfigurationFile(file.to_string()),
        None => TestRunnerTarget::Bootstrap {
            bootstrap: section.str("bootstrap")?.to_string(),
            files: section.str("files")?.to_string(),
        },
    };

    Ok(TestRunnerSettings {
        executable: section.str("path")?.to_string(),
        output_format: section.str("format")?.to_string(),
        result_path: section.str("resultPath")?.to_string(),
        coverage: CoverageSettings {
            format: coverage.str("format")?.to_string(),
            result_path: coverage.str("resultPath")?.to_string(),
        },
        target,
    })
}
