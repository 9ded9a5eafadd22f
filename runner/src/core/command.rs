//! Command lines for the inspection tools.
//!
//! Builders are pure string assembly over validated settings. Arguments are
//! shell words: quoting is part of the argument text and the rendered line is
//! handed to `sh -c` unchanged.

use std::fmt;

use super::inspection::{
    Inspection, MessDetectorSettings, StyleCheckerSettings, TestRunnerSettings, TestRunnerTarget,
};

/// An executable and its ordered shell-word arguments.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandLine {
    pub program: String,
    pub args: Vec<String>,
}

impl CommandLine {
    pub fn new(program: impl Into<String>) -> Self {
        Self {
            program: program.into(),
            args: Vec::new(),
        }
    }

    pub fn arg(mut self, arg: impl Into<String>) -> Self {
        self.args.push(arg.into());
        self
    }

    /// Render as a single shell line: program and args joined by one space.
    pub fn render(&self) -> String {
        let mut line = self.program.clone();
        for arg in &self.args {
            line.push(' ');
            line.push_str(arg);
        }
        line
    }
}

impl fmt::Display for CommandLine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.render())
    }
}

/// Build the command for any enabled inspection.
pub fn build_command(inspection: &Inspection) -> CommandLine {
    match inspection {
        Inspection::MessDetector(settings) => mess_detector_command(settings),
        Inspection::StyleChecker(settings) => style_checker_command(settings),
        Inspection::TestRunner(settings) => test_runner_command(settings),
    }
}

/// `<path> <files> <format> <rules> --reportfile "<resultPath>"`
pub fn mess_detector_command(settings: &MessDetectorSettings) -> CommandLine {
    let tool = &settings.tool;
    CommandLine::new(&tool.executable)
        .arg(&tool.target_files)
        .arg(&tool.output_format)
        .arg(settings.rule_sets.join(","))
        .arg("--reportfile")
        .arg(quoted(&tool.result_path))
}

/// `<path> --report-<format>="<resultPath>" <files>`
pub fn style_checker_command(settings: &StyleCheckerSettings) -> CommandLine {
    let tool = &settings.tool;
    CommandLine::new(&tool.executable)
        .arg(format!(
            "--report-{}={}",
            tool.output_format,
            quoted(&tool.result_path)
        ))
        .arg(&tool.target_files)
}

/// `<path> --log-<format> "<resultPath>" --coverage-<format> "<coverage>"` followed by
/// either `-c <configurationFile>` or `--bootstrap "<bootstrap>" <files>`.
pub fn test_runner_command(settings: &TestRunnerSettings) -> CommandLine {
    let base = CommandLine::new(&settings.executable)
        .arg(format!("--log-{}", settings.output_format))
        .arg(quoted(&settings.result_path))
        .arg(format!("--coverage-{}", settings.coverage.format))
        .arg(quoted(&settings.coverage.result_path));

    match &settings.target {
        TestRunnerTarget::ConfigurationFile(file) => base.arg("-c").arg(file),
        TestRunnerTarget::Bootstrap { bootstrap, files } => base
            .arg("--bootstrap")
            .arg(quoted(bootstrap))
            .arg(files),
    }
}

fn quoted(value: &str) -> String {
    format!("\"{value}\"")
}
