//! CLI tests for the `ci-runner` binary.
//!
//! Spawns the binary against temporary projects and checks exit codes, the
//! commands it plans, and the order in which it actually runs them.

use std::env;
use std::ffi::OsString;
use std::fs;
use std::os::unix::fs::PermissionsExt;
use std::path::Path;
use std::process::{Command, Output};

use ci_runner::core::defaults::default_tree;
use ci_runner::exit_codes;
use ci_runner::test_support::TestProject;

/// Shell script standing in for every tool: appends its name and arguments to `calls.log`.
const RECORDER: &str = "printf '%s\\n' \"$*\" >> calls.log\nexit 1\n";

/// Stand-in for `composer`: records the call instead of touching the network.
const COMPOSER_STUB: &str = "#!/bin/sh\nprintf 'composer %s\\n' \"$*\" >> calls.log\n";

fn ci_runner(dir: &Path, args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_ci-runner"))
        .current_dir(dir)
        .args(args)
        .env("RUST_LOG", "warn")
        .output()
        .expect("spawn ci-runner")
}

/// Put an executable `composer` stub in `<dir>/bin` and return a PATH that finds it first.
fn path_with_composer_stub(dir: &Path) -> OsString {
    let bin = dir.join("bin");
    fs::create_dir(&bin).expect("create bin dir");
    let composer = bin.join("composer");
    fs::write(&composer, COMPOSER_STUB).expect("write composer stub");
    fs::set_permissions(&composer, fs::Permissions::from_mode(0o755)).expect("chmod stub");

    let mut paths = vec![bin];
    if let Some(existing) = env::var_os("PATH") {
        paths.extend(env::split_paths(&existing));
    }
    env::join_paths(paths).expect("join PATH")
}

fn stdout_lines(output: &Output) -> Vec<String> {
    String::from_utf8_lossy(&output.stdout)
        .lines()
        .map(str::to_string)
        .collect()
}

#[test]
fn plan_with_defaults_lists_install_and_inspections() {
    let project = TestProject::new().expect("project");
    let path = project.path().to_str().expect("utf-8 path");

    let output = ci_runner(project.path(), &["plan", path]);

    assert_eq!(output.status.code(), Some(exit_codes::OK));
    assert_eq!(
        stdout_lines(&output),
        vec![
            "composer update",
            r#"phpmd src/ xml cleancode,codesize,controversial,design,naming,unusedcode --reportfile "res/mess.xml""#,
            r#"phpcs --report-checkstyle="res/checkstyle.xml" src/"#,
            r#"phpunit --log-junit "res/unit.xml" --coverage-clover "res/coverage.xml" --bootstrap "vendor/autoload.php" src/"#,
        ]
    );
}

#[test]
fn plan_with_configuration_file_uses_dash_c() {
    let project = TestProject::new().expect("project");
    project
        .write_config(r#"{"inspections": {"phpunit": {"configurationFile": "phpunit.xml"}}}"#)
        .expect("write config");

    let output = ci_runner(project.path(), &["plan", "."]);

    let lines = stdout_lines(&output);
    let last = lines.last().expect("test runner line");
    assert!(last.ends_with("-c phpunit.xml"));
    assert!(!last.contains("--bootstrap"));
}

#[test]
fn config_prints_merged_configuration() {
    let project = TestProject::new().expect("project");
    project
        .write_config(r#"{"inspections": {"phpcs": {"enabled": false}}}"#)
        .expect("write config");

    let output = ci_runner(project.path(), &["config", "."]);

    assert_eq!(output.status.code(), Some(exit_codes::OK));
    let value: serde_json::Value = serde_json::from_slice(&output.stdout).expect("json output");
    assert_eq!(value["inspections"]["phpcs"]["enabled"], false);
    assert_eq!(value["inspections"]["phpcs"]["path"], "phpcs");
    assert_eq!(value["inspections"]["phpunit"]["configurationFile"], serde_json::Value::Null);
}

#[test]
fn config_without_override_prints_defaults_in_declared_order() {
    let project = TestProject::new().expect("project");

    let output = ci_runner(project.path(), &["config", "."]);

    assert_eq!(output.status.code(), Some(exit_codes::OK));
    let expected = serde_json::to_string_pretty(&default_tree()).expect("serialize defaults");
    assert_eq!(String::from_utf8_lossy(&output.stdout), format!("{expected}\n"));

    let stdout = String::from_utf8_lossy(&output.stdout);
    let phpmd = stdout.find("\"phpmd\"").expect("phpmd section");
    let phpcs = stdout.find("\"phpcs\"").expect("phpcs section");
    let phpunit = stdout.find("\"phpunit\"").expect("phpunit section");
    let hooks = stdout.find("\"hooks\"").expect("hooks section");
    assert!(phpmd < phpcs && phpcs < phpunit && phpunit < hooks);
    assert!(stdout.contains("\"configurationFile\": null,\n      \"coverage\""));
}

#[test]
fn run_missing_directory_exits_with_path_code() {
    let project = TestProject::new().expect("project");
    let missing = project.path().join("missing");

    let output = ci_runner(
        project.path(),
        &["run", missing.to_str().expect("utf-8 path")],
    );

    assert_eq!(output.status.code(), Some(exit_codes::INVALID_PATH));
}

#[test]
fn run_with_malformed_config_exits_before_running_anything() {
    let project = TestProject::new().expect("project");
    project
        .write_config(r#"{"hooks": {"inspections": ["echo ran >> calls.log"]"#)
        .expect("write config");

    let output = ci_runner(project.path(), &["run", "."]);

    assert_eq!(output.status.code(), Some(exit_codes::INVALID_CONFIG));
    assert!(String::from_utf8_lossy(&output.stderr).contains("ci.json"));
    assert!(!project.path().join("calls.log").exists());
}

#[test]
fn run_with_incomplete_enabled_inspection_exits_with_config_code() {
    let project = TestProject::new().expect("project");
    project
        .write_config(r#"{"inspections": {"phpmd": {"inspections": []}}}"#)
        .expect("write config");

    let output = ci_runner(project.path(), &["run", "."]);

    assert_eq!(output.status.code(), Some(exit_codes::INVALID_CONFIG));
    assert!(String::from_utf8_lossy(&output.stderr).contains("inspections.phpmd.inspections"));
}

#[test]
fn run_executes_hooks_and_tools_in_order_ignoring_failures() {
    let project = TestProject::new().expect("project");
    fs::write(project.path().join("record.sh"), RECORDER).expect("write recorder");
    project
        .write_config(
            r#"{
              "inspections": {
                "phpmd": {"path": "sh record.sh phpmd"},
                "phpcs": {"enabled": false},
                "phpunit": {"path": "sh record.sh phpunit", "configurationFile": "phpunit.xml"}
              },
              "hooks": {
                "inspections": ["echo hook-a >> calls.log", "exit 7", "echo hook-b >> calls.log"],
                "cleanup": ["echo cleanup >> calls.log"]
              }
            }"#,
        )
        .expect("write config");

    let path = path_with_composer_stub(project.path());

    let output = Command::new(env!("CARGO_BIN_EXE_ci-runner"))
        .current_dir(project.path())
        .args(["run", "."])
        .env("RUST_LOG", "warn")
        .env("PATH", path)
        .output()
        .expect("spawn ci-runner");

    assert_eq!(output.status.code(), Some(exit_codes::OK));
    let calls = fs::read_to_string(project.path().join("calls.log")).expect("calls.log");
    let calls: Vec<&str> = calls.lines().collect();
    assert_eq!(
        calls,
        vec![
            "composer update",
            "hook-a",
            "hook-b",
            "phpmd src/ xml cleancode,codesize,controversial,design,naming,unusedcode --reportfile res/mess.xml",
            "phpunit --log-junit res/unit.xml --coverage-clover res/coverage.xml -c phpunit.xml",
            "cleanup",
        ]
    );
}
