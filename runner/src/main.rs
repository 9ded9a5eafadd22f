//! CI inspection runner.
//!
//! Runs `composer update`, configured hooks, and the enabled inspection tools
//! for a PHP project. Tool exit codes never affect the runner's exit code;
//! CI decides pass/fail from the report files.

use std::path::PathBuf;
use std::process;
use std::time::Duration;

use anyhow::{Context, Result};
use ci_runner::error::RunError;
use ci_runner::exit_codes;
use ci_runner::io::executor::ShellExecutor;
use ci_runner::io::project::DEFAULT_PROJECT_DIR;
use ci_runner::logging;
use ci_runner::pipeline::{execute_plan, prepare_run};
use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(
    name = "ci-runner",
    version,
    about = "Run PHP inspections (phpmd, phpcs, phpunit) configured by ci.json"
)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Install dependencies, then run hooks and enabled inspections.
    Run {
        /// Project directory containing the optional `ci.json`.
        #[arg(default_value = DEFAULT_PROJECT_DIR)]
        path: PathBuf,

        /// Kill any single step that runs longer than this many seconds.
        #[arg(long, value_name = "SECS")]
        step_timeout_secs: Option<u64>,
    },
    /// Print the commands `run` would execute, one per line, without running them.
    Plan {
        #[arg(default_value = DEFAULT_PROJECT_DIR)]
        path: PathBuf,
    },
    /// Print the effective configuration (defaults merged with `ci.json`) as JSON.
    Config {
        #[arg(default_value = DEFAULT_PROJECT_DIR)]
        path: PathBuf,
    },
}

fn main() {
    logging::init();
    let cli = Cli::parse();
    let result = match cli.command {
        Command::Run {
            path,
            step_timeout_secs,
        } => cmd_run(path, step_timeout_secs),
        Command::Plan { path } => cmd_plan(path),
        Command::Config { path } => cmd_config(path),
    };

    if let Err(err) = result {
        eprintln!("{:#}", err);
        let code = err
            .downcast_ref::<RunError>()
            .map(RunError::exit_code)
            .unwrap_or(exit_codes::INVALID_CONFIG);
        process::exit(code);
    }
}

fn cmd_run(path: PathBuf, step_timeout_secs: Option<u64>) -> Result<()> {
    let prepared = prepare_run(&path)?;
    let executor = ShellExecutor::new(step_timeout_secs.map(Duration::from_secs));
    // Tool and hook failures never change the exit code.
    let _summary = execute_plan(&prepared, &executor);
    Ok(())
}

fn cmd_plan(path: PathBuf) -> Result<()> {
    let prepared = prepare_run(&path)?;
    for step in prepared.plan.steps() {
        println!("{}", step.command);
    }
    Ok(())
}

fn cmd_config(path: PathBuf) -> Result<()> {
    let prepared = prepare_run(&path)?;
    let payload =
        serde_json::to_string_pretty(&prepared.config).context("serialize configuration")?;
    println!("{payload}");
    Ok(())
}
