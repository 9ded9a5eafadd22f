//! CI inspection runner for PHP projects.
//!
//! Given a project directory, the runner merges the project's `ci.json` over
//! built-in defaults, installs dependencies, and runs the inspection tools
//! (`phpmd`, `phpcs`, `phpunit`) plus any configured hooks, strictly one
//! after another. The architecture enforces a strict separation:
//!
//! - **[`core`]**: Pure, deterministic logic (config merge, validation,
//!   command construction, step planning). No I/O, fully testable in isolation.
//! - **[`io`]**: Side-effecting operations (reading `ci.json`, resolving the
//!   project directory, spawning processes). Isolated behind traits for tests.
//!
//! [`pipeline`] coordinates core logic with I/O to implement a run.

pub mod core;
pub mod error;
pub mod exit_codes;
pub mod io;
pub mod logging;
pub mod pipeline;
#[cfg(any(test, feature = "test-support"))]
pub mod test_support;
