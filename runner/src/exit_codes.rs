//! Stable exit codes for ci-runner commands.
//!
//! Only fatal setup errors change the exit code. Failing tools and hooks never do.

/// Every step was attempted (regardless of individual step results).
pub const OK: i32 = 0;
/// `ci.json` could not be read or parsed, or an enabled inspection is incomplete.
pub const INVALID_CONFIG: i32 = 1;
/// The project directory does not exist or is not accessible.
pub const INVALID_PATH: i32 = 2;
