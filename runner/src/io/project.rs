//! Project directory resolution.

use std::fs;
use std::path::{Path, PathBuf};

use tracing::debug;

use crate::error::RunError;

/// Directory used when no project path is given.
pub const DEFAULT_PROJECT_DIR: &str = "/srv";

/// Resolve `path` to the canonical project root every step runs in.
///
/// Fails if the path does not exist, is not a directory, or cannot be listed.
pub fn resolve_project_dir(path: &Path) -> Result<PathBuf, RunError> {
    let root = fs::canonicalize(path).map_err(|source| RunError::Path {
        path: path.to_path_buf(),
        source,
    })?;
    if !root.is_dir() {
        return Err(RunError::NotADirectory(root));
    }
    fs::read_dir(&root).map_err(|source| RunError::Path {
        path: root.clone(),
        source,
    })?;
    debug!(root = %root.display(), "resolved project directory");
    Ok(root)
}
