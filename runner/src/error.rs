//! Fatal errors of a run.

use std::io;
use std::path::PathBuf;

use thiserror::Error;

use crate::core::value::ValidationError;
use crate::exit_codes;

/// Errors that abort a run before any external process is started.
#[derive(Debug, Error)]
pub enum RunError {
    #[error("project directory {path} is not accessible: {source}")]
    Path {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("project path {0} is not a directory")]
    NotADirectory(PathBuf),

    #[error("read {path}: {source}")]
    ConfigRead {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("parse {path}: {source}")]
    ConfigParse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("invalid configuration: {0}")]
    ConfigValidation(#[from] ValidationError),
}

impl RunError {
    /// Process exit code for this error.
    pub fn exit_code(&self) -> i32 {
        match self {
            RunError::Path { .. } | RunError::NotADirectory(_) => exit_codes::INVALID_PATH,
            RunError::ConfigRead { .. }
            | RunError::ConfigParse { .. }
            | RunError::ConfigValidation(_) => exit_codes::INVALID_CONFIG,
        }
    }
}
