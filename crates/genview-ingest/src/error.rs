//! Error types for artifact loading

use std::path::{Path, PathBuf};
use thiserror::Error;

/// Result type alias for ingest operations
pub type Result<T> = std::result::Result<T, IngestError>;

#[derive(Error, Debug)]
pub enum IngestError {
    /// The artifact does not exist; callers decide whether that is fatal
    #[error("The file '{}' was not found.", .0.display())]
    FileNotFound(PathBuf),

    /// A data line could not be interpreted
    #[error("{}:{line}: {message}", .path.display())]
    Parse {
        path: PathBuf,
        line: usize,
        message: String,
    },

    #[error("Invalid tabular data: {0}")]
    Csv(#[from] csv::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl IngestError {
    /// Build a parse error for a 1-based line number
    pub fn parse(path: impl Into<PathBuf>, line: usize, message: impl Into<String>) -> Self {
        Self::Parse {
            path: path.into(),
            line,
            message: message.into(),
        }
    }

    /// Whether this is the recoverable missing-file condition
    pub fn is_not_found(&self) -> bool {
        matches!(self, IngestError::FileNotFound(_))
    }

    /// Map an IO error from opening `path`, keeping "not found" distinct
    pub(crate) fn from_open(path: &Path, err: std::io::Error) -> Self {
        match err.kind() {
            std::io::ErrorKind::NotFound => IngestError::FileNotFound(path.to_path_buf()),
            _ => IngestError::Io(err),
        }
    }

    /// Attach a path to parse errors produced from an in-memory source
    pub(crate) fn with_path(self, path: &Path) -> Self {
        match self {
            IngestError::Parse { line, message, .. } => IngestError::Parse {
                path: path.to_path_buf(),
                line,
                message,
            },
            other => other,
        }
    }
}

/// Label for in-memory sources in parse errors
pub(crate) const INPUT_LABEL: &str = "<input>";
