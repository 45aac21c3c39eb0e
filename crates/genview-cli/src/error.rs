//! Error types for the genview CLI
//!
//! Every variant is user-facing: the message says what went wrong and what to
//! try next.

use genview_common::GenviewError;
use genview_ingest::IngestError;
use thiserror::Error;

/// Result type alias for CLI operations
pub type Result<T> = std::result::Result<T, CliError>;

#[derive(Error, Debug)]
pub enum CliError {
    /// An input artifact is missing
    #[error("File not found: '{0}'. Verify the path, or set --data-dir / the manifest layout to where your results live.")]
    FileNotFound(String),

    /// A data line could not be interpreted
    #[error("Malformed input: {0}. Fix the line, or pass --skip-malformed to ignore malformed lines.")]
    Parse(String),

    /// Manifest (genview.yml) is unreadable or invalid
    #[error("Invalid manifest (genview.yml): {0}. Run 'genview init --force' to write a fresh one.")]
    InvalidManifest(String),

    /// Manifest already exists
    #[error("Project already initialized: {0}. Use --force to overwrite.")]
    AlreadyInitialized(String),

    /// `render --strict` found sections that could not load their data
    #[error("{0} dashboard section(s) reported problems; no report was written. Run 'genview status' to see which artifacts are missing.")]
    RenderWarnings(usize),

    /// Configuration is missing or invalid
    #[error("Configuration error: {0}. Check your command-line flags and GENVIEW_* environment variables.")]
    Config(String),

    /// File system operation failed
    #[error("File operation failed: {0}. Check file permissions and disk space.")]
    Io(#[from] std::io::Error),

    /// JSON output failed
    #[error("Failed to produce JSON: {0}")]
    Json(#[from] serde_json::Error),

    /// TSV output failed
    #[error("Failed to write TSV: {0}")]
    Csv(#[from] csv::Error),

    /// Generic anyhow error wrapper
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl CliError {
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }
}

impl From<IngestError> for CliError {
    fn from(err: IngestError) -> Self {
        match err {
            IngestError::FileNotFound(path) => CliError::FileNotFound(path.display().to_string()),
            IngestError::Parse { .. } | IngestError::Csv(_) => CliError::Parse(err.to_string()),
            IngestError::Io(e) => CliError::Io(e),
        }
    }
}

impl From<GenviewError> for CliError {
    fn from(err: GenviewError) -> Self {
        match err {
            GenviewError::FileNotFound(path) => CliError::FileNotFound(path),
            GenviewError::InvalidManifest(msg) => CliError::InvalidManifest(msg),
            GenviewError::Yaml(e) => CliError::InvalidManifest(e.to_string()),
            GenviewError::Io(e) => CliError::Io(e),
            GenviewError::Serialization(e) => CliError::Json(e),
            GenviewError::Parse(msg) => CliError::Parse(msg),
            GenviewError::Config(msg) => CliError::Config(msg),
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    #[test]
    fn test_not_found_message_is_actionable() {
        let err: CliError = IngestError::FileNotFound(PathBuf::from("run_tres.predict")).into();
        let msg = err.to_string();
        assert!(msg.contains("'run_tres.predict'"));
        assert!(msg.contains("--data-dir"));
    }

    #[test]
    fn test_parse_error_keeps_line_number() {
        let err: CliError = IngestError::parse("run_tres.predict", 7, "bad start").into();
        let msg = err.to_string();
        assert!(msg.contains("run_tres.predict:7: bad start"));
        assert!(msg.contains("--skip-malformed"));
    }

    #[test]
    fn test_manifest_errors() {
        let err: CliError = GenviewError::InvalidManifest("max_gene_length must be > 0".into()).into();
        assert!(matches!(err, CliError::InvalidManifest(_)));
        assert!(err.to_string().contains("genview init --force"));
    }
}
