//! Error types for genview

use thiserror::Error;

/// Result type alias for genview operations
pub type Result<T> = std::result::Result<T, GenviewError>;

/// Main error type for genview
#[derive(Error, Debug)]
pub enum GenviewError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("File not found: {0}")]
    FileNotFound(String),

    #[error("Invalid manifest: {0}")]
    InvalidManifest(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Parse error: {0}")]
    Parse(String),
}
