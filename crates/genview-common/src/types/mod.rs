//! Artifact descriptors shared by the CLI and the server

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// The kinds of precomputed artifact a project directory holds
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ArtifactKind {
    /// FastQC HTML report produced before trimming
    FastqcBefore,
    /// FastQC HTML report produced after trimming
    FastqcAfter,
    /// QUAST assembly quality report
    QuastReport,
    /// Glimmer gene prediction file
    GenePredictions,
    /// BLAST tabular results
    BlastResults,
    /// Static figure
    Image,
}

impl ArtifactKind {
    /// Label used in listings
    pub fn label(self) -> &'static str {
        match self {
            ArtifactKind::FastqcBefore => "FastQC (before trimming)",
            ArtifactKind::FastqcAfter => "FastQC (after trimming)",
            ArtifactKind::QuastReport => "QUAST report",
            ArtifactKind::GenePredictions => "Gene predictions",
            ArtifactKind::BlastResults => "BLAST results",
            ArtifactKind::Image => "Image",
        }
    }

    /// Whether the dashboard keeps rendering when this artifact is absent
    pub fn is_optional(self) -> bool {
        !matches!(self, ArtifactKind::GenePredictions)
    }
}

impl std::fmt::Display for ArtifactKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

/// Presence and fingerprint of one artifact on disk
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ArtifactStatus {
    pub kind: ArtifactKind,
    pub path: PathBuf,
    pub present: bool,
    /// Size in bytes, when present
    #[serde(skip_serializing_if = "Option::is_none")]
    pub size: Option<u64>,
    /// Hex SHA-256, when present
    #[serde(skip_serializing_if = "Option::is_none")]
    pub checksum: Option<String>,
}

impl ArtifactStatus {
    /// Status for a path that does not exist
    pub fn missing(kind: ArtifactKind, path: impl Into<PathBuf>) -> Self {
        Self {
            kind,
            path: path.into(),
            present: false,
            size: None,
            checksum: None,
        }
    }

    /// Inspect a path and fingerprint it if it is a regular file
    pub fn inspect(kind: ArtifactKind, path: impl Into<PathBuf>) -> crate::Result<Self> {
        let path = path.into();
        let metadata = match std::fs::metadata(&path) {
            Ok(metadata) if metadata.is_file() => metadata,
            Ok(_) => return Ok(Self::missing(kind, path)),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                return Ok(Self::missing(kind, path))
            },
            Err(e) => return Err(e.into()),
        };

        let checksum = crate::checksum::compute_file_checksum(&path)?;

        Ok(Self {
            kind,
            path,
            present: true,
            size: Some(metadata.len()),
            checksum: Some(checksum),
        })
    }
}

/// One row of the assembly comparison table
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AssemblyStats {
    /// Assembler and read set, e.g. "Newbler with Long Reads"
    pub assembly: String,
    pub total_contigs: u64,
    /// Total assembled length in bp
    pub total_length: u64,
    /// Average contig length in bp
    pub average_contig_length: f64,
    /// Contig length at which half the assembly is covered
    pub n50: u64,
    /// Number of contigs needed to reach the N50
    pub l50: u64,
}
