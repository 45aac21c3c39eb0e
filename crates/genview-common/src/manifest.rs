//! Project manifest (`genview.yml`)
//!
//! The manifest says where the precomputed artifacts of a project live,
//! relative to the data directory. Every field is optional; the defaults
//! describe the conventional layout:
//!
//! ```yaml
//! project:
//!   title: Eubacterial Genome Assembly and Annotation
//! layout:
//!   fastqc_before: fastqc_before
//!   fastqc_after: fastqc_after
//!   quast_report: report.html
//!   gene_predictions: run_tres.predict
//!   blast_results: sorted_file.tsv
//!   images: [1.jpg, 2.jpg, 3.jpg]
//! max_gene_length: 100000
//! skip_malformed: false
//! sections:
//!   - title: Conclusion
//!     body: The Newbler hybrid assembly was used for annotation.
//! ```

use crate::error::{GenviewError, Result};
use crate::types::AssemblyStats;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::debug;

/// Default manifest file name, looked up inside the data directory
pub const MANIFEST_FILE: &str = "genview.yml";

/// Default project title
pub const DEFAULT_TITLE: &str = "Eubacterial Genome Assembly and Annotation";

/// Gene lengths above this are left out of the distribution chart
pub const DEFAULT_MAX_GENE_LENGTH: u64 = 100_000;

/// genview manifest file
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Manifest {
    #[serde(default)]
    pub project: ProjectMetadata,

    #[serde(default)]
    pub layout: ProjectLayout,

    /// Inclusive upper bound for charted gene lengths
    #[serde(default = "default_max_gene_length")]
    pub max_gene_length: u64,

    /// Drop malformed prediction lines instead of failing
    #[serde(default)]
    pub skip_malformed: bool,

    /// Comparison rows; empty means the built-in table
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub assemblies: Vec<AssemblyStats>,

    /// Free-text sections shown after the BLAST results
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub sections: Vec<NarrativeSection>,
}

/// Project metadata section
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ProjectMetadata {
    #[serde(default = "default_title")]
    pub title: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    /// Byline lines under the title, e.g. "Student: ..."
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub authors: Vec<String>,
}

/// A titled block of Markdown supplied by the project author
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct NarrativeSection {
    pub title: String,
    pub body: String,
}

/// Where each artifact lives relative to the data directory
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct ProjectLayout {
    /// Directory of FastQC reports produced before trimming
    pub fastqc_before: PathBuf,
    /// Directory of FastQC reports produced after trimming
    pub fastqc_after: PathBuf,
    pub quast_report: PathBuf,
    pub gene_predictions: PathBuf,
    pub blast_results: PathBuf,
    pub images: Vec<PathBuf>,
}

fn default_max_gene_length() -> u64 {
    DEFAULT_MAX_GENE_LENGTH
}

fn default_title() -> String {
    DEFAULT_TITLE.to_string()
}

impl Default for ProjectMetadata {
    fn default() -> Self {
        Self {
            title: default_title(),
            description: None,
            authors: Vec::new(),
        }
    }
}

impl Default for ProjectLayout {
    fn default() -> Self {
        Self {
            fastqc_before: PathBuf::from("fastqc_before"),
            fastqc_after: PathBuf::from("fastqc_after"),
            quast_report: PathBuf::from("report.html"),
            gene_predictions: PathBuf::from("run_tres.predict"),
            blast_results: PathBuf::from("sorted_file.tsv"),
            images: vec![
                PathBuf::from("1.jpg"),
                PathBuf::from("2.jpg"),
                PathBuf::from("3.jpg"),
            ],
        }
    }
}

impl Default for Manifest {
    fn default() -> Self {
        Self {
            project: ProjectMetadata::default(),
            layout: ProjectLayout::default(),
            max_gene_length: DEFAULT_MAX_GENE_LENGTH,
            skip_malformed: false,
            assemblies: Vec::new(),
            sections: Vec::new(),
        }
    }
}

impl ProjectLayout {
    /// Join a layout entry onto the data directory; absolute entries pass through
    pub fn resolve(&self, data_dir: impl AsRef<Path>, entry: impl AsRef<Path>) -> PathBuf {
        let entry = entry.as_ref();
        if entry.is_absolute() {
            entry.to_path_buf()
        } else {
            data_dir.as_ref().join(entry)
        }
    }
}

impl Manifest {
    /// Create a manifest with the default layout and a custom title
    pub fn with_title(title: impl Into<String>) -> Self {
        let mut manifest = Self::default();
        manifest.project.title = title.into();
        manifest
    }

    /// Load manifest from a file
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        if !path.exists() {
            return Err(GenviewError::FileNotFound(path.display().to_string()));
        }

        let content = std::fs::read_to_string(path)?;
        let manifest: Manifest = serde_yaml::from_str(&content)
            .map_err(|e| GenviewError::InvalidManifest(format!("{}: {}", path.display(), e)))?;
        manifest.validate()?;

        debug!(path = %path.display(), "Loaded manifest");
        Ok(manifest)
    }

    /// Load the manifest if the file exists, otherwise use the defaults
    pub fn load_or_default(path: impl AsRef<Path>) -> Result<Self> {
        match Self::load(path.as_ref()) {
            Err(GenviewError::FileNotFound(_)) => {
                debug!(path = %path.as_ref().display(), "No manifest, using default layout");
                Ok(Self::default())
            },
            other => other,
        }
    }

    /// Save manifest to a file
    pub fn save(&self, path: impl AsRef<Path>) -> Result<()> {
        let content = serde_yaml::to_string(self)?;
        std::fs::write(path, content)?;
        Ok(())
    }

    /// Validate the manifest contents
    pub fn validate(&self) -> Result<()> {
        if self.project.title.trim().is_empty() {
            return Err(GenviewError::InvalidManifest(
                "Project title cannot be empty".to_string(),
            ));
        }

        if let Some(section) = self.sections.iter().find(|s| s.title.trim().is_empty()) {
            return Err(GenviewError::InvalidManifest(format!(
                "Section titles cannot be empty (body starts with '{}')",
                section.body.chars().take(30).collect::<String>()
            )));
        }

        if self.max_gene_length == 0 {
            return Err(GenviewError::InvalidManifest(
                "max_gene_length must be greater than 0".to_string(),
            ));
        }

        Ok(())
    }
}
