//! FastQC and QUAST HTML reports
//!
//! Reports are never parsed, only located and read so they can be embedded.

use crate::error::{IngestError, Result};
use genview_common::manifest::ProjectLayout;
use genview_common::types::ArtifactKind;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::debug;

/// Point in the cleaning workflow a FastQC report was produced
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum QcStage {
    #[serde(rename = "before")]
    BeforeTrimming,
    #[serde(rename = "after")]
    AfterTrimming,
}

impl QcStage {
    pub const ALL: [QcStage; 2] = [QcStage::BeforeTrimming, QcStage::AfterTrimming];

    /// Short name used in URLs and on the command line
    pub fn slug(self) -> &'static str {
        match self {
            QcStage::BeforeTrimming => "before",
            QcStage::AfterTrimming => "after",
        }
    }

    pub fn title(self) -> &'static str {
        match self {
            QcStage::BeforeTrimming => "FastQC Reports (Before Trimming)",
            QcStage::AfterTrimming => "FastQC Reports (After Trimming)",
        }
    }

    pub fn kind(self) -> ArtifactKind {
        match self {
            QcStage::BeforeTrimming => ArtifactKind::FastqcBefore,
            QcStage::AfterTrimming => ArtifactKind::FastqcAfter,
        }
    }

    /// Report directory for this stage under `data_dir`
    pub fn directory(self, layout: &ProjectLayout, data_dir: impl AsRef<Path>) -> PathBuf {
        match self {
            QcStage::BeforeTrimming => layout.resolve(data_dir, &layout.fastqc_before),
            QcStage::AfterTrimming => layout.resolve(data_dir, &layout.fastqc_after),
        }
    }
}

impl std::str::FromStr for QcStage {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "before" | "raw" => Ok(QcStage::BeforeTrimming),
            "after" | "trimmed" => Ok(QcStage::AfterTrimming),
            other => Err(format!("unknown QC stage '{}', expected 'before' or 'after'", other)),
        }
    }
}

impl std::fmt::Display for QcStage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.slug())
    }
}

/// One HTML report on disk
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QcReport {
    /// File name, e.g. `SRR292678_1_fastqc.html`
    pub name: String,
    pub path: PathBuf,
}

/// Every `*.html` file directly inside `dir`, sorted by path
///
/// A missing directory yields no reports rather than an error.
pub fn discover_reports(dir: impl AsRef<Path>) -> Result<Vec<QcReport>> {
    let dir = dir.as_ref();
    let entries = match std::fs::read_dir(dir) {
        Ok(entries) => entries,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
            debug!(dir = %dir.display(), "Report directory does not exist");
            return Ok(Vec::new());
        },
        Err(e) => return Err(e.into()),
    };

    let mut reports = Vec::new();
    for entry in entries {
        let path = entry?.path();
        let is_html = path
            .extension()
            .is_some_and(|ext| ext.eq_ignore_ascii_case("html"));
        if !is_html || !path.is_file() {
            continue;
        }

        if let Some(name) = path.file_name().and_then(|n| n.to_str()) {
            reports.push(QcReport {
                name: name.to_string(),
                path: path.clone(),
            });
        }
    }

    reports.sort_by(|a, b| a.path.cmp(&b.path));
    debug!(dir = %dir.display(), count = reports.len(), "Discovered reports");
    Ok(reports)
}

/// The report called `name`, or the first one when no name is given
pub fn select_report<'a>(reports: &'a [QcReport], name: Option<&str>) -> Option<&'a QcReport> {
    match name {
        Some(name) => reports.iter().find(|r| r.name == name),
        None => reports.first(),
    }
}

fn read_html(path: &Path) -> Result<String> {
    std::fs::read_to_string(path).map_err(|e| IngestError::from_open(path, e))
}

/// Read a discovered report
pub fn load_report_html(report: &QcReport) -> Result<String> {
    read_html(&report.path)
}

/// Read the QUAST assembly report
pub fn load_quast_report(path: impl AsRef<Path>) -> Result<String> {
    read_html(path.as_ref())
}

/// Force a white page with black text around a report body
pub fn wrap_with_white_background(content: &str) -> String {
    format!(
        r#"<html>
<head>
    <style>
        body {{
            background-color: white !important;
            color: black !important;
        }}
    </style>
</head>
<body>
    {}
</body>
</html>
"#,
        content
    )
}
