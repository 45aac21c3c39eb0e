//! A project directory plus its manifest
//!
//! Ties the layout in `genview.yml` to the loaders in this crate so callers
//! ask for "the BLAST hits" instead of assembling paths themselves.

use crate::assembly::{self, AssemblyStats};
use crate::blast::{self, BlastHit};
use crate::error::Result;
use crate::lengths::{LengthDistribution, LengthFilter};
use crate::predict::{MalformedLinePolicy, PredictParser};
use crate::reports::{self, QcReport, QcStage};
use genview_common::manifest::{Manifest, MANIFEST_FILE};
use genview_common::types::{ArtifactKind, ArtifactStatus};
use std::path::{Path, PathBuf};

#[derive(Debug, Clone)]
pub struct Project {
    data_dir: PathBuf,
    manifest: Manifest,
}

impl Project {
    pub fn new(data_dir: impl Into<PathBuf>, manifest: Manifest) -> Self {
        Self {
            data_dir: data_dir.into(),
            manifest,
        }
    }

    /// Open `data_dir`, reading `manifest_path` (or `<data_dir>/genview.yml`) if present
    pub fn open(
        data_dir: impl Into<PathBuf>,
        manifest_path: Option<&Path>,
    ) -> genview_common::Result<Self> {
        let data_dir = data_dir.into();
        let manifest = match manifest_path {
            Some(path) => Manifest::load(path)?,
            None => Manifest::load_or_default(data_dir.join(MANIFEST_FILE))?,
        };
        Ok(Self::new(data_dir, manifest))
    }

    pub fn data_dir(&self) -> &Path {
        &self.data_dir
    }

    pub fn manifest(&self) -> &Manifest {
        &self.manifest
    }

    pub fn title(&self) -> &str {
        &self.manifest.project.title
    }

    fn resolve(&self, entry: &Path) -> PathBuf {
        self.manifest.layout.resolve(&self.data_dir, entry)
    }

    pub fn predictions_path(&self) -> PathBuf {
        self.resolve(&self.manifest.layout.gene_predictions)
    }

    pub fn blast_path(&self) -> PathBuf {
        self.resolve(&self.manifest.layout.blast_results)
    }

    pub fn quast_path(&self) -> PathBuf {
        self.resolve(&self.manifest.layout.quast_report)
    }

    /// Image entries as written in the manifest (relative to the data dir)
    pub fn image_entries(&self) -> &[PathBuf] {
        &self.manifest.layout.images
    }

    pub fn image_path(&self, entry: &Path) -> PathBuf {
        self.resolve(entry)
    }

    pub fn stage_dir(&self, stage: QcStage) -> PathBuf {
        stage.directory(&self.manifest.layout, &self.data_dir)
    }

    /// Parser configured with the manifest's malformed-line policy
    pub fn parser(&self) -> PredictParser {
        let policy = if self.manifest.skip_malformed {
            MalformedLinePolicy::Skip
        } else {
            MalformedLinePolicy::Fail
        };
        PredictParser::new().with_policy(policy)
    }

    pub fn length_filter(&self) -> LengthFilter {
        LengthFilter::new(self.manifest.max_gene_length)
    }

    /// Extract, filter and summarize the predicted gene lengths
    pub fn gene_length_distribution(&self) -> Result<LengthDistribution> {
        let lengths = self.parser().extract_lengths(self.predictions_path())?;
        Ok(self.length_filter().apply(&lengths))
    }

    pub fn blast_hits(&self) -> Result<Vec<BlastHit>> {
        blast::load_blast_hits(self.blast_path())
    }

    pub fn assemblies(&self) -> Vec<AssemblyStats> {
        assembly::comparison_or_default(&self.manifest.assemblies)
    }

    pub fn reports(&self, stage: QcStage) -> Result<Vec<QcReport>> {
        reports::discover_reports(self.stage_dir(stage))
    }

    pub fn quast_report(&self) -> Result<String> {
        reports::load_quast_report(self.quast_path())
    }

    /// Presence and fingerprint of every artifact the layout names
    pub fn artifact_statuses(&self) -> genview_common::Result<Vec<ArtifactStatus>> {
        let mut statuses = Vec::new();

        for stage in QcStage::ALL {
            let found = self.reports(stage).map_err(|e| {
                genview_common::GenviewError::Config(format!(
                    "cannot list {}: {}",
                    self.stage_dir(stage).display(),
                    e
                ))
            })?;
            if found.is_empty() {
                statuses.push(ArtifactStatus::missing(stage.kind(), self.stage_dir(stage)));
            }
            for report in found {
                statuses.push(ArtifactStatus::inspect(stage.kind(), report.path)?);
            }
        }

        statuses.push(ArtifactStatus::inspect(ArtifactKind::QuastReport, self.quast_path())?);
        statuses.push(ArtifactStatus::inspect(
            ArtifactKind::GenePredictions,
            self.predictions_path(),
        )?);
        statuses.push(ArtifactStatus::inspect(ArtifactKind::BlastResults, self.blast_path())?);
        for entry in self.image_entries() {
            statuses.push(ArtifactStatus::inspect(ArtifactKind::Image, self.image_path(entry))?);
        }

        Ok(statuses)
    }
}
