//! Common test utilities for server integration tests
//!
//! Builds throwaway project directories with whichever artifacts a test needs.

#![allow(dead_code)]

use genview_ingest::Project;
use std::path::Path;
use tempfile::TempDir;

pub const PREDICTIONS: &str = ">scaffold1\nCDS 1 300 +\nCDS 500 250 -\n>scaffold2\norf3 1 150000 +1\n";

pub const BLAST_TSV: &str = "scaffold1_orf00001\tref|WP_011545.1|\t99.1\t1203\t0.0\t2215\tWP_011545\tchromosomal replication initiator protein DnaA\n\
scaffold1_orf00002\tref|WP_006477.1|\t97.4\t1101\t3e-150\t1890\tWP_006477\tDNA polymerase III subunit beta\n";

/// A project directory on disk
pub struct Fixture {
    pub dir: TempDir,
}

impl Fixture {
    /// Empty data directory, default manifest
    pub fn empty() -> Self {
        Self {
            dir: TempDir::new().expect("Failed to create temp dir"),
        }
    }

    /// Every artifact the default layout names
    pub fn complete() -> Self {
        Self::empty()
            .with_report("fastqc_before", "SRR1_fastqc.html", "<h1>before one</h1>")
            .with_report("fastqc_before", "SRR2_fastqc.html", "<h1>before two</h1>")
            .with_report("fastqc_after", "SRR1_trimmed_fastqc.html", "<h1>after</h1>")
            .with_file("report.html", "<h1>QUAST summary</h1>")
            .with_file("run_tres.predict", PREDICTIONS)
            .with_file("sorted_file.tsv", BLAST_TSV)
            .with_file("1.jpg", "jpg-one")
            .with_file("2.jpg", "jpg-two")
            .with_file("3.jpg", "jpg-three")
    }

    pub fn with_file(self, name: &str, content: &str) -> Self {
        let path = self.dir.path().join(name);
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).expect("Failed to create parent dir");
        }
        std::fs::write(path, content).expect("Failed to write fixture file");
        self
    }

    pub fn with_report(self, stage_dir: &str, name: &str, content: &str) -> Self {
        self.with_file(&format!("{}/{}", stage_dir, name), content)
    }

    pub fn without(self, name: &str) -> Self {
        std::fs::remove_file(self.dir.path().join(name)).expect("Failed to remove fixture file");
        self
    }

    pub fn path(&self) -> &Path {
        self.dir.path()
    }

    pub fn project(&self) -> Project {
        Project::open(self.dir.path(), None).expect("Failed to open project")
    }
}
