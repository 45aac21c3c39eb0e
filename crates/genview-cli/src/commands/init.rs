//! `genview init` command implementation
//!
//! Writes a default manifest describing the standard project layout.

use crate::error::{CliError, Result};
use colored::Colorize;
use genview_common::manifest::{Manifest, DEFAULT_TITLE, MANIFEST_FILE};
use std::fs;
use std::path::Path;
use tracing::info;

/// Initialize a project manifest in `data_dir` (or at `manifest_path`)
pub fn run(
    data_dir: &Path,
    manifest_path: Option<&Path>,
    title: Option<String>,
    force: bool,
) -> Result<()> {
    if !data_dir.exists() {
        fs::create_dir_all(data_dir)?;
    }

    let manifest_path = manifest_path
        .map(Path::to_path_buf)
        .unwrap_or_else(|| data_dir.join(MANIFEST_FILE));

    if manifest_path.exists() && !force {
        return Err(CliError::AlreadyInitialized(format!(
            "{} already exists",
            manifest_path.display()
        )));
    }

    let manifest = Manifest::with_title(title.unwrap_or_else(|| DEFAULT_TITLE.to_string()));
    manifest.validate()?;
    manifest.save(&manifest_path)?;
    info!(path = %manifest_path.display(), "Wrote manifest");

    println!("{} Initialized genview project: {}", "✓".green(), manifest.project.title);
    println!("  Created: {}", manifest_path.display());
    println!();
    println!("Expected layout (edit the manifest to change it):");
    let layout = &manifest.layout;
    println!("  FastQC before trimming: {}/", layout.fastqc_before.display());
    println!("  FastQC after trimming:  {}/", layout.fastqc_after.display());
    println!("  QUAST report:           {}", layout.quast_report.display());
    println!("  Gene predictions:       {}", layout.gene_predictions.display());
    println!("  BLAST results:          {}", layout.blast_results.display());
    for image in &layout.images {
        println!("  Image:                  {}", image.display());
    }

    Ok(())
}
