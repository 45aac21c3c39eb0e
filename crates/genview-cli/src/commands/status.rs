//! `genview status` command implementation
//!
//! Shows which artifacts of the project layout are present on disk.

use crate::error::Result;
use crate::output::{format_bytes, render_table, short_checksum};
use colored::Colorize;
use genview_common::types::ArtifactStatus;
use genview_ingest::Project;
use std::path::Path;

/// Show presence, size and checksum of every artifact
pub fn run(project: &Project) -> Result<()> {
    let statuses = project.artifact_statuses()?;

    println!("{} {}", "Project:".cyan().bold(), project.title());
    println!("  Data dir: {}", project.data_dir().display());
    println!();

    let rows = statuses
        .iter()
        .map(|status| status_row(project.data_dir(), status));
    print!(
        "{}",
        render_table(&["Artifact", "Path", "Status", "Size", "SHA-256"], rows)
    );

    let present = statuses.iter().filter(|s| s.present).count();
    let total_size: u64 = statuses.iter().filter_map(|s| s.size).sum();
    let missing_required: Vec<&ArtifactStatus> = statuses
        .iter()
        .filter(|s| !s.present && !s.kind.is_optional())
        .collect();

    println!();
    println!("{}", "Summary:".cyan().bold());
    println!("  Present:    {}/{}", present, statuses.len());
    println!("  Total size: {}", format_bytes(total_size));

    if !missing_required.is_empty() {
        println!();
        for status in missing_required {
            println!(
                "{} {} is missing; the gene length section cannot render.",
                "warning:".yellow().bold(),
                status.path.display()
            );
        }
    }

    Ok(())
}

fn status_label(status: &ArtifactStatus) -> String {
    if status.present {
        "present".green().to_string()
    } else if status.kind.is_optional() {
        "missing (optional)".yellow().to_string()
    } else {
        "missing".red().to_string()
    }
}

fn status_row(data_dir: &Path, status: &ArtifactStatus) -> Vec<String> {
    let path = status.path.strip_prefix(data_dir).unwrap_or(&status.path);
    vec![
        status.kind.label().to_string(),
        path.display().to_string(),
        status_label(status),
        status.size.map(format_bytes).unwrap_or_else(|| "-".to_string()),
        status
            .checksum
            .as_deref()
            .map(short_checksum)
            .unwrap_or("-")
            .to_string(),
    ]
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;
    use genview_common::types::ArtifactKind;

    #[test]
    fn test_status_row_present() {
        colored::control::set_override(false);
        let status = ArtifactStatus {
            kind: ArtifactKind::BlastResults,
            path: "/data/sorted_file.tsv".into(),
            present: true,
            size: Some(2048),
            checksum: Some("0123456789abcdef0123456789abcdef".to_string()),
        };

        let row = status_row(Path::new("/data"), &status);
        assert_eq!(row[0], "BLAST results");
        assert_eq!(row[1], "sorted_file.tsv");
        assert_eq!(row[2], "present");
        assert_eq!(row[3], "2.00 KB");
        assert_eq!(row[4], "0123456789abcdef");
    }

    #[test]
    fn test_status_row_missing() {
        colored::control::set_override(false);
        let required = ArtifactStatus::missing(ArtifactKind::GenePredictions, "/data/run_tres.predict");
        let optional = ArtifactStatus::missing(ArtifactKind::QuastReport, "/data/report.html");

        assert_eq!(status_row(Path::new("/data"), &required)[2], "missing");
        assert_eq!(status_row(Path::new("/data"), &optional)[2], "missing (optional)");
        assert_eq!(status_row(Path::new("/data"), &optional)[3], "-");
    }
}
