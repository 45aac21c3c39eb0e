//! `genview reports` command implementation
//!
//! Lists the FastQC reports found for each cleaning stage.

use crate::error::Result;
use crate::output::format_bytes;
use colored::Colorize;
use genview_ingest::reports::QcStage;
use genview_ingest::Project;

/// List reports for one stage, or both
pub fn run(project: &Project, stage: Option<QcStage>) -> Result<()> {
    let stages = match stage {
        Some(stage) => vec![stage],
        None => QcStage::ALL.to_vec(),
    };

    for (i, stage) in stages.into_iter().enumerate() {
        if i > 0 {
            println!();
        }
        println!("{}", stage.title().cyan().bold());

        let reports = project.reports(stage)?;
        if reports.is_empty() {
            println!(
                "  {} no reports in {}",
                "-".dimmed(),
                project.stage_dir(stage).display()
            );
            continue;
        }

        for report in reports {
            let size = std::fs::metadata(&report.path)
                .map(|m| format_bytes(m.len()))
                .unwrap_or_else(|_| "?".to_string());
            println!("  {} {} ({})", "•".green(), report.name, size);
        }
    }

    Ok(())
}
