//! `genview render` command implementation
//!
//! Writes the whole dashboard as a single self-contained HTML file. Images
//! are inlined so the file can be opened or shared without the data directory.

use crate::error::{CliError, Result};
use colored::Colorize;
use genview_ingest::Project;
use genview_server::dashboard::{render_dashboard_with, MediaMode, RenderOptions};
use genview_server::HtmlPage;
use std::fs;
use std::path::PathBuf;
use tracing::{info, warn};

/// Default file name written inside the data directory
pub const DEFAULT_OUTPUT: &str = "genview-report.html";

#[derive(Debug, Clone, Default)]
pub struct RenderArgs {
    pub output: Option<PathBuf>,
    pub strict: bool,
    pub before_report: Option<String>,
    pub after_report: Option<String>,
}

/// Render the dashboard to a file and return where it was written
pub fn run(project: &Project, args: RenderArgs) -> Result<PathBuf> {
    let output = args
        .output
        .unwrap_or_else(|| project.data_dir().join(DEFAULT_OUTPUT));

    let options = RenderOptions {
        media: MediaMode::Inline,
        before_report: args.before_report,
        after_report: args.after_report,
        ..RenderOptions::default()
    };

    let mut page = HtmlPage::new().with_timestamp(chrono::Utc::now());
    let outcome = render_dashboard_with(project, &options, &mut page);

    for warning in &outcome.warnings {
        warn!(section = %warning.section, message = %warning.message, "Section rendered with a warning");
        eprintln!(
            "{} [{}] {}",
            "warning:".yellow().bold(),
            warning.section,
            warning.message
        );
    }

    if args.strict && !outcome.is_clean() {
        return Err(CliError::RenderWarnings(outcome.warnings.len()));
    }

    if let Some(parent) = output.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)?;
    }
    fs::write(&output, page.finish())?;
    info!(path = %output.display(), warnings = outcome.warnings.len(), "Wrote dashboard");

    println!("{} Wrote report to {}", "✓".green(), output.display());
    Ok(output)
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;
    use genview_common::manifest::Manifest;
    use tempfile::TempDir;

    fn project_with_predictions(dir: &TempDir) -> Project {
        fs::write(
            dir.path().join("run_tres.predict"),
            ">scaffold1\norf00001 100 399 +1 1.2\norf00002 900 650 -2 3.4\n",
        )
        .unwrap();
        Project::new(dir.path(), Manifest::default())
    }

    #[test]
    fn test_render_writes_default_output() {
        let dir = TempDir::new().unwrap();
        let project = project_with_predictions(&dir);

        let path = run(&project, RenderArgs::default()).unwrap();

        assert_eq!(path, dir.path().join(DEFAULT_OUTPUT));
        let html = fs::read_to_string(path).unwrap();
        assert!(html.starts_with("<!DOCTYPE html>"));
        assert!(html.contains("<svg"));
    }

    #[test]
    fn test_strict_render_writes_nothing_on_warnings() {
        let dir = TempDir::new().unwrap();
        let project = project_with_predictions(&dir);
        let output = dir.path().join("out").join("report.html");

        let result = run(
            &project,
            RenderArgs {
                output: Some(output.clone()),
                strict: true,
                ..RenderArgs::default()
            },
        );

        assert!(matches!(result, Err(CliError::RenderWarnings(n)) if n > 0));
        assert!(!output.exists());
    }
}
