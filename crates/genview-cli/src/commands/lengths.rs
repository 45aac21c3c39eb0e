//! `genview lengths` command implementation
//!
//! Runs the gene length extractor and prints the lengths that pass the
//! threshold, or their distribution summary.

use crate::error::Result;
use crate::output::render_table;
use crate::LengthsFormat;
use colored::Colorize;
use genview_ingest::lengths::{BoxPlotSummary, LengthDistribution, LengthFilter};
use genview_ingest::predict::MalformedLinePolicy;
use genview_ingest::Project;
use serde::Serialize;
use std::path::PathBuf;
use tracing::debug;

#[derive(Debug, Clone)]
pub struct LengthsArgs {
    pub file: Option<PathBuf>,
    pub max_length: Option<u64>,
    pub no_filter: bool,
    pub skip_malformed: bool,
    pub format: LengthsFormat,
    pub summary: bool,
}

#[derive(Debug, Serialize)]
struct LengthsReport<'a> {
    source: String,
    #[serde(flatten)]
    distribution: &'a LengthDistribution,
}

/// Extract, filter and print gene lengths
pub fn run(project: &Project, args: LengthsArgs) -> Result<()> {
    let path = args.file.clone().unwrap_or_else(|| project.predictions_path());

    let mut parser = project.parser();
    if args.skip_malformed {
        parser = parser.with_policy(MalformedLinePolicy::Skip);
    }

    let filter = if args.no_filter {
        LengthFilter::unbounded()
    } else {
        args.max_length
            .map(LengthFilter::new)
            .unwrap_or_else(|| project.length_filter())
    };

    let lengths = parser.extract_lengths(&path)?;
    let distribution = filter.apply(&lengths);
    debug!(
        path = %path.display(),
        extracted = lengths.len(),
        kept = distribution.kept.len(),
        "Extracted gene lengths"
    );

    match args.format {
        LengthsFormat::Json => {
            let report = LengthsReport {
                source: path.display().to_string(),
                distribution: &distribution,
            };
            println!("{}", serde_json::to_string_pretty(&report)?);
        },
        LengthsFormat::Plain if args.summary => print_summary_plain(&distribution),
        LengthsFormat::Table if args.summary => print!("{}", summary_table(&distribution)),
        LengthsFormat::Plain => {
            for length in &distribution.kept {
                println!("{}", length);
            }
        },
        LengthsFormat::Table => {
            let rows = distribution
                .kept
                .iter()
                .enumerate()
                .map(|(i, length)| vec![(i + 1).to_string(), length.to_string()]);
            print!("{}", render_table(&["#", "Length (bp)"], rows));
        },
    }

    if distribution.excluded > 0 && args.format != LengthsFormat::Json {
        eprintln!(
            "{} {} gene(s) longer than {} bp excluded (use --no-filter to include them)",
            "note:".yellow().bold(),
            distribution.excluded,
            distribution.threshold
        );
    }

    Ok(())
}

fn summary_rows(distribution: &LengthDistribution) -> Vec<(&'static str, String)> {
    let mut rows = vec![
        ("count", distribution.kept.len().to_string()),
        ("excluded", distribution.excluded.to_string()),
    ];
    if let Some(BoxPlotSummary {
        min,
        q1,
        median,
        q3,
        max,
        mean,
        lower_whisker,
        upper_whisker,
        outliers,
        ..
    }) = &distribution.summary
    {
        rows.extend([
            ("min", min.to_string()),
            ("q1", format!("{:.2}", q1)),
            ("median", format!("{:.2}", median)),
            ("q3", format!("{:.2}", q3)),
            ("max", max.to_string()),
            ("mean", format!("{:.2}", mean)),
            ("lower whisker", lower_whisker.to_string()),
            ("upper whisker", upper_whisker.to_string()),
            ("outliers", outliers.len().to_string()),
        ]);
    }
    rows
}

fn print_summary_plain(distribution: &LengthDistribution) {
    for (label, value) in summary_rows(distribution) {
        println!("{:<14} {}", format!("{}:", label), value);
    }
}

fn summary_table(distribution: &LengthDistribution) -> String {
    render_table(
        &["Statistic", "Value"],
        summary_rows(distribution)
            .into_iter()
            .map(|(label, value)| vec![label.to_string(), value]),
    )
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;

    #[test]
    fn test_summary_rows_for_known_distribution() {
        let distribution = LengthFilter::default().apply(&[1, 2, 3, 4]);
        let rows = summary_rows(&distribution);

        let get = |key: &str| rows.iter().find(|(k, _)| *k == key).unwrap().1.clone();
        assert_eq!(get("count"), "4");
        assert_eq!(get("q1"), "1.75");
        assert_eq!(get("median"), "2.50");
        assert_eq!(get("q3"), "3.25");
    }

    #[test]
    fn test_summary_rows_when_everything_excluded() {
        let distribution = LengthFilter::new(5).apply(&[10, 20]);
        let rows = summary_rows(&distribution);
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[1], ("excluded", "2".to_string()));
    }
}
