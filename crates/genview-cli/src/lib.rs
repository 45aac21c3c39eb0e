//! Genview CLI Library
//!
//! Command-line interface for inspecting a genome assembly and annotation
//! project directory.
//!
//! # Overview
//!
//! - **Project setup**: write a `genview.yml` manifest (`genview init`)
//! - **Gene lengths**: extract and summarize predicted gene lengths (`genview lengths`)
//! - **Annotation**: print BLAST hits (`genview blast`)
//! - **Assembly**: print the assembly comparison (`genview assemblies`)
//! - **QC**: list FastQC reports (`genview reports`)
//! - **Status**: check which artifacts are present (`genview status`)
//! - **Report**: write the dashboard as one HTML file (`genview render`)

pub mod commands;
pub mod error;
pub mod output;

// Re-export commonly used types
pub use error::{CliError, Result};

use clap::{Parser, Subcommand, ValueEnum};
use genview_ingest::reports::QcStage;
use std::path::PathBuf;

/// genview - genome assembly and annotation report viewer
#[derive(Parser, Debug)]
#[command(name = "genview")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Project directory holding the pipeline results
    #[arg(long, env = "GENVIEW_DATA_DIR", default_value = ".", global = true)]
    pub data_dir: PathBuf,

    /// Manifest file (defaults to genview.yml inside the data directory)
    #[arg(long, env = "GENVIEW_MANIFEST", global = true)]
    pub manifest: Option<PathBuf>,

    /// Print the CLI reference as Markdown
    #[arg(long, hide = true)]
    pub markdown_help: bool,
}

/// Available CLI commands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Write a default genview.yml manifest
    Init {
        /// Project title shown on the dashboard
        #[arg(short, long)]
        title: Option<String>,

        /// Overwrite an existing manifest
        #[arg(short, long)]
        force: bool,
    },

    /// Extract predicted gene lengths
    Lengths {
        /// Gene prediction file (defaults to the manifest's gene_predictions)
        file: Option<PathBuf>,

        /// Drop lengths above this many bp (defaults to the manifest's max_gene_length)
        #[arg(long, conflicts_with = "no_filter")]
        max_length: Option<u64>,

        /// Print every length, without the threshold
        #[arg(long)]
        no_filter: bool,

        /// Skip malformed lines instead of failing
        #[arg(long)]
        skip_malformed: bool,

        /// Output format
        #[arg(short = 'F', long, value_enum, default_value_t = LengthsFormat::Plain)]
        format: LengthsFormat,

        /// Print the distribution summary instead of individual lengths
        #[arg(short, long)]
        summary: bool,
    },

    /// Print the BLAST results table
    Blast {
        /// BLAST tabular file (defaults to the manifest's blast_results)
        file: Option<PathBuf>,

        /// Output format
        #[arg(short = 'F', long, value_enum, default_value_t = BlastFormat::Table)]
        format: BlastFormat,

        /// Show at most this many hits
        #[arg(short = 'n', long)]
        limit: Option<usize>,
    },

    /// Print the assembly comparison table
    Assemblies {
        /// Output format
        #[arg(short = 'F', long, value_enum, default_value_t = TableFormat::Table)]
        format: TableFormat,
    },

    /// List FastQC reports
    Reports {
        /// Only this stage (before or after trimming)
        #[arg(short, long)]
        stage: Option<QcStage>,
    },

    /// Show which project artifacts are present
    Status,

    /// Write the dashboard as a standalone HTML file
    Render {
        /// Output file (defaults to genview-report.html in the data directory)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Fail instead of writing a report when any section has problems
        #[arg(long)]
        strict: bool,

        /// Embed only this FastQC report from before trimming
        #[arg(long)]
        before_report: Option<String>,

        /// Embed only this FastQC report from after trimming
        #[arg(long)]
        after_report: Option<String>,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum LengthsFormat {
    /// One length per line
    Plain,
    Json,
    Table,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum BlastFormat {
    Table,
    Json,
    /// Tab-separated, same layout as the input
    Tsv,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum TableFormat {
    Table,
    Json,
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_lengths_defaults() {
        let cli = Cli::try_parse_from(["genview", "lengths"]).unwrap();
        match cli.command.unwrap() {
            Commands::Lengths {
                file,
                max_length,
                no_filter,
                format,
                ..
            } => {
                assert!(file.is_none());
                assert!(max_length.is_none());
                assert!(!no_filter);
                assert_eq!(format, LengthsFormat::Plain);
            },
            other => panic!("unexpected command {other:?}"),
        }
    }

    #[test]
    fn test_max_length_conflicts_with_no_filter() {
        let result =
            Cli::try_parse_from(["genview", "lengths", "--max-length", "10", "--no-filter"]);
        assert!(result.is_err());
    }

    #[test]
    fn test_global_flags_after_subcommand() {
        let cli = Cli::try_parse_from([
            "genview",
            "reports",
            "--stage",
            "after",
            "--data-dir",
            "/data",
            "-v",
        ])
        .unwrap();
        assert_eq!(cli.data_dir, PathBuf::from("/data"));
        assert!(cli.verbose);
        assert!(matches!(
            cli.command,
            Some(Commands::Reports {
                stage: Some(QcStage::AfterTrimming)
            })
        ));
    }
}
