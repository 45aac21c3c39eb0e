//! genview-ingest - export parsed artifacts as JSON

use anyhow::Result;
use clap::Parser;
use genview_common::logging::{init_logging, LogConfig, LogLevel};
use genview_ingest::blast;
use genview_ingest::lengths::LengthFilter;
use genview_ingest::predict::{MalformedLinePolicy, PredictParser};
use std::path::PathBuf;
use tracing::info;

#[derive(Parser, Debug)]
#[command(name = "genview-ingest")]
#[command(author, version, about = "Convert genview artifacts to JSON")]
struct Cli {
    /// Artifact to convert
    #[command(subcommand)]
    source: Source,

    /// Output file (defaults to stdout)
    #[arg(short, long, global = true)]
    output: Option<PathBuf>,

    /// Verbose output
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Parser, Debug)]
enum Source {
    /// Gene lengths and box plot summary from a prediction file
    Lengths {
        /// Gene prediction file
        input: PathBuf,

        /// Longest gene length kept for the distribution
        #[arg(long, default_value_t = genview_common::manifest::DEFAULT_MAX_GENE_LENGTH)]
        max_length: u64,

        /// Skip malformed lines instead of failing
        #[arg(long)]
        skip_malformed: bool,
    },

    /// BLAST tabular results
    Blast {
        /// BLAST results file
        input: PathBuf,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let log_level = if cli.verbose {
        LogLevel::Debug
    } else {
        LogLevel::Warn
    };

    let log_config = LogConfig::builder()
        .level(log_level)
        .log_file_prefix("genview-ingest")
        .build()
        .merge_env()?;

    let _guard = init_logging(&log_config)?;

    let json = match cli.source {
        Source::Lengths {
            input,
            max_length,
            skip_malformed,
        } => {
            info!(input = %input.display(), "Extracting gene lengths");
            let policy = if skip_malformed {
                MalformedLinePolicy::Skip
            } else {
                MalformedLinePolicy::Fail
            };
            let lengths = PredictParser::new().with_policy(policy).extract_lengths(&input)?;
            serde_json::to_string_pretty(&LengthFilter::new(max_length).apply(&lengths))?
        },
        Source::Blast { input } => {
            info!(input = %input.display(), "Loading BLAST results");
            serde_json::to_string_pretty(&blast::load_blast_hits(&input)?)?
        },
    };

    match cli.output {
        Some(path) => {
            std::fs::write(&path, json)?;
            info!(output = %path.display(), "Wrote JSON");
        },
        None => println!("{}", json),
    }

    Ok(())
}
