//! `genview blast` command implementation

use crate::error::Result;
use crate::output::render_table;
use crate::BlastFormat;
use genview_ingest::blast::{self, BlastHit, BLAST_COLUMNS};
use genview_ingest::Project;
use serde::Serialize;
use std::io::Write;
use std::path::PathBuf;

#[derive(Debug, Serialize)]
struct BlastReport<'a> {
    source: String,
    total: usize,
    columns: [&'static str; 8],
    hits: &'a [BlastHit],
}

/// Print BLAST hits from the project (or an explicit file)
pub fn run(
    project: &Project,
    file: Option<PathBuf>,
    format: BlastFormat,
    limit: Option<usize>,
) -> Result<()> {
    let path = file.unwrap_or_else(|| project.blast_path());
    let hits = blast::load_blast_hits(&path)?;
    let shown = &hits[..limit.unwrap_or(hits.len()).min(hits.len())];

    match format {
        BlastFormat::Json => {
            let report = BlastReport {
                source: path.display().to_string(),
                total: hits.len(),
                columns: BLAST_COLUMNS,
                hits: shown,
            };
            println!("{}", serde_json::to_string_pretty(&report)?);
        },
        BlastFormat::Tsv => {
            let stdout = std::io::stdout();
            write_tsv(stdout.lock(), shown)?;
        },
        BlastFormat::Table => {
            print!(
                "{}",
                render_table(&BLAST_COLUMNS, shown.iter().map(|h| h.cells().to_vec()))
            );
            if shown.len() < hits.len() {
                println!("Showing {} of {} hits", shown.len(), hits.len());
            }
        },
    }

    Ok(())
}

/// Write hits back out in the eight-column tab-separated layout
fn write_tsv<W: Write>(writer: W, hits: &[BlastHit]) -> Result<()> {
    let mut writer = csv::WriterBuilder::new()
        .delimiter(b'\t')
        .has_headers(false)
        .quote_style(csv::QuoteStyle::Never)
        .from_writer(writer);
    for hit in hits {
        writer.serialize(hit)?;
    }
    writer.flush()?;
    Ok(())
}
