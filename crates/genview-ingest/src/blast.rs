//! BLAST tabular results loader
//!
//! The results file is tab separated, has no header row and exactly eight
//! columns, in the order given by [`BLAST_COLUMNS`]. Rows are kept in file
//! order; the file is expected to be sorted already.

use crate::error::{IngestError, Result, INPUT_LABEL};
use serde::{Deserialize, Serialize};
use std::fs::File;
use std::io::Read;
use std::path::Path;
use tracing::debug;

/// Display labels of the eight columns
pub const BLAST_COLUMNS: [&str; 8] = [
    "Query ID",
    "Subject ID",
    "Percent Identity",
    "Alignment Length",
    "E-value",
    "Bit Score",
    "Subject Accession",
    "Subject Title",
];

/// One BLAST hit
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BlastHit {
    pub query_id: String,
    pub subject_id: String,
    pub percent_identity: f64,
    pub alignment_length: u64,
    pub evalue: f64,
    pub bit_score: f64,
    pub subject_accession: String,
    pub subject_title: String,
}

impl BlastHit {
    /// Cells in column order, formatted for display
    pub fn cells(&self) -> [String; 8] {
        [
            self.query_id.clone(),
            self.subject_id.clone(),
            format_number(self.percent_identity),
            self.alignment_length.to_string(),
            format_evalue(self.evalue),
            format_number(self.bit_score),
            self.subject_accession.clone(),
            self.subject_title.clone(),
        ]
    }
}

fn format_number(value: f64) -> String {
    if value.fract() == 0.0 && value.abs() < 1e15 {
        format!("{:.0}", value)
    } else {
        value.to_string()
    }
}

fn format_evalue(value: f64) -> String {
    if value != 0.0 && value.abs() < 1e-4 {
        format!("{:.2e}", value)
    } else {
        format_number(value)
    }
}

/// Parse BLAST hits from any reader
pub fn parse_blast_reader<R: Read>(reader: R) -> Result<Vec<BlastHit>> {
    let mut csv_reader = csv::ReaderBuilder::new()
        .delimiter(b'\t')
        .has_headers(false)
        .quoting(false)
        .from_reader(reader);

    let mut hits = Vec::new();
    for record in csv_reader.deserialize::<BlastHit>() {
        hits.push(record.map_err(csv_to_parse_error)?);
    }

    Ok(hits)
}

fn csv_to_parse_error(err: csv::Error) -> IngestError {
    let is_io = matches!(err.kind(), csv::ErrorKind::Io(_));
    match err.position().map(|p| p.line() as usize) {
        Some(line) if !is_io => IngestError::parse(INPUT_LABEL, line, err.to_string()),
        _ => IngestError::Csv(err),
    }
}

/// Load BLAST hits from a results file
pub fn load_blast_hits(path: impl AsRef<Path>) -> Result<Vec<BlastHit>> {
    let path = path.as_ref();
    let file = File::open(path).map_err(|e| IngestError::from_open(path, e))?;
    let hits = parse_blast_reader(file).map_err(|e| e.with_path(path))?;

    debug!(path = %path.display(), hits = hits.len(), "Loaded BLAST results");
    Ok(hits)
}

#[cfg(test)]
mod tests {
    use super::*;

    const ROW: &str = "scaffold1_g12\tgi|1234|ref|WP_0001.1|\t98.7\t450\t1.5e-120\t812\tWP_0001\tDNA gyrase subunit A [Burkholderia cenocepacia]";

    #[test]
    fn test_parse_single_row() {
        let hits = parse_blast_reader(ROW.as_bytes()).unwrap();
        assert_eq!(hits.len(), 1);

        let hit = &hits[0];
        assert_eq!(hit.query_id, "scaffold1_g12");
        assert_eq!(hit.percent_identity, 98.7);
        assert_eq!(hit.alignment_length, 450);
        assert_eq!(hit.bit_score, 812.0);
        assert_eq!(hit.subject_title, "DNA gyrase subunit A [Burkholderia cenocepacia]");
    }

    #[test]
    fn test_cells_formatting() {
        let hit = &parse_blast_reader(ROW.as_bytes()).unwrap()[0];
        let cells = hit.cells();
        assert_eq!(cells[2], "98.7");
        assert_eq!(cells[4], "1.50e-120");
        assert_eq!(cells[5], "812");
    }

    #[test]
    fn test_title_with_quotes_is_verbatim() {
        let row = "q1\ts1\t100\t10\t0\t20\tACC1\t\"putative\" protein";
        let hits = parse_blast_reader(row.as_bytes()).unwrap();
        assert_eq!(hits[0].subject_title, "\"putative\" protein");
        assert_eq!(hits[0].cells()[4], "0");
    }

    #[test]
    fn test_hash_prefixed_query_is_a_row() {
        let input = "#q1\ts1\t99.0\t100\t1e-50\t200\tACC1\ttitle one\n\
                     q2\ts2\t80.5\t50\t0.01\t40\tACC2\ttitle two\n";
        let hits = parse_blast_reader(input.as_bytes()).unwrap();

        assert_eq!(hits.len(), 2);
        assert_eq!(hits[0].query_id, "#q1");
        assert_eq!(hits[1].query_id, "q2");
    }
}
