//! Gene prediction (Glimmer `.predict`) parser
//!
//! # File Format
//! ```text
//! >scaffold1
//! orf00001      101     1300  +2     7.44
//! orf00004     2710     1808  -2    11.63
//! ```
//!
//! Lines starting with `>` name the scaffold the following genes belong to.
//! Every other non-blank line is whitespace separated: gene id, start, end,
//! then columns (frame, score, ...) this parser keeps but never interprets.
//! Reverse-strand genes have `end < start`.

use crate::error::{IngestError, Result, INPUT_LABEL};
use serde::{Deserialize, Serialize};
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;
use tracing::{debug, warn};

/// Marker that opens a scaffold header line
pub const HEADER_MARKER: char = '>';

/// What to do with a data line that lacks integer start/end columns
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MalformedLinePolicy {
    /// Stop at the first malformed line with its line number
    #[default]
    Fail,
    /// Drop the line and log a warning
    Skip,
}

/// Inclusive length of a span, independent of strand orientation
pub fn gene_length(start: i64, end: i64) -> u64 {
    end.abs_diff(start).saturating_add(1)
}

/// One predicted gene
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GenePrediction {
    /// Name from the closest preceding header, if any
    pub scaffold: Option<String>,
    pub id: String,
    pub start: i64,
    pub end: i64,
    /// Trailing columns, untouched
    pub extra: Vec<String>,
    /// 1-based line number in the source
    pub line: usize,
}

impl GenePrediction {
    pub fn length(&self) -> u64 {
        gene_length(self.start, self.end)
    }

    /// True when the gene is on the reverse strand
    pub fn is_reverse(&self) -> bool {
        self.end < self.start
    }
}

/// Classification of a single line
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PredictLine {
    Blank,
    Header(String),
    Gene {
        id: String,
        start: i64,
        end: i64,
        extra: Vec<String>,
    },
}

/// Parser for gene prediction files
#[derive(Debug, Clone)]
pub struct PredictParser {
    marker: char,
    policy: MalformedLinePolicy,
}

impl Default for PredictParser {
    fn default() -> Self {
        Self::new()
    }
}

impl PredictParser {
    /// Parser with the `>` header marker that fails on malformed lines
    pub fn new() -> Self {
        Self {
            marker: HEADER_MARKER,
            policy: MalformedLinePolicy::Fail,
        }
    }

    pub fn with_marker(mut self, marker: char) -> Self {
        self.marker = marker;
        self
    }

    pub fn with_policy(mut self, policy: MalformedLinePolicy) -> Self {
        self.policy = policy;
        self
    }

    pub fn policy(&self) -> MalformedLinePolicy {
        self.policy
    }

    /// Classify one line; `line_num` is 1-based and only used for errors
    pub fn parse_line(&self, line: &str, line_num: usize) -> Result<PredictLine> {
        if let Some(rest) = line.strip_prefix(self.marker) {
            let name = rest.split_whitespace().next().unwrap_or_default();
            return Ok(PredictLine::Header(name.to_string()));
        }

        let mut fields = line.split_whitespace();
        let Some(id) = fields.next() else {
            return Ok(PredictLine::Blank);
        };

        let start = parse_coordinate(fields.next(), "start", line_num)?;
        let end = parse_coordinate(fields.next(), "end", line_num)?;

        Ok(PredictLine::Gene {
            id: id.to_string(),
            start,
            end,
            extra: fields.map(str::to_string).collect(),
        })
    }

    /// Parse every gene from a buffered reader, in input order
    pub fn parse_reader<R: BufRead>(&self, mut reader: R) -> Result<Vec<GenePrediction>> {
        let mut genes = Vec::new();
        let mut scaffold: Option<String> = None;
        let mut skipped = 0usize;
        let mut buf = Vec::new();
        let mut line_num = 0usize;

        loop {
            buf.clear();
            if reader.read_until(b'\n', &mut buf)? == 0 {
                break;
            }
            line_num += 1;

            let parsed =
                decode_line(&buf, line_num).and_then(|line| self.parse_line(line, line_num));
            match parsed {
                Ok(PredictLine::Blank) => {},
                Ok(PredictLine::Header(name)) => scaffold = Some(name),
                Ok(PredictLine::Gene {
                    id,
                    start,
                    end,
                    extra,
                }) => genes.push(GenePrediction {
                    scaffold: scaffold.clone(),
                    id,
                    start,
                    end,
                    extra,
                    line: line_num,
                }),
                Err(e) if self.policy == MalformedLinePolicy::Skip => {
                    warn!(line = line_num, error = %e, "Skipping malformed prediction line");
                    skipped += 1;
                },
                Err(e) => return Err(e),
            }
        }

        debug!(genes = genes.len(), skipped, "Parsed gene predictions");
        Ok(genes)
    }

    /// Parse predictions held in memory
    pub fn parse_str(&self, content: &str) -> Result<Vec<GenePrediction>> {
        self.parse_reader(content.as_bytes())
    }

    /// Parse a prediction file
    pub fn parse_file(&self, path: impl AsRef<Path>) -> Result<Vec<GenePrediction>> {
        let path = path.as_ref();
        let file = File::open(path).map_err(|e| IngestError::from_open(path, e))?;
        self.parse_reader(BufReader::new(file))
            .map_err(|e| e.with_path(path))
    }

    /// Gene lengths of a prediction file, in file order
    pub fn extract_lengths(&self, path: impl AsRef<Path>) -> Result<Vec<u64>> {
        let path = path.as_ref();
        let lengths: Vec<u64> = self
            .parse_file(path)?
            .iter()
            .map(GenePrediction::length)
            .collect();

        debug!(path = %path.display(), count = lengths.len(), "Extracted gene lengths");
        Ok(lengths)
    }
}

/// Line content without its terminator; invalid UTF-8 is a parse error
fn decode_line(raw: &[u8], line_num: usize) -> Result<&str> {
    let raw = raw.strip_suffix(b"\n").unwrap_or(raw);
    let raw = raw.strip_suffix(b"\r").unwrap_or(raw);
    std::str::from_utf8(raw)
        .map_err(|_| IngestError::parse(INPUT_LABEL, line_num, "line is not valid UTF-8"))
}

fn parse_coordinate(field: Option<&str>, name: &str, line_num: usize) -> Result<i64> {
    let field = field.ok_or_else(|| {
        IngestError::parse(
            INPUT_LABEL,
            line_num,
            format!("expected at least 3 fields, missing {} coordinate", name),
        )
    })?;

    field.parse().map_err(|_| {
        IngestError::parse(
            INPUT_LABEL,
            line_num,
            format!("invalid {} coordinate '{}'", name, field),
        )
    })
}

/// Gene lengths of a prediction file using the default parser
///
/// A missing file is reported as [`IngestError::FileNotFound`] and a malformed
/// data line as [`IngestError::Parse`]; neither yields an empty result.
pub fn extract_gene_lengths(path: impl AsRef<Path>) -> Result<Vec<u64>> {
    PredictParser::new().extract_lengths(path)
}
