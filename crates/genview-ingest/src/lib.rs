//! genview Ingest Library
//!
//! Loaders for the precomputed artifacts of a genome assembly and annotation
//! project. Nothing here computes biology; every function reads a file that
//! an external pipeline already produced.
//!
//! # Supported Artifacts
//!
//! - **Gene predictions**: Glimmer `.predict` files, reduced to gene lengths
//! - **BLAST results**: eight-column tabular output
//! - **Assembly comparison**: contiguity statistics per assembler
//! - **QC reports**: FastQC and QUAST HTML reports
//!
//! # Example
//!
//! ```no_run
//! use genview_ingest::{lengths::LengthFilter, predict::extract_gene_lengths};
//!
//! fn main() -> anyhow::Result<()> {
//!     let lengths = extract_gene_lengths("run_tres.predict")?;
//!     let distribution = LengthFilter::default().apply(&lengths);
//!     println!("{} genes charted, {} excluded", distribution.kept.len(), distribution.excluded);
//!     Ok(())
//! }
//! ```

pub mod assembly;
pub mod blast;
pub mod error;
pub mod lengths;
pub mod predict;
pub mod project;
pub mod reports;

pub use error::{IngestError, Result};
pub use project::Project;
