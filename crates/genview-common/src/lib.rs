//! genview Common Library
#![deny(clippy::unwrap_used, clippy::expect_used)]
//!
//! Shared types, utilities, and error handling for the genview workspace.
//!
//! # Overview
//!
//! This crate provides common functionality used across all genview members:
//!
//! - **Error Handling**: Custom error types and result types
//! - **Logging**: One place to configure `tracing` for every binary
//! - **Manifest**: The `genview.yml` project layout
//! - **Checksums**: Artifact fingerprints for `genview status`
//! - **Types**: Shared artifact descriptors
//!
//! # Example
//!
//! ```no_run
//! use genview_common::manifest::Manifest;
//! use genview_common::Result;
//!
//! fn predictions_path() -> Result<std::path::PathBuf> {
//!     let manifest = Manifest::load_or_default("genview.yml")?;
//!     Ok(manifest.layout.resolve(".", &manifest.layout.gene_predictions))
//! }
//! ```

pub mod checksum;
pub mod error;
pub mod logging;
pub mod manifest;
pub mod types;

// Re-export commonly used types
pub use error::{GenviewError, Result};
