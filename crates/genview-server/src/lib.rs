//! Genview Server Library
//!
//! HTTP front end for a genome assembly and annotation project directory.
//!
//! # Overview
//!
//! - **Dashboard**: the full report as one HTML page at `/`, rendered through
//!   the [`dashboard::DisplaySink`] abstraction
//! - **JSON API**: gene lengths, BLAST hits, assembly comparison and QC report
//!   listings under `/api/v1`
//! - **Reports and media**: raw FastQC/QUAST reports and project images
//! - **Configuration**: environment-based, see [`config::Config`]
//! - **Middleware**: CORS, request tracing and compression
//! - **Shutdown**: Ctrl+C/SIGTERM with a bounded drain, see [`shutdown::serve`]
//!
//! # Example
//!
//! ```no_run
//! use genview_ingest::Project;
//! use genview_server::{api, config::Config};
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let config = Config::load()?;
//!     let project = Project::open(&config.data.data_dir, config.data.manifest.as_deref())?;
//!     let app = api::create_router(api::AppState::new(project), &config);
//!     let listener = tokio::net::TcpListener::bind(config.bind_address()).await?;
//!     axum::serve(listener, app).await?;
//!     Ok(())
//! }
//! ```

pub mod api;
pub mod config;
pub mod dashboard;
pub mod error;
pub mod middleware;
pub mod shutdown;

// Re-export commonly used types
pub use dashboard::{render_dashboard, DisplaySink, HtmlPage, RenderOutcome};
pub use error::{AppError, AppResult};
