//! CLI command implementations
//!
//! Each subcommand has its own module with a `run` function.

pub mod assemblies;
pub mod blast;
pub mod init;
pub mod lengths;
pub mod reports;
pub mod render;
pub mod status;

use crate::error::Result;
use genview_ingest::Project;
use std::path::Path;
use tracing::debug;

/// Open the project the global flags point at
pub fn open_project(data_dir: &Path, manifest: Option<&Path>) -> Result<Project> {
    let project = Project::open(data_dir, manifest)?;
    debug!(
        data_dir = %project.data_dir().display(),
        title = %project.title(),
        "Opened project"
    );
    Ok(project)
}
