//! `genview assemblies` command implementation

use crate::error::Result;
use crate::output::render_table;
use crate::TableFormat;
use colored::Colorize;
use genview_ingest::assembly::{self, AssemblyStats, ASSEMBLY_COLUMNS};
use genview_ingest::Project;
use serde::Serialize;

#[derive(Debug, Serialize)]
struct AssembliesReport<'a> {
    columns: [&'static str; 6],
    rows: &'a [AssemblyStats],
    best: Option<&'a str>,
}

/// Print the assembly comparison and the most contiguous assembly
pub fn run(project: &Project, format: TableFormat) -> Result<()> {
    let rows = project.assemblies();
    let best = assembly::best_assembly(&rows).map(|row| row.assembly.as_str());

    match format {
        TableFormat::Json => {
            let report = AssembliesReport {
                columns: ASSEMBLY_COLUMNS,
                rows: &rows,
                best,
            };
            println!("{}", serde_json::to_string_pretty(&report)?);
        },
        TableFormat::Table => {
            print!(
                "{}",
                render_table(&ASSEMBLY_COLUMNS, rows.iter().map(|r| assembly::cells(r).to_vec()))
            );
            if let Some(best) = best {
                println!("{} {}", "Most contiguous:".cyan().bold(), best);
            }
        },
    }

    Ok(())
}
