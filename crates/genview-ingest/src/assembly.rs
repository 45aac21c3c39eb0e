//! Assembly comparison table
//!
//! The numbers come from the assemblers' own summaries and are shown as-is.

pub use genview_common::types::AssemblyStats;

/// Column labels in display order
pub const ASSEMBLY_COLUMNS: [&str; 6] = [
    "Assembly",
    "Total Contigs",
    "Total Length (bp)",
    "Average Contig Length (bp)",
    "N50 (bp)",
    "L50",
];

/// The comparison produced for the Burkholderia assemblies
pub fn default_comparison() -> Vec<AssemblyStats> {
    vec![
        AssemblyStats {
            assembly: "Newbler".to_string(),
            total_contigs: 258,
            total_length: 7_800_775,
            average_contig_length: 30_235.56,
            n50: 100_802,
            l50: 25,
        },
        AssemblyStats {
            assembly: "Newbler with Long Reads".to_string(),
            total_contigs: 247,
            total_length: 7_800_100,
            average_contig_length: 31_579.35,
            n50: 107_247,
            l50: 23,
        },
        AssemblyStats {
            assembly: "SOAP-denovo".to_string(),
            total_contigs: 7_327,
            total_length: 8_877_951,
            average_contig_length: 1_211.68,
            n50: 6_117,
            l50: 436,
        },
    ]
}

/// Manifest rows when given, otherwise the built-in comparison
pub fn comparison_or_default(rows: &[AssemblyStats]) -> Vec<AssemblyStats> {
    if rows.is_empty() {
        default_comparison()
    } else {
        rows.to_vec()
    }
}

/// Most contiguous assembly: highest N50, then lowest L50
pub fn best_assembly(rows: &[AssemblyStats]) -> Option<&AssemblyStats> {
    rows.iter()
        .max_by(|a, b| a.n50.cmp(&b.n50).then_with(|| b.l50.cmp(&a.l50)))
}

/// Cells in column order, formatted for display
pub fn cells(row: &AssemblyStats) -> [String; 6] {
    [
        row.assembly.clone(),
        row.total_contigs.to_string(),
        row.total_length.to_string(),
        format!("{:.2}", row.average_contig_length),
        row.n50.to_string(),
        row.l50.to_string(),
    ]
}
