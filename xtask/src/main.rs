//! Build automation tasks for genview
//!
//! - Generating the CLI reference from the clap definitions

use clap::Parser;
use std::fs;
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "xtask")]
#[command(about = "Build automation tasks for genview", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Parser)]
enum Command {
    /// Generate the CLI reference in Markdown
    GenerateCliDocs {
        /// Output directory for generated documentation
        #[arg(short, long, default_value = "docs")]
        output_dir: String,
    },
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Command::GenerateCliDocs { output_dir } => generate_cli_docs(&output_dir)?,
    }

    Ok(())
}

fn generate_cli_docs(output_dir: &str) -> anyhow::Result<()> {
    println!("Generating CLI documentation...");

    let markdown = clap_markdown::help_markdown::<genview_cli::Cli>();

    let content = format!(
        r#"# genview CLI Reference

This documentation is generated from the CLI source code. Last updated: {}.

## Overview

genview inspects the results directory of a bacterial genome assembly and
annotation run: FastQC and QUAST reports, Glimmer gene predictions, BLAST
hits and figures. It prints them in the terminal or renders the whole
dashboard as one HTML file.

## Quick Start

```bash
# Write genview.yml describing where the results live
genview init --data-dir results/ --title "Burkholderia assembly"

# Check which artifacts are present
genview status --data-dir results/

# Gene lengths below the 100000 bp threshold, one per line
genview lengths --data-dir results/

# Distribution summary
genview lengths --data-dir results/ --summary

# Standalone report
genview render --data-dir results/ --output report.html
```

## Commands

{}

## Environment Variables

- `GENVIEW_DATA_DIR` - Project directory (default: `.`)
- `GENVIEW_MANIFEST` - Manifest path (default: `genview.yml` in the data directory)
- `LOG_LEVEL` - Logging level (`trace`, `debug`, `info`, `warn`, `error`)
- `LOG_FILTER` - Extra `tracing` filter directives

## Manifest

```yaml
project:
  title: Eubacterial Genome Assembly and Annotation
  authors: ["Student: ...", "Professor: ..."]
layout:
  fastqc_before: fastqc_before
  fastqc_after: fastqc_after
  quast_report: report.html
  gene_predictions: run_tres.predict
  blast_results: sorted_file.tsv
  images: [1.jpg, 2.jpg, 3.jpg]
max_gene_length: 100000
skip_malformed: false
sections:
  - title: Conclusion
    body: Free text shown after the BLAST results.
```

---

*To update, run `cargo xtask generate-cli-docs`.*
"#,
        chrono::Utc::now().format("%Y-%m-%d"),
        markdown
    );

    let output_path = PathBuf::from(output_dir);
    fs::create_dir_all(&output_path)?;

    let file_path = output_path.join("cli-reference.md");
    fs::write(&file_path, content)?;

    println!("✅ Generated CLI documentation at: {}", file_path.display());

    Ok(())
}
