//! BLAST table and QC report loading tests

use genview_ingest::blast::{load_blast_hits, BLAST_COLUMNS};
use genview_ingest::reports::{discover_reports, load_quast_report, load_report_html, select_report};
use genview_ingest::IngestError;
use tempfile::TempDir;

const BLAST_TSV: &str = "scaffold1_orf00001\tref|WP_011545.1|\t99.1\t1203\t0.0\t2215\tWP_011545\tchromosomal replication initiator protein DnaA [Burkholderia cenocepacia]\n\
scaffold1_orf00002\tref|WP_006477.1|\t97.4\t1101\t3e-150\t1890\tWP_006477\tDNA polymerase III subunit beta [Burkholderia cenocepacia]\n\
scaffold2_orf00010\tref|WP_012211.1|\t88\t310\t2.2e-40\t402.5\tWP_012211\thypothetical protein [Burkholderia cenocepacia]\n";

#[test]
fn test_blast_rows_keep_file_order() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("sorted_file.tsv");
    std::fs::write(&path, BLAST_TSV).unwrap();

    let hits = load_blast_hits(&path).unwrap();
    assert_eq!(hits.len(), 3);
    assert_eq!(hits[0].query_id, "scaffold1_orf00001");
    assert_eq!(hits[1].evalue, 3e-150);
    assert_eq!(hits[2].percent_identity, 88.0);
    assert_eq!(hits[2].bit_score, 402.5);
    assert_eq!(BLAST_COLUMNS.len(), hits[0].cells().len());
}

#[test]
fn test_blast_missing_file() {
    let dir = TempDir::new().unwrap();
    let err = load_blast_hits(dir.path().join("sorted_file.tsv")).unwrap_err();
    assert!(err.is_not_found());
    assert_eq!(
        err.to_string(),
        format!("The file '{}' was not found.", dir.path().join("sorted_file.tsv").display())
    );
}

#[test]
fn test_blast_seven_columns_is_a_parse_error() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("sorted_file.tsv");
    std::fs::write(&path, "q1\ts1\t99.0\t100\t1e-5\t200\tACC1\n").unwrap();

    let err = load_blast_hits(&path).unwrap_err();
    match err {
        IngestError::Parse { path: p, line, .. } => {
            assert_eq!(p, path);
            assert_eq!(line, 1);
        },
        other => panic!("expected parse error, got {other:?}"),
    }
}

#[test]
fn test_blast_non_numeric_identity_is_a_parse_error() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("sorted_file.tsv");
    let content = format!("{}q9\ts9\thigh\t100\t1e-5\t200\tACC9\ttitle\n", BLAST_TSV);
    std::fs::write(&path, content).unwrap();

    assert!(matches!(
        load_blast_hits(&path),
        Err(IngestError::Parse { line: 4, .. })
    ));
}

#[test]
fn test_discover_reports_sorted_html_only() {
    let dir = TempDir::new().unwrap();
    let reports_dir = dir.path().join("fastqc_before");
    std::fs::create_dir(&reports_dir).unwrap();
    std::fs::write(reports_dir.join("SRR2_fastqc.html"), "<p>2</p>").unwrap();
    std::fs::write(reports_dir.join("SRR1_fastqc.html"), "<p>1</p>").unwrap();
    std::fs::write(reports_dir.join("SRR1_fastqc.zip"), "zip").unwrap();
    std::fs::create_dir(reports_dir.join("nested.html")).unwrap();

    let reports = discover_reports(&reports_dir).unwrap();
    let names: Vec<_> = reports.iter().map(|r| r.name.as_str()).collect();
    assert_eq!(names, vec!["SRR1_fastqc.html", "SRR2_fastqc.html"]);

    let selected = select_report(&reports, Some("SRR2_fastqc.html")).unwrap();
    assert_eq!(load_report_html(selected).unwrap(), "<p>2</p>");
}

#[test]
fn test_discover_reports_missing_directory_is_empty() {
    let dir = TempDir::new().unwrap();
    let reports = discover_reports(dir.path().join("fastqc_after")).unwrap();
    assert!(reports.is_empty());
}

#[test]
fn test_quast_report_missing() {
    let dir = TempDir::new().unwrap();
    let err = load_quast_report(dir.path().join("report.html")).unwrap_err();
    assert!(err.is_not_found());
}
