//! Dashboard rendering
//!
//! [`render_dashboard`] walks a [`Project`] in a fixed section order and hands
//! every piece of content to a [`DisplaySink`]. Sinks decide the output
//! format; [`HtmlPage`] produces a standalone document.
//!
//! A section that cannot load its data shows an error in place and the
//! remaining sections still render. Every such problem is recorded in the
//! returned [`RenderOutcome`].

pub mod chart;
mod content;
pub mod html;

pub use html::HtmlPage;

use base64::{engine::general_purpose::STANDARD, Engine as _};
use genview_ingest::assembly::{self, ASSEMBLY_COLUMNS};
use genview_ingest::blast::BLAST_COLUMNS;
use genview_ingest::lengths::BoxPlotSummary;
use genview_ingest::reports::{self, QcStage};
use genview_ingest::Project;
use serde::Serialize;
use std::path::Path;
use tracing::{debug, warn};

/// Default height of embedded reports, in pixels
pub const DEFAULT_EMBED_HEIGHT: u32 = 600;

/// Output primitives the dashboard is written against
pub trait DisplaySink {
    fn title(&mut self, text: &str);
    fn header(&mut self, text: &str);
    fn subheader(&mut self, text: &str);
    /// Paragraphs, `-`/`1.` lists and `**bold**`
    fn markdown(&mut self, text: &str);
    /// A complete HTML document shown in its own frame
    fn html_embed(&mut self, html: &str, height: u32);
    fn table(&mut self, columns: &[&str], rows: &[Vec<String>]);
    fn box_plot(&mut self, title: &str, axis_label: &str, summary: &BoxPlotSummary);
    fn image(&mut self, src: &str, caption: &str);
    fn error(&mut self, message: &str);
}

/// Dashboard sections in display order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Section {
    QualityCheck,
    Cleaning,
    Assembly,
    Comparison,
    GenePrediction,
    Blast,
    Images,
}

impl Section {
    pub const ALL: [Section; 7] = [
        Section::QualityCheck,
        Section::Cleaning,
        Section::Assembly,
        Section::Comparison,
        Section::GenePrediction,
        Section::Blast,
        Section::Images,
    ];

    pub fn title(self) -> &'static str {
        match self {
            Section::QualityCheck => "1. Quality Check of Input Sequences",
            Section::Cleaning => "2. Data Cleaning and Trimming",
            Section::Assembly => "3. Genome Assembly",
            Section::Comparison => "4. Comparison of Assemblies",
            Section::GenePrediction => "5. Gene Prediction and Annotation",
            Section::Blast => "6. BLAST Results",
            Section::Images => "7. Images",
        }
    }
}

impl std::fmt::Display for Section {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.title())
    }
}

/// A problem shown in place of some section content
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SectionWarning {
    pub section: Section,
    pub message: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct RenderOutcome {
    pub warnings: Vec<SectionWarning>,
}

impl RenderOutcome {
    /// True when every section rendered its data
    pub fn is_clean(&self) -> bool {
        self.warnings.is_empty()
    }

    pub fn warnings_for(&self, section: Section) -> impl Iterator<Item = &SectionWarning> {
        self.warnings.iter().filter(move |w| w.section == section)
    }
}

/// How images are referenced from the page
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MediaMode {
    /// Inline the file as a `data:` URI so the page stands alone
    Inline,
    /// Link to `<prefix>/<manifest entry>`, e.g. `/media/1.jpg`
    Linked(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderOptions {
    pub media: MediaMode,
    /// Show only this FastQC report before trimming; all reports when unset
    pub before_report: Option<String>,
    /// Show only this FastQC report after trimming; all reports when unset
    pub after_report: Option<String>,
    pub embed_height: u32,
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            media: MediaMode::Inline,
            before_report: None,
            after_report: None,
            embed_height: DEFAULT_EMBED_HEIGHT,
        }
    }
}

impl RenderOptions {
    pub fn linked(prefix: impl Into<String>) -> Self {
        Self {
            media: MediaMode::Linked(prefix.into()),
            ..Self::default()
        }
    }
}

/// Render every section with default options
pub fn render_dashboard(project: &Project, sink: &mut dyn DisplaySink) -> RenderOutcome {
    render_dashboard_with(project, &RenderOptions::default(), sink)
}

/// Render every section, isolating failures per section
pub fn render_dashboard_with(
    project: &Project,
    options: &RenderOptions,
    sink: &mut dyn DisplaySink,
) -> RenderOutcome {
    let mut renderer = Renderer {
        project,
        options,
        sink,
        outcome: RenderOutcome::default(),
    };

    renderer.intro();
    for section in Section::ALL {
        renderer.sink.header(section.title());
        match section {
            Section::QualityCheck => renderer.quality_check(),
            Section::Cleaning => renderer.cleaning(),
            Section::Assembly => renderer.sink.markdown(content::ASSEMBLY),
            Section::Comparison => renderer.comparison(),
            Section::GenePrediction => renderer.gene_prediction(),
            Section::Blast => {
                renderer.blast();
                renderer.narrative_sections();
            },
            Section::Images => renderer.images(),
        }
    }

    debug!(
        warnings = renderer.outcome.warnings.len(),
        "Dashboard rendered"
    );
    renderer.outcome
}

struct Renderer<'a> {
    project: &'a Project,
    options: &'a RenderOptions,
    sink: &'a mut dyn DisplaySink,
    outcome: RenderOutcome,
}

impl Renderer<'_> {
    fn warn(&mut self, section: Section, message: String) {
        warn!(section = ?section, "{}", message);
        self.sink.error(&message);
        self.outcome.warnings.push(SectionWarning { section, message });
    }

    fn intro(&mut self) {
        self.sink.title(self.project.title());
        let authors = &self.project.manifest().project.authors;
        if !authors.is_empty() {
            self.sink.markdown(&authors.join("\n\n"));
        }
        if let Some(description) = &self.project.manifest().project.description {
            self.sink.markdown(description);
        }
        self.sink.subheader("Project Overview");
        self.sink.markdown(content::OVERVIEW);
    }

    fn quality_check(&mut self) {
        self.sink.markdown(content::QUALITY_CHECK);
        let selected = self.options.before_report.clone();
        self.qc_reports(Section::QualityCheck, QcStage::BeforeTrimming, selected.as_deref());
    }

    fn cleaning(&mut self) {
        self.sink.markdown(content::CLEANING);
        let selected = self.options.after_report.clone();
        self.qc_reports(Section::Cleaning, QcStage::AfterTrimming, selected.as_deref());
    }

    fn qc_reports(&mut self, section: Section, stage: QcStage, selected: Option<&str>) {
        self.sink.subheader(stage.title());
        let dir = self.project.stage_dir(stage);

        let found = match self.project.reports(stage) {
            Ok(found) => found,
            Err(e) => return self.warn(section, e.to_string()),
        };
        if found.is_empty() {
            return self.warn(
                section,
                format!("No FastQC reports were found in '{}'.", dir.display()),
            );
        }

        let shown: Vec<_> = match selected {
            Some(name) => match reports::select_report(&found, Some(name)) {
                Some(report) => vec![report.clone()],
                None => {
                    return self.warn(
                        section,
                        format!("The report '{}' was not found in '{}'.", name, dir.display()),
                    )
                },
            },
            None => found,
        };

        for report in shown {
            match reports::load_report_html(&report) {
                Ok(html) => {
                    self.sink.markdown(&format!("**{}**", report.name));
                    self.sink.html_embed(&html, self.options.embed_height);
                },
                Err(e) => self.warn(section, e.to_string()),
            }
        }
    }

    fn comparison(&mut self) {
        let rows = self.project.assemblies();
        let cells: Vec<Vec<String>> = rows
            .iter()
            .map(|row| assembly::cells(row).to_vec())
            .collect();
        self.sink.table(&ASSEMBLY_COLUMNS, &cells);
        self.sink.markdown(content::KEY_METRICS);

        if let Some(best) = assembly::best_assembly(&rows) {
            self.sink.markdown(&format!(
                "**Conclusion:** {} gives the most contiguous assembly, with the highest N50 ({} bp) and an L50 of {}.",
                best.assembly, best.n50, best.l50
            ));
        }

        self.sink.subheader("Assembly Quality Report");
        match self.project.quast_report() {
            Ok(html) => {
                let wrapped = reports::wrap_with_white_background(&html);
                self.sink.html_embed(&wrapped, self.options.embed_height);
            },
            Err(e) => self.warn(Section::Comparison, e.to_string()),
        }
    }

    fn gene_prediction(&mut self) {
        self.sink.markdown(content::GENE_PREDICTION);

        let distribution = match self.project.gene_length_distribution() {
            Ok(distribution) => distribution,
            Err(e) => return self.warn(Section::GenePrediction, e.to_string()),
        };

        match &distribution.summary {
            Some(summary) => {
                self.sink
                    .box_plot(content::GENE_LENGTH_TITLE, content::GENE_LENGTH_AXIS, summary);
                self.sink.markdown(&format!(
                    "{} predicted genes shown, median length {:.0} bp. {} genes longer than {} bp are not plotted.",
                    summary.count, summary.median, distribution.excluded, distribution.threshold
                ));
            },
            None => self.sink.markdown(&format!(
                "No predicted genes of at most {} bp to plot ({} excluded).",
                distribution.threshold, distribution.excluded
            )),
        }
    }

    fn blast(&mut self) {
        self.sink.markdown(content::BLAST);
        match self.project.blast_hits() {
            Ok(hits) => {
                let rows: Vec<Vec<String>> = hits.iter().map(|h| h.cells().to_vec()).collect();
                self.sink.table(&BLAST_COLUMNS, &rows);
            },
            Err(e) => self.warn(Section::Blast, e.to_string()),
        }
    }

    /// Author-supplied sections from the manifest, in manifest order
    fn narrative_sections(&mut self) {
        for section in &self.project.manifest().sections {
            self.sink.subheader(&section.title);
            self.sink.markdown(&section.body);
        }
    }

    fn images(&mut self) {
        let options = self.options;
        let entries = self.project.image_entries().to_vec();
        for (i, entry) in entries.iter().enumerate() {
            let caption = format!("Image {}", i + 1);
            let path = self.project.image_path(entry);

            let src = match &options.media {
                MediaMode::Inline => match std::fs::read(&path) {
                    Ok(bytes) => data_uri(&path, &bytes),
                    Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                        self.warn(Section::Images, missing_file(entry));
                        continue;
                    },
                    Err(e) => {
                        self.warn(
                            Section::Images,
                            format!("Cannot read '{}': {}", path.display(), e),
                        );
                        continue;
                    },
                },
                MediaMode::Linked(prefix) => {
                    if !path.is_file() {
                        self.warn(Section::Images, missing_file(entry));
                        continue;
                    }
                    media_url(prefix, entry)
                },
            };

            self.sink.image(&src, &caption);
        }
    }
}

fn missing_file(entry: &Path) -> String {
    format!("The file '{}' was not found.", entry.display())
}

/// Media type for an image file, by extension
pub fn image_mime(path: &Path) -> mime::Mime {
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .map(str::to_ascii_lowercase);
    match ext.as_deref() {
        Some("jpg") | Some("jpeg") => mime::IMAGE_JPEG,
        Some("png") => mime::IMAGE_PNG,
        Some("gif") => mime::IMAGE_GIF,
        Some("svg") => mime::IMAGE_SVG,
        Some("bmp") => mime::IMAGE_BMP,
        _ => mime::APPLICATION_OCTET_STREAM,
    }
}

fn data_uri(path: &Path, bytes: &[u8]) -> String {
    format!("data:{};base64,{}", image_mime(path), STANDARD.encode(bytes))
}

/// URL of a data-dir entry under the media route
pub fn media_url(prefix: &str, entry: &Path) -> String {
    let segments: Vec<String> = entry
        .components()
        .filter_map(|c| match c {
            std::path::Component::Normal(s) => Some(s.to_string_lossy().into_owned()),
            _ => None,
        })
        .collect();
    format!("{}/{}", prefix.trim_end_matches('/'), segments.join("/"))
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    #[test]
    fn test_section_order_and_titles() {
        assert_eq!(Section::ALL.len(), 7);
        assert_eq!(Section::ALL[0].title(), "1. Quality Check of Input Sequences");
        assert_eq!(Section::Blast.to_string(), "6. BLAST Results");
    }

    #[test]
    fn test_image_mime() {
        assert_eq!(image_mime(Path::new("1.JPG")), mime::IMAGE_JPEG);
        assert_eq!(image_mime(Path::new("plot.png")), mime::IMAGE_PNG);
        assert_eq!(image_mime(Path::new("noext")), mime::APPLICATION_OCTET_STREAM);
    }

    #[test]
    fn test_media_url() {
        assert_eq!(media_url("/media/", &PathBuf::from("1.jpg")), "/media/1.jpg");
        assert_eq!(
            media_url("/media", &PathBuf::from("./figures/2.jpg")),
            "/media/figures/2.jpg"
        );
    }

    #[test]
    fn test_data_uri() {
        let uri = data_uri(Path::new("a.png"), b"abc");
        assert_eq!(uri, "data:image/png;base64,YWJj");
    }
}
