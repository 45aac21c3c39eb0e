//! Standalone HTML page sink
//!
//! Builds one self-contained document. Embedded reports are placed in
//! sandboxed `<iframe srcdoc>` elements so their styles and scripts stay
//! isolated from the page; all other text is escaped.

use super::chart::box_plot_svg;
use super::DisplaySink;
use chrono::{DateTime, Utc};
use genview_ingest::lengths::BoxPlotSummary;

const PAGE_STYLE: &str = r#"
body { background-color: #f8f9fa; color: #212529; font-family: Arial, sans-serif; margin: 0; }
main { max-width: 1200px; margin: 0 auto; padding: 20px; }
h1, h2, h3 { font-family: Arial, sans-serif; }
h2 { margin-top: 2.5em; border-bottom: 1px solid #dee2e6; padding-bottom: 0.3em; }
iframe.report { width: 100%; border: 1px solid #dee2e6; background: white; }
.table-wrap { overflow-x: auto; }
table { border-collapse: collapse; width: 100%; background: white; }
th, td { border: 1px solid #dee2e6; padding: 6px 10px; text-align: left; }
th { background: #e9ecef; }
.error { background: #f8d7da; color: #721c24; border: 1px solid #f5c6cb; border-radius: 5px; padding: 10px 14px; margin: 1em 0; }
.gallery { display: flex; gap: 16px; }
.gallery figure { flex: 1; margin: 0; text-align: center; }
.gallery img { width: 100%; height: auto; }
figure.chart svg { max-width: 100%; height: auto; background: white; }
footer { color: #6c757d; font-size: 0.85em; margin-top: 3em; }
"#;

/// Escape text for use in HTML element content and attribute values
pub fn escape_html(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&#39;")
}

/// `**bold**` spans on already-escaped text
fn inline_markup(escaped: &str) -> String {
    let mut out = String::with_capacity(escaped.len());
    let mut parts = escaped.split("**");
    let mut open = false;

    if let Some(first) = parts.next() {
        out.push_str(first);
    }
    let rest: Vec<&str> = parts.collect();
    let balanced = rest.len() % 2 == 0;
    for part in rest {
        if balanced {
            out.push_str(if open { "</strong>" } else { "<strong>" });
            open = !open;
        } else {
            out.push_str("**");
        }
        out.push_str(part);
    }
    out
}

fn list_item(line: &str, ordered: bool) -> Option<&str> {
    if ordered {
        let digits = line.chars().take_while(|c| c.is_ascii_digit()).count();
        if digits == 0 {
            return None;
        }
        line[digits..].strip_prefix(". ")
    } else {
        line.strip_prefix("- ")
    }
}

/// Render a small markdown subset: paragraphs, `-` and `1.` lists, bold
pub fn render_markdown(text: &str) -> String {
    let mut html = String::new();

    for block in text.split("\n\n") {
        let lines: Vec<&str> = block
            .lines()
            .map(str::trim)
            .filter(|l| !l.is_empty())
            .collect();
        if lines.is_empty() {
            continue;
        }

        let list = [false, true].into_iter().find(|ordered| {
            lines.iter().all(|l| list_item(l, *ordered).is_some())
        });

        match list {
            Some(ordered) => {
                let tag = if ordered { "ol" } else { "ul" };
                html.push_str(&format!("<{}>\n", tag));
                for line in lines {
                    let item = list_item(line, ordered).unwrap_or(line);
                    html.push_str(&format!("<li>{}</li>\n", inline_markup(&escape_html(item))));
                }
                html.push_str(&format!("</{}>\n", tag));
            },
            None => {
                let joined = lines.join(" ");
                html.push_str(&format!("<p>{}</p>\n", inline_markup(&escape_html(&joined))));
            },
        }
    }

    html
}

/// A [`DisplaySink`] that accumulates one HTML document
#[derive(Debug, Default)]
pub struct HtmlPage {
    title: Option<String>,
    body: String,
    in_gallery: bool,
    generated_at: Option<DateTime<Utc>>,
}

impl HtmlPage {
    pub fn new() -> Self {
        Self::default()
    }

    /// Stamp the footer with a generation time
    pub fn with_timestamp(mut self, at: DateTime<Utc>) -> Self {
        self.generated_at = Some(at);
        self
    }

    /// Markup emitted so far, without the surrounding document
    pub fn body(&self) -> &str {
        &self.body
    }

    fn close_gallery(&mut self) {
        if self.in_gallery {
            self.body.push_str("</div>\n");
            self.in_gallery = false;
        }
    }

    fn push(&mut self, markup: &str) {
        self.close_gallery();
        self.body.push_str(markup);
    }

    /// Complete the document
    pub fn finish(mut self) -> String {
        self.close_gallery();

        let title = escape_html(self.title.as_deref().unwrap_or("Genome Report"));
        let footer = self
            .generated_at
            .map(|at| {
                format!(
                    "<footer>Generated {}</footer>\n",
                    at.format("%Y-%m-%d %H:%M:%S UTC")
                )
            })
            .unwrap_or_default();

        format!(
            "<!DOCTYPE html>\n<html lang=\"en\">\n<head>\n<meta charset=\"utf-8\">\n\
             <meta name=\"viewport\" content=\"width=device-width, initial-scale=1\">\n\
             <title>{title}</title>\n<style>{PAGE_STYLE}</style>\n</head>\n<body>\n<main>\n\
             {body}{footer}</main>\n</body>\n</html>\n",
            body = self.body,
        )
    }
}

impl DisplaySink for HtmlPage {
    fn title(&mut self, text: &str) {
        if self.title.is_none() {
            self.title = Some(text.to_string());
        }
        self.push(&format!("<h1>{}</h1>\n", escape_html(text)));
    }

    fn header(&mut self, text: &str) {
        self.push(&format!("<h2>{}</h2>\n", escape_html(text)));
    }

    fn subheader(&mut self, text: &str) {
        self.push(&format!("<h3>{}</h3>\n", escape_html(text)));
    }

    fn markdown(&mut self, text: &str) {
        self.push(&render_markdown(text));
    }

    fn html_embed(&mut self, html: &str, height: u32) {
        self.push(&format!(
            "<iframe class=\"report\" sandbox=\"allow-scripts\" style=\"height: {}px\" srcdoc=\"{}\"></iframe>\n",
            height,
            escape_html(html)
        ));
    }

    fn table(&mut self, columns: &[&str], rows: &[Vec<String>]) {
        let mut markup = String::from("<div class=\"table-wrap\">\n<table>\n<thead><tr>");
        for column in columns {
            markup.push_str(&format!("<th>{}</th>", escape_html(column)));
        }
        markup.push_str("</tr></thead>\n<tbody>\n");
        for row in rows {
            markup.push_str("<tr>");
            for cell in row {
                markup.push_str(&format!("<td>{}</td>", escape_html(cell)));
            }
            markup.push_str("</tr>\n");
        }
        markup.push_str("</tbody>\n</table>\n</div>\n");
        self.push(&markup);
    }

    fn box_plot(&mut self, title: &str, axis_label: &str, summary: &BoxPlotSummary) {
        self.push(&format!(
            "<figure class=\"chart\">\n{}</figure>\n",
            box_plot_svg(title, axis_label, summary)
        ));
    }

    fn image(&mut self, src: &str, caption: &str) {
        if !self.in_gallery {
            self.body.push_str("<div class=\"gallery\">\n");
            self.in_gallery = true;
        }
        self.body.push_str(&format!(
            "<figure><img src=\"{}\" alt=\"{caption}\"><figcaption>{caption}</figcaption></figure>\n",
            escape_html(src),
            caption = escape_html(caption),
        ));
    }

    fn error(&mut self, message: &str) {
        self.push(&format!(
            "<div class=\"error\" role=\"alert\">{}</div>\n",
            escape_html(message)
        ));
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;

    #[test]
    fn test_escape_html() {
        assert_eq!(
            escape_html(r#"<a href="x">Tom & 'Jerry'</a>"#),
            "&lt;a href=&quot;x&quot;&gt;Tom &amp; &#39;Jerry&#39;&lt;/a&gt;"
        );
    }

    #[test]
    fn test_markdown_blocks() {
        let html = render_markdown("Intro line\ncontinues.\n\n- **Trim Galore** first\n- Cutadapt\n\n1. one\n2. two");
        assert!(html.contains("<p>Intro line continues.</p>"));
        assert!(html.contains("<ul>\n<li><strong>Trim Galore</strong> first</li>"));
        assert!(html.contains("<ol>\n<li>one</li>\n<li>two</li>\n</ol>"));
    }

    #[test]
    fn test_markdown_escapes_and_keeps_unbalanced_stars() {
        let html = render_markdown("a <b> ** c");
        assert_eq!(html, "<p>a &lt;b&gt; ** c</p>\n");
    }

    #[test]
    fn test_embed_is_escaped_into_srcdoc() {
        let mut page = HtmlPage::new();
        page.html_embed(r#"<p class="x">report</p>"#, 600);
        assert!(page
            .body()
            .contains(r#"srcdoc="&lt;p class=&quot;x&quot;&gt;report&lt;/p&gt;""#));
        assert!(page.body().contains("height: 600px"));
    }

    #[test]
    fn test_images_share_one_gallery() {
        let mut page = HtmlPage::new();
        page.image("1.jpg", "Image 1");
        page.image("2.jpg", "Image 2");
        page.error("The file '3.jpg' was not found.");

        let body = page.body();
        assert_eq!(body.matches("class=\"gallery\"").count(), 1);
        assert!(body.find("</div>").unwrap() < body.find("role=\"alert\"").unwrap());
    }

    #[test]
    fn test_finish_uses_first_title() {
        let mut page = HtmlPage::new();
        page.title("Genome <A>");
        page.table(&["Col"], &[vec!["v&1".to_string()]]);
        let doc = page.finish();

        assert!(doc.starts_with("<!DOCTYPE html>"));
        assert!(doc.contains("<title>Genome &lt;A&gt;</title>"));
        assert!(doc.contains("<td>v&amp;1</td>"));
        assert!(!doc.contains("<footer>"));
    }
}
