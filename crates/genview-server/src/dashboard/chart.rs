//! Inline SVG box plot

use super::html::escape_html;
use genview_ingest::lengths::BoxPlotSummary;
use std::fmt::Write;

pub const CHART_WIDTH: f64 = 800.0;
pub const CHART_HEIGHT: f64 = 600.0;

const MARGIN_LEFT: f64 = 100.0;
const MARGIN_RIGHT: f64 = 40.0;
const MARGIN_TOP: f64 = 70.0;
const MARGIN_BOTTOM: f64 = 40.0;
const BOX_WIDTH: f64 = 180.0;
const TARGET_TICKS: f64 = 6.0;

/// Vertical value axis mapped onto the plot area
#[derive(Debug, Clone, Copy)]
struct Axis {
    lo: f64,
    hi: f64,
    step: f64,
}

impl Axis {
    fn for_summary(summary: &BoxPlotSummary) -> Self {
        let mut lo = summary.min as f64;
        let mut hi = summary.max as f64;
        if hi - lo < 1.0 {
            lo -= 1.0;
            hi += 1.0;
        }
        let pad = (hi - lo) * 0.05;
        lo = (lo - pad).max(0.0);
        hi += pad;

        let step = nice_step((hi - lo) / TARGET_TICKS);
        Self { lo, hi, step }
    }

    fn y(&self, value: f64) -> f64 {
        let plot_height = CHART_HEIGHT - MARGIN_TOP - MARGIN_BOTTOM;
        MARGIN_TOP + (self.hi - value) / (self.hi - self.lo) * plot_height
    }

    fn ticks(&self) -> Vec<f64> {
        let first = (self.lo / self.step).ceil() as i64;
        let last = (self.hi / self.step).floor() as i64;
        (first..=last).map(|i| i as f64 * self.step).collect()
    }
}

/// Round a raw tick interval to 1, 2 or 5 times a power of ten
fn nice_step(raw: f64) -> f64 {
    if raw <= 0.0 || !raw.is_finite() {
        return 1.0;
    }
    let magnitude = 10f64.powf(raw.log10().floor());
    let fraction = raw / magnitude;
    let nice = if fraction <= 1.0 {
        1.0
    } else if fraction <= 2.0 {
        2.0
    } else if fraction <= 5.0 {
        5.0
    } else {
        10.0
    };
    nice * magnitude
}

fn format_tick(value: f64, step: f64) -> String {
    if step >= 1.0 {
        format!("{:.0}", value)
    } else {
        let decimals = (-step.log10().floor()).max(0.0) as usize;
        format!("{:.*}", decimals, value)
    }
}

/// Render a single vertical box plot as a standalone `<svg>` element
pub fn box_plot_svg(title: &str, axis_label: &str, summary: &BoxPlotSummary) -> String {
    let axis = Axis::for_summary(summary);
    let center = MARGIN_LEFT + (CHART_WIDTH - MARGIN_LEFT - MARGIN_RIGHT) / 2.0;
    let left = center - BOX_WIDTH / 2.0;
    let cap_half = BOX_WIDTH / 4.0;
    let mut svg = String::new();

    // Writing to a String cannot fail.
    let _ = writeln!(
        svg,
        r#"<svg xmlns="http://www.w3.org/2000/svg" class="box-plot" viewBox="0 0 {w} {h}" width="{w}" height="{h}" role="img" aria-label="{title}">"#,
        w = CHART_WIDTH,
        h = CHART_HEIGHT,
        title = escape_html(title),
    );
    let _ = writeln!(
        svg,
        r#"<text x="{x}" y="36" text-anchor="middle" font-size="20">{}</text>"#,
        escape_html(title),
        x = CHART_WIDTH / 2.0,
    );
    let _ = writeln!(
        svg,
        r#"<text transform="translate(24 {y}) rotate(-90)" text-anchor="middle" font-size="16">{}</text>"#,
        escape_html(axis_label),
        y = MARGIN_TOP + (CHART_HEIGHT - MARGIN_TOP - MARGIN_BOTTOM) / 2.0,
    );

    let _ = writeln!(
        svg,
        r##"<line x1="{x}" y1="{top}" x2="{x}" y2="{bottom}" stroke="#444"/>"##,
        x = MARGIN_LEFT,
        top = MARGIN_TOP,
        bottom = CHART_HEIGHT - MARGIN_BOTTOM,
    );
    for tick in axis.ticks() {
        let y = axis.y(tick);
        let _ = writeln!(
            svg,
            r##"<line x1="{x1}" y1="{y:.1}" x2="{x2}" y2="{y:.1}" stroke="#e5e5e5"/><text x="{tx}" y="{ty:.1}" text-anchor="end" font-size="14">{label}</text>"##,
            x1 = MARGIN_LEFT,
            x2 = CHART_WIDTH - MARGIN_RIGHT,
            tx = MARGIN_LEFT - 8.0,
            ty = y + 5.0,
            label = format_tick(tick, axis.step),
        );
    }

    let q1 = axis.y(summary.q1);
    let q3 = axis.y(summary.q3);
    let median = axis.y(summary.median);
    let lower = axis.y(summary.lower_whisker as f64);
    let upper = axis.y(summary.upper_whisker as f64);

    let _ = writeln!(
        svg,
        r##"<g class="whiskers" stroke="#1f77b4" stroke-width="2"><line x1="{c}" y1="{upper:.1}" x2="{c}" y2="{q3:.1}"/><line x1="{c}" y1="{q1:.1}" x2="{c}" y2="{lower:.1}"/><line x1="{cl}" y1="{upper:.1}" x2="{cr}" y2="{upper:.1}"/><line x1="{cl}" y1="{lower:.1}" x2="{cr}" y2="{lower:.1}"/></g>"##,
        c = center,
        cl = center - cap_half,
        cr = center + cap_half,
    );
    let _ = writeln!(
        svg,
        r##"<rect class="box" x="{left}" y="{q3:.1}" width="{bw}" height="{bh:.1}" fill="#1f77b4" fill-opacity="0.35" stroke="#1f77b4" stroke-width="2"><title>n={n} min={min} q1={sq1:.1} median={smed:.1} q3={sq3:.1} max={max} mean={mean:.1}</title></rect>"##,
        bw = BOX_WIDTH,
        bh = (q1 - q3).max(1.0),
        n = summary.count,
        min = summary.min,
        sq1 = summary.q1,
        smed = summary.median,
        sq3 = summary.q3,
        max = summary.max,
        mean = summary.mean,
    );
    let _ = writeln!(
        svg,
        r##"<line class="median" x1="{left}" y1="{median:.1}" x2="{right}" y2="{median:.1}" stroke="#0b3d62" stroke-width="3"/>"##,
        right = left + BOX_WIDTH,
    );

    if !summary.outliers.is_empty() {
        svg.push_str(r##"<g class="outliers" fill="none" stroke="#1f77b4">"##);
        for value in &summary.outliers {
            let _ = write!(
                svg,
                r#"<circle cx="{center}" cy="{:.1}" r="3"/>"#,
                axis.y(*value as f64)
            );
        }
        svg.push_str("</g>\n");
    }

    svg.push_str("</svg>\n");
    svg
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;

    #[test]
    fn test_nice_step() {
        let close = |a: f64, b: f64| (a - b).abs() < 1e-9;
        assert_eq!(nice_step(0.0), 1.0);
        assert!(close(nice_step(3.0), 5.0));
        assert!(close(nice_step(140.0), 200.0));
        assert!(close(nice_step(900.0), 1000.0));
    }

    #[test]
    fn test_axis_maps_extremes_inside_plot() {
        let summary = BoxPlotSummary::from_lengths(&[100, 200, 300, 5000]).unwrap();
        let axis = Axis::for_summary(&summary);
        let top = axis.y(summary.max as f64);
        let bottom = axis.y(summary.min as f64);
        assert!(top >= MARGIN_TOP);
        assert!(bottom <= CHART_HEIGHT - MARGIN_BOTTOM);
        assert!(top < bottom);
        assert!(!axis.ticks().is_empty());
    }

    #[test]
    fn test_svg_contains_box_and_outliers() {
        let summary = BoxPlotSummary::from_lengths(&[10, 11, 12, 13, 14, 500]).unwrap();
        let svg = box_plot_svg("Gene Length Distribution", "Gene Length (bp)", &summary);

        assert!(svg.starts_with("<svg"));
        assert!(svg.contains("Gene Length Distribution"));
        assert!(svg.contains("Gene Length (bp)"));
        assert!(svg.contains(r#"class="box""#));
        assert_eq!(svg.matches("<circle").count(), summary.outliers.len());
    }

    #[test]
    fn test_single_value_does_not_divide_by_zero() {
        let summary = BoxPlotSummary::from_lengths(&[42]).unwrap();
        let svg = box_plot_svg("t", "a", &summary);
        assert!(!svg.contains("NaN"));
        assert!(!svg.contains("inf"));
    }
}
