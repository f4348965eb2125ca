//! Vector export of the current plot.
//!
//! The session hands a [`PlotView`] (title, samples, axis metadata) to a
//! [`PlotRenderer`]. [`SvgRenderer`] is the built-in renderer; it draws the
//! frame, grid with tick labels, crosshair lines at x = 0 and y = 0 and the
//! curve as a polyline.

use std::fmt::Write as _;
use std::io::Write;
use std::path::Path;

use crate::data::function::Sample;
use crate::error::ExportError;

/// Axis title plus the visible value range.
#[derive(Debug, Clone, PartialEq)]
pub struct AxisSpec {
    pub title: &'static str,
    pub min: f64,
    pub max: f64,
}

impl AxisSpec {
    /// Position of `v` along the axis, 0 at `min` and 1 at `max`.
    ///
    /// Halving first keeps the span finite for ranges near `f64::MAX`.
    fn fraction(&self, v: f64) -> f64 {
        (v * 0.5 - self.min * 0.5) / (self.max * 0.5 - self.min * 0.5)
    }
}

/// Everything a renderer needs to draw one plot.
#[derive(Debug, Clone)]
pub struct PlotView<'a> {
    pub title: &'a str,
    pub samples: &'a [Sample],
    pub x_axis: AxisSpec,
    pub y_axis: AxisSpec,
    /// Draw the black lines through x = 0 and y = 0.
    pub crosshair: bool,
}

impl<'a> PlotView<'a> {
    /// Build a view whose x-axis spans `x_range` and whose y-axis fits the samples.
    pub fn new(title: &'a str, samples: &'a [Sample], x_range: (f64, f64)) -> Self {
        let (x_min, x_max) = ordered_range(x_range.0, x_range.1);
        let (y_min, y_max) = fit_y_range(samples);
        Self {
            title,
            samples,
            x_axis: AxisSpec {
                title: "x",
                min: x_min,
                max: x_max,
            },
            y_axis: AxisSpec {
                title: "f(x)",
                min: y_min,
                max: y_max,
            },
            crosshair: true,
        }
    }
}

fn ordered_range(a: f64, b: f64) -> (f64, f64) {
    if !a.is_finite() || !b.is_finite() {
        return (-1.0, 1.0);
    }
    let (lo, hi) = if a <= b { (a, b) } else { (b, a) };
    if is_flat(lo, hi) {
        widen(lo, hi)
    } else {
        (lo, hi)
    }
}

/// True if `[lo, hi]` is too narrow to draw, relative to its magnitude.
fn is_flat(lo: f64, hi: f64) -> bool {
    let scale = lo.abs().max(hi.abs()).max(1.0);
    hi - lo <= 1e-12 * scale
}

/// Give a zero-width range a visible extent; at large magnitudes a fixed
/// margin of 1 would vanish in rounding.
fn widen(lo: f64, hi: f64) -> (f64, f64) {
    let pad = (lo.abs().max(hi.abs()) * 1e-9).max(1.0);
    (lo - pad, hi + pad)
}

fn fit_y_range(samples: &[Sample]) -> (f64, f64) {
    let (lo, hi) = samples
        .iter()
        .map(|s| s.y)
        .filter(|y| y.is_finite())
        .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), y| {
            (lo.min(y), hi.max(y))
        });
    if !lo.is_finite() {
        return (-1.0, 1.0);
    }
    if is_flat(lo, hi) {
        return widen(lo, hi);
    }
    let pad = hi * 0.05 - lo * 0.05;
    let (padded_lo, padded_hi) = (lo - pad, hi + pad);
    if padded_lo.is_finite() && padded_hi.is_finite() {
        (padded_lo, padded_hi)
    } else {
        (lo, hi)
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Ticks
// ─────────────────────────────────────────────────────────────────────────────

/// Round `raw` to 1, 2 or 5 times a power of ten.
pub fn nice_step(raw: f64) -> f64 {
    if !(raw > 0.0) || !raw.is_finite() {
        return 1.0;
    }
    let base = 10f64.powf(raw.log10().floor());
    let frac = raw / base;
    let nice = if frac <= 1.0 {
        1.0
    } else if frac <= 2.0 {
        2.0
    } else if frac <= 5.0 {
        5.0
    } else {
        10.0
    };
    nice * base
}

/// Tick positions covering `[min, max]` with roughly `target` intervals.
///
/// Never returns more than `4 * target + 2` ticks.
pub fn nice_ticks(min: f64, max: f64, target: usize) -> (f64, Vec<f64>) {
    if !(max > min) || !min.is_finite() || !max.is_finite() {
        return (1.0, Vec::new());
    }
    let target = target.max(1);
    let step = nice_step(max / target as f64 - min / target as f64);
    let first = (min / step).ceil();
    let eps = step * 1e-9;
    let ticks = (0..target * 4 + 2)
        .map(|i| (first + i as f64) * step)
        .take_while(|v| *v <= max + eps)
        .map(|v| if v.abs() < eps { 0.0 } else { v })
        .collect();
    (step, ticks)
}

/// Format a tick value with as many decimals as the step needs.
pub fn format_tick(value: f64, step: f64) -> String {
    if value.abs() >= 1e6 {
        return format!("{:.1e}", value);
    }
    let decimals = if step >= 1.0 {
        0
    } else {
        (-step.log10().floor()).max(0.0) as usize
    };
    format!("{:.*}", decimals, value)
}

// ─────────────────────────────────────────────────────────────────────────────
// Renderers
// ─────────────────────────────────────────────────────────────────────────────

/// Something that turns a [`PlotView`] into a document.
pub trait PlotRenderer {
    fn render(&self, view: &PlotView<'_>, out: &mut dyn Write) -> std::io::Result<()>;

    /// File extension of the produced documents.
    fn extension(&self) -> &'static str {
        "svg"
    }
}

/// Self-contained SVG renderer.
#[derive(Debug, Clone, PartialEq)]
pub struct SvgRenderer {
    pub width: u32,
    pub height: u32,
    /// Title, axis titles and tick labels.
    pub show_labels: bool,
}

impl Default for SvgRenderer {
    fn default() -> Self {
        Self {
            width: 640,
            height: 480,
            show_labels: true,
        }
    }
}

struct Frame {
    left: f64,
    top: f64,
    width: f64,
    height: f64,
}

impl SvgRenderer {
    /// Square, label-free variant used for icons.
    pub fn thumbnail(size: u32) -> Self {
        Self {
            width: size,
            height: size,
            show_labels: false,
        }
    }

    fn frame(&self) -> Frame {
        let (left, right, top, bottom) = if self.show_labels {
            (64.0, 20.0, 40.0, 52.0)
        } else {
            (2.0, 2.0, 2.0, 2.0)
        };
        Frame {
            left,
            top,
            width: (self.width as f64 - left - right).max(1.0),
            height: (self.height as f64 - top - bottom).max(1.0),
        }
    }

    /// Render into an in-memory string.
    pub fn render_to_string(&self, view: &PlotView<'_>) -> Result<String, std::fmt::Error> {
        let mut s = String::new();
        self.write_document(view, &mut s)?;
        Ok(s)
    }

    fn write_document(&self, view: &PlotView<'_>, s: &mut String) -> std::fmt::Result {
        let f = self.frame();
        let xa = &view.x_axis;
        let ya = &view.y_axis;
        let px = |x: f64| f.left + xa.fraction(x) * f.width;
        let py = |y: f64| f.top + (1.0 - ya.fraction(y)) * f.height;
        let right = f.left + f.width;
        let bottom = f.top + f.height;

        writeln!(s, r#"<?xml version="1.0" encoding="UTF-8" standalone="no"?>"#)?;
        writeln!(
            s,
            r#"<svg xmlns="http://www.w3.org/2000/svg" version="1.1" width="{w}" height="{h}" viewBox="0 0 {w} {h}">"#,
            w = self.width,
            h = self.height
        )?;
        writeln!(
            s,
            r#"<defs><clipPath id="plot-area"><rect x="{:.2}" y="{:.2}" width="{:.2}" height="{:.2}"/></clipPath></defs>"#,
            f.left, f.top, f.width, f.height
        )?;
        writeln!(
            s,
            r##"<rect x="0" y="0" width="{}" height="{}" fill="#ffffff"/>"##,
            self.width, self.height
        )?;

        // grid
        let (x_step, x_ticks) = nice_ticks(xa.min, xa.max, 8);
        let (y_step, y_ticks) = nice_ticks(ya.min, ya.max, 6);
        writeln!(s, r##"<g stroke="#dcdcdc" stroke-width="0.5">"##)?;
        for &x in &x_ticks {
            writeln!(
                s,
                r#"<line x1="{0:.2}" y1="{1:.2}" x2="{0:.2}" y2="{2:.2}"/>"#,
                px(x),
                f.top,
                bottom
            )?;
        }
        for &y in &y_ticks {
            writeln!(
                s,
                r#"<line x1="{1:.2}" y1="{0:.2}" x2="{2:.2}" y2="{0:.2}"/>"#,
                py(y),
                f.left,
                right
            )?;
        }
        writeln!(s, "</g>")?;
        writeln!(
            s,
            r##"<rect x="{:.2}" y="{:.2}" width="{:.2}" height="{:.2}" fill="none" stroke="#000000" stroke-width="1"/>"##,
            f.left, f.top, f.width, f.height
        )?;

        writeln!(s, r#"<g clip-path="url(#plot-area)">"#)?;
        if view.crosshair {
            if ya.min <= 0.0 && 0.0 <= ya.max {
                writeln!(
                    s,
                    r##"<line x1="{1:.2}" y1="{0:.2}" x2="{2:.2}" y2="{0:.2}" stroke="#000000" stroke-width="1.5"/>"##,
                    py(0.0),
                    f.left,
                    right
                )?;
            }
            if xa.min <= 0.0 && 0.0 <= xa.max {
                writeln!(
                    s,
                    r##"<line x1="{0:.2}" y1="{1:.2}" x2="{0:.2}" y2="{2:.2}" stroke="#000000" stroke-width="1.5"/>"##,
                    px(0.0),
                    f.top,
                    bottom
                )?;
            }
        }
        // non-finite samples break the curve into separate polylines
        for run in view
            .samples
            .split(|p| !p.x.is_finite() || !p.y.is_finite())
            .filter(|run| !run.is_empty())
        {
            let points: Vec<String> = run
                .iter()
                .map(|p| format!("{:.2},{:.2}", px(p.x), py(p.y)))
                .collect();
            writeln!(
                s,
                r##"<polyline points="{}" fill="none" stroke="#0000ff" stroke-width="2" stroke-linejoin="round"/>"##,
                points.join(" ")
            )?;
        }
        writeln!(s, "</g>")?;

        if self.show_labels {
            writeln!(
                s,
                r##"<g font-family="sans-serif" font-size="11" fill="#000000">"##
            )?;
            for &x in &x_ticks {
                writeln!(
                    s,
                    r#"<text x="{:.2}" y="{:.2}" text-anchor="middle">{}</text>"#,
                    px(x),
                    bottom + 14.0,
                    format_tick(x, x_step)
                )?;
            }
            for &y in &y_ticks {
                writeln!(
                    s,
                    r#"<text x="{:.2}" y="{:.2}" text-anchor="end">{}</text>"#,
                    f.left - 6.0,
                    py(y) + 4.0,
                    format_tick(y, y_step)
                )?;
            }
            writeln!(s, "</g>")?;
            writeln!(
                s,
                r#"<text x="{:.2}" y="26" font-family="sans-serif" font-size="18" font-weight="bold" text-anchor="middle">{}</text>"#,
                self.width as f64 / 2.0,
                escape_xml(view.title)
            )?;
            writeln!(
                s,
                r#"<text x="{:.2}" y="{:.2}" font-family="sans-serif" font-size="16" text-anchor="middle">{}</text>"#,
                f.left + f.width / 2.0,
                self.height as f64 - 10.0,
                escape_xml(xa.title)
            )?;
            writeln!(
                s,
                r#"<text x="18" y="{0:.2}" font-family="sans-serif" font-size="16" text-anchor="middle" transform="rotate(-90 18 {0:.2})">{1}</text>"#,
                f.top + f.height / 2.0,
                escape_xml(ya.title)
            )?;
        }
        writeln!(s, "</svg>")
    }
}

impl PlotRenderer for SvgRenderer {
    fn render(&self, view: &PlotView<'_>, out: &mut dyn Write) -> std::io::Result<()> {
        let doc = self.render_to_string(view).map_err(std::io::Error::other)?;
        out.write_all(doc.as_bytes())
    }
}

fn escape_xml(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&apos;"),
            _ => out.push(c),
        }
    }
    out
}

/// Render `view` with `renderer` and write the document to `path`.
///
/// The document is rendered fully in memory first, so a renderer failure never
/// leaves a truncated file behind.
pub fn export_to_path(
    renderer: &dyn PlotRenderer,
    view: &PlotView<'_>,
    path: &Path,
) -> Result<(), ExportError> {
    let mut buf = Vec::new();
    renderer
        .render(view, &mut buf)
        .map_err(|e| ExportError::from_io(path, e))?;
    std::fs::write(path, buf).map_err(|e| ExportError::from_io(path, e))?;
    tracing::info!("Exported plot to {}", path.display());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn nice_step_rounds_up() {
        assert_eq!(nice_step(0.3), 0.5);
        assert_eq!(nice_step(1.0), 1.0);
        assert_eq!(nice_step(1.5), 2.0);
        assert_eq!(nice_step(7.0), 10.0);
    }

    #[test]
    fn ticks_cover_symmetric_range() {
        let (step, ticks) = nice_ticks(-2.0, 2.0, 8);
        assert_eq!(step, 0.5);
        assert_eq!(ticks.first().copied(), Some(-2.0));
        assert_eq!(ticks.last().copied(), Some(2.0));
        assert!(ticks.contains(&0.0));
    }

    #[test]
    fn tick_labels_follow_step() {
        assert_eq!(format_tick(0.5, 0.5), "0.5");
        assert_eq!(format_tick(2.0, 1.0), "2");
        assert_eq!(format_tick(0.25, 0.05), "0.25");
    }

    #[test]
    fn flat_curves_get_a_visible_range() {
        let samples = [Sample { x: 0.0, y: 0.0 }, Sample { x: 1.0, y: 0.0 }];
        let view = PlotView::new("flat", &samples, (0.0, 1.0));
        assert_eq!((view.y_axis.min, view.y_axis.max), (-1.0, 1.0));
    }

    #[test]
    fn extreme_ranges_yield_bounded_ticks() {
        let (step, ticks) = nice_ticks(-1e308, 1e308, 8);
        assert!(step.is_finite());
        assert!(!ticks.is_empty() && ticks.len() <= 8 * 4 + 2);
        assert!(ticks.iter().all(|t| t.abs() <= 1.000001e308));
        assert_eq!(format_tick(5e307, step), "5.0e307");
    }

    #[test]
    fn large_flat_ranges_are_widened() {
        let (lo, hi) = ordered_range(1e16, 1e16);
        assert!(hi > lo);
        let samples = [Sample { x: 1e16, y: 3e16 }, Sample { x: 1e16, y: 3e16 }];
        let view = PlotView::new("flat", &samples, (1e16, 1e16));
        assert!(view.y_axis.max > view.y_axis.min);
        let svg = SvgRenderer::default().render_to_string(&view).unwrap();
        assert!(!svg.contains("NaN") && !svg.contains("inf"));
    }

    #[test]
    fn huge_ranges_render_finite_coordinates() {
        let samples = [Sample { x: -1e308, y: -1e308 }, Sample { x: 1e308, y: 1e308 }];
        let view = PlotView::new("huge", &samples, (-1e308, 1e308));
        let svg = SvgRenderer::default().render_to_string(&view).unwrap();
        assert!(!svg.contains("NaN") && !svg.contains("inf"));
        assert!(svg.contains("<polyline"));
    }

    #[test]
    fn title_is_escaped() {
        assert_eq!(escape_xml("a<b & c"), "a&lt;b &amp; c");
    }
}
