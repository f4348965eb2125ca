use std::io::Write;

use funcplot::*;
use tempfile::TempDir;

fn session_in(dir: &TempDir) -> PlotSession {
    PlotSession::open(dir.path().join("app.json")).unwrap()
}

#[test]
fn exports_a_parsable_640_by_480_svg() {
    let dir = TempDir::new().unwrap();
    let mut session = session_in(&dir);
    session.set_selected_kind(FunctionKind::Sinc).unwrap();
    let out = dir.path().join("plot.svg");
    session.export_svg(&out).unwrap();

    let data = std::fs::read(&out).unwrap();
    let tree = usvg::Tree::from_data(&data, &usvg::Options::default()).unwrap();
    assert_eq!(tree.size().width(), 640.0);
    assert_eq!(tree.size().height(), 480.0);

    let txt = String::from_utf8(data).unwrap();
    assert!(txt.contains("Sinc Function"));
    assert!(txt.contains("<polyline"));
}

#[test]
fn export_overwrites_existing_file() {
    let dir = TempDir::new().unwrap();
    let session = session_in(&dir);
    let out = dir.path().join("plot.svg");
    std::fs::write(&out, "old").unwrap();
    session.export_svg(&out).unwrap();
    let txt = std::fs::read_to_string(&out).unwrap();
    assert!(txt.starts_with("<?xml"));
    assert!(txt.contains("<svg"));
}

#[test]
fn failed_export_leaves_session_untouched() {
    let dir = TempDir::new().unwrap();
    let session = session_in(&dir);
    let failures = session.subscribe(EventFilter::only(EventKind::EXPORT_FAILED));
    let before = session.samples().to_vec();

    let out = dir.path().join("missing").join("plot.svg");
    let err = session.export_svg(&out).unwrap_err();
    assert!(matches!(err, PlotError::Export(ExportError::Io { .. })));
    assert!(!out.exists());
    assert_eq!(session.samples(), &before[..]);
    assert_eq!(session.selected_kind(), FunctionKind::Sine);

    let evt = failures.try_recv().unwrap();
    assert!(evt.file.unwrap().error.is_some());
}

#[test]
fn rendering_is_deterministic() {
    let dir = TempDir::new().unwrap();
    let session = session_in(&dir);
    let renderer = SvgRenderer::default();
    let a = renderer.render_to_string(&session.view()).unwrap();
    let mut b = Vec::new();
    renderer.render(&session.view(), &mut b).unwrap();
    assert_eq!(a.as_bytes(), &b[..]);
    assert_eq!(renderer.extension(), "svg");
}

struct CountingRenderer;

impl PlotRenderer for CountingRenderer {
    fn render(&self, view: &PlotView<'_>, out: &mut dyn Write) -> std::io::Result<()> {
        writeln!(out, "{} {}", view.title, view.samples.len())
    }

    fn extension(&self) -> &'static str {
        "txt"
    }
}

#[test]
fn custom_renderers_plug_in() {
    let dir = TempDir::new().unwrap();
    let session = session_in(&dir);
    let out = dir.path().join("plot.txt");
    session.export_with(&CountingRenderer, &out).unwrap();
    assert_eq!(
        std::fs::read_to_string(&out).unwrap(),
        format!("Sine Function {}\n", DEFAULT_RESOLUTION)
    );
}

#[test]
fn extreme_range_exports_a_valid_document() {
    let dir = TempDir::new().unwrap();
    let mut session = session_in(&dir);
    session
        .edit_parameters(|p| {
            p.x_min = -1e308;
            p.x_max = 1e308;
        })
        .unwrap();
    let out = dir.path().join("huge.svg");
    session.export_svg(&out).unwrap();

    let txt = std::fs::read_to_string(&out).unwrap();
    assert!(!txt.contains("NaN"));
    let tree = usvg::Tree::from_data(txt.as_bytes(), &usvg::Options::default()).unwrap();
    assert_eq!(tree.size().width(), 640.0);
}
