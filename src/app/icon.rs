//! Window icon: a small sinc curve drawn by the SVG renderer and rasterized
//! with usvg + resvg.

use eframe::egui;

use crate::data::export::{PlotView, SvgRenderer};
use crate::data::function::{generate, FunctionKind};
use crate::data::params::ParameterSet;

/// Edge length of the window icon in pixels.
pub const ICON_SIZE: u32 = 64;

/// Render the application icon.
///
/// Returns `None` if the SVG cannot be parsed or rendered.
pub fn render_app_icon() -> Option<egui::IconData> {
    let params = ParameterSet {
        frequency: 1.5,
        x_min: -2.0,
        x_max: 2.0,
        ..Default::default()
    };
    let samples = generate(FunctionKind::Sinc, &params, ICON_SIZE as usize).ok()?;
    let mut view = PlotView::new("", &samples, (params.x_min, params.x_max));
    view.crosshair = false;
    let svg = SvgRenderer::thumbnail(ICON_SIZE).render_to_string(&view).ok()?;
    rasterize_svg(svg.as_bytes())
}

/// Parse and render SVG data to RGBA.
pub fn rasterize_svg(data: &[u8]) -> Option<egui::IconData> {
    let opt = usvg::Options::default();
    let tree = usvg::Tree::from_data(data, &opt).ok()?;
    let size = tree.size().to_int_size();
    if size.width() == 0 || size.height() == 0 {
        return None;
    }
    let mut pixmap = tiny_skia::Pixmap::new(size.width(), size.height())?;
    let mut canvas = pixmap.as_mut();
    resvg::render(&tree, tiny_skia::Transform::default(), &mut canvas);
    let rgba = pixmap.take();
    Some(egui::IconData {
        rgba,
        width: size.width(),
        height: size.height(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn icon_has_expected_size() {
        let icon = render_app_icon().expect("icon renders");
        assert_eq!((icon.width, icon.height), (ICON_SIZE, ICON_SIZE));
        assert_eq!(icon.rgba.len(), (ICON_SIZE * ICON_SIZE * 4) as usize);
        // the curve is blue somewhere
        assert!(icon.rgba.chunks(4).any(|px| px[2] > 200 && px[0] < 100));
    }

    #[test]
    fn garbage_is_rejected() {
        assert!(rasterize_svg(b"not svg").is_none());
    }
}
