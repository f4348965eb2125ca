//! Top-level entry point for running the plotter as a native window.

use eframe::egui;

use crate::config::AppConfig;
use crate::session::PlotSession;

use super::icon::render_app_icon;
use super::plot_app::PlotApp;

/// Launch the plotter window for `session`.
///
/// The session is created by the caller (usually from `cfg.config_path`), so
/// the window never touches global state. The call blocks until the window is
/// closed.
pub fn run_app(session: PlotSession, mut cfg: AppConfig) -> eframe::Result<()> {
    let mut opts = cfg.native_options.take().unwrap_or_default();

    if opts.viewport.icon.is_none() {
        if let Some(icon) = render_app_icon() {
            opts.viewport = opts.viewport.clone().with_icon(icon);
        }
    }

    if opts.viewport.inner_size.is_none() {
        opts.viewport = opts
            .viewport
            .clone()
            .with_inner_size(egui::vec2(1000.0, 680.0));
    }

    let mut app = PlotApp::new(session, cfg.slider_ranges.clone());
    app.export_file_name = cfg.export_file_name.clone();

    tracing::info!("Opening window '{}'", cfg.title);
    eframe::run_native(&cfg.title, opts, Box::new(|_cc| Ok(Box::new(app))))
}
