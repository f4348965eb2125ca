//! Desktop front end (egui/eframe).
//!
//! The window is thin: it reads from and writes to a [`PlotSession`](crate::PlotSession)
//! and renders the samples it holds.

mod icon;
mod plot_app;
mod run;
mod slider;

pub use icon::{rasterize_svg, render_app_icon, ICON_SIZE};
pub use plot_app::PlotApp;
pub use run::run_app;
