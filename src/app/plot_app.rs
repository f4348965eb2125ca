//! PlotApp: the eframe window around a [`PlotSession`].
//!
//! Layout: a top bar with the function selector and the save/export actions,
//! a left panel with one slider per parameter, the plot in the centre and a
//! status line at the bottom for notifications.

use std::path::PathBuf;

use eframe::egui;
use egui::Color32;
use egui_plot::{HLine, Line, Plot, VLine};

use crate::config::SliderRanges;
use crate::data::function::FunctionKind;
use crate::data::params::ParameterField;
use crate::notify::Notification;
use crate::session::PlotSession;

use super::slider::parameter_slider;

pub struct PlotApp {
    pub session: PlotSession,
    pub slider_ranges: SliderRanges,
    pub export_file_name: String,
    /// Last save/export outcome, shown in the status line.
    pub notification: Option<Notification>,
}

impl PlotApp {
    pub fn new(session: PlotSession, slider_ranges: SliderRanges) -> Self {
        Self {
            session,
            slider_ranges,
            export_file_name: "plot.svg".to_string(),
            notification: None,
        }
    }

    fn render_top_bar(&mut self, ui: &mut egui::Ui) {
        ui.horizontal(|ui| {
            let mut kind = self.session.selected_kind();
            egui::ComboBox::from_label("Function")
                .selected_text(kind.title())
                .show_ui(ui, |ui| {
                    for k in FunctionKind::ALL {
                        ui.selectable_value(&mut kind, k, k.title())
                            .on_hover_text(k.formula());
                    }
                });
            if kind != self.session.selected_kind() {
                if let Err(e) = self.session.set_selected_kind(kind) {
                    self.notification = Some(Notification::error("Error", e.to_string()));
                }
            }
            ui.label(kind.formula());

            ui.separator();
            if ui
                .button("💾 Save settings")
                .on_hover_text("Store the current parameters for this function")
                .clicked()
            {
                let result = self.session.save();
                self.notification = Some(Notification::for_save(
                    &result,
                    self.session.config_path(),
                ));
            }
            if ui
                .button("🖼 Export SVG")
                .on_hover_text("Save the plot as a vector image")
                .clicked()
            {
                self.export_via_dialog();
            }
        });
    }

    fn export_via_dialog(&mut self) {
        let Some(path) = rfd::FileDialog::new()
            .set_title("Save current plot to file")
            .set_file_name(&self.export_file_name)
            .add_filter("Scalable Vector Graphics", &["svg"])
            .save_file()
        else {
            return;
        };
        let path = with_svg_extension(path);
        let result = self.session.export_svg(&path);
        self.notification = Some(Notification::for_export(&result, &path));
    }

    fn render_parameters(&mut self, ui: &mut egui::Ui) {
        ui.heading("Parameters");
        ui.add_space(4.0);
        for field in ParameterField::ALL {
            let mut value = self.session.parameters().get(field);
            if parameter_slider(ui, field, &mut value, self.slider_ranges.get(field)) {
                let value = self.slider_ranges.clamp(field, value);
                if let Err(e) = self.session.set_parameter(field, value) {
                    self.notification = Some(Notification::error("Error", e.to_string()));
                }
            }
            ui.add_space(6.0);
        }
        if let Err(e) = self.session.validate_current() {
            ui.colored_label(Color32::DARK_RED, e.to_string());
        }
    }

    fn render_plot(&mut self, ui: &mut egui::Ui) {
        ui.vertical_centered(|ui| ui.heading(self.session.title()));
        let points: Vec<[f64; 2]> = self
            .session
            .samples()
            .iter()
            .map(|s| s.to_array())
            .collect();
        let p = self.session.parameters();
        let response = Plot::new("function_plot")
            .allow_scroll(false)
            .allow_zoom(false)
            .allow_drag(false)
            .allow_boxed_zoom(false)
            .x_axis_label("x")
            .y_axis_label("f(x)")
            .include_x(p.x_min)
            .include_x(p.x_max)
            .label_formatter(|_name, point| hover_label(point.x, point.y))
            .show(ui, |plot_ui| {
                plot_ui.hline(HLine::new("y = 0", 0.0).color(Color32::BLACK).width(1.5));
                plot_ui.vline(VLine::new("x = 0", 0.0).color(Color32::BLACK).width(1.5));
                plot_ui.line(Line::new("f(x)", points).color(Color32::BLUE).width(2.0));
            })
            .response;

        let mut export = false;
        response.context_menu(|ui| {
            if ui.button("Save as SVG").clicked() {
                export = true;
                ui.close();
            }
        });
        if export {
            self.export_via_dialog();
        }
    }

    fn render_status(&self, ui: &mut egui::Ui) {
        match &self.notification {
            Some(n) if n.is_error() => {
                ui.colored_label(Color32::RED, n.to_string());
            }
            Some(n) => {
                ui.label(n.to_string());
            }
            None => {
                ui.label(format!("Settings: {}", self.session.config_path().display()));
            }
        }
    }
}

/// Hover text for a point on the curve.
pub(crate) fn hover_label(x: f64, y: f64) -> String {
    format!("x: {x:.1} y: {y:.1}")
}

/// Append `.svg` when the dialog returned a path without extension.
pub(crate) fn with_svg_extension(mut path: PathBuf) -> PathBuf {
    if path.extension().is_none() {
        path.set_extension("svg");
    }
    path
}

impl eframe::App for PlotApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        egui::TopBottomPanel::top("controls").show(ctx, |ui| self.render_top_bar(ui));
        egui::TopBottomPanel::bottom("status").show(ctx, |ui| self.render_status(ui));
        egui::SidePanel::left("parameters")
            .resizable(false)
            .show(ctx, |ui| self.render_parameters(ui));
        egui::CentralPanel::default().show(ctx, |ui| self.render_plot(ui));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn svg_extension_is_added_once() {
        assert_eq!(with_svg_extension("plot".into()), PathBuf::from("plot.svg"));
        assert_eq!(with_svg_extension("plot.svg".into()), PathBuf::from("plot.svg"));
    }

    #[test]
    fn hover_label_uses_one_decimal() {
        assert_eq!(hover_label(1.26, -0.46), "x: 1.3 y: -0.5");
        assert_eq!(hover_label(-2.0, 3.0), "x: -2.0 y: 3.0");
    }
}
