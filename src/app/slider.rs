//! Parameter slider: label, slider and numeric entry for one field.

use std::ops::RangeInclusive;

use eframe::egui;

use crate::data::params::ParameterField;

/// Render the editor for `field`. Returns `true` if the user changed `value`.
///
/// Both the slider and the numeric entry clamp user edits to `range`; a value
/// outside the range (e.g. loaded from disk) is shown unchanged until edited.
pub(crate) fn parameter_slider(
    ui: &mut egui::Ui,
    field: ParameterField,
    value: &mut f64,
    range: RangeInclusive<f64>,
) -> bool {
    let mut changed = false;
    ui.label(field.label());
    ui.horizontal(|ui| {
        let slider = egui::Slider::new(&mut *value, range.clone())
            .show_value(false)
            .clamping(egui::SliderClamping::Edits);
        changed |= ui.add(slider).changed();

        let mut entry = egui::DragValue::new(&mut *value)
            .range(range)
            .speed(0.01)
            .max_decimals(3);
        if let Some(unit) = field.unit() {
            entry = entry.suffix(format!(" {unit}"));
        }
        changed |= ui.add(entry).changed();
    });
    changed
}
