//! Configuration for the desktop front end.

use std::ops::RangeInclusive;
use std::path::{Path, PathBuf};

use crate::data::params::ParameterField;

// ─────────────────────────────────────────────────────────────────────────────
// Slider ranges
// ─────────────────────────────────────────────────────────────────────────────

/// Value range offered by each parameter slider. Edits outside the range are
/// clamped; values loaded from disk are shown as stored.
#[derive(Clone, Debug, PartialEq)]
pub struct SliderRanges {
    pub amplitude: RangeInclusive<f64>,
    pub frequency: RangeInclusive<f64>,
    /// Radians.
    pub phase: RangeInclusive<f64>,
    pub x_min: RangeInclusive<f64>,
    pub x_max: RangeInclusive<f64>,
}

impl Default for SliderRanges {
    fn default() -> Self {
        Self {
            amplitude: 0.0..=10.0,
            frequency: 0.0..=10.0,
            phase: 0.0..=std::f64::consts::TAU,
            x_min: -20.0..=20.0,
            x_max: -20.0..=20.0,
        }
    }
}

impl SliderRanges {
    pub fn get(&self, field: ParameterField) -> RangeInclusive<f64> {
        match field {
            ParameterField::Amplitude => self.amplitude.clone(),
            ParameterField::Frequency => self.frequency.clone(),
            ParameterField::Phase => self.phase.clone(),
            ParameterField::XMin => self.x_min.clone(),
            ParameterField::XMax => self.x_max.clone(),
        }
    }

    /// Clamp `value` into the range of `field`.
    pub fn clamp(&self, field: ParameterField, value: f64) -> f64 {
        let r = self.get(field);
        value.clamp(*r.start(), *r.end())
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// AppConfig
// ─────────────────────────────────────────────────────────────────────────────

/// Settings file used when none is given: `Settings/app.json` next to the
/// executable, or under the working directory if the executable path is unknown.
pub fn default_config_path() -> PathBuf {
    std::env::current_exe()
        .ok()
        .and_then(|exe| exe.parent().map(Path::to_path_buf))
        .unwrap_or_else(|| PathBuf::from("."))
        .join("Settings")
        .join("app.json")
}

/// Configuration for [`run_app`](crate::app::run_app).
pub struct AppConfig {
    /// Native window title.
    pub title: String,
    /// Where settings are loaded from and saved to.
    pub config_path: PathBuf,
    pub slider_ranges: SliderRanges,
    /// Suggested file name in the export dialog.
    pub export_file_name: String,
    /// Optional eframe native-window options.
    pub native_options: Option<eframe::NativeOptions>,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            title: "Simple Graph Plotter".to_string(),
            config_path: default_config_path(),
            slider_ranges: SliderRanges::default(),
            export_file_name: "plot.svg".to_string(),
            native_options: None,
        }
    }
}

impl AppConfig {
    pub fn with_config_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.config_path = path.into();
        self
    }

    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = title.into();
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_path_ends_in_settings_file() {
        let p = default_config_path();
        assert!(p.ends_with("Settings/app.json"));
    }

    #[test]
    fn clamp_respects_field_range() {
        let r = SliderRanges::default();
        assert_eq!(r.clamp(ParameterField::Amplitude, -3.0), 0.0);
        assert_eq!(r.clamp(ParameterField::Frequency, 42.0), 10.0);
        assert_eq!(r.clamp(ParameterField::XMin, -5.0), -5.0);
    }

    #[test]
    fn builders_override_defaults() {
        let cfg = AppConfig::default()
            .with_config_path("/tmp/plot.json")
            .with_title("Plotter");
        assert_eq!(cfg.config_path, PathBuf::from("/tmp/plot.json"));
        assert_eq!(cfg.title, "Plotter");
        assert_eq!(cfg.export_file_name, "plot.svg");
    }
}
