//! Settings persistence: save and load the [`Configuration`] to/from JSON files.
//!
//! The file layout is
//!
//! ```json
//! {
//!   "selectedFunction": "Sine",
//!   "plotParameterSets": {
//!     "Sine": { "amplitude": 1.0, "frequency": 1.0, "phase": 0.0, "xMin": -2.0, "xMax": 2.0 },
//!     "Cosine": { ... },
//!     "Sinc": { ... }
//!   }
//! }
//! ```
//!
//! Reading is tolerant: PascalCase keys, short kind names (`Sin`, `Cos`) and a
//! numeric `selectedFunction` are accepted, unknown kinds are skipped, and
//! kinds without an entry get default parameters.

use std::collections::BTreeMap;
use std::io::Write;
use std::path::Path;

use serde::{Deserialize, Serialize, Serializer};

use crate::data::config_store::{ConfigStore, Configuration};
use crate::data::function::FunctionKind;
use crate::data::params::ParameterSet;
use crate::error::{PlotError, Result};

// ---------- Serializable mirror types ----------

/// Borrowed view used for writing; keeps kinds in declaration order.
#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct ConfigurationOut<'a> {
    selected_function: FunctionKind,
    plot_parameter_sets: ParameterSetsOut<'a>,
}

struct ParameterSetsOut<'a>(&'a Configuration);

impl Serialize for ParameterSetsOut<'_> {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.collect_map(self.0.iter().map(|(kind, params)| (kind.name(), params)))
    }
}

/// Owned mirror used for reading.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ConfigurationIn {
    #[serde(default, alias = "SelectedFunction")]
    selected_function: Option<KindRepr>,
    #[serde(default, alias = "PlotParameterSets")]
    plot_parameter_sets: BTreeMap<String, ParameterSet>,
}

/// A kind as written by either the name or the enum ordinal.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum KindRepr {
    Name(String),
    Index(i64),
}

impl KindRepr {
    fn resolve(&self) -> Option<FunctionKind> {
        match self {
            KindRepr::Name(name) => name.parse().ok(),
            KindRepr::Index(i) => usize::try_from(*i).ok().and_then(FunctionKind::from_index),
        }
    }
}

impl ConfigurationIn {
    fn into_configuration(self) -> Configuration {
        let mut config = Configuration::default();
        let mut seen = [false; FunctionKind::COUNT];
        for (name, params) in self.plot_parameter_sets {
            match name.parse::<FunctionKind>() {
                Ok(kind) => {
                    seen[kind.index()] = true;
                    config.set_parameters(kind, params);
                }
                Err(_) => tracing::warn!("Ignoring parameters for unknown function '{}'", name),
            }
        }
        for kind in FunctionKind::ALL {
            if !seen[kind.index()] {
                tracing::debug!("No stored parameters for {}, using defaults", kind);
            }
        }
        if let Some(repr) = self.selected_function {
            match repr.resolve() {
                Some(kind) => config.set_selected_kind(kind),
                None => tracing::warn!("Unknown selected function {:?}, selecting Sine", repr),
            }
        }
        config
    }
}

// ---------- Public API ----------

/// Serialize the configuration as pretty JSON.
pub fn config_to_json(config: &Configuration) -> serde_json::Result<String> {
    serde_json::to_string_pretty(&ConfigurationOut {
        selected_function: config.selected_kind(),
        plot_parameter_sets: ParameterSetsOut(config),
    })
}

/// Deserialize a configuration from JSON, filling in missing kinds.
pub fn config_from_json(json: &str) -> serde_json::Result<Configuration> {
    let raw: ConfigurationIn = serde_json::from_str(json)?;
    Ok(raw.into_configuration())
}

/// Load a configuration from `path`.
///
/// A missing file yields the default configuration. Unreadable or malformed
/// files are reported as errors.
pub fn load_config_from_path(path: &Path) -> Result<Configuration> {
    let txt = match std::fs::read_to_string(path) {
        Ok(txt) => txt,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
            tracing::info!("No settings file at {}, using defaults", path.display());
            return Ok(Configuration::default());
        }
        Err(e) => return Err(PlotError::configuration_io(path, e)),
    };
    config_from_json(&txt).map_err(|e| PlotError::configuration_parse(path, e))
}

/// Save the configuration to `path`, replacing any previous file.
///
/// The JSON is written to a temporary file next to `path` and renamed over it,
/// so an interrupted write leaves the previous file intact.
pub fn save_config_to_path(config: &Configuration, path: &Path) -> Result<()> {
    let mut txt = config_to_json(config).map_err(|e| PlotError::configuration_parse(path, e))?;
    txt.push('\n');
    write_atomically(path, txt.as_bytes()).map_err(|e| PlotError::configuration_io(path, e))?;
    tracing::info!("Saved settings to {}", path.display());
    Ok(())
}

fn write_atomically(path: &Path, contents: &[u8]) -> std::io::Result<()> {
    let dir = match path.parent() {
        Some(d) if !d.as_os_str().is_empty() => d,
        _ => Path::new("."),
    };
    std::fs::create_dir_all(dir)?;
    let mut tmp = tempfile::NamedTempFile::new_in(dir)?;
    tmp.write_all(contents)?;
    tmp.as_file().sync_all()?;
    tmp.persist(path).map_err(|e| e.error)?;
    Ok(())
}

impl ConfigStore {
    /// Load the store from `path`, reporting parse and I/O failures.
    pub fn try_load(path: &Path) -> Result<Self> {
        load_config_from_path(path).map(ConfigStore::new)
    }

    /// Load the store from `path`, falling back to defaults on any failure.
    pub fn load(path: &Path) -> Self {
        match Self::try_load(path) {
            Ok(store) => store,
            Err(e) => {
                tracing::warn!("{}; falling back to default settings", error_chain(&e));
                ConfigStore::default()
            }
        }
    }

    /// Persist the whole configuration to `path`.
    pub fn save(&self, path: &Path) -> Result<()> {
        save_config_to_path(self.configuration(), path)
    }
}

fn error_chain(err: &dyn std::error::Error) -> String {
    let mut msg = err.to_string();
    let mut source = err.source();
    while let Some(s) = source {
        msg.push_str(": ");
        msg.push_str(&s.to_string());
        source = s.source();
    }
    msg
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn json_keeps_declaration_order() {
        let txt = config_to_json(&Configuration::default()).unwrap();
        let sine = txt.find("\"Sine\"").unwrap();
        let cosine = txt.find("\"Cosine\"").unwrap();
        let sinc = txt.find("\"Sinc\"").unwrap();
        assert!(txt.starts_with("{\n  \"selectedFunction\": \"Sine\""));
        assert!(sine < cosine && cosine < sinc);
        assert!(txt.contains("\"xMin\": -2.0"));
    }

    #[test]
    fn reads_legacy_layout() {
        let txt = r#"{
            "PlotParameterSets": {
                "Sin": {"Amplitude": 2, "Frequency": 1, "Phase": 0, "XMin": -1, "XMax": 1},
                "Cos": {"Amplitude": 3, "Frequency": 1, "Phase": 0, "XMin": -1, "XMax": 1}
            },
            "SelectedFunction": 1
        }"#;
        let cfg = config_from_json(txt).unwrap();
        assert_eq!(cfg.selected_kind(), FunctionKind::Cosine);
        assert_eq!(cfg.parameters(FunctionKind::Sine).amplitude, 2.0);
        assert_eq!(cfg.parameters(FunctionKind::Cosine).amplitude, 3.0);
        assert_eq!(cfg.parameters(FunctionKind::Sinc), &ParameterSet::default());
    }

    #[test]
    fn unknown_kinds_are_skipped() {
        let txt = r#"{"selectedFunction": "Tangent", "plotParameterSets": {"Tangent": {}}}"#;
        let cfg = config_from_json(txt).unwrap();
        assert_eq!(cfg, Configuration::default());
    }

    #[test]
    fn wrong_types_are_parse_errors() {
        assert!(config_from_json(r#"{"plotParameterSets": {"Sine": {"amplitude": "loud"}}}"#).is_err());
        assert!(config_from_json("[1, 2, 3]").is_err());
        assert!(config_from_json("{\"selectedFunction\": ").is_err());
    }
}
