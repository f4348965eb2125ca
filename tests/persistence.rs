use funcplot::persistence::{config_to_json, load_config_from_path, save_config_to_path};
use funcplot::*;
use tempfile::TempDir;

fn custom_config() -> Configuration {
    let mut cfg = Configuration::default();
    cfg.set_parameters(
        FunctionKind::Sine,
        ParameterSet {
            amplitude: 2.5,
            frequency: 0.75,
            phase: 1.25,
            x_min: -4.0,
            x_max: 6.5,
        },
    );
    cfg.set_parameters(
        FunctionKind::Sinc,
        ParameterSet {
            amplitude: 0.1,
            frequency: 9.0,
            phase: 0.0,
            x_min: -0.5,
            x_max: 0.5,
        },
    );
    cfg.set_selected_kind(FunctionKind::Sinc);
    cfg
}

#[test]
fn missing_file_yields_defaults() {
    let dir = TempDir::new().unwrap();
    let store = ConfigStore::load(&dir.path().join("nope.json"));
    assert_eq!(store.selected_kind(), FunctionKind::Sine);
    for kind in FunctionKind::ALL {
        let p = store.parameters_for(kind);
        assert_eq!(p.amplitude, 1.0);
        assert_eq!(p.frequency, 1.0);
        assert_eq!(p.phase, 0.0);
        assert_eq!(p.x_min, -2.0);
        assert_eq!(p.x_max, 2.0);
    }
}

#[test]
fn save_then_load_round_trips() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("app.json");
    let cfg = custom_config();
    save_config_to_path(&cfg, &path).unwrap();
    let loaded = load_config_from_path(&path).unwrap();
    assert_eq!(loaded, cfg);
    assert_eq!(loaded.selected_kind(), FunctionKind::Sinc);
}

#[test]
fn save_creates_parent_directories() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("Settings").join("app.json");
    ConfigStore::new(custom_config()).save(&path).unwrap();
    assert!(path.is_file());
    // no temp files left behind
    let entries: Vec<_> = std::fs::read_dir(path.parent().unwrap()).unwrap().collect();
    assert_eq!(entries.len(), 1);
}

#[test]
fn file_is_human_readable_and_stable() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("app.json");
    save_config_to_path(&Configuration::default(), &path).unwrap();
    let txt = std::fs::read_to_string(&path).unwrap();
    assert_eq!(txt, format!("{}\n", config_to_json(&Configuration::default()).unwrap()));
    let value: serde_json::Value = serde_json::from_str(&txt).unwrap();
    assert_eq!(value["selectedFunction"], "Sine");
    assert_eq!(value["plotParameterSets"]["Cosine"]["xMax"], 2.0);
    for key in ["amplitude", "frequency", "phase", "xMin", "xMax"] {
        assert!(value["plotParameterSets"]["Sinc"][key].is_number(), "{key}");
    }
}

#[test]
fn malformed_file_falls_back_to_defaults() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("app.json");
    let full = config_to_json(&custom_config()).unwrap();
    for bad in [&full[..full.len() / 2], "", "not json at all", "null"] {
        std::fs::write(&path, bad).unwrap();
        assert!(matches!(
            ConfigStore::try_load(&path),
            Err(PlotError::ConfigurationParse { .. })
        ));
        assert_eq!(ConfigStore::load(&path), ConfigStore::default());
    }
}

#[test]
fn missing_kinds_get_default_parameters() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("app.json");
    std::fs::write(
        &path,
        r#"{"selectedFunction": "Cosine", "plotParameterSets": {"Cosine": {"amplitude": 4, "frequency": 2, "phase": 1, "xMin": -1, "xMax": 3}}}"#,
    )
    .unwrap();
    let store = ConfigStore::try_load(&path).unwrap();
    assert_eq!(store.selected_kind(), FunctionKind::Cosine);
    assert_eq!(store.parameters_for_selected().amplitude, 4.0);
    assert_eq!(store.parameters_for(FunctionKind::Sine), ParameterSet::default());
    assert_eq!(store.parameters_for(FunctionKind::Sinc), ParameterSet::default());
}

#[test]
fn directory_path_is_an_io_error() {
    let dir = TempDir::new().unwrap();
    assert!(matches!(
        ConfigStore::try_load(dir.path()),
        Err(PlotError::ConfigurationIo { .. })
    ));
    assert_eq!(ConfigStore::load(dir.path()), ConfigStore::default());
}

#[test]
fn failed_save_keeps_previous_file() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("app.json");
    save_config_to_path(&custom_config(), &path).unwrap();
    let before = std::fs::read_to_string(&path).unwrap();
    // a path whose parent is a regular file cannot be written
    let bad = path.join("nested.json");
    assert!(matches!(
        save_config_to_path(&Configuration::default(), &bad),
        Err(PlotError::ConfigurationIo { .. })
    ));
    assert_eq!(std::fs::read_to_string(&path).unwrap(), before);
}

#[test]
fn unknown_selected_function_falls_back_to_sine() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("app.json");
    for selected in ["7", "\"Tangent\"", "-1"] {
        std::fs::write(
            &path,
            format!(
                r#"{{"selectedFunction": {selected}, "plotParameterSets": {{"Sinc": {{"amplitude": 2}}}}}}"#
            ),
        )
        .unwrap();
        let store = ConfigStore::try_load(&path).unwrap_or_else(|e| panic!("{selected}: {e}"));
        assert_eq!(store.selected_kind(), FunctionKind::Sine, "{selected}");
        assert_eq!(store.parameters_for(FunctionKind::Sinc).amplitude, 2.0);
    }
    assert!(matches!(
        "Tangent".parse::<FunctionKind>(),
        Err(PlotError::UnsupportedFunctionKind(name)) if name == "Tangent"
    ));
}

#[test]
fn null_values_are_parse_errors() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("app.json");
    std::fs::write(
        &path,
        r#"{"selectedFunction": "Cosine", "plotParameterSets": {"Sine": {"amplitude": null}}}"#,
    )
    .unwrap();
    assert!(matches!(
        ConfigStore::try_load(&path),
        Err(PlotError::ConfigurationParse { .. })
    ));
    assert_eq!(ConfigStore::load(&path), ConfigStore::default());
}
