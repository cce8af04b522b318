use std::fs;
use std::path::PathBuf;

use salvage_core::config::{ConfigError, ExtractLimits, ScanConfig, DEFAULT_MARKERS};
use tempfile::tempdir;

#[test]
fn defaults_match_local_storage_layout() {
    let config = ScanConfig::default();
    assert_eq!(config.storage_subdir, "Local Storage/leveldb");
    assert_eq!(config.table_suffix, ".ldb");
    assert_eq!(config.markers, DEFAULT_MARKERS);
    assert_eq!(config.output, PathBuf::from("extracted_data.json"));
    assert_eq!(
        config.limits,
        ExtractLimits { window_chars: 500_000, value_window_chars: 400_000, min_value_chars: 50 }
    );
    config.validate().expect("defaults are valid");
}

#[test]
fn yaml_config_fills_missing_fields_with_defaults() {
    let tmp = tempdir().expect("tempdir");
    let path = tmp.path().join("salvage.yaml");
    fs::write(
        &path,
        "base_dir: /data/chrome\nprofiles: [Default, Profile 12]\nmarkers: [makro_costs]\nlimits:\n  min_value_chars: 10\n",
    )
    .expect("write yaml");

    let config = ScanConfig::load(&path).expect("load yaml");
    assert_eq!(config.base_dir, Some(PathBuf::from("/data/chrome")));
    assert_eq!(config.profiles, vec!["Default", "Profile 12"]);
    assert_eq!(config.markers, vec!["makro_costs"]);
    assert_eq!(config.limits.min_value_chars, 10);
    assert_eq!(config.limits.window_chars, 500_000);
    assert_eq!(config.table_suffix, ".ldb");
}

#[test]
fn json_config_loads() {
    let tmp = tempdir().expect("tempdir");
    let path = tmp.path().join("salvage.json");
    fs::write(&path, r#"{"table_suffix": ".sst", "output": "out/recovered.json"}"#)
        .expect("write json");

    let config = ScanConfig::load(&path).expect("load json");
    assert_eq!(config.table_suffix, ".sst");
    assert_eq!(config.output, PathBuf::from("out/recovered.json"));
    assert_eq!(config.profiles, vec!["Default"]);
}

#[test]
fn save_then_load_preserves_config() {
    let tmp = tempdir().expect("tempdir");
    let mut config = ScanConfig::default();
    config.profiles.push("Profile 12".into());
    config.base_dir = Some(tmp.path().to_path_buf());

    for name in ["cfg.yaml", "cfg.json"] {
        let path = tmp.path().join(name);
        config.save(&path).expect("save");
        assert_eq!(ScanConfig::load(&path).expect("load"), config);
    }
}

#[test]
fn unsupported_extension_is_rejected() {
    let tmp = tempdir().expect("tempdir");
    let path = tmp.path().join("salvage.toml");
    fs::write(&path, "").expect("write");
    assert!(matches!(ScanConfig::load(&path), Err(ConfigError::UnsupportedFormat(_))));
}

#[test]
fn malformed_yaml_is_a_yaml_error() {
    let tmp = tempdir().expect("tempdir");
    let path = tmp.path().join("salvage.yml");
    fs::write(&path, "profiles: {unclosed").expect("write");
    assert!(matches!(ScanConfig::load(&path), Err(ConfigError::Yaml(_))));
}

#[test]
fn validate_rejects_unusable_configs() {
    let no_markers = ScanConfig { markers: vec![], ..ScanConfig::default() };
    assert!(matches!(no_markers.validate(), Err(ConfigError::Invalid(_))));

    let empty_marker = ScanConfig { markers: vec!["".into()], ..ScanConfig::default() };
    assert!(matches!(empty_marker.validate(), Err(ConfigError::Invalid(_))));

    let no_suffix = ScanConfig { table_suffix: String::new(), ..ScanConfig::default() };
    assert!(matches!(no_suffix.validate(), Err(ConfigError::Invalid(_))));

    let inverted = ScanConfig {
        limits: ExtractLimits { window_chars: 10, value_window_chars: 20, min_value_chars: 1 },
        ..ScanConfig::default()
    };
    let err = inverted.validate().unwrap_err();
    assert!(err.to_string().contains("value window"));
}

#[test]
fn explicit_base_dir_wins_over_environment() {
    let config = ScanConfig { base_dir: Some(PathBuf::from("/x/y")), ..ScanConfig::default() };
    assert_eq!(config.resolve_base_dir().expect("base dir"), PathBuf::from("/x/y"));
}
