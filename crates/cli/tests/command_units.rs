use std::path::PathBuf;

use ldb_salvage::commands::{build_config, report_command, ScanOptions};
use salvage_core::config::ScanConfig;
use tempfile::tempdir;

#[test]
fn defaults_apply_without_flags_or_file() {
    let config = build_config(&ScanOptions::default()).expect("build");
    assert_eq!(config, ScanConfig::default());
}

#[test]
fn flags_override_config_file() {
    let tmp = tempdir().unwrap();
    let path = tmp.path().join("salvage.yaml");
    let file_config = ScanConfig {
        base_dir: Some(PathBuf::from("/from/file")),
        profiles: vec!["Default".into(), "Profile 12".into()],
        markers: vec!["makro_costs".into()],
        ..ScanConfig::default()
    };
    file_config.save(&path).unwrap();

    let opts = ScanOptions {
        config: Some(path),
        profiles: vec!["Profile 3".into()],
        suffix: Some(".sst".into()),
        min_chars: Some(5),
        ..ScanOptions::default()
    };
    let config = build_config(&opts).expect("build");

    assert_eq!(config.base_dir, Some(PathBuf::from("/from/file")));
    assert_eq!(config.profiles, vec!["Profile 3"]);
    assert_eq!(config.markers, vec!["makro_costs"]);
    assert_eq!(config.table_suffix, ".sst");
    assert_eq!(config.limits.min_value_chars, 5);
}

#[test]
fn invalid_overrides_are_rejected() {
    let opts = ScanOptions { suffix: Some(String::new()), ..ScanOptions::default() };
    let err = build_config(&opts).unwrap_err();
    assert!(err.to_string().contains("Invalid scan configuration"));
}

#[test]
fn missing_config_file_is_reported_with_path() {
    let tmp = tempdir().unwrap();
    let opts =
        ScanOptions { config: Some(tmp.path().join("absent.yaml")), ..ScanOptions::default() };
    let err = build_config(&opts).unwrap_err();
    assert!(err.to_string().contains("absent.yaml"));
}

#[test]
fn report_command_accepts_empty_document() {
    let tmp = tempdir().unwrap();
    let path = tmp.path().join("extracted_data.json");
    std::fs::write(&path, "{}").unwrap();
    report_command(&path, 200, false).expect("report empty");
    report_command(&path, 200, true).expect("report empty json");
}
