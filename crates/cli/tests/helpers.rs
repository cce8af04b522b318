use std::fs;

use ldb_salvage::absolutize;
use tempfile::tempdir;

#[test]
fn absolutize_canonicalizes_existing_paths() {
    let tmp = tempdir().expect("tempdir");
    let nested = tmp.path().join("nested");
    fs::create_dir_all(&nested).expect("create nested");

    let result = absolutize(&nested).expect("absolutize");
    assert_eq!(result, nested.canonicalize().expect("canonicalize nested"));
}

#[test]
fn absolutize_keeps_missing_absolute_paths() {
    let tmp = tempdir().expect("tempdir");
    let missing = tmp.path().join("not-yet").join("out.json");
    assert_eq!(absolutize(&missing).expect("absolutize"), missing);
}

#[test]
fn absolutize_joins_missing_relative_paths_with_cwd() {
    let cwd = std::env::current_dir().expect("cwd");
    let result = absolutize(std::path::Path::new("no-such-dir/extracted_data.json"))
        .expect("absolutize relative");
    assert_eq!(result, cwd.join("no-such-dir/extracted_data.json"));
}
