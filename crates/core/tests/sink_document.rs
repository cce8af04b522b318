use std::fs;
use std::path::PathBuf;

use salvage_core::aggregate::{AggregateResult, Aggregator};
use salvage_core::extract::Candidate;
use salvage_core::sink::{read_document, write_document, SinkError};
use salvage_core::table::TableFile;
use tempfile::tempdir;

fn result_with(entries: &[(&str, &str)]) -> AggregateResult {
    let mut agg = Aggregator::new(entries.iter().map(|(k, _)| *k));
    for (marker, text) in entries {
        let source = TableFile {
            profile: "Default".into(),
            file_name: "000005.ldb".into(),
            path: PathBuf::from("000005.ldb"),
        };
        agg.offer(Candidate::new(*marker, *text, source));
    }
    agg.finish()
}

#[test]
fn empty_result_writes_empty_object() {
    let tmp = tempdir().expect("tempdir");
    let path = tmp.path().join("extracted_data.json");
    write_document(&path, &AggregateResult::default()).expect("write");

    let body = fs::read_to_string(&path).expect("read back");
    assert_eq!(body.trim(), "{}");
    assert!(read_document(&path).expect("parse").is_empty());
}

#[test]
fn document_holds_raw_text_indented() {
    let tmp = tempdir().expect("tempdir");
    let path = tmp.path().join("out").join("extracted_data.json");
    let raw = r#"[{"sku":"A-1"},{"sku":"B-2"#;
    write_document(&path, &result_with(&[("makro_listings", raw), ("makro_costs", "[1,2]")]))
        .expect("write");

    let body = fs::read_to_string(&path).expect("read back");
    assert!(body.starts_with("{\n  \""));
    let doc = read_document(&path).expect("parse");
    assert_eq!(doc.len(), 2);
    // Raw text is preserved even when it is not valid JSON itself.
    assert_eq!(doc["makro_listings"], raw);
    assert_eq!(doc["makro_costs"], "[1,2]");
}

#[test]
fn writing_overwrites_previous_document() {
    let tmp = tempdir().expect("tempdir");
    let path = tmp.path().join("extracted_data.json");
    fs::write(&path, "stale content that is much longer than the new document").expect("seed");

    write_document(&path, &result_with(&[("K", "[1]")])).expect("write");
    let doc = read_document(&path).expect("parse");
    assert_eq!(doc.keys().collect::<Vec<_>>(), vec!["K"]);
}

#[test]
fn unwritable_path_is_a_write_error() {
    let tmp = tempdir().expect("tempdir");
    // The target is an existing directory.
    let err = write_document(tmp.path(), &AggregateResult::default()).unwrap_err();
    assert!(matches!(err, SinkError::Write { .. }));
}

#[test]
fn reading_a_non_object_document_fails() {
    let tmp = tempdir().expect("tempdir");
    let path = tmp.path().join("doc.json");
    fs::write(&path, "[1, 2, 3]").expect("seed");
    assert!(matches!(read_document(&path), Err(SinkError::Json(_))));
    assert!(matches!(
        read_document(&tmp.path().join("missing.json")),
        Err(SinkError::Read { .. })
    ));
}
