//! Persistence sink for the recovered document.
//!
//! The document stores raw matched text, not reparsed values, so a later
//! pass can retry parsing or repair without rescanning the profiles.

use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

use thiserror::Error;

use crate::aggregate::AggregateResult;

/// Error type for writing and reading the recovered document.
#[derive(Debug, Error)]
pub enum SinkError {
    #[error("Failed to write recovered document {path}: {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to read recovered document {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Recovered document is not a JSON object of strings: {0}")]
    Json(#[from] serde_json::Error),
}

/// Recovered document as stored on disk: marker -> raw text.
pub type Document = BTreeMap<String, String>;

/// Write `result` to `path` as indented JSON, replacing any previous document.
pub fn write_document(path: &Path, result: &AggregateResult) -> Result<(), SinkError> {
    let write_err = |source| SinkError::Write { path: path.to_path_buf(), source };

    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent).map_err(write_err)?;
    }
    let mut body = serde_json::to_string_pretty(&result.to_document())?;
    body.push('\n');
    fs::write(path, body).map_err(write_err)
}

/// Load a previously written document.
pub fn read_document(path: &Path) -> Result<Document, SinkError> {
    let body = fs::read_to_string(path)
        .map_err(|source| SinkError::Read { path: path.to_path_buf(), source })?;
    Ok(serde_json::from_str(&body)?)
}
