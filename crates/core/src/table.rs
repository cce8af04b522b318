//! Table file reader: enumerate `.ldb` files and read them as opaque bytes.

use std::ffi::OsString;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use serde::Serialize;
use thiserror::Error;
use tracing::warn;

use crate::locate::StorageDir;

/// Error type for listing and reading table files.
#[derive(Debug, Error)]
pub enum TableError {
    #[error("Failed to list storage dir {path}: {source}")]
    List {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to read table file {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl TableError {
    /// Path the failed operation was aimed at.
    pub fn path(&self) -> &Path {
        match self {
            TableError::List { path, .. } | TableError::Read { path, .. } => path,
        }
    }
}

/// One table file discovered inside a storage directory.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TableFile {
    /// Profile the storage directory belongs to.
    pub profile: String,
    pub file_name: String,
    pub path: PathBuf,
}

impl TableFile {
    /// Short `profile/file` label used in notices.
    pub fn label(&self) -> String {
        format!("{}/{}", self.profile, self.file_name)
    }
}

/// List the entries directly inside `dir` whose name ends with `suffix`.
///
/// Entries are not filtered by type: anything carrying the suffix is handed to
/// the reader, which reports it if it cannot be read. An entry that cannot be
/// enumerated is logged and skipped. Results are sorted by file name so scans
/// are reproducible.
pub fn list_table_files(dir: &StorageDir, suffix: &str) -> Result<Vec<TableFile>, TableError> {
    let entries = fs::read_dir(&dir.path)
        .map_err(|source| TableError::List { path: dir.path.clone(), source })?
        .map(|entry| entry.map(|e| (e.file_name(), e.path())));
    Ok(select_table_files(dir, suffix, entries))
}

fn select_table_files<I>(dir: &StorageDir, suffix: &str, entries: I) -> Vec<TableFile>
where
    I: IntoIterator<Item = io::Result<(OsString, PathBuf)>>,
{
    let mut files = Vec::new();
    for entry in entries {
        let (name, path) = match entry {
            Ok(entry) => entry,
            Err(err) => {
                warn!(path = %dir.path.display(), error = %err, "skipping unreadable directory entry");
                continue;
            }
        };
        let file_name = name.to_string_lossy().to_string();
        if !file_name.ends_with(suffix) {
            continue;
        }
        files.push(TableFile { profile: dir.profile.clone(), file_name, path });
    }

    files.sort_by(|a, b| a.file_name.cmp(&b.file_name));
    files
}

/// Read the complete contents of a table file.
pub fn read_table_file(file: &TableFile) -> Result<Vec<u8>, TableError> {
    fs::read(&file.path).map_err(|source| TableError::Read { path: file.path.clone(), source })
}
