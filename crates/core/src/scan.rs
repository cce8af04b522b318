//! Scan orchestration: profiles -> table files -> markers -> occurrences.
//!
//! The scan is sequential. Absence and unreadable files are skipped, never
//! fatal; they are counted in [`ScanStats`] and listed in
//! [`ScanOutcome::skipped`].

use std::path::PathBuf;

use serde::Serialize;
use tracing::{debug, warn};

use crate::aggregate::{AggregateResult, Aggregator, Offer};
use crate::config::{ConfigError, ExtractLimits, ScanConfig};
use crate::decode::decode_lenient;
use crate::extract::extract_candidates;
use crate::locate::{locate_storage_dirs, StorageDir};
use crate::table::{list_table_files, read_table_file, TableError, TableFile};

/// A change to the best value of a marker, in the order it happened.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Discovery {
    pub marker: String,
    /// `profile/file` the value came from.
    pub source: String,
    pub chars: usize,
    pub previous_chars: Option<usize>,
}

/// A path the scan could not read.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SkippedPath {
    pub path: PathBuf,
    pub reason: String,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct ScanStats {
    pub storage_dirs: usize,
    pub table_files: usize,
    pub bytes_read: u64,
    pub read_failures: usize,
    /// Candidates produced by the extractor, before aggregation.
    pub candidates: usize,
}

/// Everything a scan produced.
#[derive(Debug, Clone)]
pub struct ScanOutcome {
    pub result: AggregateResult,
    pub discoveries: Vec<Discovery>,
    pub skipped: Vec<SkippedPath>,
    pub stats: ScanStats,
}

/// Stateful scanner owning the aggregator for one run.
#[derive(Debug)]
pub struct Scanner<'a> {
    markers: &'a [String],
    suffix: &'a str,
    limits: ExtractLimits,
    aggregator: Aggregator,
    discoveries: Vec<Discovery>,
    skipped: Vec<SkippedPath>,
    stats: ScanStats,
}

impl<'a> Scanner<'a> {
    pub fn new(config: &'a ScanConfig) -> Self {
        Self {
            markers: &config.markers,
            suffix: &config.table_suffix,
            limits: config.limits,
            aggregator: Aggregator::new(config.markers.iter().cloned()),
            discoveries: Vec::new(),
            skipped: Vec::new(),
            stats: ScanStats::default(),
        }
    }

    /// Scan every table file in a storage directory.
    pub fn scan_dir(&mut self, dir: &StorageDir) {
        self.stats.storage_dirs += 1;
        let files = match list_table_files(dir, self.suffix) {
            Ok(files) => files,
            Err(err) => {
                self.record_failure(err);
                return;
            }
        };
        debug!(profile = %dir.profile, files = files.len(), "scanning storage dir");
        for file in &files {
            self.scan_file(file);
        }
    }

    /// Read, decode and scan one table file.
    pub fn scan_file(&mut self, file: &TableFile) {
        self.stats.table_files += 1;
        let raw = match read_table_file(file) {
            Ok(raw) => raw,
            Err(err) => {
                self.record_failure(err);
                return;
            }
        };
        self.stats.bytes_read += raw.len() as u64;
        let text = decode_lenient(&raw);
        self.scan_text(&text, file);
    }

    /// Extract every marker from already decoded text attributed to `file`.
    pub fn scan_text(&mut self, text: &str, file: &TableFile) {
        for marker in self.markers {
            for candidate in extract_candidates(text, marker, &self.limits, file) {
                self.stats.candidates += 1;
                let chars = candidate.chars;
                let offer = self.aggregator.offer(candidate);
                if !offer.is_update() {
                    continue;
                }
                let previous_chars = match offer {
                    Offer::Replaced { previous_chars } => Some(previous_chars),
                    _ => None,
                };
                self.discoveries.push(Discovery {
                    marker: marker.clone(),
                    source: file.label(),
                    chars,
                    previous_chars,
                });
            }
        }
    }

    fn record_failure(&mut self, err: TableError) {
        warn!(path = %err.path().display(), error = %err, "skipping unreadable path");
        self.stats.read_failures += 1;
        self.skipped.push(SkippedPath { path: err.path().to_path_buf(), reason: err.to_string() });
    }

    pub fn finish(self) -> ScanOutcome {
        ScanOutcome {
            result: self.aggregator.finish(),
            discoveries: self.discoveries,
            skipped: self.skipped,
            stats: self.stats,
        }
    }
}

/// Validate `config`, locate its storage directories and scan them all.
pub fn run_scan(config: &ScanConfig) -> Result<ScanOutcome, ConfigError> {
    config.validate()?;
    let base_dir = config.resolve_base_dir()?;
    let dirs = locate_storage_dirs(&base_dir, &config.profiles, &config.storage_subdir);

    let mut scanner = Scanner::new(config);
    for dir in &dirs {
        scanner.scan_dir(dir);
    }
    Ok(scanner.finish())
}
