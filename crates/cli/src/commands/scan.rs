use anyhow::{Context, Result};
use serde::Serialize;
use tracing::{debug, enabled, Level};

use salvage_core::report::{summarize_all, MarkerSummary};
use salvage_core::scan::{run_scan, Discovery, ScanStats, SkippedPath};
use salvage_core::sink::write_document;

use crate::absolutize;
use crate::commands::{build_config, print_summaries, ScanOptions};

#[derive(Debug, Serialize)]
pub struct ScanSnapshot {
    pub base_dir: String,
    pub profiles: Vec<String>,
    pub markers: Vec<String>,
    pub output: String,
    pub digest: String,
    pub stats: ScanStats,
    pub discoveries: Vec<Discovery>,
    pub skipped: Vec<SkippedPath>,
    pub summaries: Vec<MarkerSummary>,
}

/// Run the full pipeline and persist the recovered document.
///
/// Only a failure to write the document is fatal; unreadable files and
/// absent profiles are reported and skipped. Replacement notices are logged
/// live at `info`; when that level is filtered out they are printed on stdout
/// once the scan is done.
pub fn scan_command(opts: &ScanOptions, json: bool) -> Result<()> {
    let config = build_config(opts)?;
    let base_dir = config.resolve_base_dir()?;
    debug!(
        base_dir = %base_dir.display(),
        profiles = ?config.profiles,
        markers = ?config.markers,
        "starting scan"
    );
    let notices_logged = enabled!(target: "salvage_core::aggregate", Level::INFO);
    let outcome = run_scan(&config).context("Failed to run scan")?;
    let summaries = summarize_all(&outcome.result, config.preview_chars);

    if !json {
        if !notices_logged {
            for discovery in &outcome.discoveries {
                println!(
                    "[{}] Found {}: {} chars",
                    discovery.source, discovery.marker, discovery.chars
                );
            }
        }
        println!();
        println!("=== SUMMARY ===");
        if summaries.is_empty() {
            println!("(no candidates found)");
        }
        print_summaries(&summaries);
        if !outcome.skipped.is_empty() {
            println!();
            println!("Skipped ({}):", outcome.skipped.len());
            for skipped in &outcome.skipped {
                println!("  - {}: {}", skipped.path.display(), skipped.reason);
            }
        }
    }

    write_document(&config.output, &outcome.result).with_context(|| {
        format!("Failed to write recovered document to {}", config.output.display())
    })?;
    let output = absolutize(&config.output)?;
    let digest = outcome.result.digest();

    if json {
        let snapshot = ScanSnapshot {
            base_dir: base_dir.display().to_string(),
            profiles: config.profiles.clone(),
            markers: config.markers.clone(),
            output: output.display().to_string(),
            digest,
            stats: outcome.stats,
            discoveries: outcome.discoveries,
            skipped: outcome.skipped,
            summaries,
        };
        println!("{}", serde_json::to_string_pretty(&snapshot)?);
        return Ok(());
    }

    println!();
    println!(
        "Scanned {} storage dir(s), {} table file(s), {} bytes",
        outcome.stats.storage_dirs, outcome.stats.table_files, outcome.stats.bytes_read
    );
    println!("Saved to {}", output.display());
    println!("Digest: {}", digest);

    Ok(())
}
