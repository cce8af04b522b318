use std::path::PathBuf;

use anyhow::{Context, Result};
use salvage_core::config::ScanConfig;

/// Scan settings as given on the command line.
///
/// Every field is optional; anything left unset comes from `--config` or,
/// failing that, from [`ScanConfig::default`].
#[derive(Debug, Clone, Default)]
pub struct ScanOptions {
    pub config: Option<PathBuf>,
    pub base_dir: Option<PathBuf>,
    pub profiles: Vec<String>,
    pub markers: Vec<String>,
    pub storage_subdir: Option<String>,
    pub suffix: Option<String>,
    pub output: Option<PathBuf>,
    pub min_chars: Option<usize>,
}

/// Merge the config file (if any) with command-line overrides and validate.
pub fn build_config(opts: &ScanOptions) -> Result<ScanConfig> {
    let mut config = match &opts.config {
        Some(path) => ScanConfig::load(path)
            .with_context(|| format!("Failed to load scan config {}", path.display()))?,
        None => ScanConfig::default(),
    };

    if let Some(base_dir) = &opts.base_dir {
        config.base_dir = Some(base_dir.clone());
    }
    if !opts.profiles.is_empty() {
        config.profiles = opts.profiles.clone();
    }
    if !opts.markers.is_empty() {
        config.markers = opts.markers.clone();
    }
    if let Some(subdir) = &opts.storage_subdir {
        config.storage_subdir = subdir.clone();
    }
    if let Some(suffix) = &opts.suffix {
        config.table_suffix = suffix.clone();
    }
    if let Some(output) = &opts.output {
        config.output = output.clone();
    }
    if let Some(min_chars) = opts.min_chars {
        config.limits.min_value_chars = min_chars;
    }

    config.validate().context("Invalid scan configuration")?;
    Ok(config)
}
