//! Scan configuration: where to look, what to look for, and how far to look.
//!
//! A `ScanConfig` can be built in code, loaded from a `.yaml`/`.yml`/`.json`
//! file, and then overridden field by field by a frontend.

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Storage subdirectory of a Chromium profile holding the Local Storage LevelDB.
pub const DEFAULT_STORAGE_SUBDIR: &str = "Local Storage/leveldb";

/// File-name suffix of LevelDB sorted table files.
pub const DEFAULT_TABLE_SUFFIX: &str = ".ldb";

/// Default location of the persisted document.
pub const DEFAULT_OUTPUT_PATH: &str = "extracted_data.json";

/// Local Storage keys the marketplace dashboard used for its cached state.
pub const DEFAULT_MARKERS: &[&str] =
    &["makro_buybox_v2", "makro_listings", "makro_costs", "makro_seller_name"];

/// Profiles scanned when none are configured.
pub const DEFAULT_PROFILES: &[&str] = &["Default"];

/// Default number of characters of raw text shown in previews.
pub const DEFAULT_PREVIEW_CHARS: usize = 200;

/// Error type for loading, saving and validating configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to access config file {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid JSON config: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Invalid YAML config: {0}")]
    Yaml(#[from] serde_yaml::Error),

    /// Extension is not one of yaml/yml/json.
    #[error("Unsupported config format for {0} (expected .yaml, .yml or .json)")]
    UnsupportedFormat(PathBuf),

    #[error("Invalid config: {0}")]
    Invalid(String),

    /// No base dir configured and none could be derived from the environment.
    #[error("No base profile directory configured and none could be derived from the environment")]
    NoBaseDir,
}

/// Hard bounds on the work done per marker occurrence.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExtractLimits {
    /// Characters of text considered from the marker occurrence onward.
    pub window_chars: usize,
    /// Characters after the marker searched for a bracketed value.
    pub value_window_chars: usize,
    /// A value must be strictly longer than this to become a candidate.
    pub min_value_chars: usize,
}

impl Default for ExtractLimits {
    fn default() -> Self {
        Self { window_chars: 500_000, value_window_chars: 400_000, min_value_chars: 50 }
    }
}

/// Serializable description of one salvage run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScanConfig {
    /// Browser "User Data" directory. Derived from the environment when absent.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub base_dir: Option<PathBuf>,
    /// Profile directory names under `base_dir`, scanned in order.
    pub profiles: Vec<String>,
    /// Path of the LevelDB directory relative to a profile root.
    pub storage_subdir: String,
    /// Suffix identifying table files inside the storage directory.
    pub table_suffix: String,
    /// Marker literals to recover.
    pub markers: Vec<String>,
    pub limits: ExtractLimits,
    /// Characters shown in report previews.
    pub preview_chars: usize,
    /// Where the recovered document is written.
    pub output: PathBuf,
}

impl Default for ScanConfig {
    fn default() -> Self {
        Self {
            base_dir: None,
            profiles: DEFAULT_PROFILES.iter().map(|p| p.to_string()).collect(),
            storage_subdir: DEFAULT_STORAGE_SUBDIR.to_string(),
            table_suffix: DEFAULT_TABLE_SUFFIX.to_string(),
            markers: DEFAULT_MARKERS.iter().map(|m| m.to_string()).collect(),
            limits: ExtractLimits::default(),
            preview_chars: DEFAULT_PREVIEW_CHARS,
            output: PathBuf::from(DEFAULT_OUTPUT_PATH),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ConfigFormat {
    Json,
    Yaml,
}

impl ConfigFormat {
    fn from_path(path: &Path) -> Result<Self, ConfigError> {
        match path.extension().and_then(|e| e.to_str()) {
            Some("json") => Ok(Self::Json),
            Some("yaml") | Some("yml") => Ok(Self::Yaml),
            _ => Err(ConfigError::UnsupportedFormat(path.to_path_buf())),
        }
    }
}

impl ScanConfig {
    /// Load a config file; the format is chosen by extension.
    ///
    /// Fields missing from the file keep their defaults.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let format = ConfigFormat::from_path(path)?;
        let body = fs::read_to_string(path)
            .map_err(|source| ConfigError::Io { path: path.to_path_buf(), source })?;
        let config = match format {
            ConfigFormat::Json => serde_json::from_str(&body)?,
            ConfigFormat::Yaml => serde_yaml::from_str(&body)?,
        };
        Ok(config)
    }

    /// Write this config to `path`, in the format implied by its extension.
    pub fn save(&self, path: &Path) -> Result<(), ConfigError> {
        let format = ConfigFormat::from_path(path)?;
        let body = match format {
            ConfigFormat::Json => serde_json::to_string_pretty(self)?,
            ConfigFormat::Yaml => serde_yaml::to_string(self)?,
        };
        fs::write(path, body).map_err(|source| ConfigError::Io { path: path.to_path_buf(), source })
    }

    /// Reject configurations the scanner cannot run meaningfully.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.markers.is_empty() {
            return Err(ConfigError::Invalid("at least one marker is required".into()));
        }
        if self.markers.iter().any(|m| m.is_empty()) {
            return Err(ConfigError::Invalid("markers must not be empty strings".into()));
        }
        if self.table_suffix.is_empty() {
            return Err(ConfigError::Invalid("table suffix must not be empty".into()));
        }
        if self.limits.value_window_chars > self.limits.window_chars {
            return Err(ConfigError::Invalid(format!(
                "value window ({}) must not exceed the outer window ({})",
                self.limits.value_window_chars, self.limits.window_chars
            )));
        }
        Ok(())
    }

    /// Configured base dir, or the platform default browser data dir.
    pub fn resolve_base_dir(&self) -> Result<PathBuf, ConfigError> {
        match &self.base_dir {
            Some(dir) => Ok(dir.clone()),
            None => default_base_dir().ok_or(ConfigError::NoBaseDir),
        }
    }
}

/// Default Chrome "User Data" directory for the current platform.
///
/// This is the only place the environment is consulted.
pub fn default_base_dir() -> Option<PathBuf> {
    if cfg!(windows) {
        std::env::var_os("LOCALAPPDATA")
            .map(|dir| PathBuf::from(dir).join("Google").join("Chrome").join("User Data"))
    } else if cfg!(target_os = "macos") {
        std::env::var_os("HOME").map(|home| {
            PathBuf::from(home).join("Library").join("Application Support").join("Google").join("Chrome")
        })
    } else {
        std::env::var_os("HOME")
            .map(|home| PathBuf::from(home).join(".config").join("google-chrome"))
    }
}
