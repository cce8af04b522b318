//! Profile locator: turns profile names into existing storage directories.

use std::path::{Path, PathBuf};

use serde::Serialize;
use tracing::debug;

/// Logical layout of one browser profile on disk.
///
/// This is derived from the base directory and profile name. It does *not*
/// perform any IO itself.
#[derive(Debug, Clone)]
pub struct ProfileLayout {
    /// Profile name as configured (e.g. `Default`, `Profile 12`).
    pub profile: String,
    /// Root directory of the profile.
    pub root: PathBuf,
    /// LevelDB directory holding the profile's Local Storage.
    pub storage_dir: PathBuf,
}

impl ProfileLayout {
    /// Compute the layout for `profile` under `base_dir`.
    ///
    /// `storage_subdir` may contain `/` separators; each component is joined
    /// separately so the result is native on every platform.
    pub fn new(base_dir: impl AsRef<Path>, profile: &str, storage_subdir: &str) -> Self {
        let root = base_dir.as_ref().join(profile);
        let storage_dir = storage_subdir
            .split(|c| c == '/' || c == '\\')
            .filter(|c| !c.is_empty())
            .fold(root.clone(), |acc, component| acc.join(component));
        Self { profile: profile.to_string(), root, storage_dir }
    }
}

/// A storage directory that exists on disk, tagged with its profile.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StorageDir {
    pub profile: String,
    pub path: PathBuf,
}

/// Resolve the storage directories that exist for `profiles`, preserving order.
///
/// A missing profile is the common case, not a failure, so it is only
/// logged at debug level.
pub fn locate_storage_dirs<S: AsRef<str>>(
    base_dir: &Path,
    profiles: &[S],
    storage_subdir: &str,
) -> Vec<StorageDir> {
    let mut found = Vec::new();
    for profile in profiles {
        let layout = ProfileLayout::new(base_dir, profile.as_ref(), storage_subdir);
        if !layout.root.is_dir() {
            debug!(profile = %layout.profile, path = %layout.root.display(), "profile missing, skipping");
            continue;
        }
        if !layout.storage_dir.is_dir() {
            debug!(profile = %layout.profile, path = %layout.storage_dir.display(), "storage dir missing, skipping");
            continue;
        }
        found.push(StorageDir { profile: layout.profile, path: layout.storage_dir });
    }
    found
}
