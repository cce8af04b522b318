use std::path::Path;

use anyhow::{anyhow, Context, Result};

use salvage_core::config::{default_base_dir, ScanConfig};

/// Write the default scan configuration to `path` for editing.
///
/// The base dir is pre-filled from the environment when it can be derived.
pub fn init_config_command(path: &Path, force: bool) -> Result<()> {
    if path.exists() && !force {
        return Err(anyhow!(
            "Config file already exists: {} (use --force to overwrite)",
            path.display()
        ));
    }

    let config = ScanConfig { base_dir: default_base_dir(), ..ScanConfig::default() };
    config.save(path).with_context(|| format!("Failed to write config {}", path.display()))?;

    println!("Wrote scan config:");
    println!("  Path: {}", path.display());
    match &config.base_dir {
        Some(dir) => println!("  Base dir: {}", dir.display()),
        None => println!("  Base dir: (not set; pass --base-dir or edit the file)"),
    }
    println!("  Profiles: {}", config.profiles.join(", "));
    println!("  Markers: {}", config.markers.join(", "));

    Ok(())
}
