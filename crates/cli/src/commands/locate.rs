use anyhow::Result;
use serde::Serialize;

use salvage_core::locate::locate_storage_dirs;
use salvage_core::table::list_table_files;

use crate::commands::{build_config, ScanOptions};

#[derive(Debug, Serialize)]
pub struct LocatedDir {
    pub profile: String,
    pub path: String,
    pub table_files: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct LocateSnapshot {
    pub base_dir: String,
    pub profiles: Vec<String>,
    pub storage_dirs: Vec<LocatedDir>,
}

/// Show which storage directories and table files a scan would read.
pub fn locate_command(opts: &ScanOptions, json: bool) -> Result<()> {
    let config = build_config(opts)?;
    let base_dir = config.resolve_base_dir()?;

    let storage_dirs: Vec<LocatedDir> =
        locate_storage_dirs(&base_dir, &config.profiles, &config.storage_subdir)
            .into_iter()
            .map(|dir| {
                let (table_files, error) = match list_table_files(&dir, &config.table_suffix) {
                    Ok(files) => (files.into_iter().map(|f| f.file_name).collect(), None),
                    Err(err) => (Vec::new(), Some(err.to_string())),
                };
                LocatedDir {
                    profile: dir.profile,
                    path: dir.path.display().to_string(),
                    table_files,
                    error,
                }
            })
            .collect();

    let snapshot = LocateSnapshot {
        base_dir: base_dir.display().to_string(),
        profiles: config.profiles.clone(),
        storage_dirs,
    };

    if json {
        println!("{}", serde_json::to_string_pretty(&snapshot)?);
        return Ok(());
    }

    println!("Base dir: {}", snapshot.base_dir);
    println!(
        "Storage dirs ({} of {} profiles):",
        snapshot.storage_dirs.len(),
        snapshot.profiles.len()
    );
    if snapshot.storage_dirs.is_empty() {
        println!("  (none)");
        return Ok(());
    }
    for dir in &snapshot.storage_dirs {
        println!("- {} ({})", dir.profile, dir.path);
        if let Some(err) = &dir.error {
            println!("    error: {err}");
            continue;
        }
        println!("    {} table file(s)", dir.table_files.len());
        for file in &dir.table_files {
            println!("    - {file}");
        }
    }

    Ok(())
}
