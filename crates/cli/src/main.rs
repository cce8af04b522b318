use std::path::PathBuf;

use anyhow::Result;
use clap::{Args, Parser, Subcommand};
use ldb_salvage::commands::{
    init_config_command, locate_command, report_command, scan_command, ScanOptions,
};
use ldb_salvage::logging::init_tracing;
use salvage_core::config::DEFAULT_PREVIEW_CHARS;

/// Recover JSON payloads a web app cached in Chromium Local Storage.
///
/// This CLI is a thin wrapper around `salvage-core` (exposed in code as
/// `salvage_core`). It reads the LevelDB `.ldb` table files of one or more
/// browser profiles as raw bytes; it never opens the database itself.
#[derive(Parser, Debug)]
#[command(
    name = "ldb-salvage",
    version,
    about = "Recover cached JSON payloads from raw Local Storage table files",
    long_about = None
)]
struct Cli {
    /// Log debug-level diagnostics to stderr (overridden by RUST_LOG).
    #[arg(long, global = true, default_value_t = false)]
    verbose: bool,

    /// Emit diagnostics as JSON lines.
    #[arg(long, global = true, default_value_t = false)]
    log_json: bool,

    #[command(subcommand)]
    command: Command,
}

/// Options shared by commands that need to find the storage directories.
#[derive(Args, Debug, Clone)]
struct SourceArgs {
    /// Scan config file (.yaml, .yml or .json). Flags override its values.
    #[arg(long)]
    config: Option<PathBuf>,

    /// Browser "User Data" directory. Defaults to the platform Chrome location.
    #[arg(long)]
    base_dir: Option<PathBuf>,

    /// Profile directory name to scan (repeatable, scanned in order).
    #[arg(long = "profile")]
    profiles: Vec<String>,

    /// Storage directory relative to a profile root.
    #[arg(long)]
    storage_subdir: Option<String>,

    /// Suffix of the table files to read.
    #[arg(long)]
    suffix: Option<String>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Scan table files, print what was recovered, and write the document.
    ///
    /// For each marker only the longest value found across all profiles and
    /// files is kept.
    Scan {
        #[command(flatten)]
        source: SourceArgs,

        /// Marker literal to recover (repeatable).
        #[arg(long = "marker")]
        markers: Vec<String>,

        /// Where to write the recovered document.
        #[arg(long)]
        output: Option<PathBuf>,

        /// Values must be longer than this many characters.
        #[arg(long)]
        min_chars: Option<usize>,

        /// Emit JSON instead of human-readable text.
        #[arg(long, default_value_t = false)]
        json: bool,
    },

    /// Summarize a previously written document without rescanning.
    Report {
        /// Recovered document to summarize.
        #[arg(long, default_value = "extracted_data.json")]
        input: PathBuf,

        /// Characters shown in previews.
        #[arg(long, default_value_t = DEFAULT_PREVIEW_CHARS)]
        preview_chars: usize,

        /// Emit JSON instead of human-readable text.
        #[arg(long, default_value_t = false)]
        json: bool,
    },

    /// List the storage directories and table files a scan would read.
    Locate {
        #[command(flatten)]
        source: SourceArgs,

        /// Emit JSON instead of human-readable text.
        #[arg(long, default_value_t = false)]
        json: bool,
    },

    /// Write the default scan configuration to a file for editing.
    InitConfig {
        /// Destination (.yaml, .yml or .json).
        #[arg(long, default_value = "salvage.yaml")]
        path: PathBuf,

        /// Overwrite an existing file.
        #[arg(long, default_value_t = false)]
        force: bool,
    },
}

impl SourceArgs {
    fn into_options(self) -> ScanOptions {
        ScanOptions {
            config: self.config,
            base_dir: self.base_dir,
            profiles: self.profiles,
            storage_subdir: self.storage_subdir,
            suffix: self.suffix,
            ..ScanOptions::default()
        }
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose, cli.log_json);

    match cli.command {
        Command::Scan { source, markers, output, min_chars, json } => {
            let opts = ScanOptions { markers, output, min_chars, ..source.into_options() };
            scan_command(&opts, json)?
        }
        Command::Report { input, preview_chars, json } => {
            report_command(&input, preview_chars, json)?
        }
        Command::Locate { source, json } => locate_command(&source.into_options(), json)?,
        Command::InitConfig { path, force } => init_config_command(&path, force)?,
    }

    Ok(())
}
