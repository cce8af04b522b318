use std::path::Path;

use anyhow::{Context, Result};

use salvage_core::report::summarize_texts;
use salvage_core::sink::read_document;

use crate::commands::print_summaries;

/// Re-summarize a previously persisted document without rescanning.
pub fn report_command(input: &Path, preview_chars: usize, json: bool) -> Result<()> {
    let document = read_document(input)
        .with_context(|| format!("Failed to load recovered document {}", input.display()))?;
    let summaries = summarize_texts(
        document.iter().map(|(marker, text)| (marker.as_str(), text.as_str())),
        preview_chars,
    );

    if json {
        println!("{}", serde_json::to_string_pretty(&summaries)?);
        return Ok(());
    }

    println!("Recovered document: {}", input.display());
    println!("Markers ({}):", summaries.len());
    if summaries.is_empty() {
        println!("  (none)");
        return Ok(());
    }
    print_summaries(&summaries);

    Ok(())
}
