use salvage_core::report::MarkerSummary;

/// Print one block per marker summary.
pub fn print_summaries(summaries: &[MarkerSummary]) {
    for summary in summaries {
        println!("{summary}");
    }
}
