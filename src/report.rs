//! Unmatched-species report and run summary output.

use anyhow::{Context, Result};
use std::collections::BTreeSet;
use std::path::Path;
use std::time::Duration;

use crate::models::{MasterIndex, RunSummary};
use crate::progress::format_duration;

/// Distinct non-empty species names with no candidates, sorted ascending.
pub fn unmatched_species(species: &[String], index: &MasterIndex) -> Vec<String> {
    species
        .iter()
        .filter(|name| !name.is_empty())
        .filter(|name| index.get(name.as_str()).map_or(true, |c| c.is_empty()))
        .map(String::as_str)
        .collect::<BTreeSet<&str>>()
        .into_iter()
        .map(str::to_string)
        .collect()
}

/// Print the end-of-run summary to stdout.
pub fn print_summary(summary: &RunSummary, elapsed: Duration) {
    println!("\n{:=<60}", "");
    println!("Coordinate assignment complete!");
    println!("  Total rows: {}", summary.total_rows);
    println!("  Rows with coordinates: {}", summary.assigned_rows);
    println!(
        "  Species without match: {} -> {}",
        summary.unmatched_species,
        summary.no_match_report.as_deref().unwrap_or("N/A")
    );
    println!(
        "  Master: {} species, {} candidate pairs",
        summary.master_species, summary.master_candidates
    );
    println!("  Output: {}", summary.output);
    println!("  Elapsed: {}", format_duration(elapsed));
    println!("{:=<60}", "");
}

/// Write the summary as pretty JSON.
pub fn write_stats(path: &Path, summary: &RunSummary) -> Result<()> {
    let file = std::fs::File::create(path)
        .with_context(|| format!("Failed to create stats file {}", path.display()))?;
    serde_json::to_writer_pretty(std::io::BufWriter::new(file), summary)
        .context("Failed to serialize run stats")?;
    Ok(())
}
