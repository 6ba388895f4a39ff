//! End-to-end run: load table -> load master -> assign -> write outputs.
//!
//! Every column is resolved and every output path validated before the
//! first file is written, so a configuration error leaves no partial output.

use anyhow::{Context, Result};
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::path::{Path, PathBuf};

use crate::assign::{assign_coordinates, enrich_table, normalized_species};
use crate::columns::{resolve_column, OBSERVATION_SPECIES};
use crate::master::{build_master_index, candidate_count};
use crate::models::RunSummary;
use crate::progress::{finish_phase, phase_bar, phase_spinner, Phase};
use crate::report::{unmatched_species, write_stats};
use crate::safety::validate_output_path;
use crate::table::{read_table, write_no_match, write_table};

/// Fixed file name of the no-match report, placed next to the output
pub const NO_MATCH_FILE: &str = "no_match.csv";

pub const DEFAULT_SEED: u64 = 20251003;

#[derive(Clone, Debug)]
pub struct RunConfig {
    pub table: PathBuf,
    pub master: PathBuf,
    pub output: PathBuf,
    pub seed: u64,
    pub stats: Option<PathBuf>,
}

impl RunConfig {
    /// `<dir of output>/no_match.csv`
    pub fn no_match_path(&self) -> PathBuf {
        self.output
            .parent()
            .unwrap_or_else(|| Path::new(""))
            .join(NO_MATCH_FILE)
    }
}

pub fn run(config: &RunConfig) -> Result<RunSummary> {
    let no_match_path = config.no_match_path();
    let sources = [config.table.as_path(), config.master.as_path()];
    validate_output_path(&no_match_path, &sources)?;
    validate_output_path(&config.output, &[sources[0], sources[1], no_match_path.as_path()])?;
    if let Some(stats) = &config.stats {
        validate_output_path(
            stats,
            &[sources[0], sources[1], no_match_path.as_path(), config.output.as_path()],
        )?;
    }

    let spinner = phase_spinner(Phase::Observations, "Reading observation table");
    let table = read_table(&config.table)?;
    let species_col = resolve_column(&table.headers, OBSERVATION_SPECIES, "species")
        .with_context(|| format!("Observation table {}", config.table.display()))?;
    finish_phase(
        &spinner,
        Phase::Observations,
        format!("Read {} rows, species column '{}'", table.len(), table.headers[species_col]),
    );

    let spinner = phase_spinner(Phase::Master, "Building master index");
    let master_table = read_table(&config.master)?;
    let index = build_master_index(&master_table)
        .with_context(|| format!("Master table {}", config.master.display()))?;
    let master_candidates = candidate_count(&index);
    finish_phase(
        &spinner,
        Phase::Master,
        format!(
            "Indexed {} species ({} of {} rows usable)",
            index.len(),
            master_candidates,
            master_table.len()
        ),
    );

    let pb = phase_bar(Phase::Assign, "Assigning coordinates", table.len());
    let species = normalized_species(&table, species_col);
    let mut rng = StdRng::seed_from_u64(config.seed);
    let assignments = assign_coordinates(&species, &index, &mut rng);
    let enriched = enrich_table(&table, &assignments);
    let assigned_rows = assignments.iter().filter(|a| a.is_some()).count();
    let unmatched = unmatched_species(&species, &index);
    pb.set_position(table.len() as u64);
    finish_phase(
        &pb,
        Phase::Assign,
        format!("Assigned {} rows, {} species unmatched", assigned_rows, unmatched.len()),
    );

    // Enriched table first: a failed write leaves no orphan report
    let spinner = phase_spinner(Phase::Write, "Writing outputs");
    write_table(&config.output, &enriched)?;
    let no_match_report = if unmatched.is_empty() {
        None
    } else {
        write_no_match(&no_match_path, &unmatched)?;
        Some(no_match_path.display().to_string())
    };

    let summary = RunSummary {
        total_rows: table.len(),
        assigned_rows,
        unmatched_species: unmatched.len(),
        master_species: index.len(),
        master_candidates,
        seed: config.seed,
        output: config.output.display().to_string(),
        no_match_report,
    };

    if let Some(stats) = &config.stats {
        write_stats(stats, &summary)?;
    }
    finish_phase(&spinner, Phase::Write, format!("Wrote {}", summary.output));

    Ok(summary)
}
