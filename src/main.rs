use anyhow::Result;
use clap::Parser;
use std::path::PathBuf;
use std::time::Instant;

use species_coords::pipeline::{run, RunConfig, DEFAULT_SEED};
use species_coords::progress::set_log_only;
use species_coords::report::print_summary;

#[derive(Parser)]
#[command(name = "species-coords")]
#[command(about = "Assign master-table coordinates to species observation rows")]
struct Args {
    /// Observation table CSV
    #[arg(long, alias = "tabla", default_value = "AJ/Tabla.csv")]
    table: PathBuf,

    /// Master coordinates CSV
    #[arg(long, alias = "maestro", default_value = "AJ/Cordenadas.csv")]
    master: PathBuf,

    /// Enriched output CSV (no_match.csv is written next to it)
    #[arg(long, default_value = "AJ/Tabla_con_coordenadas.csv")]
    out: PathBuf,

    /// Random seed for reproducible sampling
    #[arg(long, default_value_t = DEFAULT_SEED)]
    seed: u64,

    /// Write run statistics as JSON
    #[arg(long)]
    stats: Option<PathBuf>,

    /// Hide progress bars and log phases to stderr
    #[arg(long)]
    log_only: bool,
}

fn main() -> Result<()> {
    let args = Args::parse();
    set_log_only(args.log_only);

    let start = Instant::now();

    println!("Observation table: {:?}", args.table);
    println!("Master table: {:?}", args.master);

    let config = RunConfig {
        table: args.table,
        master: args.master,
        output: args.out,
        seed: args.seed,
        stats: args.stats,
    };
    let summary = run(&config)?;

    print_summary(&summary, start.elapsed());
    Ok(())
}
