// Offline re-scoring of a recorded gameplay CSV.
//
// Replays every row of a session's gameplay_data.csv through a fresh
// evaluator and prints the resulting summary. Malformed rows are logged
// and skipped, so partially-written logs still score.

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;

use pokemon_eval::{Evaluator, StepRecord};

#[derive(Debug, Parser)]
#[command(
    name = "evaluate-log",
    about = "Evaluate a recorded Pokemon gameplay CSV file",
    version
)]
struct Args {
    /// Path to the gameplay CSV file to evaluate
    csv_file: PathBuf,
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let args = Args::parse();
    let mut reader = csv::Reader::from_path(&args.csv_file)
        .with_context(|| format!("Failed to open {}", args.csv_file.display()))?;

    let mut evaluator = Evaluator::new();
    for row in reader.deserialize::<StepRecord>() {
        match row {
            Ok(record) => evaluator.record_row(&record),
            Err(e) => log::warn!("Skipping unparseable row: {e}"),
        }
    }

    let summary = evaluator.summary();
    println!("=== Evaluation Summary ===");
    println!("Total Unique Pokemon: {}", summary.pokemon_seen.len());
    println!("Total Badges Earned: {}", summary.badges_earned.len());
    println!("Total Locations Visited: {}", summary.locations_visited.len());
    println!("Total Score: {:.2}", summary.total_score);

    Ok(())
}
