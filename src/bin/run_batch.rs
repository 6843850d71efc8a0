//! Run projections for every profile in a batch CSV
//!
//! Outputs one summary row per profile

use std::path::PathBuf;
use std::sync::Arc;
use std::time::Instant;

use anyhow::{Context, Result};
use clap::Parser;
use log::{info, warn};

use pension_projection::profile::{load_profiles, loader::DEFAULT_PROFILES_PATH};
use pension_projection::projection::FixedClock;
use pension_projection::{Assumptions, ProjectionConfig, ScenarioRunner};

#[derive(Parser, Debug)]
#[command(name = "run_batch", about = "Project every profile in a CSV file under both regimes")]
struct Args {
    #[arg(long, default_value = DEFAULT_PROFILES_PATH)]
    profiles: PathBuf,
    #[arg(long, help = "Directory with assumption CSV files, defaults to built-in values")]
    assumptions: Option<PathBuf>,
    #[arg(long, help = "Months since reform start, defaults to today's date")]
    reform_month: Option<u32>,
    #[arg(long, default_value = "batch_projection_output.csv")]
    output: PathBuf,
}

fn main() -> Result<()> {
    env_logger::init();
    let args = Args::parse();

    let start = Instant::now();
    info!("Loading profiles from {}", args.profiles.display());

    let loaded = load_profiles(&args.profiles)
        .map_err(|e| anyhow::anyhow!("{}", e))
        .with_context(|| format!("Failed to load profiles from {}", args.profiles.display()))?;
    info!("Loaded {} profiles in {:?}", loaded.len(), start.elapsed());

    let assumptions = match &args.assumptions {
        Some(dir) => Assumptions::from_csv_path(dir)
            .map_err(|e| anyhow::anyhow!("{}", e))
            .with_context(|| format!("Failed to load assumptions from {}", dir.display()))?,
        None => Assumptions::default_reform(),
    };

    let reform_start = assumptions.plan.reform_start;
    let mut runner = ScenarioRunner::with_assumptions(assumptions);
    if let Some(index) = args.reform_month {
        runner = runner.with_clock(Arc::new(FixedClock::at_month_index(reform_start, index)));
    }

    let proj_start = Instant::now();
    let profiles: Vec<_> = loaded.iter().map(|l| l.profile.clone()).collect();
    let results = runner.run_batch(&profiles, ProjectionConfig::default());
    info!("Projections complete in {:?}", proj_start.elapsed());

    let mut writer = csv::Writer::from_path(&args.output)
        .with_context(|| format!("Failed to create {}", args.output.display()))?;

    let mut written = 0;
    let mut total_improvement = 0.0;
    for (entry, result) in loaded.iter().zip(&results) {
        match result {
            Ok(bundle) => {
                let row = bundle.summary_row(&entry.profile_id);
                total_improvement += row.improvement;
                writer.serialize(&row)?;
                written += 1;
            }
            Err(e) => warn!("Profile {} skipped: {}", entry.profile_id, e),
        }
    }
    writer.flush()?;

    println!("Output written to {}", args.output.display());
    println!("\nBatch Summary:");
    println!("  Profiles projected: {} of {}", written, loaded.len());
    if written > 0 {
        println!("  Average monthly improvement: {:.0}", total_improvement / written as f64);
    }
    println!("\nTotal time: {:?}", start.elapsed());

    Ok(())
}
