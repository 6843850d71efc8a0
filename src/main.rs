//! Pension Projection CLI
//!
//! Command-line interface for projecting one profile under both regimes

use std::fs::File;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::Parser;
use log::info;

use pension_projection::profile::Gender;
use pension_projection::projection::{AccrualRow, FixedClock};
use pension_projection::services::format_clp;
use pension_projection::{Assumptions, ProjectionBundle, ProjectionConfig, ProjectionEngine, Profile};

#[derive(Parser, Debug)]
#[command(
    name = "pension_projection",
    about = "Project a monthly pension under the pre-reform and post-reform regimes"
)]
struct Cli {
    #[arg(long)]
    age_years: u32,
    #[arg(long, default_value_t = 0)]
    age_months: u32,
    #[arg(long, default_value_t = 65.0)]
    retirement_age: f64,
    #[arg(long, help = "Current individual account balance")]
    balance: f64,
    #[arg(long, help = "Monthly gross salary")]
    salary: f64,
    #[arg(long, help = "M or F")]
    gender: Gender,
    #[arg(long, default_value_t = 0.0, help = "Desired monthly pension in today's money")]
    ideal_pension: f64,

    #[arg(long, help = "Directory with assumption CSV files, defaults to built-in values")]
    assumptions: Option<PathBuf>,
    #[arg(long, help = "Months since reform start, defaults to today's date")]
    reform_month: Option<u32>,

    #[arg(long, help = "Annual account return, e.g. 0.0311")]
    interest_rate: Option<f64>,
    #[arg(long, help = "Annual salary growth, e.g. 0.0125")]
    salary_growth: Option<f64>,
    #[arg(long, help = "Annual reserve fund return, e.g. 0.0391")]
    reserve_fund_rate: Option<f64>,
    #[arg(long, help = "Annual inflation, e.g. 0.03")]
    inflation: Option<f64>,

    #[arg(long, help = "Write the post-reform monthly accrual trace to this CSV file")]
    trace_csv: Option<PathBuf>,
    #[arg(long, help = "Print the full result as JSON")]
    json: bool,
}

fn load_assumptions(cli: &Cli) -> Result<Assumptions> {
    let mut assumptions = match &cli.assumptions {
        Some(dir) => Assumptions::from_csv_path(dir)
            .map_err(|e| anyhow::anyhow!("{}", e))
            .with_context(|| format!("Failed to load assumptions from {}", dir.display()))?,
        None => Assumptions::default_reform(),
    };

    let econ = &mut assumptions.economic;
    if let Some(rate) = cli.interest_rate {
        econ.annual_interest_rate = rate;
    }
    if let Some(rate) = cli.salary_growth {
        econ.salary_growth_rate = rate;
    }
    if let Some(rate) = cli.reserve_fund_rate {
        econ.reserve_fund_rate = rate;
    }
    if let Some(rate) = cli.inflation {
        econ.inflation_rate = rate;
    }
    assumptions.validate().context("Invalid economic assumptions")?;

    Ok(assumptions)
}

fn write_trace(path: &Path, rows: &[AccrualRow]) -> Result<()> {
    let file = File::create(path).with_context(|| format!("Unable to create {}", path.display()))?;
    let mut writer = csv::Writer::from_writer(file);
    for row in rows {
        writer.serialize(row)?;
    }
    writer.flush()?;
    Ok(())
}

fn print_bundle(bundle: &ProjectionBundle) {
    let pre = &bundle.pre_reform;
    let post = &bundle.post_reform;

    println!("Pension Projection v{}", env!("CARGO_PKG_VERSION"));
    println!("======================\n");

    println!("Profile:");
    println!("  Age: {:.2}  Retirement: {:.2}  Gender: {}", bundle.profile.current_age, bundle.profile.retirement_age, bundle.profile.gender);
    println!("  Balance: {}  Salary: {}", format_clp(bundle.profile.current_balance), format_clp(bundle.profile.monthly_salary));
    println!(
        "  Life expectancy: {:.1} ({} years {} months of pension)",
        bundle.life_expectancy, bundle.payout_horizon.years, bundle.payout_horizon.months
    );
    println!("  Reform month index: {}", post.reform_month_index);
    println!();

    println!("Pre-reform:");
    println!("  Final balance:        {}", format_clp(pre.final_balance));
    println!("  Worker contributions: {}", format_clp(pre.worker_contributions));
    println!("  SIS premiums:         {}", format_clp(pre.sis_contributions));
    println!("  Accumulated returns:  {}", format_clp(pre.accumulated_returns));
    println!("  Monthly pension:      {}{}", format_clp(pre.monthly_pension), floor_note(pre.minimum_pension_applied));
    println!();

    println!("Post-reform:");
    println!("  Final balance:          {}", format_clp(post.final_balance));
    println!("  Worker contributions:   {}", format_clp(post.worker_contributions));
    println!("  Employer contributions: {}", format_clp(post.employer_contributions));
    println!("  SIS premiums:           {}", format_clp(post.sis_contributions));
    println!("  Women's compensation:   {}", format_clp(post.women_compensation));
    println!("  Accumulated returns:    {}", format_clp(post.accumulated_returns));
    println!("  Reserve fund balance:   {}", format_clp(post.reserve_fund_balance));
    println!("  Base pension:           {}{}", format_clp(post.base_pension), floor_note(post.minimum_pension_applied));
    if post.additional_pension > 0.0 {
        println!("  Compensation pension:   {}", format_clp(post.additional_pension));
    }
    println!("  Reserve bonus:          {}", format_clp(post.reserve_bonus));
    println!("  Total pension:          {}", format_clp(post.total_pension()));
    println!();

    println!("Comparison:");
    println!("  Improvement: {}", format_clp(bundle.pension_improvement()));
    if let Some(rate) = bundle.replacement_rate() {
        println!("  Replacement rate: {:.1}%", rate * 100.0);
    }
    if bundle.target.present_value > 0.0 {
        println!(
            "  Target pension: {} today, {} at retirement, gap {}",
            format_clp(bundle.target.present_value),
            format_clp(bundle.target.future_value),
            format_clp(bundle.target.monthly_gap)
        );
    }
}

fn floor_note(applied: bool) -> &'static str {
    if applied {
        " (minimum pension applied)"
    } else {
        ""
    }
}

fn main() -> Result<()> {
    env_logger::init();

    let cli = Cli::parse();
    anyhow::ensure!(cli.age_months < 12, "--age-months must be below 12, got {}", cli.age_months);
    let assumptions = load_assumptions(&cli)?;

    let profile = Profile::from_years_months(
        cli.age_years,
        cli.age_months,
        cli.retirement_age,
        cli.balance,
        cli.salary,
        cli.gender,
    )
    .with_ideal_pension(cli.ideal_pension);

    let config = ProjectionConfig {
        detailed_output: cli.trace_csv.is_some(),
    };

    let reform_start = assumptions.plan.reform_start;
    let mut engine = ProjectionEngine::new(assumptions, config);
    if let Some(index) = cli.reform_month {
        engine = engine.with_clock(Arc::new(FixedClock::at_month_index(reform_start, index)));
    }

    let bundle = engine.project(&profile).context("Projection failed")?;
    info!("Projection complete from reform month {}", bundle.post_reform.reform_month_index);

    if let Some(path) = &cli.trace_csv {
        write_trace(path, &bundle.post_reform.cashflows)?;
        info!("Accrual trace written to {}", path.display());
    }

    if cli.json {
        println!("{}", serde_json::to_string_pretty(&bundle)?);
    } else {
        print_bundle(&bundle);
    }

    Ok(())
}
