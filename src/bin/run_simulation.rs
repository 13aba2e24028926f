//! Run a Monte Carlo batch from the command line
//!
//! Outputs the runway histogram as CSV and a risk summary to stdout

use std::fs::File;
use std::io::Write;
use std::time::Instant;

use anyhow::Context;
use clap::Parser;

use wealth_model::{MonteCarloEngine, SimulationConfig};

#[derive(Parser, Debug)]
#[command(name = "run_simulation", about = "Monte Carlo net worth runway simulation")]
struct Args {
    /// Number of independent paths
    #[arg(long, default_value_t = 10_000)]
    simulations: u32,

    /// Projection horizon in months
    #[arg(long, default_value_t = 120)]
    months: u32,

    /// Base seed for reproducible batches
    #[arg(long)]
    seed: Option<u64>,

    /// Current total net worth
    #[arg(long, default_value_t = 250_000.0)]
    net_worth: f64,

    /// Current cash balance
    #[arg(long, default_value_t = 25_000.0)]
    cash: f64,

    /// Monthly take-home income
    #[arg(long, default_value_t = 8_000.0)]
    income: f64,

    /// Monthly expenses
    #[arg(long, default_value_t = 6_000.0)]
    expenses: f64,

    /// Annual expense inflation rate
    #[arg(long)]
    inflation: Option<f64>,

    /// Output path for the histogram CSV
    #[arg(long, default_value = "runway_histogram.csv")]
    output: String,

    /// Optional path for the full aggregated results as JSON
    #[arg(long)]
    json: Option<String>,
}

fn main() -> anyhow::Result<()> {
    env_logger::init();
    let args = Args::parse();

    let mut config =
        SimulationConfig::from_balances(args.net_worth, args.cash, args.income, args.expenses);
    config.num_simulations = args.simulations;
    config.time_horizon_months = args.months;
    config.inflation_rate = args.inflation;

    let engine = match args.seed {
        Some(seed) => MonteCarloEngine::with_seed(seed),
        None => MonteCarloEngine::new(),
    };

    println!("Running {} paths over {} months...", args.simulations, args.months);
    let start = Instant::now();
    let results = engine.run(&config).context("simulation failed")?;
    println!("Simulation complete in {:?}", start.elapsed());

    // Write histogram
    let mut file = File::create(&args.output)
        .with_context(|| format!("failed to create {}", args.output))?;
    writeln!(file, "StartMonth,EndMonth,Count")?;
    for bucket in &results.distribution_data {
        writeln!(file, "{},{},{}", bucket.start_month, bucket.end_month, bucket.count)?;
    }
    println!("Histogram written to {}", args.output);

    if let Some(json_path) = &args.json {
        let file = File::create(json_path)
            .with_context(|| format!("failed to create {}", json_path))?;
        serde_json::to_writer_pretty(file, &results).context("failed to serialize results")?;
        println!("Full results written to {}", json_path);
    }

    // Risk summary
    println!("\nRunway Summary:");
    println!("  p10={:.0}  p25={:.0}  p50={:.0}  p75={:.0}  p90={:.0} months",
        results.percentiles.p10,
        results.percentiles.p25,
        results.percentiles.p50,
        results.percentiles.p75,
        results.percentiles.p90);
    println!("  Mean: {:.1} months, Std Dev: {:.1}", results.mean_months, results.std_dev_months);
    println!("  Depletion probability: 12m={:.2}%  24m={:.2}%  36m={:.2}%",
        results.depletion_probability_12m * 100.0,
        results.depletion_probability_24m * 100.0,
        results.depletion_probability_36m * 100.0);
    println!("  VaR95: {:.0} months, CVaR95: {:.1} months",
        results.value_at_risk_95, results.conditional_var_95);

    println!("\nDecile Scenarios:");
    for (name, summary) in [
        ("Best", &results.scenarios.best),
        ("Median", &results.scenarios.median),
        ("Worst", &results.scenarios.worst),
    ] {
        println!("  {:<7} avg_months={:>6.1}  avg_final_nw=${:>12.0}  avg_emergencies={:.2}",
            name, summary.avg_months, summary.avg_final_net_worth, summary.avg_emergencies);
    }

    Ok(())
}
