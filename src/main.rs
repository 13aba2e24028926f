//! Wealth Model CLI
//!
//! Command-line demo running the deterministic projection and a seeded
//! Monte Carlo batch for a sample profile

use std::fs::File;
use std::io::Write;

use chrono::NaiveDate;

use wealth_model::{
    CareerProfile, MonteCarloEngine, ScenarioRunner, SimulationConfig, TargetAllocation,
    TaxTreatment,
};
use wealth_model::profile::ProfileError;
use wealth_model::projection::infer_savings_rate;

fn main() -> Result<(), ProfileError> {
    env_logger::init();

    println!("Wealth Model v0.1.0");
    println!("===================\n");

    // Sample profile: software engineer, 32, in Seattle
    let allocation = TargetAllocation::new(0.10, 0.80, 0.10)?
        .with_tax_treatment(TaxTreatment::new(0.40, 0.60)?);
    let mut profile = CareerProfile::new(32, "software_engineer", "seattle", allocation);

    // Infer the savings rate from a short net worth history
    let history = [
        entry(2023, 1, 15, 110_000.0),
        entry(2024, 1, 15, 160_000.0),
        entry(2025, 1, 15, 215_000.0),
    ];
    let inferred = infer_savings_rate(&history, 160_000.0, profile.annual_return);
    profile.savings_rate = Some(inferred);

    println!("Profile: {} in {}", profile.occupation, profile.metro);
    println!("  Current Age: {}", profile.current_age);
    println!("  Inferred Savings Rate: {:.1}%", inferred * 100.0);
    println!();

    // Deterministic projection to 65, compared against actual net worth
    let actual_net_worth = 215_000.0;
    let runner = ScenarioRunner::new();
    let output = runner.run_projection(&profile, 65, Some(actual_net_worth));

    println!("Deterministic Projection (to age 65):");
    println!("{:>4} {:>10} {:>14} {:>12} {:>12} {:>14}",
        "Age", "Level", "Expected NW", "Income", "Savings", "Inv Growth");
    println!("{}", "-".repeat(72));

    for row in output.year_by_year.iter().take(12) {
        println!("{:>4} {:>10} {:>14.0} {:>12.0} {:>12.0} {:>14.0}",
            row.age,
            row.level.as_str(),
            row.expected_nw,
            row.income,
            row.savings,
            row.investment_growth,
        );
    }
    if output.year_by_year.len() > 12 {
        println!("... ({} more years)", output.year_by_year.len() - 12);
    }

    println!("\nExpected Net Worth at 65: ${:.0}", output.expected_net_worth);
    println!("Percentile for age bracket: {:.0}", output.scf_percentile);
    println!("Effective return: {:.2}% (raw equity {:.2}%)",
        output.assumptions.effective_return * 100.0,
        output.assumptions.avg_return * 100.0);
    if let Some(comparison) = &output.comparison {
        println!("Actual vs expected: ${:.0} ({:+.1}%), {}",
            comparison.delta,
            comparison.delta_percent,
            if comparison.is_ahead { "ahead" } else { "behind" });
    }

    // Write the full series to CSV
    let csv_path = "projection_output.csv";
    let mut file = File::create(csv_path).expect("Unable to create CSV file");
    writeln!(file, "Age,Level,ExpectedNW,Income,Savings,InvestmentGrowth").unwrap();
    for row in &output.year_by_year {
        writeln!(file, "{},{},{:.2},{:.2},{:.2},{:.2}",
            row.age, row.level.as_str(), row.expected_nw, row.income, row.savings,
            row.investment_growth).unwrap();
    }
    println!("\nFull series written to: {}", csv_path);

    // Seeded Monte Carlo batch on the same balances
    let mut config = SimulationConfig::from_balances(
        actual_net_worth,
        20_000.0,
        11_000.0, // take-home per month
        6_500.0,
    );
    config.num_simulations = 5_000;
    config.time_horizon_months = 360;

    let engine = MonteCarloEngine::with_seed(20_260_805);
    let results = engine.run(&config).expect("simulation config is valid");

    println!("\nMonte Carlo ({} paths, {} months):",
        config.num_simulations, config.time_horizon_months);
    println!("  Runway p10/p50/p90: {:.0} / {:.0} / {:.0} months",
        results.percentiles.p10, results.percentiles.p50, results.percentiles.p90);
    println!("  Mean: {:.1} months (std dev {:.1})", results.mean_months, results.std_dev_months);
    println!("  Depletion within 12/24/36 months: {:.1}% / {:.1}% / {:.1}%",
        results.depletion_probability_12m * 100.0,
        results.depletion_probability_24m * 100.0,
        results.depletion_probability_36m * 100.0);
    println!("  VaR95: {:.0} months, CVaR95: {:.1} months",
        results.value_at_risk_95, results.conditional_var_95);
    println!("  Worst decile: {:.1} months avg, ${:.0} avg final NW",
        results.scenarios.worst.avg_months,
        results.scenarios.worst.avg_final_net_worth);

    Ok(())
}

fn entry(y: i32, m: u32, d: u32, net_worth: f64) -> wealth_model::HistoryEntry {
    wealth_model::HistoryEntry::new(NaiveDate::from_ymd_opt(y, m, d).unwrap(), net_worth)
}
