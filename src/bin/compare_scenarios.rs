//! Compare deterministic projections across named scenarios
//!
//! Usage: cargo run --bin compare_scenarios

use wealth_model::{CareerProfile, ProjectionScenario, ScenarioRunner, TargetAllocation};
use wealth_model::profile::TaxTreatment;

fn main() -> anyhow::Result<()> {
    env_logger::init();

    let allocation = TargetAllocation::new(0.10, 0.80, 0.10)?
        .with_tax_treatment(TaxTreatment::new(0.50, 0.50)?);
    let mut profile = CareerProfile::new(35, "data_scientist", "austin", allocation);
    profile.savings_rate = Some(0.22);

    let current_net_worth = 180_000.0;
    let target_age = 65;

    let scenarios = vec![
        ProjectionScenario::baseline(),
        ProjectionScenario::named("optimistic")
            .with_return(0.09)
            .with_savings_multiplier(1.25),
        ProjectionScenario::named("pessimistic")
            .with_return(0.04)
            .with_savings_multiplier(0.75),
        ProjectionScenario::named("fast_track").with_level_boost(3),
    ];

    let runner = ScenarioRunner::new();
    let results = runner.run_scenarios(&profile, current_net_worth, target_age, &scenarios);

    println!("{}", "=".repeat(78));
    println!("Scenario comparison: {} in {}, ${:.0} at age {}",
        profile.occupation, profile.metro, current_net_worth, profile.current_age);
    println!("{}", "=".repeat(78));
    println!("{:<14} {:>14} {:>10} {:>12} {:>12} {:>10}",
        "Scenario", "Final NW", "EffRet", "TotIncome", "TotSavings", "IncGrowth");
    println!("{}", "-".repeat(78));

    for (scenario, output) in scenarios.iter().zip(&results) {
        println!("{:<14} {:>14.0} {:>9.2}% {:>12.0} {:>12.0} {:>9.2}%",
            scenario.name,
            output.expected_net_worth,
            output.assumptions.effective_return * 100.0,
            output.assumptions.total_income,
            output.assumptions.total_savings,
            output.assumptions.avg_income_growth * 100.0,
        );
    }

    // Milestone ages for the baseline path
    let baseline = &results[0];
    println!("\nBaseline milestones:");
    for milestone in [40, 45, 50, 55, 60, 65] {
        if let Some(row) = baseline.year_by_year.iter().find(|r| r.age == milestone) {
            println!("  Age {:>3}: NW=${:>12.0}  level={}", row.age, row.expected_nw, row.level.as_str());
        }
    }

    Ok(())
}
