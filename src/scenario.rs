//! Scenario runner for efficient batch runs
//!
//! Pre-loads reference tables once, then allows running many projections and
//! simulations without re-reading CSV files.

use crate::profile::CareerProfile;
use crate::projection::{CareerProjector, ProjectionScenario, WealthModelOutput};
use crate::reference::ReferenceTables;
use crate::simulation::{AggregatedResults, MonteCarloEngine, SimulationConfig, SimulationError};

/// Pre-loaded runner for batch projections and simulations
///
/// # Example
/// ```ignore
/// let runner = ScenarioRunner::new();
///
/// for scenario in &scenarios {
///     let output = runner.run_scenario(&profile, 250_000.0, 65, scenario);
/// }
/// ```
#[derive(Debug, Clone)]
pub struct ScenarioRunner {
    /// Pre-loaded reference tables
    tables: ReferenceTables,
}

impl ScenarioRunner {
    /// Create runner with the built-in default tables
    pub fn new() -> Self {
        Self {
            tables: ReferenceTables::default_tables(),
        }
    }

    /// Create runner by loading tables from CSV files
    pub fn from_csv() -> Result<Self, Box<dyn std::error::Error>> {
        Ok(Self {
            tables: ReferenceTables::from_csv()?,
        })
    }

    /// Create runner from a specific reference data directory
    pub fn from_csv_path(path: &std::path::Path) -> Result<Self, Box<dyn std::error::Error>> {
        Ok(Self {
            tables: ReferenceTables::from_csv_path(path)?,
        })
    }

    /// Create runner with pre-built tables
    pub fn with_tables(tables: ReferenceTables) -> Self {
        Self { tables }
    }

    /// Run the deterministic projection for a profile
    pub fn run_projection(
        &self,
        profile: &CareerProfile,
        target_age: u8,
        actual_net_worth: Option<f64>,
    ) -> WealthModelOutput {
        let projector = CareerProjector::new(self.tables.clone());
        projector.project(profile, target_age, actual_net_worth)
    }

    /// Run one named scenario from a supplied net worth
    pub fn run_scenario(
        &self,
        profile: &CareerProfile,
        current_net_worth: f64,
        target_age: u8,
        scenario: &ProjectionScenario,
    ) -> WealthModelOutput {
        let projector = CareerProjector::new(self.tables.clone());
        projector.scenario_projection(profile, current_net_worth, target_age, scenario)
    }

    /// Run multiple scenarios for a single profile
    pub fn run_scenarios(
        &self,
        profile: &CareerProfile,
        current_net_worth: f64,
        target_age: u8,
        scenarios: &[ProjectionScenario],
    ) -> Vec<WealthModelOutput> {
        let projector = CareerProjector::new(self.tables.clone());
        scenarios
            .iter()
            .map(|scenario| {
                projector.scenario_projection(profile, current_net_worth, target_age, scenario)
            })
            .collect()
    }

    /// Run a Monte Carlo batch, optionally seeded for reproducibility
    pub fn run_simulation(
        &self,
        config: &SimulationConfig,
        seed: Option<u64>,
    ) -> Result<AggregatedResults, SimulationError> {
        let engine = match seed {
            Some(seed) => MonteCarloEngine::with_seed(seed),
            None => MonteCarloEngine::new(),
        };
        engine.run(config)
    }

    /// Get reference to the tables for inspection
    pub fn tables(&self) -> &ReferenceTables {
        &self.tables
    }

    /// Get mutable reference to the tables for customization
    pub fn tables_mut(&mut self) -> &mut ReferenceTables {
        &mut self.tables
    }
}

impl Default for ScenarioRunner {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::profile::TargetAllocation;

    fn test_profile() -> CareerProfile {
        let mut profile =
            CareerProfile::new(30, "software_engineer", "seattle", TargetAllocation::balanced());
        profile.savings_rate = Some(0.25);
        profile
    }

    #[test]
    fn test_run_scenarios_batch() {
        let runner = ScenarioRunner::new();
        let profile = test_profile();

        let scenarios: Vec<_> = [0.05, 0.07, 0.09]
            .iter()
            .map(|&rate| ProjectionScenario::named(format!("return_{rate}")).with_return(rate))
            .collect();

        let results = runner.run_scenarios(&profile, 100_000.0, 60, &scenarios);
        assert_eq!(results.len(), 3);

        // Higher return should produce higher final net worth
        assert!(results[2].expected_net_worth > results[0].expected_net_worth);
    }

    #[test]
    fn test_seeded_simulation_through_runner() {
        let runner = ScenarioRunner::new();
        let mut config = SimulationConfig::from_balances(80_000.0, 10_000.0, 5_500.0, 4_200.0);
        config.num_simulations = 100;
        config.time_horizon_months = 36;

        let a = runner.run_simulation(&config, Some(21)).unwrap();
        let b = runner.run_simulation(&config, Some(21)).unwrap();
        assert_eq!(a.median_months, b.median_months);
    }
}
