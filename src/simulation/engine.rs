//! Monte Carlo engine: seeded path fan-out and aggregation

use std::sync::atomic::{AtomicBool, Ordering};

use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};
use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::path::simulate_path;
use super::results::{AggregatedResults, SimulationResult};

/// Errors from caller contract violations
#[derive(Debug, Error, PartialEq)]
pub enum SimulationError {
    #[error("num_simulations must be positive, got {0}")]
    InvalidSimulationCount(u32),

    #[error("time_horizon_months must be positive, got {0}")]
    InvalidTimeHorizon(u32),

    #[error("simulation cancelled before completion")]
    Cancelled,
}

/// Configuration for one simulation batch
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SimulationConfig {
    pub current_net_worth: f64,
    pub current_cash: f64,

    /// Invested balance; `from_balances` derives this as net worth minus cash
    pub current_investments: f64,

    pub monthly_income: f64,
    pub monthly_expenses: f64,

    /// Carried for reporting parity with profile outputs; monthly savings in
    /// a path are the realized income minus expenses
    pub savings_rate: f64,

    pub investment_return_annual: f64,
    pub investment_volatility_annual: f64,

    /// Std dev of the multiplicative monthly expense shock
    pub expense_volatility: f64,

    /// Std dev of the multiplicative monthly income shock
    pub income_volatility: f64,

    pub emergency_probability_monthly: f64,
    pub emergency_mean_cost: f64,
    pub emergency_std_dev: f64,

    pub num_simulations: u32,
    pub time_horizon_months: u32,

    /// Annual drift applied to baseline expenses when present
    #[serde(default)]
    pub inflation_rate: Option<f64>,
}

impl SimulationConfig {
    /// Build a config from current balances and cashflow, with default
    /// market and shock assumptions
    pub fn from_balances(
        net_worth: f64,
        cash: f64,
        monthly_income: f64,
        monthly_expenses: f64,
    ) -> Self {
        Self {
            current_net_worth: net_worth,
            current_cash: cash,
            current_investments: (net_worth - cash).max(0.0),
            monthly_income,
            monthly_expenses,
            savings_rate: if monthly_income > 0.0 {
                ((monthly_income - monthly_expenses) / monthly_income).max(0.0)
            } else {
                0.0
            },
            investment_return_annual: 0.07,
            investment_volatility_annual: 0.15,
            expense_volatility: 0.10,
            income_volatility: 0.05,
            emergency_probability_monthly: 0.02,
            emergency_mean_cost: 3_000.0,
            emergency_std_dev: 2_000.0,
            num_simulations: 10_000,
            time_horizon_months: 120,
            inflation_rate: None,
        }
    }

    /// Fail fast on out-of-range batch parameters
    pub fn validate(&self) -> Result<(), SimulationError> {
        if self.num_simulations == 0 {
            return Err(SimulationError::InvalidSimulationCount(self.num_simulations));
        }
        if self.time_horizon_months == 0 {
            return Err(SimulationError::InvalidTimeHorizon(self.time_horizon_months));
        }
        Ok(())
    }

    /// Copy with negative volatilities and probabilities clamped to zero;
    /// degenerate inputs collapse draws to their means instead of erroring
    fn sanitized(&self) -> Self {
        let mut config = self.clone();
        config.investment_volatility_annual = config.investment_volatility_annual.max(0.0);
        config.expense_volatility = config.expense_volatility.max(0.0);
        config.income_volatility = config.income_volatility.max(0.0);
        config.emergency_probability_monthly = config.emergency_probability_monthly.max(0.0);
        config.emergency_std_dev = config.emergency_std_dev.max(0.0);
        config
    }
}

/// Splitmix-style mix of the base seed and a stream id, so each path gets an
/// independent reproducible stream
fn mix_seed(base: u64, stream: u64) -> u64 {
    let mut z = base ^ stream.wrapping_mul(0x9E37_79B9_7F4A_7C15);
    z = (z ^ (z >> 30)).wrapping_mul(0xBF58_476D_1CE4_E5B9);
    z = (z ^ (z >> 27)).wrapping_mul(0x94D0_49BB_1331_11EB);
    z ^ (z >> 31)
}

/// Monte Carlo simulation engine.
///
/// Paths are independent: each one owns its own state and RNG stream, so the
/// batch runs on the rayon pool with merging deferred to the final aggregation.
pub struct MonteCarloEngine {
    seed: Option<u64>,
}

impl MonteCarloEngine {
    /// Engine with a fresh seed per run
    pub fn new() -> Self {
        Self { seed: None }
    }

    /// Engine with a fixed base seed for reproducible batches
    pub fn with_seed(seed: u64) -> Self {
        Self { seed: Some(seed) }
    }

    /// Run a full batch and aggregate
    pub fn run(&self, config: &SimulationConfig) -> Result<AggregatedResults, SimulationError> {
        self.run_inner(config, None)
    }

    /// Run a batch with a cancellation flag checked between paths.
    /// Cancellation is coarse-grained; individual paths are cheap.
    pub fn run_cancellable(
        &self,
        config: &SimulationConfig,
        cancel: &AtomicBool,
    ) -> Result<AggregatedResults, SimulationError> {
        self.run_inner(config, Some(cancel))
    }

    fn run_inner(
        &self,
        config: &SimulationConfig,
        cancel: Option<&AtomicBool>,
    ) -> Result<AggregatedResults, SimulationError> {
        config.validate()?;
        let config = config.sanitized();

        let base_seed = self.seed.unwrap_or_else(|| rand::thread_rng().gen());

        let maybe_results: Vec<Option<SimulationResult>> = (0..config.num_simulations)
            .into_par_iter()
            .map(|run_id| {
                if let Some(flag) = cancel {
                    if flag.load(Ordering::Relaxed) {
                        return None;
                    }
                }
                let mut rng = SmallRng::seed_from_u64(mix_seed(base_seed, run_id as u64));
                Some(simulate_path(&config, run_id, &mut rng))
            })
            .collect();

        if maybe_results.iter().any(|r| r.is_none()) {
            return Err(SimulationError::Cancelled);
        }
        let results: Vec<SimulationResult> = maybe_results.into_iter().flatten().collect();

        // Separate stream for sample-path selection, outside the run id range
        let mut sample_rng = SmallRng::seed_from_u64(mix_seed(base_seed, u64::MAX));
        Ok(AggregatedResults::aggregate(&config, results, &mut sample_rng))
    }
}

impl Default for MonteCarloEngine {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn base_config() -> SimulationConfig {
        SimulationConfig::from_balances(100_000.0, 15_000.0, 6_000.0, 4_500.0)
    }

    #[test]
    fn test_invalid_config_fails_fast() {
        let engine = MonteCarloEngine::with_seed(1);

        let mut config = base_config();
        config.num_simulations = 0;
        assert!(matches!(
            engine.run(&config),
            Err(SimulationError::InvalidSimulationCount(0))
        ));

        let mut config = base_config();
        config.time_horizon_months = 0;
        assert!(matches!(
            engine.run(&config),
            Err(SimulationError::InvalidTimeHorizon(0))
        ));
    }

    #[test]
    fn test_zero_volatility_collapses_to_deterministic() {
        let mut config = base_config();
        config.investment_volatility_annual = 0.0;
        config.expense_volatility = 0.0;
        config.income_volatility = 0.0;
        config.emergency_probability_monthly = 0.0;
        config.num_simulations = 1_000;
        config.time_horizon_months = 120;

        let engine = MonteCarloEngine::with_seed(42);
        let agg = engine.run(&config).unwrap();

        // Every path is the same deterministic trajectory
        assert!(agg.std_dev_months < 1e-9);
        assert_eq!(agg.percentiles.p10, agg.percentiles.p90);
        let first = &agg.all_results[0];
        for result in &agg.all_results {
            assert_eq!(result.months_of_runway, first.months_of_runway);
            assert!((result.final_balance - first.final_balance).abs() < 1e-6);
        }
    }

    #[test]
    fn test_seeded_runs_are_reproducible() {
        let mut config = base_config();
        config.num_simulations = 200;
        config.time_horizon_months = 60;

        let a = MonteCarloEngine::with_seed(7).run(&config).unwrap();
        let b = MonteCarloEngine::with_seed(7).run(&config).unwrap();

        let months_a: Vec<u32> = a.all_results.iter().map(|r| r.months_of_runway).collect();
        let months_b: Vec<u32> = b.all_results.iter().map(|r| r.months_of_runway).collect();
        assert_eq!(months_a, months_b);
        assert_eq!(a.value_at_risk_95, b.value_at_risk_95);
    }

    #[test]
    fn test_var_below_median_under_volatility() {
        let mut config = base_config();
        config.num_simulations = 2_000;
        config.monthly_income = 3_000.0; // deficit spending so runways spread out
        config.time_horizon_months = 120;

        let engine = MonteCarloEngine::with_seed(11);
        let agg = engine.run(&config).unwrap();

        assert!(agg.value_at_risk_95 <= agg.median_months);
        assert!(agg.conditional_var_95 <= agg.value_at_risk_95 + 1e-9);
        let p = agg.percentiles;
        assert!(p.p10 <= p.p25 && p.p25 <= p.p50 && p.p50 <= p.p75 && p.p75 <= p.p90);
    }

    #[test]
    fn test_negative_volatility_clamped() {
        let mut config = base_config();
        config.income_volatility = -0.5;
        config.expense_volatility = -0.5;
        config.num_simulations = 50;
        config.time_horizon_months = 24;

        // Never raises; negative inputs behave as zero volatility
        let engine = MonteCarloEngine::with_seed(3);
        assert!(engine.run(&config).is_ok());
    }

    #[test]
    fn test_cancellation_flag() {
        let config = base_config();
        let engine = MonteCarloEngine::with_seed(1);

        let cancel = AtomicBool::new(true);
        assert!(matches!(
            engine.run_cancellable(&config, &cancel),
            Err(SimulationError::Cancelled)
        ));
    }
}
