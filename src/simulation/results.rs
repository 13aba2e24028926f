//! Result structures and aggregation for the Monte Carlo engine

use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::stats;
use super::engine::SimulationConfig;

/// How a simulated path ended
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TrajectoryType {
    /// Survived the horizon without depleting
    Success,
    /// Cash and investments reached zero before the horizon
    Depleted,
    /// Survived and grew final net worth beyond 1.5x the starting point
    Growing,
}

/// Outcome of a single simulated path, immutable once produced
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SimulationResult {
    /// Index of this run within the batch
    pub run_id: u32,

    /// Months until depletion, or the full horizon if never depleted
    pub months_of_runway: u32,

    /// Final combined net worth (cash + investments)
    pub final_balance: f64,

    /// Cash balance at the end of each simulated month
    pub monthly_balances: Vec<f64>,

    /// Net worth (cash + investments) at the end of each simulated month
    pub monthly_net_worth: Vec<f64>,

    /// Number of emergency events triggered along the path
    pub emergency_count: u32,

    pub trajectory_type: TrajectoryType,
}

/// Runway percentiles across the batch, in months
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct RunwayPercentiles {
    pub p10: f64,
    pub p25: f64,
    pub p50: f64,
    pub p75: f64,
    pub p90: f64,
}

/// One bar of the runway distribution histogram
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct HistogramBucket {
    /// First month covered by the bucket (inclusive)
    pub start_month: u32,

    /// Last month covered by the bucket (inclusive)
    pub end_month: u32,

    pub count: u32,
}

/// Average outcome over one decile of paths
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct ScenarioSummary {
    pub avg_months: f64,
    pub avg_final_net_worth: f64,
    pub avg_emergencies: f64,
}

/// Best/median/worst decile summaries, ranked by runway
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct DecileScenarios {
    pub best: ScenarioSummary,
    pub median: ScenarioSummary,
    pub worst: ScenarioSummary,
}

/// Paths picked at fixed runway ranks for visualization
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RepresentativePaths {
    pub percentile90: SimulationResult,
    pub percentile50: SimulationResult,
    pub percentile10: SimulationResult,
}

/// Aggregated risk statistics over a simulation batch, read-only once built
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AggregatedResults {
    pub percentiles: RunwayPercentiles,

    pub mean_months: f64,
    pub median_months: f64,
    pub std_dev_months: f64,

    /// Fraction of paths depleted within 12/24/36 months
    pub depletion_probability_12m: f64,
    pub depletion_probability_24m: f64,
    pub depletion_probability_36m: f64,

    /// 5th percentile of runway
    pub value_at_risk_95: f64,

    /// Mean runway over the worst 5% of paths
    pub conditional_var_95: f64,

    /// Runway histogram for charting
    pub distribution_data: Vec<HistogramBucket>,

    /// Paths at the 90th/50th/10th runway ranks
    pub representative: RepresentativePaths,

    /// 20 uniformly-sampled paths for spaghetti charts
    pub sample_paths: Vec<SimulationResult>,

    /// Best/median/worst decile scenario summaries
    pub scenarios: DecileScenarios,

    /// Every path outcome in run order
    pub all_results: Vec<SimulationResult>,
}

impl AggregatedResults {
    /// Aggregate a non-empty batch of path results.
    ///
    /// Ordering for percentile and decile selection happens on sorted copies;
    /// `all_results` keeps its run order untouched.
    pub(crate) fn aggregate<R: Rng>(
        config: &SimulationConfig,
        results: Vec<SimulationResult>,
        rng: &mut R,
    ) -> Self {
        let n = results.len();

        let mut sorted_months: Vec<f64> =
            results.iter().map(|r| r.months_of_runway as f64).collect();
        sorted_months.sort_by(|a, b| a.total_cmp(b));

        let pct = |p: f64| stats::percentile(&sorted_months, p).unwrap_or(0.0);
        let percentiles = RunwayPercentiles {
            p10: pct(10.0),
            p25: pct(25.0),
            p50: pct(50.0),
            p75: pct(75.0),
            p90: pct(90.0),
        };

        let depletion_probability = |months: u32| {
            results.iter().filter(|r| r.months_of_runway <= months).count() as f64 / n as f64
        };

        let tail_len = ((n as f64 * 0.05) as usize).max(1);
        let conditional_var_95 = stats::mean(&sorted_months[..tail_len]);

        // Rank order by runway, used for representative and decile selection
        let mut order: Vec<usize> = (0..n).collect();
        order.sort_by_key(|&i| results[i].months_of_runway);

        let rank = |fraction: f64| order[((n - 1) as f64 * fraction).round() as usize];
        let representative = RepresentativePaths {
            percentile90: results[rank(0.90)].clone(),
            percentile50: results[rank(0.50)].clone(),
            percentile10: results[rank(0.10)].clone(),
        };

        let sample_paths = rand::seq::index::sample(rng, n, 20.min(n))
            .iter()
            .map(|i| results[i].clone())
            .collect();

        let decile_len = (n / 10).max(1);
        let summarize = |indices: &[usize]| {
            let len = indices.len() as f64;
            ScenarioSummary {
                avg_months: indices
                    .iter()
                    .map(|&i| results[i].months_of_runway as f64)
                    .sum::<f64>()
                    / len,
                avg_final_net_worth: indices.iter().map(|&i| results[i].final_balance).sum::<f64>()
                    / len,
                avg_emergencies: indices
                    .iter()
                    .map(|&i| results[i].emergency_count as f64)
                    .sum::<f64>()
                    / len,
            }
        };
        let median_start = (n - decile_len) / 2;
        let scenarios = DecileScenarios {
            best: summarize(&order[n - decile_len..]),
            median: summarize(&order[median_start..median_start + decile_len]),
            worst: summarize(&order[..decile_len]),
        };

        Self {
            percentiles,
            mean_months: stats::mean(&sorted_months),
            median_months: percentiles.p50,
            std_dev_months: stats::std_dev(&sorted_months),
            depletion_probability_12m: depletion_probability(12),
            depletion_probability_24m: depletion_probability(24),
            depletion_probability_36m: depletion_probability(36),
            value_at_risk_95: pct(5.0),
            conditional_var_95,
            distribution_data: Self::histogram(&results, config.time_horizon_months),
            representative,
            sample_paths,
            scenarios,
            all_results: results,
        }
    }

    /// Histogram over runway months, bucket width = max(1, ceil(horizon/50))
    fn histogram(results: &[SimulationResult], horizon: u32) -> Vec<HistogramBucket> {
        let width = horizon.div_ceil(50).max(1);
        let num_buckets = horizon.div_ceil(width) as usize;

        let mut counts = vec![0u32; num_buckets];
        for result in results {
            let idx = ((result.months_of_runway.max(1) - 1) / width) as usize;
            counts[idx.min(num_buckets - 1)] += 1;
        }

        counts
            .iter()
            .enumerate()
            .map(|(b, &count)| HistogramBucket {
                start_month: b as u32 * width + 1,
                end_month: ((b as u32 + 1) * width).min(horizon),
                count,
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::SmallRng;
    use rand::SeedableRng;

    fn result_with_runway(run_id: u32, months: u32, final_balance: f64) -> SimulationResult {
        SimulationResult {
            run_id,
            months_of_runway: months,
            final_balance,
            monthly_balances: vec![0.0; months as usize],
            monthly_net_worth: vec![final_balance; months as usize],
            emergency_count: run_id % 3,
            trajectory_type: TrajectoryType::Success,
        }
    }

    fn test_config(horizon: u32) -> SimulationConfig {
        SimulationConfig {
            current_net_worth: 100_000.0,
            current_cash: 10_000.0,
            current_investments: 90_000.0,
            monthly_income: 5_000.0,
            monthly_expenses: 4_000.0,
            savings_rate: 0.2,
            investment_return_annual: 0.07,
            investment_volatility_annual: 0.15,
            expense_volatility: 0.1,
            income_volatility: 0.05,
            emergency_probability_monthly: 0.02,
            emergency_mean_cost: 3_000.0,
            emergency_std_dev: 1_500.0,
            num_simulations: 100,
            time_horizon_months: horizon,
            inflation_rate: None,
        }
    }

    fn aggregate(results: Vec<SimulationResult>, horizon: u32) -> AggregatedResults {
        let config = test_config(horizon);
        let mut rng = SmallRng::seed_from_u64(5);
        AggregatedResults::aggregate(&config, results, &mut rng)
    }

    #[test]
    fn test_percentiles_non_decreasing() {
        let results: Vec<_> = (0..100)
            .map(|i| result_with_runway(i, (i * 7) % 120 + 1, 1_000.0 * i as f64))
            .collect();
        let agg = aggregate(results, 120);

        let p = agg.percentiles;
        assert!(p.p10 <= p.p25 && p.p25 <= p.p50 && p.p50 <= p.p75 && p.p75 <= p.p90);
        assert!(agg.value_at_risk_95 <= agg.median_months);
        assert!(agg.conditional_var_95 <= agg.value_at_risk_95 + 1e-9);
    }

    #[test]
    fn test_depletion_probabilities() {
        let mut results = Vec::new();
        for i in 0..10 {
            results.push(result_with_runway(i, 6, 0.0)); // depleted early
        }
        for i in 10..100 {
            results.push(result_with_runway(i, 120, 50_000.0));
        }
        let agg = aggregate(results, 120);

        assert!((agg.depletion_probability_12m - 0.10).abs() < 1e-12);
        assert!((agg.depletion_probability_24m - 0.10).abs() < 1e-12);
        assert!((agg.depletion_probability_36m - 0.10).abs() < 1e-12);
    }

    #[test]
    fn test_histogram_counts_sum_to_batch_size() {
        let results: Vec<_> = (0..250)
            .map(|i| result_with_runway(i, i % 120 + 1, 0.0))
            .collect();
        let agg = aggregate(results, 120);

        let total: u32 = agg.distribution_data.iter().map(|b| b.count).sum();
        assert_eq!(total, 250);

        // horizon 120 -> bucket width 3
        assert_eq!(agg.distribution_data[0].start_month, 1);
        assert_eq!(agg.distribution_data[0].end_month, 3);
    }

    #[test]
    fn test_decile_scenarios_ordering() {
        let results: Vec<_> = (0..100)
            .map(|i| result_with_runway(i, i + 1, (i as f64) * 1_000.0))
            .collect();
        let agg = aggregate(results, 120);

        assert!(agg.scenarios.worst.avg_months < agg.scenarios.median.avg_months);
        assert!(agg.scenarios.median.avg_months < agg.scenarios.best.avg_months);
        assert_eq!(agg.sample_paths.len(), 20);
        assert_eq!(agg.all_results.len(), 100);
        // Run order preserved in the shared collection
        assert!(agg.all_results.iter().enumerate().all(|(i, r)| r.run_id == i as u32));
    }
}
