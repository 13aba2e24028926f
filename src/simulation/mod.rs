//! Stochastic Monte Carlo simulation of monthly financial paths

mod engine;
mod path;
mod results;
pub mod random;

pub use engine::{MonteCarloEngine, SimulationConfig, SimulationError};
pub use path::CASH_BUFFER_MONTHS;
pub use results::{
    AggregatedResults, DecileScenarios, HistogramBucket, RepresentativePaths, RunwayPercentiles,
    ScenarioSummary, SimulationResult, TrajectoryType,
};
