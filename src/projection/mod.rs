//! Deterministic career-aware wealth projection

mod engine;
mod output;
mod savings;

pub use engine::{CareerProjector, ProjectionScenario, CASH_REAL_RETURN, OTHER_ASSET_RETURN};
pub use output::{AssumptionSummary, Comparison, WealthModelOutput, YearByYearData};
pub use savings::{infer_savings_rate, DEFAULT_SAVINGS_RATE};
