//! Output structures for the deterministic wealth projection

use serde::{Deserialize, Serialize};

use crate::profile::CareerLevel;

/// One record per simulated year of the projection
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct YearByYearData {
    /// Age at the end of this record's year
    pub age: u8,

    /// Expected net worth at this age
    pub expected_nw: f64,

    /// After-tax income earned over the year
    pub income: f64,

    /// Amount saved over the year
    pub savings: f64,

    /// Investment growth (post tax drag) over the year
    pub investment_growth: f64,

    /// Career level held during the year
    pub level: CareerLevel,
}

/// Assumption transparency block reported alongside the projection
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AssumptionSummary {
    /// Savings rate applied each year (after any scenario multiplier)
    pub avg_savings_rate: f64,

    /// Raw equity return assumption
    pub avg_return: f64,

    /// Allocation-weighted pre-tax portfolio return
    pub portfolio_return: f64,

    /// Allocation-weighted post-tax return actually compounding
    pub effective_return: f64,

    /// Tax drag applied to taxable investment gains
    pub tax_drag: f64,

    /// Geometric mean year-over-year income growth across the series
    pub avg_income_growth: f64,

    /// Total after-tax income over the projected years
    pub total_income: f64,

    /// Total savings over the projected years
    pub total_savings: f64,

    /// Total investment growth over the projected years
    pub total_investment_growth: f64,
}

/// Actual-vs-expected comparison at the profile's current age
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Comparison {
    pub actual_net_worth: f64,
    pub delta: f64,
    pub delta_percent: f64,
    pub is_ahead: bool,
}

/// Complete deterministic projection result
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WealthModelOutput {
    /// Net worth at the end of the projection
    pub expected_net_worth: f64,

    /// Per-year series from current age to target age inclusive
    pub year_by_year: Vec<YearByYearData>,

    /// Percentile of the expected net worth within the current age bracket
    pub scf_percentile: f64,

    /// Assumptions used, for reporting
    pub assumptions: AssumptionSummary,

    /// Actual-vs-expected comparison when an actual net worth was supplied
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub comparison: Option<Comparison>,
}

impl WealthModelOutput {
    /// Final record of the series
    pub fn final_year(&self) -> Option<&YearByYearData> {
        self.year_by_year.last()
    }
}
