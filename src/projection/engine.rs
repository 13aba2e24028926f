//! Career-aware deterministic net worth projection engine

use serde::{Deserialize, Serialize};

use crate::profile::{CareerLevel, CareerProfile};
use crate::reference::ReferenceTables;
use super::output::{AssumptionSummary, Comparison, WealthModelOutput, YearByYearData};
use super::savings::DEFAULT_SAVINGS_RATE;

/// Fixed real return on the cash slice of the allocation
pub const CASH_REAL_RETURN: f64 = 0.02;

/// Fixed real return on the "other" slice (real estate equity, vehicles)
pub const OTHER_ASSET_RETURN: f64 = 0.0;

/// Named what-if adjustments layered over a profile's baseline assumptions
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProjectionScenario {
    /// Scenario name for reporting
    pub name: String,

    /// Replaces the profile's annual return when set
    pub return_override: Option<f64>,

    /// Multiplier on the resolved savings rate
    pub savings_multiplier: f64,

    /// Extra years of level progression credited each year
    pub level_boost_years: u32,
}

impl ProjectionScenario {
    /// The profile's own assumptions, unmodified
    pub fn baseline() -> Self {
        Self {
            name: "baseline".to_string(),
            return_override: None,
            savings_multiplier: 1.0,
            level_boost_years: 0,
        }
    }

    pub fn named(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::baseline()
        }
    }

    pub fn with_return(mut self, annual_return: f64) -> Self {
        self.return_override = Some(annual_return);
        self
    }

    pub fn with_savings_multiplier(mut self, multiplier: f64) -> Self {
        self.savings_multiplier = multiplier;
        self
    }

    pub fn with_level_boost(mut self, years: u32) -> Self {
        self.level_boost_years = years;
        self
    }
}

/// Outcome of one simulated projection year
struct YearStep {
    new_balance: f64,
    after_tax_income: f64,
    savings: f64,
    investment_growth: f64,
    level: CareerLevel,
}

/// Deterministic year-by-year wealth projector
pub struct CareerProjector {
    tables: ReferenceTables,
}

impl CareerProjector {
    pub fn new(tables: ReferenceTables) -> Self {
        Self { tables }
    }

    pub fn with_default_tables() -> Self {
        Self::new(ReferenceTables::default_tables())
    }

    /// Project expected net worth through `target_age`.
    ///
    /// History is first re-derived by accumulating from `start_age` with zero
    /// wealth, which fixes the expected net worth at the current age; the
    /// emitted series then covers `current_age..=target_age`. When
    /// `target_age == current_age` the series is the single snapshot point.
    /// Supplying `actual_net_worth` adds an actual-vs-expected comparison.
    pub fn project(
        &self,
        profile: &CareerProfile,
        target_age: u8,
        actual_net_worth: Option<f64>,
    ) -> WealthModelOutput {
        let scenario = ProjectionScenario::baseline();

        // Re-derive history: accumulate from career start with zero wealth
        let mut balance = 0.0;
        for age in profile.start_age..profile.current_age {
            balance = self.simulate_year(profile, age, balance, &scenario).new_balance;
        }
        let expected_at_current = balance;

        let mut output =
            self.accumulate_series(profile, expected_at_current, target_age, &scenario);

        output.scf_percentile = self
            .tables
            .wealth_percentiles
            .percentile_for(profile.current_age, expected_at_current);

        output.comparison = actual_net_worth.map(|actual| {
            let delta = actual - expected_at_current;
            let delta_percent = if expected_at_current.abs() > f64::EPSILON {
                delta / expected_at_current * 100.0
            } else {
                0.0
            };
            Comparison {
                actual_net_worth: actual,
                delta,
                delta_percent,
                is_ahead: delta >= 0.0,
            }
        });

        output
    }

    /// Project forward from a supplied net worth under a named scenario.
    ///
    /// Skips the history-derivation stage entirely; the series starts at the
    /// profile's current age with `current_net_worth`.
    pub fn scenario_projection(
        &self,
        profile: &CareerProfile,
        current_net_worth: f64,
        target_age: u8,
        scenario: &ProjectionScenario,
    ) -> WealthModelOutput {
        let mut output = self.accumulate_series(profile, current_net_worth, target_age, scenario);
        output.scf_percentile = self
            .tables
            .wealth_percentiles
            .percentile_for(profile.current_age, current_net_worth);
        output
    }

    /// Run the accumulation loop from the current age to the target age,
    /// recording one row per age (the first row is the starting snapshot)
    fn accumulate_series(
        &self,
        profile: &CareerProfile,
        starting_balance: f64,
        target_age: u8,
        scenario: &ProjectionScenario,
    ) -> WealthModelOutput {
        let annual_return = scenario.return_override.unwrap_or(profile.annual_return);
        let savings_rate = self.resolved_savings_rate(profile, scenario);

        let snapshot_wage = self.wage_at(profile, profile.current_age, scenario);
        let mut year_by_year = vec![YearByYearData {
            age: profile.current_age,
            expected_nw: starting_balance,
            income: snapshot_wage,
            savings: 0.0,
            investment_growth: 0.0,
            level: self.level_at(profile, profile.current_age, scenario),
        }];

        let mut balance = starting_balance;
        let mut total_income = 0.0;
        let mut total_savings = 0.0;
        let mut total_investment_growth = 0.0;

        for age in profile.current_age..target_age {
            let step = self.simulate_year(profile, age, balance, scenario);
            balance = step.new_balance;

            total_income += step.after_tax_income;
            total_savings += step.savings;
            total_investment_growth += step.investment_growth;

            year_by_year.push(YearByYearData {
                age: age + 1,
                expected_nw: balance,
                income: step.after_tax_income,
                savings: step.savings,
                investment_growth: step.investment_growth,
                level: step.level,
            });
        }

        let assumptions = AssumptionSummary {
            avg_savings_rate: savings_rate,
            avg_return: annual_return,
            portfolio_return: self.portfolio_return(profile, annual_return),
            effective_return: self.effective_return(profile, annual_return),
            tax_drag: profile.tax_drag,
            avg_income_growth: Self::avg_income_growth(&year_by_year),
            total_income,
            total_savings,
            total_investment_growth,
        };

        WealthModelOutput {
            expected_net_worth: balance,
            year_by_year,
            scf_percentile: 0.0,
            assumptions,
            comparison: None,
        }
    }

    /// Advance one year: earn, save, and grow the rebalanced allocation
    fn simulate_year(
        &self,
        profile: &CareerProfile,
        age: u8,
        balance: f64,
        scenario: &ProjectionScenario,
    ) -> YearStep {
        let level = self.level_at(profile, age, scenario);
        let after_tax_income = self.wage_for_level(profile, age, level, scenario);

        let savings_rate = self.resolved_savings_rate(profile, scenario);
        let savings = after_tax_income * savings_rate;

        let annual_return = scenario.return_override.unwrap_or(profile.annual_return);

        // Full rebalance to the target allocation each year
        let split = profile.target_allocation.split(balance);

        let cash_growth = split.cash * CASH_REAL_RETURN;
        let other_growth = split.other * OTHER_ASSET_RETURN;

        let raw_investment_growth = split.investment * annual_return;
        let investment_growth = match &profile.target_allocation.tax_treatment {
            Some(tt) => {
                // Drag applies only to the taxable fraction of the gains
                raw_investment_growth
                    * (tt.taxable_pct * (1.0 - profile.tax_drag) + tt.tax_advantaged_pct)
            }
            // Legacy flat drag on the whole investment slice
            None => raw_investment_growth * (1.0 - profile.tax_drag),
        };

        YearStep {
            new_balance: balance + savings + cash_growth + investment_growth + other_growth,
            after_tax_income,
            savings,
            investment_growth,
            level,
        }
    }

    fn level_at(&self, profile: &CareerProfile, age: u8, scenario: &ProjectionScenario) -> CareerLevel {
        match profile.level {
            Some(level) => level,
            None => CareerLevel::from_years_in_workforce(
                profile.years_in_workforce_at(age) + scenario.level_boost_years,
            ),
        }
    }

    fn wage_at(&self, profile: &CareerProfile, age: u8, scenario: &ProjectionScenario) -> f64 {
        let level = self.level_at(profile, age, scenario);
        self.wage_for_level(profile, age, level, scenario)
    }

    fn wage_for_level(
        &self,
        profile: &CareerProfile,
        age: u8,
        level: CareerLevel,
        scenario: &ProjectionScenario,
    ) -> f64 {
        let years_in_workforce = profile.years_in_workforce_at(age) + scenario.level_boost_years;
        let years_in_level = years_in_workforce.saturating_sub(level.start_year());
        let metro = self.tables.metros.factors(&profile.metro);

        self.tables
            .wages
            .estimate(&profile.occupation, level, years_in_level, &metro)
            .after_tax_comp
    }

    fn resolved_savings_rate(&self, profile: &CareerProfile, scenario: &ProjectionScenario) -> f64 {
        let base = profile.clamped_savings_rate().unwrap_or(DEFAULT_SAVINGS_RATE);
        (base * scenario.savings_multiplier).clamp(0.0, 0.9)
    }

    /// Allocation-weighted pre-tax return
    fn portfolio_return(&self, profile: &CareerProfile, annual_return: f64) -> f64 {
        let a = &profile.target_allocation;
        a.cash_pct * CASH_REAL_RETURN + a.investment_pct * annual_return + a.other_pct * OTHER_ASSET_RETURN
    }

    /// Allocation-weighted post-tax return actually compounding each year
    fn effective_return(&self, profile: &CareerProfile, annual_return: f64) -> f64 {
        let a = &profile.target_allocation;
        let drag_factor = match &a.tax_treatment {
            Some(tt) => tt.taxable_pct * (1.0 - profile.tax_drag) + tt.tax_advantaged_pct,
            None => 1.0 - profile.tax_drag,
        };
        a.cash_pct * CASH_REAL_RETURN
            + a.investment_pct * annual_return * drag_factor
            + a.other_pct * OTHER_ASSET_RETURN
    }

    /// Geometric mean year-over-year growth of the income series
    fn avg_income_growth(series: &[YearByYearData]) -> f64 {
        if series.len() < 2 {
            return 0.0;
        }
        let first = series[0].income;
        let last = series[series.len() - 1].income;
        if first <= 0.0 {
            return 0.0;
        }
        (last / first).powf(1.0 / (series.len() - 1) as f64) - 1.0
    }
}
