//! Wage curves by occupation and career level
//!
//! Nominal compensation is national-median; metro cost-of-living scaling and
//! taxes are applied at estimate time. Lookups within a level interpolate
//! toward the next level so compensation ramps smoothly instead of stepping.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::profile::CareerLevel;
use super::metro::MetroFactors;

/// Key of the fallback bucket used when an occupation is not in the table
pub const FALLBACK_OCCUPATION: &str = "other";

/// Maximum interpolation weight toward the next level's compensation
const MAX_INTERPOLATION_WEIGHT: f64 = 0.5;

/// Compensation curve for one occupation, indexed by career level
#[derive(Debug, Clone)]
pub struct WageCurve {
    /// National-median base salary by level
    pub base_by_level: [f64; 6],

    /// Bonus as a fraction of base, by level
    pub bonus_pct_by_level: [f64; 6],

    /// Equity as a fraction of base, by level
    pub equity_pct_by_level: [f64; 6],
}

/// A compensation estimate for one (occupation, level, metro, tenure) lookup
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct WageEstimate {
    pub base_salary: f64,
    pub bonus: f64,
    pub equity: f64,
    pub total_comp: f64,
    pub after_tax_comp: f64,
    /// Monthly after-tax pay
    pub take_home_pay: f64,
}

/// Wage lookup table with a defined "other" fallback bucket
#[derive(Debug, Clone)]
pub struct WageTable {
    curves: HashMap<String, WageCurve>,
}

impl WageTable {
    /// Built-in default wage curves
    pub fn default_curves() -> Self {
        let mut curves = HashMap::new();
        let mut add = |occupation: &str, base: [f64; 6], bonus: [f64; 6], equity: [f64; 6]| {
            curves.insert(
                occupation.to_string(),
                WageCurve {
                    base_by_level: base,
                    bonus_pct_by_level: bonus,
                    equity_pct_by_level: equity,
                },
            );
        };

        add(
            "software_engineer",
            [110_000.0, 140_000.0, 175_000.0, 210_000.0, 250_000.0, 300_000.0],
            [0.05, 0.08, 0.10, 0.12, 0.15, 0.20],
            [0.10, 0.15, 0.25, 0.35, 0.45, 0.60],
        );
        add(
            "product_manager",
            [100_000.0, 130_000.0, 160_000.0, 195_000.0, 230_000.0, 280_000.0],
            [0.08, 0.10, 0.12, 0.15, 0.18, 0.25],
            [0.08, 0.12, 0.20, 0.30, 0.40, 0.55],
        );
        add(
            "data_scientist",
            [105_000.0, 132_000.0, 165_000.0, 198_000.0, 235_000.0, 285_000.0],
            [0.05, 0.08, 0.10, 0.12, 0.15, 0.20],
            [0.08, 0.12, 0.20, 0.30, 0.40, 0.55],
        );
        add(
            "accountant",
            [58_000.0, 72_000.0, 90_000.0, 110_000.0, 135_000.0, 170_000.0],
            [0.03, 0.05, 0.08, 0.10, 0.12, 0.18],
            [0.0, 0.0, 0.02, 0.05, 0.08, 0.15],
        );
        add(
            "nurse",
            [65_000.0, 78_000.0, 92_000.0, 105_000.0, 118_000.0, 135_000.0],
            [0.02, 0.03, 0.04, 0.05, 0.06, 0.08],
            [0.0, 0.0, 0.0, 0.0, 0.0, 0.0],
        );
        add(
            "teacher",
            [45_000.0, 52_000.0, 61_000.0, 70_000.0, 79_000.0, 92_000.0],
            [0.0, 0.0, 0.01, 0.01, 0.02, 0.03],
            [0.0, 0.0, 0.0, 0.0, 0.0, 0.0],
        );
        add(
            FALLBACK_OCCUPATION,
            [52_000.0, 64_000.0, 79_000.0, 95_000.0, 112_000.0, 135_000.0],
            [0.02, 0.03, 0.05, 0.06, 0.08, 0.12],
            [0.0, 0.0, 0.02, 0.04, 0.06, 0.10],
        );

        Self { curves }
    }

    /// Create from loaded CSV reference data. The fallback bucket is seeded
    /// from the built-in defaults when the file does not provide one.
    pub fn from_loaded(loaded: &super::loader::LoadedReference) -> Self {
        let mut curves = loaded.wage_curves.clone();
        if !curves.contains_key(FALLBACK_OCCUPATION) {
            let defaults = Self::default_curves();
            curves.insert(
                FALLBACK_OCCUPATION.to_string(),
                defaults.curves[FALLBACK_OCCUPATION].clone(),
            );
        }
        Self { curves }
    }

    /// Exact-key lookup with fallback to the "other" bucket
    pub fn curve(&self, occupation: &str) -> &WageCurve {
        self.curves
            .get(occupation)
            .or_else(|| self.curves.get(FALLBACK_OCCUPATION))
            .expect("wage table must contain the fallback occupation")
    }

    /// Produce a wage estimate for one projection year.
    ///
    /// Compensation is interpolated toward the next level by progress through
    /// the current band: weight = min(years_in_level / duration, 1) * 0.5.
    /// Executive has no next level and never interpolates.
    pub fn estimate(
        &self,
        occupation: &str,
        level: CareerLevel,
        years_in_level: u32,
        metro: &MetroFactors,
    ) -> WageEstimate {
        let curve = self.curve(occupation);
        let idx = level.index();

        let weight = match level.next() {
            Some(_) => {
                let progress = years_in_level as f64 / level.duration_years() as f64;
                progress.min(1.0) * MAX_INTERPOLATION_WEIGHT
            }
            None => 0.0,
        };

        let lerp = |values: &[f64; 6]| -> f64 {
            let current = values[idx];
            match level.next() {
                Some(next) => current + (values[next.index()] - current) * weight,
                None => current,
            }
        };

        let base_salary = lerp(&curve.base_by_level) * metro.col_index;
        let bonus = base_salary * lerp(&curve.bonus_pct_by_level);
        let equity = base_salary * lerp(&curve.equity_pct_by_level);
        let total_comp = base_salary + bonus + equity;
        let after_tax_comp = total_comp * (1.0 - metro.effective_tax_rate);

        WageEstimate {
            base_salary,
            bonus,
            equity,
            total_comp,
            after_tax_comp,
            take_home_pay: after_tax_comp / 12.0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn national() -> MetroFactors {
        MetroFactors { col_index: 1.0, effective_tax_rate: 0.28 }
    }

    #[test]
    fn test_unknown_occupation_falls_back() {
        let table = WageTable::default_curves();
        let est = table.estimate("underwater_basket_weaver", CareerLevel::Entry, 0, &national());
        let fallback = table.estimate(FALLBACK_OCCUPATION, CareerLevel::Entry, 0, &national());
        assert_eq!(est.base_salary, fallback.base_salary);
    }

    #[test]
    fn test_interpolation_weight_capped() {
        let table = WageTable::default_curves();
        let metro = national();

        // Fresh in level: no interpolation yet
        let start = table.estimate("software_engineer", CareerLevel::Mid, 0, &metro);
        assert_eq!(start.base_salary, 140_000.0);

        // Deep into the band: capped at halfway to the next level
        let capped = table.estimate("software_engineer", CareerLevel::Mid, 10, &metro);
        assert_eq!(capped.base_salary, 140_000.0 + (175_000.0 - 140_000.0) * 0.5);
    }

    #[test]
    fn test_executive_never_interpolates() {
        let table = WageTable::default_curves();
        let a = table.estimate("software_engineer", CareerLevel::Executive, 0, &national());
        let b = table.estimate("software_engineer", CareerLevel::Executive, 15, &national());
        assert_eq!(a.base_salary, b.base_salary);
    }

    #[test]
    fn test_metro_scaling_and_taxes() {
        let table = WageTable::default_curves();
        let sf = MetroFactors { col_index: 1.5, effective_tax_rate: 0.40 };
        let est = table.estimate("nurse", CareerLevel::Entry, 0, &sf);

        assert_eq!(est.base_salary, 65_000.0 * 1.5);
        assert!((est.after_tax_comp - est.total_comp * 0.6).abs() < 1e-9);
        assert!((est.take_home_pay - est.after_tax_comp / 12.0).abs() < 1e-9);
    }
}
