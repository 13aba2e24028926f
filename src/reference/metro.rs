//! Metro cost-of-living and effective tax rate factors

use std::collections::HashMap;

/// Key of the fallback bucket used when a metro is not in the table
pub const FALLBACK_METRO: &str = "other";

/// Adjustment factors for a single metro area
#[derive(Debug, Clone, Copy)]
pub struct MetroFactors {
    /// Cost-of-living index applied to nominal compensation (1.0 = national)
    pub col_index: f64,

    /// Combined effective tax rate on total compensation
    pub effective_tax_rate: f64,
}

/// Metro lookup table with a defined "other" fallback bucket
#[derive(Debug, Clone)]
pub struct MetroTable {
    factors: HashMap<String, MetroFactors>,
}

impl MetroTable {
    /// Built-in default factors for major metros
    pub fn default_factors() -> Self {
        let mut factors = HashMap::new();
        let mut add = |metro: &str, col_index: f64, effective_tax_rate: f64| {
            factors.insert(metro.to_string(), MetroFactors { col_index, effective_tax_rate });
        };

        add("san_francisco", 1.42, 0.34);
        add("new_york", 1.38, 0.33);
        add("seattle", 1.24, 0.28);
        add("boston", 1.22, 0.31);
        add("austin", 1.08, 0.26);
        add("denver", 1.06, 0.28);
        add("chicago", 1.02, 0.29);
        add("atlanta", 0.98, 0.27);
        add("remote", 1.00, 0.27);
        add(FALLBACK_METRO, 1.00, 0.28);

        Self { factors }
    }

    /// Create from loaded CSV reference data
    pub fn from_loaded(loaded: &super::loader::LoadedReference) -> Self {
        Self {
            factors: loaded.metro_factors.clone(),
        }
    }

    /// Exact-key lookup with fallback to the "other" bucket
    pub fn factors(&self, metro: &str) -> MetroFactors {
        self.factors
            .get(metro)
            .or_else(|| self.factors.get(FALLBACK_METRO))
            .copied()
            .unwrap_or(MetroFactors { col_index: 1.0, effective_tax_rate: 0.28 })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_known_metro_lookup() {
        let table = MetroTable::default_factors();
        let sf = table.factors("san_francisco");
        assert!(sf.col_index > 1.3);
        assert!(sf.effective_tax_rate > 0.30);
    }

    #[test]
    fn test_unknown_metro_falls_back() {
        let table = MetroTable::default_factors();
        let unknown = table.factors("gotham");
        let fallback = table.factors(FALLBACK_METRO);
        assert_eq!(unknown.col_index, fallback.col_index);
        assert_eq!(unknown.effective_tax_rate, fallback.effective_tax_rate);
    }
}
