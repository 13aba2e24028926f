//! Age-bracket net worth percentile thresholds (SCF-style)

/// Percentile points at which thresholds are tabulated
const PERCENTILE_POINTS: [f64; 5] = [10.0, 25.0, 50.0, 75.0, 90.0];

/// Net worth thresholds for one age bracket
#[derive(Debug, Clone)]
pub struct AgeBracket {
    pub min_age: u8,
    pub max_age: u8,
    /// Thresholds at p10/p25/p50/p75/p90, ascending
    pub thresholds: [f64; 5],
}

/// Lookup table mapping (age, net worth) to an approximate percentile
#[derive(Debug, Clone)]
pub struct WealthPercentileTable {
    brackets: Vec<AgeBracket>,
}

impl WealthPercentileTable {
    /// Built-in default brackets
    pub fn default_brackets() -> Self {
        let bracket = |min_age, max_age, thresholds| AgeBracket { min_age, max_age, thresholds };
        Self {
            brackets: vec![
                bracket(0, 24, [-9_000.0, 0.0, 9_000.0, 40_000.0, 105_000.0]),
                bracket(25, 34, [-11_000.0, 3_500.0, 39_000.0, 125_000.0, 285_000.0]),
                bracket(35, 44, [-4_000.0, 22_000.0, 135_000.0, 410_000.0, 930_000.0]),
                bracket(45, 54, [0.0, 40_000.0, 250_000.0, 760_000.0, 1_700_000.0]),
                bracket(55, 64, [2_000.0, 62_000.0, 364_000.0, 1_130_000.0, 2_500_000.0]),
                bracket(65, 120, [5_000.0, 90_000.0, 410_000.0, 1_220_000.0, 2_630_000.0]),
            ],
        }
    }

    /// Create from loaded CSV reference data
    pub fn from_loaded(loaded: &super::loader::LoadedReference) -> Self {
        Self {
            brackets: loaded.wealth_brackets.clone(),
        }
    }

    fn bracket_for(&self, age: u8) -> &AgeBracket {
        self.brackets
            .iter()
            .find(|b| age >= b.min_age && age <= b.max_age)
            .unwrap_or_else(|| self.brackets.last().expect("percentile table must be non-empty"))
    }

    /// Approximate percentile of a net worth within its age bracket.
    ///
    /// Piecewise-linear between tabulated thresholds, extrapolated with the
    /// nearest segment's slope, clamped to [1, 99].
    pub fn percentile_for(&self, age: u8, net_worth: f64) -> f64 {
        let t = &self.bracket_for(age).thresholds;

        let raw = if net_worth <= t[0] {
            Self::extrapolate(net_worth, t[0], t[1], PERCENTILE_POINTS[0], PERCENTILE_POINTS[1])
        } else if net_worth >= t[4] {
            Self::extrapolate(net_worth, t[3], t[4], PERCENTILE_POINTS[3], PERCENTILE_POINTS[4])
        } else {
            let mut result = PERCENTILE_POINTS[4];
            for i in 0..4 {
                if net_worth <= t[i + 1] {
                    result = Self::interpolate(
                        net_worth,
                        t[i],
                        t[i + 1],
                        PERCENTILE_POINTS[i],
                        PERCENTILE_POINTS[i + 1],
                    );
                    break;
                }
            }
            result
        };

        raw.clamp(1.0, 99.0)
    }

    fn interpolate(value: f64, lo: f64, hi: f64, p_lo: f64, p_hi: f64) -> f64 {
        if hi <= lo {
            return p_hi;
        }
        p_lo + (value - lo) / (hi - lo) * (p_hi - p_lo)
    }

    fn extrapolate(value: f64, lo: f64, hi: f64, p_lo: f64, p_hi: f64) -> f64 {
        if hi <= lo {
            return p_lo;
        }
        p_lo + (value - lo) / (hi - lo) * (p_hi - p_lo)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_median_maps_to_p50() {
        let table = WealthPercentileTable::default_brackets();
        let p = table.percentile_for(30, 39_000.0);
        assert!((p - 50.0).abs() < 1e-9);
    }

    #[test]
    fn test_extremes_clamped() {
        let table = WealthPercentileTable::default_brackets();
        assert_eq!(table.percentile_for(30, -1_000_000.0), 1.0);
        assert_eq!(table.percentile_for(30, 100_000_000.0), 99.0);
    }

    #[test]
    fn test_monotone_in_net_worth() {
        let table = WealthPercentileTable::default_brackets();
        let mut prev = 0.0;
        for nw in (0..40).map(|i| -20_000.0 + i as f64 * 25_000.0) {
            let p = table.percentile_for(40, nw);
            assert!(p >= prev);
            prev = p;
        }
    }

    #[test]
    fn test_age_out_of_range_uses_last_bracket() {
        let table = WealthPercentileTable::default_brackets();
        // Same thresholds as the 65+ bracket
        assert_eq!(table.percentile_for(95, 410_000.0), table.percentile_for(70, 410_000.0));
    }
}
