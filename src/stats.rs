//! Descriptive statistics helpers shared by the projection and simulation engines
//!
//! All functions are pure. `percentile` expects its input pre-sorted ascending
//! so that repeated lookups over the same collection sort once, not per call.

use thiserror::Error;

/// Errors from statistics helpers
#[derive(Debug, Error, PartialEq)]
pub enum StatsError {
    /// Percentile of an empty sequence is undefined
    #[error("cannot compute a percentile of an empty sequence")]
    EmptyInput,
}

/// Linearly-interpolated percentile over a pre-sorted ascending slice.
///
/// `p` is on the 0-100 scale. Rank = (p/100) * (n-1); values between ranks
/// are blended by the fractional part.
pub fn percentile(sorted: &[f64], p: f64) -> Result<f64, StatsError> {
    if sorted.is_empty() {
        return Err(StatsError::EmptyInput);
    }
    if sorted.len() == 1 {
        return Ok(sorted[0]);
    }

    let p = p.clamp(0.0, 100.0);
    let rank = (p / 100.0) * (sorted.len() as f64 - 1.0);
    let lower = rank.floor() as usize;
    let upper = rank.ceil() as usize;

    if lower == upper {
        Ok(sorted[lower])
    } else {
        let w = rank - lower as f64;
        Ok(sorted[lower] * (1.0 - w) + sorted[upper] * w)
    }
}

/// Arithmetic mean. Empty input yields 0.
pub fn mean(values: &[f64]) -> f64 {
    if values.is_empty() {
        return 0.0;
    }
    values.iter().sum::<f64>() / values.len() as f64
}

/// Sample variance (n-1 denominator). Fewer than 2 values yields 0.
pub fn variance(values: &[f64]) -> f64 {
    if values.len() < 2 {
        return 0.0;
    }
    let m = mean(values);
    let sum_sq: f64 = values.iter().map(|v| (v - m) * (v - m)).sum();
    sum_sq / (values.len() - 1) as f64
}

/// Sample standard deviation
pub fn std_dev(values: &[f64]) -> f64 {
    variance(values).sqrt()
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_percentile_empty_errors() {
        assert_eq!(percentile(&[], 50.0), Err(StatsError::EmptyInput));
    }

    #[test]
    fn test_percentile_single_value() {
        assert_eq!(percentile(&[7.0], 10.0).unwrap(), 7.0);
        assert_eq!(percentile(&[7.0], 90.0).unwrap(), 7.0);
    }

    #[test]
    fn test_percentile_interpolates() {
        let values = [10.0, 20.0, 30.0, 40.0];
        // rank = 0.5 * 3 = 1.5, halfway between 20 and 30
        assert_relative_eq!(percentile(&values, 50.0).unwrap(), 25.0);
        assert_relative_eq!(percentile(&values, 0.0).unwrap(), 10.0);
        assert_relative_eq!(percentile(&values, 100.0).unwrap(), 40.0);
    }

    #[test]
    fn test_percentiles_non_decreasing() {
        let mut values: Vec<f64> = (0..97).map(|i| ((i * 37) % 101) as f64).collect();
        values.sort_by(|a, b| a.total_cmp(b));

        let ps = [10.0, 25.0, 50.0, 75.0, 90.0];
        let results: Vec<f64> = ps.iter().map(|&p| percentile(&values, p).unwrap()).collect();
        for pair in results.windows(2) {
            assert!(pair[0] <= pair[1]);
        }
    }

    #[test]
    fn test_mean_and_variance() {
        let values = [2.0, 4.0, 4.0, 4.0, 5.0, 5.0, 7.0, 9.0];
        assert_relative_eq!(mean(&values), 5.0);
        // Sample variance of the classic data set: 32/7
        assert_relative_eq!(variance(&values), 32.0 / 7.0);
        assert_relative_eq!(std_dev(&values), (32.0f64 / 7.0).sqrt());
    }

    #[test]
    fn test_variance_degenerate_inputs() {
        assert_eq!(variance(&[]), 0.0);
        assert_eq!(variance(&[3.0]), 0.0);
        assert_eq!(mean(&[]), 0.0);
    }
}
