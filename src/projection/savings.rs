//! Implied savings rate inference from a historical net worth series
//!
//! Backs out the savings rate that, combined with an assumed investment
//! return on the starting balance, explains the observed wealth delta. This
//! is a point estimate over the first/last entries, not a regression fit.

use crate::profile::HistoryEntry;

/// Conservative fallback when inference is not possible
pub const DEFAULT_SAVINGS_RATE: f64 = 0.25;

const DAYS_PER_YEAR: f64 = 365.25;

/// Infer the historical savings rate implied by a net worth series.
///
/// Requires at least two chronologically sorted entries and a nonzero income
/// estimate. The wealth delta is decomposed into an investment-only component
/// (`start * ((1+r)^years - 1)`) and a savings-attributable remainder; the
/// rate is that remainder divided by income earned over the span. Any result
/// that is NaN, negative, or above 0.9 falls back to the default rather than
/// propagating.
pub fn infer_savings_rate(
    entries: &[HistoryEntry],
    estimated_annual_income: f64,
    assumed_return: f64,
) -> f64 {
    if entries.len() < 2 || estimated_annual_income == 0.0 {
        return DEFAULT_SAVINGS_RATE;
    }

    let first = &entries[0];
    let last = &entries[entries.len() - 1];

    let elapsed_days = (last.date - first.date).num_days();
    if elapsed_days <= 0 {
        return DEFAULT_SAVINGS_RATE;
    }
    let elapsed_years = elapsed_days as f64 / DAYS_PER_YEAR;

    let actual_delta = last.net_worth - first.net_worth;
    let investment_only_delta = first.net_worth * ((1.0 + assumed_return).powf(elapsed_years) - 1.0);
    let savings_delta = actual_delta - investment_only_delta;

    let rate = savings_delta / (estimated_annual_income * elapsed_years);

    if !rate.is_finite() || rate < 0.0 || rate > 0.9 {
        DEFAULT_SAVINGS_RATE
    } else {
        rate
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn entry(y: i32, m: u32, d: u32, net_worth: f64) -> HistoryEntry {
        HistoryEntry::new(NaiveDate::from_ymd_opt(y, m, d).unwrap(), net_worth)
    }

    #[test]
    fn test_too_few_entries_returns_default() {
        assert_eq!(infer_savings_rate(&[], 100_000.0, 0.07), DEFAULT_SAVINGS_RATE);
        assert_eq!(
            infer_savings_rate(&[entry(2023, 1, 1, 50_000.0)], 100_000.0, 0.07),
            DEFAULT_SAVINGS_RATE
        );
    }

    #[test]
    fn test_zero_income_returns_default() {
        let entries = [entry(2022, 1, 1, 10_000.0), entry(2024, 1, 1, 60_000.0)];
        assert_eq!(infer_savings_rate(&entries, 0.0, 0.07), DEFAULT_SAVINGS_RATE);
    }

    #[test]
    fn test_zero_elapsed_time_returns_default() {
        let entries = [entry(2023, 6, 1, 10_000.0), entry(2023, 6, 1, 20_000.0)];
        assert_eq!(infer_savings_rate(&entries, 100_000.0, 0.07), DEFAULT_SAVINGS_RATE);
    }

    #[test]
    fn test_negative_rate_falls_back() {
        // Wealth shrank: raw rate would be negative
        let entries = [entry(2022, 1, 1, 100_000.0), entry(2024, 1, 1, 60_000.0)];
        assert_eq!(infer_savings_rate(&entries, 100_000.0, 0.07), DEFAULT_SAVINGS_RATE);
    }

    #[test]
    fn test_implausibly_high_rate_falls_back() {
        // Delta far exceeds what any savings rate <= 0.9 could produce
        let entries = [entry(2023, 1, 1, 0.0), entry(2024, 1, 1, 500_000.0)];
        assert_eq!(infer_savings_rate(&entries, 100_000.0, 0.07), DEFAULT_SAVINGS_RATE);
    }

    #[test]
    fn test_plausible_inference() {
        // ~50k gained over 2 years on 100k income, ~1.5k of it from returns
        let entries = [entry(2022, 1, 1, 10_000.0), entry(2024, 1, 1, 60_000.0)];
        let rate = infer_savings_rate(&entries, 100_000.0, 0.07);
        assert!(rate > 0.20 && rate < 0.30, "rate = {}", rate);
    }
}
