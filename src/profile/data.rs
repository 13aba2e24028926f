//! Career profile structures driving the deterministic wealth projection

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Default career start age when the profile does not supply one
pub const DEFAULT_START_AGE: u8 = 22;

/// Default real equity return assumption
pub const DEFAULT_ANNUAL_RETURN: f64 = 0.07;

/// Default flat tax drag on investment gains
pub const DEFAULT_TAX_DRAG: f64 = 0.15;

/// Tolerance for allocation percentages summing to 1.0
const ALLOCATION_SUM_TOLERANCE: f64 = 0.01;

fn default_start_age() -> u8 {
    DEFAULT_START_AGE
}

fn default_annual_return() -> f64 {
    DEFAULT_ANNUAL_RETURN
}

fn default_tax_drag() -> f64 {
    DEFAULT_TAX_DRAG
}

/// Errors from profile and allocation validation
#[derive(Debug, Error, PartialEq)]
pub enum ProfileError {
    /// Allocation percentages must sum to 1.0 within tolerance
    #[error("allocation percentages sum to {0:.4}, expected 1.0 within 1%")]
    AllocationSum(f64),

    /// Tax treatment percentages must sum to 1.0 within tolerance
    #[error("tax treatment percentages sum to {0:.4}, expected 1.0 within 1%")]
    TaxTreatmentSum(f64),
}

/// Career level band resolved from years in the workforce
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub enum CareerLevel {
    /// 0-2 years
    Entry,
    /// 3-5 years
    Mid,
    /// 6-10 years
    Senior,
    /// 11-15 years
    Staff,
    /// 16-20 years
    Principal,
    /// 21+ years
    Executive,
}

impl CareerLevel {
    /// Resolve the level band from total years in the workforce
    pub fn from_years_in_workforce(years: u32) -> Self {
        match years {
            0..=2 => CareerLevel::Entry,
            3..=5 => CareerLevel::Mid,
            6..=10 => CareerLevel::Senior,
            11..=15 => CareerLevel::Staff,
            16..=20 => CareerLevel::Principal,
            _ => CareerLevel::Executive,
        }
    }

    /// First workforce year covered by this band
    pub fn start_year(&self) -> u32 {
        match self {
            CareerLevel::Entry => 0,
            CareerLevel::Mid => 3,
            CareerLevel::Senior => 6,
            CareerLevel::Staff => 11,
            CareerLevel::Principal => 16,
            CareerLevel::Executive => 21,
        }
    }

    /// Width of the band in years (Executive is open-ended)
    pub fn duration_years(&self) -> u32 {
        match self {
            CareerLevel::Entry => 3,
            CareerLevel::Mid => 3,
            CareerLevel::Senior => 5,
            CareerLevel::Staff => 5,
            CareerLevel::Principal => 5,
            CareerLevel::Executive => u32::MAX,
        }
    }

    /// Next level up, if any
    pub fn next(&self) -> Option<CareerLevel> {
        match self {
            CareerLevel::Entry => Some(CareerLevel::Mid),
            CareerLevel::Mid => Some(CareerLevel::Senior),
            CareerLevel::Senior => Some(CareerLevel::Staff),
            CareerLevel::Staff => Some(CareerLevel::Principal),
            CareerLevel::Principal => Some(CareerLevel::Executive),
            CareerLevel::Executive => None,
        }
    }

    /// Index into level-keyed reference tables
    pub fn index(&self) -> usize {
        match self {
            CareerLevel::Entry => 0,
            CareerLevel::Mid => 1,
            CareerLevel::Senior => 2,
            CareerLevel::Staff => 3,
            CareerLevel::Principal => 4,
            CareerLevel::Executive => 5,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            CareerLevel::Entry => "entry",
            CareerLevel::Mid => "mid",
            CareerLevel::Senior => "senior",
            CareerLevel::Staff => "staff",
            CareerLevel::Principal => "principal",
            CareerLevel::Executive => "executive",
        }
    }
}

/// Split of investment dollars between taxable and tax-advantaged accounts
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct TaxTreatment {
    /// Fraction of investments held in taxable accounts
    pub taxable_pct: f64,

    /// Fraction held in tax-advantaged accounts (401k, IRA, HSA)
    pub tax_advantaged_pct: f64,
}

impl TaxTreatment {
    pub fn new(taxable_pct: f64, tax_advantaged_pct: f64) -> Result<Self, ProfileError> {
        let sum = taxable_pct + tax_advantaged_pct;
        if (sum - 1.0).abs() > ALLOCATION_SUM_TOLERANCE {
            return Err(ProfileError::TaxTreatmentSum(sum));
        }
        Ok(Self { taxable_pct, tax_advantaged_pct })
    }
}

/// Target asset allocation, rebalanced to annually during projection
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct TargetAllocation {
    /// Fraction of net worth held as cash
    pub cash_pct: f64,

    /// Fraction held as invested assets
    pub investment_pct: f64,

    /// Fraction held as other assets (real estate equity, vehicles)
    pub other_pct: f64,

    /// Optional split of the invested fraction by tax treatment.
    /// When absent, a flat tax drag applies to all investment growth.
    #[serde(default)]
    pub tax_treatment: Option<TaxTreatment>,
}

impl TargetAllocation {
    /// Build an allocation, validating that the three fractions sum to 1.0
    pub fn new(cash_pct: f64, investment_pct: f64, other_pct: f64) -> Result<Self, ProfileError> {
        let allocation = Self {
            cash_pct,
            investment_pct,
            other_pct,
            tax_treatment: None,
        };
        allocation.validate()?;
        Ok(allocation)
    }

    /// Attach a tax treatment split to the invested fraction
    pub fn with_tax_treatment(mut self, treatment: TaxTreatment) -> Self {
        self.tax_treatment = Some(treatment);
        self
    }

    /// Check the sum invariants on both levels of the allocation
    pub fn validate(&self) -> Result<(), ProfileError> {
        let sum = self.cash_pct + self.investment_pct + self.other_pct;
        if (sum - 1.0).abs() > ALLOCATION_SUM_TOLERANCE {
            return Err(ProfileError::AllocationSum(sum));
        }
        if let Some(tt) = &self.tax_treatment {
            let tt_sum = tt.taxable_pct + tt.tax_advantaged_pct;
            if (tt_sum - 1.0).abs() > ALLOCATION_SUM_TOLERANCE {
                return Err(ProfileError::TaxTreatmentSum(tt_sum));
            }
        }
        Ok(())
    }

    /// Decompose a net worth into cash/investment/other dollar buckets
    pub fn split(&self, net_worth: f64) -> AllocationSplit {
        AllocationSplit {
            cash: net_worth * self.cash_pct,
            investment: net_worth * self.investment_pct,
            other: net_worth * self.other_pct,
        }
    }

    /// A common default: 10% cash, 80% invested, 10% other
    pub fn balanced() -> Self {
        Self {
            cash_pct: 0.10,
            investment_pct: 0.80,
            other_pct: 0.10,
            tax_treatment: None,
        }
    }
}

/// Dollar decomposition of a net worth under a target allocation
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AllocationSplit {
    pub cash: f64,
    pub investment: f64,
    pub other: f64,
}

impl AllocationSplit {
    pub fn total(&self) -> f64 {
        self.cash + self.investment + self.other
    }
}

/// A dated net worth observation from the user's history
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct HistoryEntry {
    pub date: NaiveDate,
    pub net_worth: f64,
}

impl HistoryEntry {
    pub fn new(date: NaiveDate, net_worth: f64) -> Self {
        Self { date, net_worth }
    }
}

/// A user's career profile, the input to the deterministic wealth model
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CareerProfile {
    /// Current age in years
    pub current_age: u8,

    /// Age the career started
    #[serde(default = "default_start_age")]
    pub start_age: u8,

    /// Occupation key into the wage table ("other" bucket on miss)
    pub occupation: String,

    /// Explicit career level; derived from years worked when absent
    #[serde(default)]
    pub level: Option<CareerLevel>,

    /// Metro key into the cost-of-living/tax table
    pub metro: String,

    /// Savings rate as a fraction of after-tax income; inferred or defaulted
    /// when absent, clamped to [0, 0.9] when present
    #[serde(default)]
    pub savings_rate: Option<f64>,

    /// Real annual return on invested assets
    #[serde(default = "default_annual_return")]
    pub annual_return: f64,

    /// Tax drag on gains in taxable accounts
    #[serde(default = "default_tax_drag")]
    pub tax_drag: f64,

    /// Target asset allocation
    pub target_allocation: TargetAllocation,
}

impl CareerProfile {
    /// Create a profile with defaulted start age, return, and drag
    pub fn new(
        current_age: u8,
        occupation: impl Into<String>,
        metro: impl Into<String>,
        target_allocation: TargetAllocation,
    ) -> Self {
        Self {
            current_age,
            start_age: DEFAULT_START_AGE,
            occupation: occupation.into(),
            level: None,
            metro: metro.into(),
            savings_rate: None,
            annual_return: DEFAULT_ANNUAL_RETURN,
            tax_drag: DEFAULT_TAX_DRAG,
            target_allocation,
        }
    }

    /// Validate allocation invariants and numeric ranges
    pub fn validate(&self) -> Result<(), ProfileError> {
        self.target_allocation.validate()
    }

    /// Years in the workforce at a given age (0 before the start age)
    pub fn years_in_workforce_at(&self, age: u8) -> u32 {
        age.saturating_sub(self.start_age) as u32
    }

    /// Career level at a given age: explicit level wins, otherwise derived
    pub fn level_at(&self, age: u8) -> CareerLevel {
        self.level
            .unwrap_or_else(|| CareerLevel::from_years_in_workforce(self.years_in_workforce_at(age)))
    }

    /// Savings rate with the [0, 0.9] clamp applied; None when not supplied
    pub fn clamped_savings_rate(&self) -> Option<f64> {
        self.savings_rate.map(|r| r.clamp(0.0, 0.9))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_level_from_years() {
        assert_eq!(CareerLevel::from_years_in_workforce(0), CareerLevel::Entry);
        assert_eq!(CareerLevel::from_years_in_workforce(2), CareerLevel::Entry);
        assert_eq!(CareerLevel::from_years_in_workforce(3), CareerLevel::Mid);
        assert_eq!(CareerLevel::from_years_in_workforce(8), CareerLevel::Senior);
        assert_eq!(CareerLevel::from_years_in_workforce(12), CareerLevel::Staff);
        assert_eq!(CareerLevel::from_years_in_workforce(18), CareerLevel::Principal);
        assert_eq!(CareerLevel::from_years_in_workforce(30), CareerLevel::Executive);
    }

    #[test]
    fn test_allocation_sum_validation() {
        assert!(TargetAllocation::new(0.1, 0.8, 0.1).is_ok());
        // Within the 1% tolerance
        assert!(TargetAllocation::new(0.1, 0.8, 0.105).is_ok());
        assert!(matches!(
            TargetAllocation::new(0.2, 0.8, 0.2),
            Err(ProfileError::AllocationSum(_))
        ));
    }

    #[test]
    fn test_split_sums_to_net_worth() {
        let allocation = TargetAllocation::new(0.15, 0.7, 0.15).unwrap();
        let split = allocation.split(123_456.78);
        assert!((split.total() - 123_456.78).abs() < 1e-6);
    }

    #[test]
    fn test_explicit_level_overrides_derivation() {
        let mut profile = CareerProfile::new(40, "software_engineer", "denver", TargetAllocation::balanced());
        assert_eq!(profile.level_at(40), CareerLevel::Principal); // 18 years in

        profile.level = Some(CareerLevel::Senior);
        assert_eq!(profile.level_at(40), CareerLevel::Senior);
    }

    #[test]
    fn test_savings_rate_clamp() {
        let mut profile = CareerProfile::new(30, "nurse", "chicago", TargetAllocation::balanced());
        assert_eq!(profile.clamped_savings_rate(), None);

        profile.savings_rate = Some(1.5);
        assert_eq!(profile.clamped_savings_rate(), Some(0.9));

        profile.savings_rate = Some(-0.2);
        assert_eq!(profile.clamped_savings_rate(), Some(0.0));
    }
}
