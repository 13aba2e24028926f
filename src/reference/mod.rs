//! Read-only reference tables: wage curves, metro factors, wealth percentiles

mod metro;
mod percentiles;
mod wages;
pub mod loader;

pub use loader::LoadedReference;
pub use metro::{MetroFactors, MetroTable};
pub use percentiles::{AgeBracket, WealthPercentileTable};
pub use wages::{WageCurve, WageEstimate, WageTable};

use std::path::Path;

/// Container for all reference lookup tables
#[derive(Debug, Clone)]
pub struct ReferenceTables {
    pub wages: WageTable,
    pub metros: MetroTable,
    pub wealth_percentiles: WealthPercentileTable,
}

impl ReferenceTables {
    /// Create tables with the built-in calibrated defaults
    pub fn default_tables() -> Self {
        Self {
            wages: WageTable::default_curves(),
            metros: MetroTable::default_factors(),
            wealth_percentiles: WealthPercentileTable::default_brackets(),
        }
    }

    /// Load tables from CSV files in the default location (data/reference/)
    pub fn from_csv() -> Result<Self, Box<dyn std::error::Error>> {
        Self::from_csv_path(Path::new(loader::DEFAULT_REFERENCE_PATH))
    }

    /// Load tables from CSV files in a specific directory
    pub fn from_csv_path(path: &Path) -> Result<Self, Box<dyn std::error::Error>> {
        let loaded = LoadedReference::load_from(path)?;

        Ok(Self {
            wages: WageTable::from_loaded(&loaded),
            metros: MetroTable::from_loaded(&loaded),
            wealth_percentiles: WealthPercentileTable::from_loaded(&loaded),
        })
    }
}
