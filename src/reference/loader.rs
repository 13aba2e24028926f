//! CSV-based reference table loader
//!
//! Loads wage curves, metro factors, and wealth percentile brackets from CSV
//! files in data/reference/

use std::collections::HashMap;
use std::error::Error;
use std::fs::File;
use std::path::Path;

use super::metro::MetroFactors;
use super::percentiles::AgeBracket;
use super::wages::WageCurve;

/// Default path to the reference data directory
pub const DEFAULT_REFERENCE_PATH: &str = "data/reference";

fn level_index(name: &str) -> Result<usize, Box<dyn Error>> {
    match name {
        "entry" => Ok(0),
        "mid" => Ok(1),
        "senior" => Ok(2),
        "staff" => Ok(3),
        "principal" => Ok(4),
        "executive" => Ok(5),
        other => Err(format!("unknown career level '{}'", other).into()),
    }
}

/// Load wage curves from CSV
/// Format: occupation,level,base_salary,bonus_pct,equity_pct
pub fn load_wage_curves(path: &Path) -> Result<HashMap<String, WageCurve>, Box<dyn Error>> {
    let file = File::open(path.join("wage_curves.csv"))?;
    let mut reader = csv::Reader::from_reader(file);

    let mut curves: HashMap<String, WageCurve> = HashMap::new();

    for result in reader.records() {
        let record = result?;
        let occupation = record[0].to_string();
        let idx = level_index(&record[1])?;
        let base: f64 = record[2].parse()?;
        let bonus_pct: f64 = record[3].parse()?;
        let equity_pct: f64 = record[4].parse()?;

        let curve = curves.entry(occupation).or_insert_with(|| WageCurve {
            base_by_level: [0.0; 6],
            bonus_pct_by_level: [0.0; 6],
            equity_pct_by_level: [0.0; 6],
        });
        curve.base_by_level[idx] = base;
        curve.bonus_pct_by_level[idx] = bonus_pct;
        curve.equity_pct_by_level[idx] = equity_pct;
    }

    Ok(curves)
}

/// Load metro factors from CSV
/// Format: metro,col_index,effective_tax_rate
pub fn load_metro_factors(path: &Path) -> Result<HashMap<String, MetroFactors>, Box<dyn Error>> {
    let file = File::open(path.join("metro_factors.csv"))?;
    let mut reader = csv::Reader::from_reader(file);

    let mut factors = HashMap::new();

    for result in reader.records() {
        let record = result?;
        let metro = record[0].to_string();
        let col_index: f64 = record[1].parse()?;
        let effective_tax_rate: f64 = record[2].parse()?;

        factors.insert(metro, MetroFactors { col_index, effective_tax_rate });
    }

    Ok(factors)
}

/// Load wealth percentile brackets from CSV
/// Format: min_age,max_age,p10,p25,p50,p75,p90
pub fn load_wealth_brackets(path: &Path) -> Result<Vec<AgeBracket>, Box<dyn Error>> {
    let file = File::open(path.join("wealth_percentiles.csv"))?;
    let mut reader = csv::Reader::from_reader(file);

    let mut brackets = Vec::new();

    for result in reader.records() {
        let record = result?;
        let min_age: u8 = record[0].parse()?;
        let max_age: u8 = record[1].parse()?;
        let mut thresholds = [0.0; 5];
        for (i, threshold) in thresholds.iter_mut().enumerate() {
            *threshold = record[2 + i].parse()?;
        }

        brackets.push(AgeBracket { min_age, max_age, thresholds });
    }

    brackets.sort_by_key(|b| b.min_age);

    Ok(brackets)
}

/// All reference data loaded from CSV files
#[derive(Debug, Clone)]
pub struct LoadedReference {
    pub wage_curves: HashMap<String, WageCurve>,
    pub metro_factors: HashMap<String, MetroFactors>,
    pub wealth_brackets: Vec<AgeBracket>,
}

impl LoadedReference {
    /// Load all reference tables from a directory
    pub fn load_from(path: &Path) -> Result<Self, Box<dyn Error>> {
        Ok(Self {
            wage_curves: load_wage_curves(path)?,
            metro_factors: load_metro_factors(path)?,
            wealth_brackets: load_wealth_brackets(path)?,
        })
    }
}
