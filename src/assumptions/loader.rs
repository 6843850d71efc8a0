//! CSV-based assumption loader
//!
//! Loads pension assumptions from CSV files in data/assumptions/

use std::collections::HashMap;
use std::error::Error;
use std::fs::File;
use std::path::Path;

use super::economic::EconomicAssumptions;
use super::life::LifeTable;
use super::pgu::PguPhase;
use super::schedule::RateBand;

/// Default path to assumptions directory
pub const DEFAULT_ASSUMPTIONS_PATH: &str = "data/assumptions";

/// Load economic assumptions from CSV (parameter,value)
/// Parameters not present in the file keep their default value
pub fn load_economic(path: &Path) -> Result<EconomicAssumptions, Box<dyn Error>> {
    let file = File::open(path.join("economic.csv"))?;
    let mut reader = csv::Reader::from_reader(file);

    let mut econ = EconomicAssumptions::default();

    for result in reader.records() {
        let record = result?;
        let name = record[0].trim();
        let value: f64 = record[1].trim().parse()?;

        let slot = match name {
            "annual_interest_rate" => &mut econ.annual_interest_rate,
            "salary_growth_rate" => &mut econ.salary_growth_rate,
            "reserve_fund_rate" => &mut econ.reserve_fund_rate,
            "inflation_rate" => &mut econ.inflation_rate,
            "worker_rate" => &mut econ.worker_rate,
            "minimum_pension" => &mut econ.minimum_pension,
            other => return Err(format!("Unknown economic parameter '{}'", other).into()),
        };
        *slot = value;
    }

    Ok(econ)
}

/// Load contribution schedules from CSV (schedule,from_month,start_rate,end_rate)
/// Returns band tables keyed by schedule name, in file order
pub fn load_schedule_bands(path: &Path) -> Result<HashMap<String, Vec<RateBand>>, Box<dyn Error>> {
    let file = File::open(path.join("contribution_schedules.csv"))?;
    let mut reader = csv::Reader::from_reader(file);

    let mut tables: HashMap<String, Vec<RateBand>> = HashMap::new();

    for result in reader.records() {
        let record = result?;
        let name = record[0].trim().to_string();
        let from_month: u32 = record[1].trim().parse()?;
        let start_rate: f64 = record[2].trim().parse()?;
        let end_rate: f64 = record[3].trim().parse()?;

        tables
            .entry(name)
            .or_default()
            .push(RateBand::ramp(from_month, start_rate, end_rate));
    }

    Ok(tables)
}

/// Load life expectancy by gender from CSV (gender,life_expectancy)
pub fn load_life_table(path: &Path) -> Result<LifeTable, Box<dyn Error>> {
    let file = File::open(path.join("life_expectancy.csv"))?;
    let mut reader = csv::Reader::from_reader(file);

    let mut male = None;
    let mut female = None;

    for result in reader.records() {
        let record = result?;
        let value: f64 = record[1].trim().parse()?;

        match record[0].trim().to_ascii_uppercase().as_str() {
            "M" => male = Some(value),
            "F" => female = Some(value),
            other => return Err(format!("Unknown gender '{}' in life expectancy table", other).into()),
        }
    }

    Ok(LifeTable {
        male: male.ok_or("Life expectancy table has no row for M")?,
        female: female.ok_or("Life expectancy table has no row for F")?,
    })
}

/// Load PGU phases from CSV (from_elapsed_month,min_age,amount)
pub fn load_pgu_phases(path: &Path) -> Result<Vec<PguPhase>, Box<dyn Error>> {
    let file = File::open(path.join("pgu_phases.csv"))?;
    let mut reader = csv::Reader::from_reader(file);

    let mut phases = Vec::new();

    for result in reader.records() {
        let record = result?;
        phases.push(PguPhase {
            from_elapsed_month: record[0].trim().parse()?,
            min_age: record[1].trim().parse()?,
            amount: record[2].trim().parse()?,
        });
    }

    Ok(phases)
}

/// Load all assumptions from the given directory
pub struct LoadedAssumptions {
    pub economic: EconomicAssumptions,
    pub schedule_bands: HashMap<String, Vec<RateBand>>,
    pub life: LifeTable,
    pub pgu_phases: Vec<PguPhase>,
}

impl LoadedAssumptions {
    /// Load all assumptions from the default path
    pub fn load_default() -> Result<Self, Box<dyn Error>> {
        Self::load_from(Path::new(DEFAULT_ASSUMPTIONS_PATH))
    }

    /// Load all assumptions from a specific path
    pub fn load_from(path: &Path) -> Result<Self, Box<dyn Error>> {
        Ok(Self {
            economic: load_economic(path)?,
            schedule_bands: load_schedule_bands(path)?,
            life: load_life_table(path)?,
            pgu_phases: load_pgu_phases(path)?,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    #[test]
    fn test_load_default_assumptions() {
        let result = LoadedAssumptions::load_default();
        assert!(result.is_ok(), "Failed to load assumptions: {:?}", result.err());

        let loaded = result.unwrap();

        assert_eq!(loaded.economic, EconomicAssumptions::default());
        assert_eq!(loaded.schedule_bands.len(), 4);
        assert_eq!(loaded.schedule_bands["employer_additional"].len(), 10);
        assert_eq!(loaded.life, LifeTable::default());
        assert_eq!(loaded.pgu_phases.len(), 3);
    }

    #[test]
    fn test_partial_economic_file_keeps_defaults() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(
            dir.path().join("economic.csv"),
            "parameter,value\nannual_interest_rate,0.05\n",
        )
        .unwrap();

        let econ = load_economic(dir.path()).unwrap();
        assert_eq!(econ.annual_interest_rate, 0.05);
        assert_eq!(econ.worker_rate, 0.10);
        assert_eq!(econ.minimum_pension, 214_000.0);
    }

    #[test]
    fn test_unknown_economic_parameter() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("economic.csv"), "parameter,value\nfoo,1\n").unwrap();

        let err = load_economic(dir.path()).unwrap_err();
        assert!(err.to_string().contains("foo"));
    }

    #[test]
    fn test_life_table_requires_both_genders() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("life_expectancy.csv"), "gender,life_expectancy\nM,80\n").unwrap();

        assert!(load_life_table(dir.path()).is_err());
    }

    #[test]
    fn test_missing_directory() {
        assert!(LoadedAssumptions::load_from(Path::new("does/not/exist")).is_err());
    }
}
