//! Load profiles from a batch CSV file

use super::{Gender, Profile};
use csv::Reader;
use std::error::Error;
use std::path::Path;

/// Sample batch shipped with the repository
pub const DEFAULT_PROFILES_PATH: &str = "data/profiles_sample.csv";

/// Raw CSV row matching the batch file columns
#[derive(Debug, serde::Deserialize)]
struct CsvRow {
    #[serde(rename = "ProfileID")]
    profile_id: String,
    #[serde(rename = "AgeYears")]
    age_years: u32,
    #[serde(rename = "AgeMonths")]
    age_months: u32,
    #[serde(rename = "RetirementAge")]
    retirement_age: f64,
    #[serde(rename = "Balance")]
    balance: f64,
    #[serde(rename = "MonthlySalary")]
    monthly_salary: f64,
    #[serde(rename = "Gender")]
    gender: String,
    #[serde(rename = "IdealPension", default)]
    ideal_pension: Option<f64>,
}

/// A profile together with the identifier it carried in the batch file
#[derive(Debug, Clone, PartialEq)]
pub struct LoadedProfile {
    pub profile_id: String,
    pub profile: Profile,
}

impl CsvRow {
    fn into_profile(self) -> Result<LoadedProfile, Box<dyn Error>> {
        if self.age_months >= 12 {
            return Err(format!(
                "Profile {}: AgeMonths must be below 12, got {}",
                self.profile_id, self.age_months
            )
            .into());
        }

        let gender = Gender::from_code(&self.gender)
            .map_err(|e| format!("Profile {}: {}", self.profile_id, e))?;

        let profile = Profile::from_years_months(
            self.age_years,
            self.age_months,
            self.retirement_age,
            self.balance,
            self.monthly_salary,
            gender,
        )
        .with_ideal_pension(self.ideal_pension.unwrap_or(0.0));

        profile
            .validate()
            .map_err(|e| format!("Profile {}: {}", self.profile_id, e))?;

        Ok(LoadedProfile {
            profile_id: self.profile_id,
            profile,
        })
    }
}

/// Load all profiles from a CSV file
pub fn load_profiles<P: AsRef<Path>>(path: P) -> Result<Vec<LoadedProfile>, Box<dyn Error>> {
    let reader = Reader::from_path(path)?;
    read_profiles(reader)
}

/// Load profiles from any reader (e.g., string buffer, network stream)
pub fn load_profiles_from_reader<R: std::io::Read>(reader: R) -> Result<Vec<LoadedProfile>, Box<dyn Error>> {
    read_profiles(Reader::from_reader(reader))
}

fn read_profiles<R: std::io::Read>(mut reader: Reader<R>) -> Result<Vec<LoadedProfile>, Box<dyn Error>> {
    let mut profiles = Vec::new();

    for result in reader.deserialize() {
        let row: CsvRow = result?;
        profiles.push(row.into_profile()?);
    }

    Ok(profiles)
}

#[cfg(test)]
mod tests {
    use super::*;

    const HEADER: &str = "ProfileID,AgeYears,AgeMonths,RetirementAge,Balance,MonthlySalary,Gender,IdealPension\n";

    #[test]
    fn test_load_from_reader() {
        let data = format!(
            "{HEADER}a1,41,6,65,28998190,2564066,F,1500000\nb2,30,0,65,5000000,1200000,m,\n"
        );
        let profiles = load_profiles_from_reader(data.as_bytes()).unwrap();

        assert_eq!(profiles.len(), 2);
        assert_eq!(profiles[0].profile_id, "a1");
        assert!((profiles[0].profile.current_age - 41.5).abs() < 1e-12);
        assert_eq!(profiles[0].profile.gender, Gender::Female);
        assert_eq!(profiles[0].profile.ideal_pension, 1_500_000.0);
        assert_eq!(profiles[1].profile.gender, Gender::Male);
        assert_eq!(profiles[1].profile.ideal_pension, 0.0);
    }

    #[test]
    fn test_unknown_gender_fails_load() {
        let data = format!("{HEADER}x,41,6,65,1000,1000,Q,0\n");
        let err = load_profiles_from_reader(data.as_bytes()).unwrap_err();
        assert!(err.to_string().contains("Profile x"));
    }

    #[test]
    fn test_load_default_sample() {
        let profiles = load_profiles(DEFAULT_PROFILES_PATH).expect("Failed to load sample profiles");
        assert!(!profiles.is_empty());
        assert!(profiles.iter().any(|p| p.profile.gender == Gender::Male));
        assert!(profiles.iter().any(|p| p.profile.gender == Gender::Female));
    }
}
