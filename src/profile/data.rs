//! Personal profile data structures

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::ProjectionError;

/// Gender of the affiliate
///
/// Selects the life expectancy used for annuitization and, under the
/// post-reform regime, whether the compensation pension applies.
/// Serialized as its one-letter code.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum Gender {
    Male,
    Female,
}

impl Gender {
    /// Parse a gender code ("M" or "F", case-insensitive)
    pub fn from_code(code: &str) -> Result<Self, ProjectionError> {
        match code.trim().to_ascii_uppercase().as_str() {
            "M" => Ok(Gender::Male),
            "F" => Ok(Gender::Female),
            _ => Err(ProjectionError::InvalidGender {
                code: code.to_string(),
            }),
        }
    }

    /// One-letter code
    pub fn code(&self) -> &'static str {
        match self {
            Gender::Male => "M",
            Gender::Female => "F",
        }
    }
}

impl FromStr for Gender {
    type Err = ProjectionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Gender::from_code(s)
    }
}

impl TryFrom<String> for Gender {
    type Error = ProjectionError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Gender::from_code(&value)
    }
}

impl From<Gender> for String {
    fn from(gender: Gender) -> Self {
        gender.code().to_string()
    }
}

impl fmt::Display for Gender {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

/// Personal inputs for a single projection
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Profile {
    /// Current age in decimal years (years + months / 12)
    pub current_age: f64,

    /// Retirement age in decimal years
    pub retirement_age: f64,

    /// Current individual account balance
    pub current_balance: f64,

    /// Monthly gross salary
    pub monthly_salary: f64,

    pub gender: Gender,

    /// Desired monthly pension expressed in today's money (0 = none stated)
    #[serde(default)]
    pub ideal_pension: f64,
}

impl Profile {
    pub fn new(
        current_age: f64,
        retirement_age: f64,
        current_balance: f64,
        monthly_salary: f64,
        gender: Gender,
    ) -> Self {
        Self {
            current_age,
            retirement_age,
            current_balance,
            monthly_salary,
            gender,
            ideal_pension: 0.0,
        }
    }

    /// Build a profile from an age given as whole years plus months
    pub fn from_years_months(
        age_years: u32,
        age_months: u32,
        retirement_age: f64,
        current_balance: f64,
        monthly_salary: f64,
        gender: Gender,
    ) -> Self {
        Self::new(
            decimal_age(age_years, age_months),
            retirement_age,
            current_balance,
            monthly_salary,
            gender,
        )
    }

    /// Set the desired monthly pension (today's money)
    pub fn with_ideal_pension(mut self, ideal_pension: f64) -> Self {
        self.ideal_pension = ideal_pension;
        self
    }

    /// Whole months left until retirement (0 when already at or past it)
    pub fn months_to_retirement(&self) -> u32 {
        let months = ((self.retirement_age - self.current_age) * 12.0).trunc();
        if months <= 0.0 {
            0
        } else {
            months as u32
        }
    }

    /// Years until retirement, never negative
    pub fn years_to_retirement(&self) -> f64 {
        (self.retirement_age - self.current_age).max(0.0)
    }

    /// Check that every numeric field can be projected
    pub fn validate(&self) -> Result<(), ProjectionError> {
        let checks: [(&'static str, f64); 5] = [
            ("current_age", self.current_age),
            ("retirement_age", self.retirement_age),
            ("current_balance", self.current_balance),
            ("monthly_salary", self.monthly_salary),
            ("ideal_pension", self.ideal_pension),
        ];

        for (field, value) in checks {
            if !value.is_finite() {
                return Err(ProjectionError::InvalidInput {
                    field,
                    value,
                    reason: "must be finite",
                });
            }
            if value < 0.0 {
                return Err(ProjectionError::InvalidInput {
                    field,
                    value,
                    reason: "must not be negative",
                });
            }
        }

        Ok(())
    }
}

/// Convert whole years and months into a decimal age
pub fn decimal_age(years: u32, months: u32) -> f64 {
    years as f64 + months as f64 / 12.0
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_gender_codes() {
        assert_eq!(Gender::from_code("M").unwrap(), Gender::Male);
        assert_eq!(Gender::from_code(" f ").unwrap(), Gender::Female);
        assert_eq!("m".parse::<Gender>().unwrap(), Gender::Male);

        let err = Gender::from_code("X").unwrap_err();
        assert!(err.is_input_error());
    }

    #[test]
    fn test_gender_serializes_as_code() {
        let json = serde_json::to_string(&Gender::Female).unwrap();
        assert_eq!(json, "\"F\"");

        let parsed: Gender = serde_json::from_str("\"m\"").unwrap();
        assert_eq!(parsed, Gender::Male);
        assert!(serde_json::from_str::<Gender>("\"Z\"").is_err());
    }

    #[test]
    fn test_months_to_retirement() {
        let profile = Profile::from_years_months(41, 6, 65.0, 0.0, 0.0, Gender::Female);
        assert_eq!(profile.months_to_retirement(), 282);

        let retired = Profile::new(70.0, 65.0, 0.0, 0.0, Gender::Male);
        assert_eq!(retired.months_to_retirement(), 0);
        assert_eq!(retired.years_to_retirement(), 0.0);
    }

    #[test]
    fn test_validate_rejects_bad_numbers() {
        let mut profile = Profile::new(40.0, 65.0, 1_000_000.0, 800_000.0, Gender::Male);
        assert!(profile.validate().is_ok());

        profile.monthly_salary = -1.0;
        assert!(matches!(
            profile.validate(),
            Err(ProjectionError::InvalidInput { field: "monthly_salary", .. })
        ));

        profile.monthly_salary = f64::NAN;
        assert!(profile.validate().unwrap_err().is_input_error());
    }
}
