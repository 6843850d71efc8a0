//! Fixed plan rules of the pension system

use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};

/// Plan-level constants that are not economic assumptions
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlanFeatures {
    /// Month 0 of every contribution schedule
    pub reform_start: NaiveDate,

    /// Disability and survivor insurance premium as a fraction of salary
    pub sis_rate: f64,

    /// Age at which contributions are assumed to have started
    pub contribution_start_age: f64,

    /// Salary steps up once every this many months
    pub salary_step_months: u32,

    /// Number of monthly installments the reserve fund balance is paid over
    pub reserve_installments: u32,

    /// Lower bound of the women's compensation pension
    pub min_additional_pension: f64,
}

impl Default for PlanFeatures {
    fn default() -> Self {
        Self {
            reform_start: NaiveDate::from_ymd_opt(2025, 2, 1).unwrap_or(NaiveDate::MIN),
            sis_rate: 0.015,
            contribution_start_age: 25.0,
            salary_step_months: 6,
            reserve_installments: 240,
            min_additional_pension: 10_000.0,
        }
    }
}

impl PlanFeatures {
    /// Whole calendar months from reform start to `today`, 0 before the start
    pub fn months_since_reform(&self, today: NaiveDate) -> u32 {
        if today < self.reform_start {
            return 0;
        }

        let years = today.year() - self.reform_start.year();
        let months = today.month() as i32 - self.reform_start.month() as i32;
        (years * 12 + months).max(0) as u32
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_months_since_reform() {
        let plan = PlanFeatures::default();

        assert_eq!(plan.months_since_reform(date(2024, 12, 31)), 0);
        assert_eq!(plan.months_since_reform(date(2025, 2, 1)), 0);
        assert_eq!(plan.months_since_reform(date(2025, 2, 28)), 0);
        assert_eq!(plan.months_since_reform(date(2025, 3, 1)), 1);
        assert_eq!(plan.months_since_reform(date(2026, 1, 15)), 11);
        assert_eq!(plan.months_since_reform(date(2027, 8, 1)), 30);
    }
}
