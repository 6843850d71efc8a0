//! Life expectancy by gender and the payout horizon it implies

use serde::{Deserialize, Serialize};

use crate::error::ProjectionError;
use crate::profile::Gender;

/// Period life expectancy used to annuitize balances
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LifeTable {
    pub male: f64,
    pub female: f64,
}

/// Whole years and leftover whole months between retirement and life expectancy
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PayoutHorizon {
    pub years: u32,
    pub months: u32,
}

impl Default for LifeTable {
    fn default() -> Self {
        Self {
            male: 86.6,
            female: 90.8,
        }
    }
}

impl LifeTable {
    pub fn life_expectancy(&self, gender: Gender) -> f64 {
        match gender {
            Gender::Male => self.male,
            Gender::Female => self.female,
        }
    }

    pub fn validate(&self) -> Result<(), ProjectionError> {
        for (field, value) in [("life_expectancy.male", self.male), ("life_expectancy.female", self.female)] {
            if !value.is_finite() || value <= 0.0 {
                return Err(ProjectionError::InvalidAssumption {
                    field,
                    value,
                    reason: "must be finite and positive",
                });
            }
        }
        Ok(())
    }

    /// Number of monthly pension payments, truncated toward zero
    ///
    /// Fails when life expectancy does not leave at least one full month
    /// after retirement.
    pub fn payout_months(&self, gender: Gender, retirement_age: f64) -> Result<u32, ProjectionError> {
        let months = self.remaining_months(gender, retirement_age);

        if months < 1 {
            return Err(ProjectionError::NonPositivePayoutMonths {
                life_expectancy: self.life_expectancy(gender),
                retirement_age,
                months,
            });
        }

        Ok(months as u32)
    }

    /// Signed whole months between retirement and life expectancy, zero for non-finite ages
    pub fn remaining_months(&self, gender: Gender, retirement_age: f64) -> i64 {
        let months = ((self.life_expectancy(gender) - retirement_age) * 12.0).trunc();
        if months.is_finite() {
            months as i64
        } else {
            0
        }
    }

    /// Payout period split into years and months (zero when retirement is past life expectancy)
    pub fn payout_horizon(&self, gender: Gender, retirement_age: f64) -> PayoutHorizon {
        let span = (self.life_expectancy(gender) - retirement_age).max(0.0);
        let years = span.trunc();
        let months = ((span - years) * 12.0).trunc();

        PayoutHorizon {
            years: years as u32,
            months: months as u32,
        }
    }
}
