//! Economic assumptions shared by both regimes

use serde::{Deserialize, Serialize};

use crate::error::ProjectionError;

/// Rates and amounts that drive the accrual loops
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct EconomicAssumptions {
    /// Annual return of the individual account
    pub annual_interest_rate: f64,

    /// Annual salary growth, applied as a semiannual step-up
    pub salary_growth_rate: f64,

    /// Annual return of the collective reserve fund (FAPP)
    pub reserve_fund_rate: f64,

    /// Annual inflation used to project the target pension
    pub inflation_rate: f64,

    /// Worker contribution as a fraction of salary
    pub worker_rate: f64,

    /// Guaranteed minimum monthly pension (base PGU)
    pub minimum_pension: f64,
}

impl Default for EconomicAssumptions {
    fn default() -> Self {
        Self {
            annual_interest_rate: 0.0311, // Historical fund returns / annuity implied rate
            salary_growth_rate: 0.0125,
            reserve_fund_rate: 0.0391,
            inflation_rate: 0.03,
            worker_rate: 0.10,
            minimum_pension: 214_000.0,
        }
    }
}

impl EconomicAssumptions {
    /// Monthly rate equivalent to the annual account return
    pub fn monthly_interest_rate(&self) -> f64 {
        monthly_equivalent(self.annual_interest_rate)
    }

    /// Monthly rate equivalent to the annual reserve fund return
    pub fn monthly_reserve_fund_rate(&self) -> f64 {
        monthly_equivalent(self.reserve_fund_rate)
    }

    /// Check that every rate compounds to a finite number and amounts are usable
    pub fn validate(&self) -> Result<(), ProjectionError> {
        let rates: [(&'static str, f64); 4] = [
            ("annual_interest_rate", self.annual_interest_rate),
            ("salary_growth_rate", self.salary_growth_rate),
            ("reserve_fund_rate", self.reserve_fund_rate),
            ("inflation_rate", self.inflation_rate),
        ];

        for (field, value) in rates {
            if !value.is_finite() {
                return Err(invalid(field, value, "must be finite"));
            }
            if value <= -1.0 {
                return Err(invalid(field, value, "must be greater than -1"));
            }
        }

        let amounts: [(&'static str, f64); 2] = [
            ("worker_rate", self.worker_rate),
            ("minimum_pension", self.minimum_pension),
        ];

        for (field, value) in amounts {
            if !value.is_finite() {
                return Err(invalid(field, value, "must be finite"));
            }
            if value < 0.0 {
                return Err(invalid(field, value, "must not be negative"));
            }
        }

        Ok(())
    }
}

fn invalid(field: &'static str, value: f64, reason: &'static str) -> ProjectionError {
    ProjectionError::InvalidAssumption { field, value, reason }
}

/// Convert an annual effective rate into the monthly rate that compounds to it
pub fn monthly_equivalent(annual_rate: f64) -> f64 {
    (1.0 + annual_rate).powf(1.0 / 12.0) - 1.0
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_monthly_rate_compounds_to_annual() {
        let econ = EconomicAssumptions::default();
        let monthly = econ.monthly_interest_rate();

        assert_relative_eq!((1.0 + monthly).powi(12) - 1.0, 0.0311, epsilon = 1e-12);
        assert!(monthly < 0.0311 / 12.0);
    }

    #[test]
    fn test_zero_rate() {
        assert_eq!(monthly_equivalent(0.0), 0.0);
    }

    #[test]
    fn test_validate_defaults() {
        assert!(EconomicAssumptions::default().validate().is_ok());
        let deflation = EconomicAssumptions {
            inflation_rate: -0.02,
            ..EconomicAssumptions::default()
        };
        assert!(deflation.validate().is_ok());
    }

    #[test]
    fn test_validate_rejects_rate_at_or_below_minus_one() {
        let econ = EconomicAssumptions {
            annual_interest_rate: -2.0,
            ..EconomicAssumptions::default()
        };
        assert!(monthly_equivalent(econ.annual_interest_rate).is_nan());
        assert_eq!(
            econ.validate(),
            Err(ProjectionError::InvalidAssumption {
                field: "annual_interest_rate",
                value: -2.0,
                reason: "must be greater than -1",
            })
        );

        let econ = EconomicAssumptions {
            reserve_fund_rate: -1.0,
            ..EconomicAssumptions::default()
        };
        assert!(matches!(
            econ.validate(),
            Err(ProjectionError::InvalidAssumption { field: "reserve_fund_rate", .. })
        ));
    }

    #[test]
    fn test_validate_rejects_nan_and_negative_amounts() {
        let econ = EconomicAssumptions {
            salary_growth_rate: f64::NAN,
            ..EconomicAssumptions::default()
        };
        assert!(matches!(
            econ.validate(),
            Err(ProjectionError::InvalidAssumption { field: "salary_growth_rate", .. })
        ));

        let econ = EconomicAssumptions {
            minimum_pension: -1.0,
            ..EconomicAssumptions::default()
        };
        assert!(matches!(
            econ.validate(),
            Err(ProjectionError::InvalidAssumption { field: "minimum_pension", .. })
        ));
    }
}
