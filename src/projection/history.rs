//! Rough split of the current balance into contributions and returns
//!
//! Assumes contributions started at a fixed age and the balance grew at the
//! account rate since then. Reporting aid only; it never feeds a balance.

use serde::{Deserialize, Serialize};

use crate::assumptions::{EconomicAssumptions, PlanFeatures};

/// Estimated composition of the balance held today
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct HistoricalSplit {
    pub years_contributed: f64,
    /// Part of the balance attributed to worker contributions
    pub principal: f64,
    /// Part of the balance attributed to investment returns
    pub returns: f64,
    /// SIS premiums implied by the salary that produced `principal`
    pub sis: f64,
}

pub fn estimate_history(
    current_age: f64,
    current_balance: f64,
    economic: &EconomicAssumptions,
    plan: &PlanFeatures,
) -> HistoricalSplit {
    let years_contributed = if current_age > plan.contribution_start_age {
        current_age - plan.contribution_start_age
    } else {
        0.0
    };

    let growth = (1.0 + economic.annual_interest_rate).powf(years_contributed);
    let returns = current_balance - current_balance / growth;
    let principal = current_balance - returns;

    let sis = if economic.worker_rate > 0.0 {
        principal / economic.worker_rate * plan.sis_rate
    } else {
        0.0
    };

    HistoricalSplit {
        years_contributed,
        principal,
        returns,
        sis,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_young_worker_has_no_history() {
        let split = estimate_history(
            22.0,
            500_000.0,
            &EconomicAssumptions::default(),
            &PlanFeatures::default(),
        );

        assert_eq!(split.years_contributed, 0.0);
        assert_eq!(split.returns, 0.0);
        assert_eq!(split.principal, 500_000.0);
    }

    #[test]
    fn test_split_adds_up() {
        let split = estimate_history(
            70.0,
            1_000_000.0,
            &EconomicAssumptions::default(),
            &PlanFeatures::default(),
        );

        assert_eq!(split.years_contributed, 45.0);
        assert_relative_eq!(split.principal, 252_037.1682278096, max_relative = 1e-9);
        assert_relative_eq!(split.returns, 747_962.8317721904, max_relative = 1e-9);
        assert_relative_eq!(split.sis, 37_805.57523417143, max_relative = 1e-9);
        assert_relative_eq!(split.principal + split.returns, 1_000_000.0);
    }

    #[test]
    fn test_zero_worker_rate() {
        let econ = EconomicAssumptions {
            worker_rate: 0.0,
            ..EconomicAssumptions::default()
        };
        let split = estimate_history(40.0, 1_000_000.0, &econ, &PlanFeatures::default());
        assert_eq!(split.sis, 0.0);
    }
}
