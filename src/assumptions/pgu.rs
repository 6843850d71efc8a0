//! Guaranteed minimum pension (PGU) and its phased increase

use serde::{Deserialize, Serialize};

use crate::error::ProjectionError;

/// One step of the PGU phase-in
///
/// Active once `from_elapsed_month` months have passed since reform start,
/// for pensioners retiring at `min_age` or older.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PguPhase {
    pub from_elapsed_month: u32,
    pub min_age: f64,
    pub amount: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PguSchedule {
    pub phases: Vec<PguPhase>,
}

impl PguSchedule {
    pub fn new(phases: Vec<PguPhase>) -> Self {
        Self { phases }
    }

    /// Phase-in as enacted: 82+ after 6 months, 75+ after 18, everyone after 30
    pub fn reform_default() -> Self {
        Self::new(vec![
            PguPhase { from_elapsed_month: 6, min_age: 82.0, amount: 250_000.0 },
            PguPhase { from_elapsed_month: 18, min_age: 75.0, amount: 250_000.0 },
            PguPhase { from_elapsed_month: 30, min_age: 0.0, amount: 250_000.0 },
        ])
    }

    /// Every phase needs a finite age and a finite, non-negative amount
    pub fn validate(&self) -> Result<(), ProjectionError> {
        for phase in &self.phases {
            if !phase.min_age.is_finite() {
                return Err(ProjectionError::InvalidAssumption {
                    field: "pgu.min_age",
                    value: phase.min_age,
                    reason: "must be finite",
                });
            }
            if !phase.amount.is_finite() || phase.amount < 0.0 {
                return Err(ProjectionError::InvalidAssumption {
                    field: "pgu.amount",
                    value: phase.amount,
                    reason: "must be finite and not negative",
                });
            }
        }
        Ok(())
    }

    /// Floor in force for the given age and months elapsed since reform start
    pub fn floor(&self, base_minimum: f64, age: f64, elapsed_months: u32) -> f64 {
        self.phases
            .iter()
            .filter(|p| p.from_elapsed_month <= elapsed_months && p.min_age <= age)
            .map(|p| p.amount)
            .fold(base_minimum, f64::max)
    }
}

impl Default for PguSchedule {
    fn default() -> Self {
        Self::reform_default()
    }
}

/// Raise a pension to the floor; the flag reports whether the floor was binding
pub fn apply_floor(pension: f64, floor: f64) -> (f64, bool) {
    if pension < floor {
        (floor, true)
    } else {
        (pension, false)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const BASE: f64 = 214_000.0;

    #[test]
    fn test_floor_phases() {
        let pgu = PguSchedule::reform_default();

        assert_eq!(pgu.floor(BASE, 65.0, 0), BASE);
        assert_eq!(pgu.floor(BASE, 82.0, 5), BASE);
        assert_eq!(pgu.floor(BASE, 82.0, 6), 250_000.0);
        assert_eq!(pgu.floor(BASE, 81.9, 6), BASE);
        assert_eq!(pgu.floor(BASE, 75.0, 18), 250_000.0);
        assert_eq!(pgu.floor(BASE, 74.0, 29), BASE);
        assert_eq!(pgu.floor(BASE, 60.0, 30), 250_000.0);
    }

    #[test]
    fn test_floor_never_below_base() {
        let pgu = PguSchedule::new(vec![PguPhase { from_elapsed_month: 0, min_age: 0.0, amount: 100.0 }]);
        assert_eq!(pgu.floor(BASE, 65.0, 100), BASE);
    }

    #[test]
    fn test_apply_floor() {
        assert_eq!(apply_floor(100.0, BASE), (BASE, true));
        assert_eq!(apply_floor(300_000.0, BASE), (300_000.0, false));
        assert_eq!(apply_floor(BASE, BASE), (BASE, false));
    }

    #[test]
    fn test_validate_phases() {
        assert!(PguSchedule::reform_default().validate().is_ok());

        let nan_amount = PguSchedule::new(vec![PguPhase { from_elapsed_month: 0, min_age: 0.0, amount: f64::NAN }]);
        assert!(matches!(
            nan_amount.validate(),
            Err(ProjectionError::InvalidAssumption { field: "pgu.amount", .. })
        ));

        let infinite_age = PguSchedule::new(vec![PguPhase { from_elapsed_month: 0, min_age: f64::INFINITY, amount: 1.0 }]);
        assert!(matches!(
            infinite_age.validate(),
            Err(ProjectionError::InvalidAssumption { field: "pgu.min_age", .. })
        ));
    }
}
