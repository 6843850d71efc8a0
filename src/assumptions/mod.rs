//! Pension assumptions: economic rates, contribution schedules, life
//! expectancy, minimum pension phases and plan rules

mod economic;
mod life;
mod pgu;
mod plan;
pub mod schedule;
pub mod loader;

pub use economic::{EconomicAssumptions, monthly_equivalent};
pub use life::{LifeTable, PayoutHorizon};
pub use pgu::{PguPhase, PguSchedule, apply_floor};
pub use plan::PlanFeatures;
pub use schedule::{ContributionSchedules, RateBand, RateSchedule};
pub use loader::LoadedAssumptions;

use std::path::Path;

use crate::error::ProjectionError;

/// Container for all projection assumptions
#[derive(Debug, Clone, PartialEq)]
pub struct Assumptions {
    pub economic: EconomicAssumptions,
    pub schedules: ContributionSchedules,
    pub life: LifeTable,
    pub pgu: PguSchedule,
    pub plan: PlanFeatures,
}

impl Assumptions {
    /// Create assumptions with the values of the enacted reform
    pub fn default_reform() -> Self {
        Self {
            economic: EconomicAssumptions::default(),
            schedules: ContributionSchedules::reform_default(),
            life: LifeTable::default(),
            pgu: PguSchedule::reform_default(),
            plan: PlanFeatures::default(),
        }
    }

    /// Load assumptions from CSV files in the default location (data/assumptions/)
    pub fn from_csv() -> Result<Self, Box<dyn std::error::Error>> {
        Self::from_csv_path(Path::new(loader::DEFAULT_ASSUMPTIONS_PATH))
    }

    /// Load assumptions from CSV files in a specific directory
    pub fn from_csv_path(path: &Path) -> Result<Self, Box<dyn std::error::Error>> {
        let loaded = LoadedAssumptions::load_from(path)?;

        let assumptions = Self {
            economic: loaded.economic,
            schedules: ContributionSchedules::from_bands(loaded.schedule_bands)?,
            life: loaded.life,
            pgu: PguSchedule::new(loaded.pgu_phases),
            plan: PlanFeatures::default(),
        };
        assumptions.validate()?;

        Ok(assumptions)
    }

    /// Reject values that would turn balances into NaN or infinity
    pub fn validate(&self) -> Result<(), ProjectionError> {
        self.economic.validate()?;
        self.life.validate()?;
        self.pgu.validate()
    }

    /// Replace the economic assumptions, keeping everything else
    pub fn with_economic(mut self, economic: EconomicAssumptions) -> Self {
        self.economic = economic;
        self
    }
}

impl Default for Assumptions {
    fn default() -> Self {
        Self::default_reform()
    }
}
