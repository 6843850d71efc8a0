//! Scenario runner for efficient batch projections
//!
//! Pre-loads assumptions once, then allows running many projections with
//! different profiles or economic assumptions without re-reading CSV files.
//! Every run in a batch starts from the same reform month index.

use std::sync::Arc;

use rayon::prelude::*;

use crate::assumptions::{Assumptions, EconomicAssumptions};
use crate::error::ProjectionError;
use crate::profile::Profile;
use crate::projection::{ProjectionConfig, ProjectionEngine, ReformClock, SystemClock};
use crate::summary::ProjectionBundle;

/// Pre-loaded scenario runner for batch projections
///
/// # Example
/// ```ignore
/// let runner = ScenarioRunner::from_csv()?;
///
/// // Same profile under several account return assumptions
/// let economics: Vec<_> = [0.02, 0.0311, 0.05]
///     .iter()
///     .map(|&rate| EconomicAssumptions { annual_interest_rate: rate, ..Default::default() })
///     .collect();
/// let results = runner.run_scenarios(&profile, &economics, ProjectionConfig::default());
/// ```
#[derive(Debug, Clone)]
pub struct ScenarioRunner {
    /// Pre-loaded base assumptions
    base_assumptions: Assumptions,
    clock: Arc<dyn ReformClock>,
}

impl ScenarioRunner {
    /// Create runner with default in-memory assumptions
    pub fn new() -> Self {
        Self::with_assumptions(Assumptions::default_reform())
    }

    /// Create runner by loading assumptions from CSV files
    pub fn from_csv() -> Result<Self, Box<dyn std::error::Error>> {
        Ok(Self::with_assumptions(Assumptions::from_csv()?))
    }

    /// Create runner from specific assumptions directory
    pub fn from_csv_path(path: &std::path::Path) -> Result<Self, Box<dyn std::error::Error>> {
        Ok(Self::with_assumptions(Assumptions::from_csv_path(path)?))
    }

    /// Create runner with pre-built assumptions
    pub fn with_assumptions(assumptions: Assumptions) -> Self {
        Self {
            base_assumptions: assumptions,
            clock: Arc::new(SystemClock),
        }
    }

    /// Replace the clock used to locate the batch on the reform timeline
    pub fn with_clock(mut self, clock: Arc<dyn ReformClock>) -> Self {
        self.clock = clock;
        self
    }

    fn engine(&self, assumptions: Assumptions, config: ProjectionConfig) -> ProjectionEngine {
        ProjectionEngine::new(assumptions, config).with_clock(Arc::clone(&self.clock))
    }

    /// Run a single projection with the given config
    pub fn run(&self, profile: &Profile, config: ProjectionConfig) -> Result<ProjectionBundle, ProjectionError> {
        self.engine(self.base_assumptions.clone(), config).project(profile)
    }

    /// Run projections for many profiles in parallel
    /// Results come back in input order; one bad profile does not stop the batch
    pub fn run_batch(
        &self,
        profiles: &[Profile],
        config: ProjectionConfig,
    ) -> Vec<Result<ProjectionBundle, ProjectionError>> {
        let engine = self.engine(self.base_assumptions.clone(), config);
        let month_index = engine.reform_month_index();

        profiles
            .par_iter()
            .map(|profile| engine.project_at(profile, month_index))
            .collect()
    }

    /// Run one profile under several sets of economic assumptions
    pub fn run_scenarios(
        &self,
        profile: &Profile,
        economics: &[EconomicAssumptions],
        config: ProjectionConfig,
    ) -> Vec<Result<ProjectionBundle, ProjectionError>> {
        let month_index = self.base_assumptions.plan.months_since_reform(self.clock.today());

        economics
            .par_iter()
            .map(|econ| {
                let assumptions = self.base_assumptions.clone().with_economic(*econ);
                self.engine(assumptions, config.clone()).project_at(profile, month_index)
            })
            .collect()
    }

    /// Get reference to base assumptions for inspection/modification
    pub fn assumptions(&self) -> &Assumptions {
        &self.base_assumptions
    }

    /// Get mutable reference to base assumptions for customization
    pub fn assumptions_mut(&mut self) -> &mut Assumptions {
        &mut self.base_assumptions
    }
}

impl Default for ScenarioRunner {
    fn default() -> Self {
        Self::new()
    }
}
