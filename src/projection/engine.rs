//! Core projection engine comparing the two pension regimes

use std::sync::Arc;

use log::{debug, warn};

use crate::assumptions::Assumptions;
use crate::error::ProjectionError;
use crate::profile::Profile;
use crate::summary::ProjectionBundle;
use super::cashflows::{PostReformResult, PreReformResult};
use super::clock::{ReformClock, SystemClock};
use super::{post_reform, pre_reform};

/// Configuration for a projection run
#[derive(Debug, Clone, Default)]
pub struct ProjectionConfig {
    /// Whether to keep one accrual row per simulated month
    pub detailed_output: bool,
}

/// Main projection engine
#[derive(Debug, Clone)]
pub struct ProjectionEngine {
    assumptions: Assumptions,
    config: ProjectionConfig,
    clock: Arc<dyn ReformClock>,
}

impl ProjectionEngine {
    /// Create a new projection engine reading today's date from the system clock
    pub fn new(assumptions: Assumptions, config: ProjectionConfig) -> Self {
        Self {
            assumptions,
            config,
            clock: Arc::new(SystemClock),
        }
    }

    /// Replace the clock used to locate today on the reform timeline
    pub fn with_clock(mut self, clock: Arc<dyn ReformClock>) -> Self {
        self.clock = clock;
        self
    }

    pub fn assumptions(&self) -> &Assumptions {
        &self.assumptions
    }

    pub fn config(&self) -> &ProjectionConfig {
        &self.config
    }

    /// Months elapsed since reform start according to the clock
    pub fn reform_month_index(&self) -> u32 {
        self.assumptions.plan.months_since_reform(self.clock.today())
    }

    /// Run the pre-reform regime for a single profile
    pub fn project_pre_reform(&self, profile: &Profile) -> Result<PreReformResult, ProjectionError> {
        self.check_inputs(profile)?;
        pre_reform::simulate(profile, &self.assumptions, self.config.detailed_output)
    }

    /// Run the post-reform regime starting from today's month index
    pub fn project_post_reform(&self, profile: &Profile) -> Result<PostReformResult, ProjectionError> {
        self.project_post_reform_at(profile, self.reform_month_index())
    }

    /// Run the post-reform regime starting from an explicit month index
    pub fn project_post_reform_at(
        &self,
        profile: &Profile,
        reform_month_index: u32,
    ) -> Result<PostReformResult, ProjectionError> {
        self.check_inputs(profile)?;
        post_reform::simulate(
            profile,
            &self.assumptions,
            reform_month_index,
            self.config.detailed_output,
        )
    }

    /// Run both regimes and combine them
    pub fn project(&self, profile: &Profile) -> Result<ProjectionBundle, ProjectionError> {
        self.project_at(profile, self.reform_month_index())
    }

    /// Run both regimes from an explicit month index and combine them
    pub fn project_at(
        &self,
        profile: &Profile,
        reform_month_index: u32,
    ) -> Result<ProjectionBundle, ProjectionError> {
        self.check_inputs(profile)?;

        let pre = pre_reform::simulate(profile, &self.assumptions, self.config.detailed_output)?;
        let post = post_reform::simulate(
            profile,
            &self.assumptions,
            reform_month_index,
            self.config.detailed_output,
        )?;

        debug!(
            "Projected {} months from index {}: pre {:.2}, post {:.2}",
            post.months_simulated,
            reform_month_index,
            pre.total_pension(),
            post.total_pension()
        );

        Ok(ProjectionBundle::assemble(profile.clone(), pre, post, &self.assumptions))
    }

    /// Validate profile and assumptions, warning when there is nothing to accrue
    fn check_inputs(&self, profile: &Profile) -> Result<(), ProjectionError> {
        profile.validate()?;
        self.assumptions.validate()?;
        warn_if_degenerate(profile);
        Ok(())
    }
}

/// Returns true when the profile is already at or past retirement age
fn warn_if_degenerate(profile: &Profile) -> bool {
    let degenerate = profile.months_to_retirement() == 0;
    if degenerate {
        warn!(
            "Current age {:.2} is not below retirement age {:.2}; balances are not projected",
            profile.current_age, profile.retirement_age
        );
    }
    degenerate
}
