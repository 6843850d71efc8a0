//! Pension Projection - month-by-month pension engine for the pre-reform and
//! post-reform regimes
//!
//! This library provides:
//! - Individual account accrual under both regimes
//! - Piecewise contribution-rate schedules driven by months since reform start
//! - Gender-specific annuitization, women's compensation and the phased PGU floor
//! - Target pension projection and gap to target
//! - Parallel batch and scenario runs
//! - Boundary traits for persistence, advice, reporting and delivery

pub mod assumptions;
pub mod error;
pub mod profile;
pub mod projection;
pub mod scenario;
pub mod services;
pub mod summary;

// Re-export commonly used types
pub use assumptions::{Assumptions, ContributionSchedules, EconomicAssumptions, RateSchedule};
pub use error::{ProjectionError, ScheduleError};
pub use profile::{Gender, Profile};
pub use projection::{PostReformResult, PreReformResult, ProjectionConfig, ProjectionEngine};
pub use scenario::ScenarioRunner;
pub use summary::{PensionRecord, ProjectionBundle};
