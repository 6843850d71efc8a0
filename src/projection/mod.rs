//! Month-by-month accrual for the pre-reform and post-reform regimes

mod cashflows;
mod clock;
mod engine;
mod history;
mod state;
mod valuation;
pub mod post_reform;
pub mod pre_reform;

pub use cashflows::{AccrualRow, PostReformResult, PreReformResult};
pub use clock::{FixedClock, ReformClock, SystemClock};
pub use engine::{ProjectionConfig, ProjectionEngine};
pub use history::{estimate_history, HistoricalSplit};
pub use state::AccrualState;
pub use valuation::{future_value, TargetPension};
