//! Error types for pension projections
//!
//! Caller mistakes (bad gender code, non-finite amounts) are kept apart from
//! invariant violations so the layer above can map them to different responses.

use thiserror::Error;

/// Errors raised by the projection engine
#[derive(Debug, Error, PartialEq)]
pub enum ProjectionError {
    #[error("Unrecognized gender code '{code}', expected 'M' or 'F'")]
    InvalidGender {
        code: String,
    },

    #[error("Invalid input: {field} = {value} ({reason})")]
    InvalidInput {
        field: &'static str,
        value: f64,
        reason: &'static str,
    },

    #[error("Life expectancy {life_expectancy} at retirement age {retirement_age} leaves {months} pension months")]
    NonPositivePayoutMonths {
        life_expectancy: f64,
        retirement_age: f64,
        months: i64,
    },

    #[error("Invalid assumption: {field} = {value} ({reason})")]
    InvalidAssumption {
        field: &'static str,
        value: f64,
        reason: &'static str,
    },
}

impl ProjectionError {
    /// True when the error was caused by the caller's input rather than by
    /// the assumptions the engine was configured with
    pub fn is_input_error(&self) -> bool {
        matches!(
            self,
            ProjectionError::InvalidGender { .. } | ProjectionError::InvalidInput { .. }
        )
    }
}

/// Errors raised while building contribution-rate schedules
#[derive(Debug, Error, PartialEq)]
pub enum ScheduleError {
    #[error("Schedule '{name}' has no bands")]
    Empty {
        name: String,
    },

    #[error("Schedule '{name}' must start at month 0, first band starts at month {first}")]
    MissingStart {
        name: String,
        first: u32,
    },

    #[error("Schedule '{name}' band at month {month} does not follow the previous band")]
    Unordered {
        name: String,
        month: u32,
    },

    #[error("Schedule '{name}' has invalid rate {rate} at month {month}")]
    InvalidRate {
        name: String,
        month: u32,
        rate: f64,
    },

    #[error("Schedule '{name}' final band at month {month} must be flat")]
    OpenEndedRamp {
        name: String,
        month: u32,
    },

    #[error("Schedule '{name}' is missing")]
    Missing {
        name: String,
    },
}
