//! Inflation compounding for the target pension

use serde::{Deserialize, Serialize};

/// Grow a present amount by `inflation_rate` per year over `years`
pub fn future_value(present_value: f64, years: f64, inflation_rate: f64) -> f64 {
    present_value * (1.0 + inflation_rate).powf(years)
}

/// Desired pension carried forward to the retirement date
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TargetPension {
    /// Desired monthly pension in today's money
    pub present_value: f64,
    /// Same amount in money of the retirement date
    pub future_value: f64,
    pub inflation_rate: f64,
    pub years: f64,
    /// Shortfall of the projected post-reform pension (0 when covered)
    pub monthly_gap: f64,
}

impl TargetPension {
    pub fn project(present_value: f64, years: f64, inflation_rate: f64, projected_pension: f64) -> Self {
        let years = years.max(0.0);
        let future_value = future_value(present_value, years, inflation_rate);

        Self {
            present_value,
            future_value,
            inflation_rate,
            years,
            monthly_gap: (future_value - projected_pension).max(0.0),
        }
    }
}
