//! Contribution-rate schedules indexed by months since reform start
//!
//! Each schedule is an ordered table of bands. A band covers
//! `[from_month, next.from_month)`; flat bands return `start_rate`, ramp bands
//! interpolate linearly from `start_rate` to `end_rate` across the span.
//! The last band is open-ended and must be flat.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use crate::error::ScheduleError;

pub const EMPLOYER_ADDITIONAL: &str = "employer_additional";
pub const INDIVIDUAL_TOTAL: &str = "individual_total";
pub const WOMEN_COMPENSATION: &str = "women_compensation";
pub const RESERVE_FUND: &str = "reserve_fund";

/// One row of a rate schedule
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RateBand {
    /// First month index covered by this band
    pub from_month: u32,
    /// Rate at `from_month`
    pub start_rate: f64,
    /// Rate approached at the start of the next band
    pub end_rate: f64,
}

impl RateBand {
    pub fn flat(from_month: u32, rate: f64) -> Self {
        Self { from_month, start_rate: rate, end_rate: rate }
    }

    pub fn ramp(from_month: u32, start_rate: f64, end_rate: f64) -> Self {
        Self { from_month, start_rate, end_rate }
    }

    pub fn is_flat(&self) -> bool {
        self.start_rate == self.end_rate
    }
}

/// Piecewise rate schedule
#[derive(Debug, Clone, PartialEq)]
pub struct RateSchedule {
    name: String,
    bands: Vec<RateBand>,
}

impl RateSchedule {
    /// Build a schedule, checking the band table is well formed
    pub fn new(name: impl Into<String>, bands: Vec<RateBand>) -> Result<Self, ScheduleError> {
        let name = name.into();

        let first = bands.first().ok_or_else(|| ScheduleError::Empty { name: name.clone() })?;
        if first.from_month != 0 {
            return Err(ScheduleError::MissingStart { name, first: first.from_month });
        }

        for band in &bands {
            for rate in [band.start_rate, band.end_rate] {
                if !rate.is_finite() || rate < 0.0 {
                    return Err(ScheduleError::InvalidRate {
                        name,
                        month: band.from_month,
                        rate,
                    });
                }
            }
        }

        for pair in bands.windows(2) {
            if pair[1].from_month <= pair[0].from_month {
                return Err(ScheduleError::Unordered { name, month: pair[1].from_month });
            }
        }

        if let Some(last) = bands.last() {
            if !last.is_flat() {
                return Err(ScheduleError::OpenEndedRamp { name, month: last.from_month });
            }
        }

        Ok(Self { name, bands })
    }

    // Built-in tables skip validation; test_builtin_tables_validate covers them
    fn builtin(name: &str, bands: Vec<RateBand>) -> Self {
        Self { name: name.to_string(), bands }
    }

    /// Rate in force at the given month index
    pub fn rate_at(&self, month_index: u32) -> f64 {
        // First band starts at 0, so idx >= 1
        let idx = self.bands.partition_point(|b| b.from_month <= month_index);
        let band = &self.bands[idx - 1];

        match self.bands.get(idx) {
            Some(next) if !band.is_flat() => {
                let span = (next.from_month - band.from_month) as f64;
                let progress = (month_index - band.from_month) as f64 / span;
                band.start_rate + progress * (band.end_rate - band.start_rate)
            }
            _ => band.start_rate,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn bands(&self) -> &[RateBand] {
        &self.bands
    }
}

/// The four schedules introduced by the reform
#[derive(Debug, Clone, PartialEq)]
pub struct ContributionSchedules {
    /// Total extra employer contribution
    pub employer_additional: RateSchedule,
    /// Worker base rate plus the employer's direct contribution to the account
    pub individual_total: RateSchedule,
    /// Contribution funding the life-expectancy compensation for women
    pub women_compensation: RateSchedule,
    /// Contribution to the collective reserve fund (FAPP)
    pub reserve_fund: RateSchedule,
}

impl ContributionSchedules {
    /// Schedules as enacted, month 0 = reform start
    pub fn reform_default() -> Self {
        let employer_additional = vec![
            RateBand::flat(0, 0.0),
            RateBand::flat(5, 0.01),
            RateBand::flat(13, 0.02),
            RateBand::flat(25, 0.027),
            RateBand::flat(37, 0.035),
            RateBand::flat(49, 0.042),
            RateBand::flat(61, 0.049),
            RateBand::flat(73, 0.056),
            RateBand::flat(85, 0.063),
            RateBand::flat(97, 0.07),
        ];

        let individual_total = vec![
            RateBand::flat(0, 0.10),
            RateBand::flat(5, 0.101),
            RateBand::flat(13, 0.101),
            RateBand::flat(25, 0.102),
            RateBand::flat(37, 0.11),
            RateBand::flat(49, 0.117),
            RateBand::flat(61, 0.124),
            RateBand::flat(73, 0.131),
            RateBand::flat(85, 0.138),
            RateBand::flat(97, 0.145),
            RateBand::ramp(241, 0.145, 0.16),
            RateBand::flat(361, 0.16),
        ];

        let women_compensation = vec![
            RateBand::flat(0, 0.0),
            RateBand::flat(5, 0.009),
            RateBand::flat(13, 0.01),
        ];

        let reserve_fund = vec![
            RateBand::flat(0, 0.0),
            RateBand::flat(13, 0.009),
            RateBand::flat(25, 0.015),
            RateBand::ramp(241, 0.015, 0.0),
            RateBand::flat(361, 0.0),
        ];

        Self {
            employer_additional: RateSchedule::builtin(EMPLOYER_ADDITIONAL, employer_additional),
            individual_total: RateSchedule::builtin(INDIVIDUAL_TOTAL, individual_total),
            women_compensation: RateSchedule::builtin(WOMEN_COMPENSATION, women_compensation),
            reserve_fund: RateSchedule::builtin(RESERVE_FUND, reserve_fund),
        }
    }

    /// Build from named band tables (as read by the CSV loader)
    pub fn from_bands(mut tables: HashMap<String, Vec<RateBand>>) -> Result<Self, ScheduleError> {
        let mut take = |name: &str| -> Result<RateSchedule, ScheduleError> {
            let bands = tables
                .remove(name)
                .ok_or_else(|| ScheduleError::Missing { name: name.to_string() })?;
            RateSchedule::new(name, bands)
        };

        Ok(Self {
            employer_additional: take(EMPLOYER_ADDITIONAL)?,
            individual_total: take(INDIVIDUAL_TOTAL)?,
            women_compensation: take(WOMEN_COMPENSATION)?,
            reserve_fund: take(RESERVE_FUND)?,
        })
    }

    pub fn employer_additional_rate(&self, month_index: u32) -> f64 {
        self.employer_additional.rate_at(month_index)
    }

    pub fn individual_total_rate(&self, month_index: u32) -> f64 {
        self.individual_total.rate_at(month_index)
    }

    pub fn women_compensation_rate(&self, month_index: u32) -> f64 {
        self.women_compensation.rate_at(month_index)
    }

    pub fn reserve_fund_rate(&self, month_index: u32) -> f64 {
        self.reserve_fund.rate_at(month_index)
    }
}

impl Default for ContributionSchedules {
    fn default() -> Self {
        Self::reform_default()
    }
}
