//! Source of "today" for locating the projection on the reform timeline

use chrono::{Local, Months, NaiveDate};
use std::fmt::Debug;

/// Supplies the current date
pub trait ReformClock: Send + Sync + Debug {
    fn today(&self) -> NaiveDate;
}

/// Local calendar date of the host
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl ReformClock for SystemClock {
    fn today(&self) -> NaiveDate {
        Local::now().date_naive()
    }
}

/// Clock pinned to a fixed date
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FixedClock {
    date: NaiveDate,
}

impl FixedClock {
    pub fn new(date: NaiveDate) -> Self {
        Self { date }
    }

    /// Clock that lands exactly `month_index` months after `reform_start`
    pub fn at_month_index(reform_start: NaiveDate, month_index: u32) -> Self {
        let date = reform_start
            .checked_add_months(Months::new(month_index))
            .unwrap_or(NaiveDate::MAX);
        Self { date }
    }
}

impl ReformClock for FixedClock {
    fn today(&self) -> NaiveDate {
        self.date
    }
}
