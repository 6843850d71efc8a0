//! Output structures for regime projections

use serde::{Deserialize, Serialize};

use super::history::HistoricalSplit;

/// A single row of accrual output for one simulated month
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AccrualRow {
    // Timing
    pub projection_month: u32,
    pub reform_month_index: Option<u32>,
    pub salary: f64,

    // Rates applied this month
    pub account_rate: f64,
    pub employer_additional_rate: f64,

    // Contributions
    pub worker_contribution: f64,
    pub account_contribution: f64,
    pub employer_contribution: f64,
    pub employer_additional: f64,
    pub women_compensation: f64,
    pub reserve_contribution: f64,
    pub sis: f64,

    // Balances
    pub interest_credited: f64,
    pub eop_balance: f64,
    pub eop_reserve_balance: f64,
}

impl AccrualRow {
    /// Create a new row with zero amounts
    pub fn new(projection_month: u32) -> Self {
        Self {
            projection_month,
            reform_month_index: None,
            salary: 0.0,
            account_rate: 0.0,
            employer_additional_rate: 0.0,
            worker_contribution: 0.0,
            account_contribution: 0.0,
            employer_contribution: 0.0,
            employer_additional: 0.0,
            women_compensation: 0.0,
            reserve_contribution: 0.0,
            sis: 0.0,
            interest_credited: 0.0,
            eop_balance: 0.0,
            eop_reserve_balance: 0.0,
        }
    }
}

/// Outcome under the pre-reform regime
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PreReformResult {
    /// Account balance at retirement
    pub final_balance: f64,

    /// Monthly pension after the minimum floor
    pub monthly_pension: f64,

    /// Worker contributions, forward plus estimated historical principal
    pub worker_contributions: f64,

    /// Always 0: the employer only pays the SIS premium
    pub employer_contributions: f64,

    /// SIS premiums, forward plus historical estimate
    pub sis_contributions: f64,

    /// Account returns, forward plus historical estimate
    pub accumulated_returns: f64,

    pub minimum_pension_applied: bool,
    pub minimum_pension_floor: f64,

    pub months_simulated: u32,
    pub payout_months: u32,
    pub history: HistoricalSplit,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub cashflows: Vec<AccrualRow>,
}

impl PreReformResult {
    pub fn total_pension(&self) -> f64 {
        self.monthly_pension
    }
}

/// Outcome under the post-reform regime
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PostReformResult {
    /// Individual account balance at retirement
    pub final_balance: f64,

    /// Annuity from the individual account after the PGU floor
    pub base_pension: f64,

    /// Life-expectancy compensation, women only
    pub additional_pension: f64,

    /// Reserve fund (FAPP) balance at retirement
    pub reserve_fund_balance: f64,

    /// Monthly reserve fund bonus (BSPA)
    pub reserve_bonus: f64,

    pub sis_contributions: f64,
    pub women_compensation: f64,
    pub worker_contributions: f64,

    /// Employer share paid into the individual account
    pub employer_contributions: f64,

    pub accumulated_returns: f64,

    pub minimum_pension_applied: bool,
    /// PGU amount in force for this pensioner
    pub minimum_pension_floor: f64,
    /// Month index the projection started from
    pub reform_month_index: u32,

    pub months_simulated: u32,
    pub payout_months: u32,
    pub history: HistoricalSplit,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub cashflows: Vec<AccrualRow>,
}

impl PostReformResult {
    /// Base pension plus compensation plus reserve bonus
    pub fn total_pension(&self) -> f64 {
        self.base_pension + self.additional_pension + self.reserve_bonus
    }
}
