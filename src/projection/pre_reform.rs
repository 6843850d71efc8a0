//! Accrual under the pre-reform regime
//!
//! Only the worker's base contribution reaches the account; the employer pays
//! the SIS premium and nothing else.

use crate::assumptions::{apply_floor, Assumptions};
use crate::error::ProjectionError;
use crate::profile::Profile;
use super::cashflows::{AccrualRow, PreReformResult};
use super::history::estimate_history;
use super::state::AccrualState;

pub fn simulate(
    profile: &Profile,
    assumptions: &Assumptions,
    detailed_output: bool,
) -> Result<PreReformResult, ProjectionError> {
    let econ = &assumptions.economic;
    let plan = &assumptions.plan;

    let payout_months = assumptions
        .life
        .payout_months(profile.gender, profile.retirement_age)?;
    let months = profile.months_to_retirement();
    let monthly_rate = econ.monthly_interest_rate();

    let mut state = AccrualState::new(profile.current_balance, profile.monthly_salary);
    let mut worker_total = 0.0;
    let mut sis_total = 0.0;
    let mut cashflows = Vec::new();

    for _ in 0..months {
        let salary = state.salary;
        let contribution = salary * econ.worker_rate;
        let sis = salary * plan.sis_rate;

        let interest = state.credit_account(contribution, monthly_rate);
        worker_total += contribution;
        sis_total += sis;

        if detailed_output {
            let mut row = AccrualRow::new(state.month + 1);
            row.salary = salary;
            row.account_rate = econ.worker_rate;
            row.worker_contribution = contribution;
            row.account_contribution = contribution;
            row.sis = sis;
            row.interest_credited = interest;
            row.eop_balance = state.balance;
            cashflows.push(row);
        }

        state.end_month(econ.salary_growth_rate, plan.salary_step_months);
    }

    let history = estimate_history(profile.current_age, profile.current_balance, econ, plan);

    let annuity = state.balance / payout_months as f64;
    let (monthly_pension, minimum_pension_applied) = apply_floor(annuity, econ.minimum_pension);

    Ok(PreReformResult {
        final_balance: state.balance,
        monthly_pension,
        worker_contributions: worker_total + history.principal,
        employer_contributions: 0.0,
        sis_contributions: sis_total + history.sis,
        accumulated_returns: state.accumulated_returns + history.returns,
        minimum_pension_applied,
        minimum_pension_floor: econ.minimum_pension,
        months_simulated: months,
        payout_months,
        history,
        cashflows,
    })
}
