//! Accrual under the post-reform regime
//!
//! Two accumulators run side by side: the individual account, fed by the
//! individual total rate, and the collective reserve fund, fed by the reserve
//! fund rate. Rates are looked up at `reform_month_index + k` for month `k`.

use crate::assumptions::{apply_floor, Assumptions};
use crate::error::ProjectionError;
use crate::profile::{Gender, Profile};
use super::cashflows::{AccrualRow, PostReformResult};
use super::history::estimate_history;
use super::state::AccrualState;

pub fn simulate(
    profile: &Profile,
    assumptions: &Assumptions,
    reform_month_index: u32,
    detailed_output: bool,
) -> Result<PostReformResult, ProjectionError> {
    let econ = &assumptions.economic;
    let plan = &assumptions.plan;
    let schedules = &assumptions.schedules;

    let payout_months = assumptions
        .life
        .payout_months(profile.gender, profile.retirement_age)?;
    // Women are compensated up to the annuity a man retiring at the same age would get
    let male_payout_months = match profile.gender {
        Gender::Female => Some(assumptions.life.remaining_months(Gender::Male, profile.retirement_age)),
        Gender::Male => None,
    };

    let months = profile.months_to_retirement();
    let account_rate = econ.monthly_interest_rate();
    let reserve_rate = econ.monthly_reserve_fund_rate();

    let mut state = AccrualState::new(profile.current_balance, profile.monthly_salary);
    let mut worker_total = 0.0;
    let mut employer_total = 0.0;
    let mut sis_total = 0.0;
    let mut women_total = 0.0;
    let mut cashflows = Vec::new();

    for _ in 0..months {
        let index = reform_month_index.saturating_add(state.month);
        let salary = state.salary;

        let individual_rate = schedules.individual_total_rate(index);
        let contribution = salary * individual_rate;
        let worker = salary * econ.worker_rate;
        let employer = (individual_rate - econ.worker_rate) * salary;
        let sis = salary * plan.sis_rate;
        let women = salary * schedules.women_compensation_rate(index);
        let reserve = salary * schedules.reserve_fund_rate(index);

        let interest = state.credit_account(contribution, account_rate);
        state.credit_reserve(reserve, reserve_rate);

        worker_total += worker;
        employer_total += employer;
        sis_total += sis;
        women_total += women;

        if detailed_output {
            let mut row = AccrualRow::new(state.month + 1);
            row.reform_month_index = Some(index);
            row.salary = salary;
            row.account_rate = individual_rate;
            row.employer_additional_rate = schedules.employer_additional_rate(index);
            row.worker_contribution = worker;
            row.account_contribution = contribution;
            row.employer_contribution = employer;
            row.employer_additional = salary * row.employer_additional_rate;
            row.women_compensation = women;
            row.reserve_contribution = reserve;
            row.sis = sis;
            row.interest_credited = interest;
            row.eop_balance = state.balance;
            row.eop_reserve_balance = state.reserve_balance;
            cashflows.push(row);
        }

        state.end_month(econ.salary_growth_rate, plan.salary_step_months);
    }

    let history = estimate_history(profile.current_age, profile.current_balance, econ, plan);

    let balance = state.balance;
    let annuity = balance / payout_months as f64;
    let additional_pension = match male_payout_months {
        // Past male life expectancy there is no male annuity to match; only the minimum is paid
        Some(male_months) if male_months < 1 => plan.min_additional_pension,
        Some(male_months) => {
            let gap = balance / male_months as f64 - annuity;
            gap.max(plan.min_additional_pension)
        }
        None => 0.0,
    };

    // The floor in force today, not at a simulated future month
    let floor = assumptions
        .pgu
        .floor(econ.minimum_pension, profile.retirement_age, reform_month_index);
    let (base_pension, minimum_pension_applied) = apply_floor(annuity, floor);

    let reserve_bonus = if plan.reserve_installments > 0 {
        state.reserve_balance / plan.reserve_installments as f64
    } else {
        0.0
    };

    Ok(PostReformResult {
        final_balance: balance,
        base_pension,
        additional_pension,
        reserve_fund_balance: state.reserve_balance,
        reserve_bonus,
        sis_contributions: sis_total + history.sis,
        women_compensation: women_total,
        worker_contributions: worker_total + history.principal,
        employer_contributions: employer_total,
        accumulated_returns: state.accumulated_returns + history.returns,
        minimum_pension_applied,
        minimum_pension_floor: floor,
        reform_month_index,
        months_simulated: months,
        payout_months,
        history,
        cashflows,
    })
}
