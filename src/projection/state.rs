//! Accrual state carried from one simulated month to the next

/// Balances and salary at a point in the accumulation phase
#[derive(Debug, Clone)]
pub struct AccrualState {
    /// Months simulated so far
    pub month: u32,

    /// Monthly salary in force for the current month
    pub salary: f64,

    /// Individual account balance
    pub balance: f64,

    /// Returns credited to the individual account since projection start
    pub accumulated_returns: f64,

    /// Collective reserve fund balance attributed to the worker
    pub reserve_balance: f64,
}

impl AccrualState {
    pub fn new(balance: f64, salary: f64) -> Self {
        Self {
            month: 0,
            salary,
            balance,
            accumulated_returns: 0.0,
            reserve_balance: 0.0,
        }
    }

    /// Pay `contribution` into the account and compound one month
    /// Returns the interest credited
    pub fn credit_account(&mut self, contribution: f64, monthly_rate: f64) -> f64 {
        let base = self.balance + contribution;
        let interest = base * monthly_rate;
        self.accumulated_returns += interest;
        self.balance = base * (1.0 + monthly_rate);
        interest
    }

    /// Pay `contribution` into the reserve fund and compound one month
    pub fn credit_reserve(&mut self, contribution: f64, monthly_rate: f64) {
        self.reserve_balance = (self.reserve_balance + contribution) * (1.0 + monthly_rate);
    }

    /// Close the month, stepping salary up at the end of every `step_months` block
    pub fn end_month(&mut self, annual_growth: f64, step_months: u32) {
        self.month += 1;
        if step_months > 0 && self.month % step_months == 0 {
            self.salary *= 1.0 + annual_growth;
        }
    }
}
