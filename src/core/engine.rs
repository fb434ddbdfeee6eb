use tracing::debug;

use super::mortgage::{monthly_payment, monthly_rate, round_currency};
use super::types::{ProjectionParameters, Snapshot};
#[cfg(test)]
use super::types::MAX_PROJECTION_YEARS;

#[derive(Debug, Clone, Copy)]
struct MonthlyRates {
    investment_return: f64,
    inflation: f64,
    mortgage: f64,
}

impl MonthlyRates {
    fn from_params(params: &ProjectionParameters) -> Self {
        Self {
            investment_return: monthly_rate(params.return_rate),
            inflation: monthly_rate(params.inflation_rate),
            mortgage: monthly_rate(params.mortgage_interest_rate),
        }
    }
}

/// Running totals carried month to month at full precision.
#[derive(Debug, Clone, Copy)]
struct ProjectionState {
    month: u32,
    investment_value: f64,
    mortgage_remaining: f64,
    total_contributions: f64,
    total_returns: f64,
    total_interest_paid: f64,
    total_principal_paid: f64,
    inflation_factor: f64,
}

impl ProjectionState {
    fn initial(params: &ProjectionParameters) -> Self {
        Self {
            month: 0,
            investment_value: params.current_investments,
            mortgage_remaining: params.mortgage_balance,
            total_contributions: 0.0,
            total_returns: 0.0,
            total_interest_paid: 0.0,
            total_principal_paid: 0.0,
            inflation_factor: 1.0,
        }
    }

    fn net_worth(&self) -> f64 {
        self.investment_value - self.mortgage_remaining
    }

    fn real_net_worth(&self) -> f64 {
        self.net_worth() / self.inflation_factor
    }

    fn snapshot(&self, mortgage_payment: f64) -> Snapshot {
        let net_worth = self.net_worth();
        let real_net_worth = self.real_net_worth();
        Snapshot {
            month: self.month,
            year: self.month / 12,
            investment_value: round_currency(self.investment_value),
            mortgage_remaining: round_currency(self.mortgage_remaining),
            net_worth: round_currency(net_worth),
            real_net_worth: round_currency(real_net_worth),
            inflation_impact: round_currency(net_worth - real_net_worth),
            contributions: round_currency(self.total_contributions),
            returns: round_currency(self.total_returns),
            mortgage_payment: round_currency(mortgage_payment),
            mortgage_interest_paid: round_currency(self.total_interest_paid),
            mortgage_principal_paid: round_currency(self.total_principal_paid),
        }
    }
}

/// Projects wealth month by month and reports the starting point plus one
/// snapshot per completed year. Never fails: out-of-range inputs give a
/// degenerate series rather than an error, and horizons beyond
/// `MAX_PROJECTION_YEARS` are cut to that many years.
pub fn project(params: &ProjectionParameters) -> Vec<Snapshot> {
    let rates = MonthlyRates::from_params(params);
    let payment = monthly_payment(
        params.mortgage_balance,
        params.mortgage_interest_rate,
        params.mortgage_term,
    );
    let total_months = params.total_months();
    let mortgage_months = params.mortgage_months();

    debug!(
        years = params.years,
        horizon_years = params.horizon_years(),
        total_months,
        payment,
        "running wealth projection"
    );

    let mut state = ProjectionState::initial(params);
    let mut snapshots = Vec::with_capacity(params.horizon_years() as usize + 1);
    snapshots.push(state.snapshot(payment));

    for month in 1..=total_months {
        state = advance_month(state, month, &rates, payment, params, mortgage_months);
        if month % 12 == 0 || month == total_months {
            snapshots.push(state.snapshot(payment));
        }
    }

    snapshots
}

fn advance_month(
    state: ProjectionState,
    month: u32,
    rates: &MonthlyRates,
    payment: f64,
    params: &ProjectionParameters,
    mortgage_months: u32,
) -> ProjectionState {
    let mut next = state;
    next.month = month;

    let monthly_return = state.investment_value * rates.investment_return;
    next.total_returns += monthly_return;
    next.investment_value += params.monthly_savings + monthly_return;
    next.total_contributions += params.monthly_savings;

    if next.mortgage_remaining > 0.0 && month <= mortgage_months {
        let (interest, principal) =
            amortize_month(next.mortgage_remaining, rates.mortgage, payment);
        next.mortgage_remaining -= principal;
        next.total_interest_paid += interest;
        next.total_principal_paid += principal;
    }

    next.inflation_factor *= 1.0 + rates.inflation;
    next
}

/// Splits one installment into (interest, principal). Principal is capped at
/// the outstanding balance so the final installment cannot overpay.
fn amortize_month(remaining: f64, monthly_mortgage_rate: f64, payment: f64) -> (f64, f64) {
    let interest = remaining * monthly_mortgage_rate;
    let principal = (payment - interest).min(remaining);
    (interest, principal)
}
