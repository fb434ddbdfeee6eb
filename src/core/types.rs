use serde::Serialize;

/// Inputs for one projection run. Rates are annual percentages (7.0 means 7%).
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectionParameters {
    pub current_investments: f64,
    pub monthly_savings: f64,
    pub mortgage_balance: f64,
    pub mortgage_interest_rate: f64,
    pub mortgage_term: u32,
    pub return_rate: f64,
    pub inflation_rate: f64,
    pub years: u32,
}

impl Default for ProjectionParameters {
    fn default() -> Self {
        Self {
            current_investments: 10_000.0,
            monthly_savings: 500.0,
            mortgage_balance: 250_000.0,
            mortgage_interest_rate: 4.5,
            mortgage_term: 25,
            return_rate: 7.0,
            inflation_rate: 2.0,
            years: 30,
        }
    }
}

/// Longest horizon the engine simulates; longer requests are projected over
/// this many years.
pub const MAX_PROJECTION_YEARS: u32 = 10_000;

impl ProjectionParameters {
    /// `years`, clamped to [`MAX_PROJECTION_YEARS`].
    pub fn horizon_years(&self) -> u32 {
        self.years.min(MAX_PROJECTION_YEARS)
    }

    pub fn total_months(&self) -> u32 {
        self.horizon_years() * 12
    }

    pub fn mortgage_months(&self) -> u32 {
        self.mortgage_term.saturating_mul(12)
    }
}

/// One reporting point of a projection. Money fields are rounded to whole
/// currency units.
///
/// `inflation_impact` is signed: positive when inflation erodes positive net
/// worth, negative when net worth is below zero and inflation shrinks the real
/// weight of the debt.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Snapshot {
    pub month: u32,
    pub year: u32,
    pub investment_value: f64,
    pub mortgage_remaining: f64,
    pub net_worth: f64,
    pub real_net_worth: f64,
    pub inflation_impact: f64,
    pub contributions: f64,
    pub returns: f64,
    pub mortgage_payment: f64,
    pub mortgage_interest_paid: f64,
    pub mortgage_principal_paid: f64,
}
