use serde::Serialize;

use super::types::Snapshot;

/// Headline figures derived from a projection series.
///
/// Ratio fields are `None` when their denominator is zero (no contributions,
/// zero starting or final net worth).
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectionSummary {
    pub initial_net_worth: f64,
    pub final_net_worth: f64,
    pub net_worth_growth: f64,
    pub net_worth_growth_percent: Option<f64>,
    pub total_contributions: f64,
    pub total_returns: f64,
    pub return_on_investment_percent: Option<f64>,
    pub inflation_impact: f64,
    pub inflation_impact_percent: Option<f64>,
    pub final_real_net_worth: f64,
    pub total_mortgage_interest: f64,
    pub total_mortgage_principal: f64,
    pub mortgage_payoff_year: Option<u32>,
}

pub fn summarize(series: &[Snapshot]) -> Option<ProjectionSummary> {
    if series.len() < 2 {
        return None;
    }
    let initial = series.first()?;
    let last = series.last()?;

    let net_worth_growth = last.net_worth - initial.net_worth;
    let inflation_impact = last.net_worth - last.real_net_worth;

    Some(ProjectionSummary {
        initial_net_worth: initial.net_worth,
        final_net_worth: last.net_worth,
        net_worth_growth,
        net_worth_growth_percent: percent_of(net_worth_growth, initial.net_worth.abs()),
        total_contributions: last.contributions,
        total_returns: last.returns,
        return_on_investment_percent: percent_of(last.returns, last.contributions),
        inflation_impact,
        inflation_impact_percent: percent_of(inflation_impact, last.net_worth),
        final_real_net_worth: last.real_net_worth,
        total_mortgage_interest: last.mortgage_interest_paid,
        total_mortgage_principal: last.mortgage_principal_paid,
        mortgage_payoff_year: mortgage_payoff_year(series),
    })
}

/// First reported year at which a mortgage that existed at the start has no
/// balance left.
pub fn mortgage_payoff_year(series: &[Snapshot]) -> Option<u32> {
    let initial = series.first()?;
    if initial.mortgage_remaining <= 0.0 {
        return None;
    }
    series
        .iter()
        .find(|s| s.mortgage_remaining <= 0.0)
        .map(|s| s.year)
}

fn percent_of(numerator: f64, denominator: f64) -> Option<f64> {
    if denominator == 0.0 {
        None
    } else {
        Some(numerator / denominator * 100.0)
    }
}
