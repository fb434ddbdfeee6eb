//! Flat `key=value` query strings that capture a whole scenario so it can be
//! shared as a link and restored later.

use chrono::{Datelike, Local};
use serde::de::IntoDeserializer;
use serde::de::value::{Error as ValueError, StrDeserializer};
use serde::{Deserialize, Serialize};
use url::form_urlencoded;

use super::error::ApiError;
use crate::core::ProjectionParameters;

/// Which chart the presentation layer shows.
#[derive(Copy, Clone, Debug, Default, Eq, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum ViewMode {
    #[default]
    #[serde(alias = "netWorth", alias = "net_worth")]
    NetWorth,
    Breakdown,
}

impl ViewMode {
    pub fn as_str(self) -> &'static str {
        match self {
            ViewMode::NetWorth => "net-worth",
            ViewMode::Breakdown => "breakdown",
        }
    }

    /// Parses a wire name, aliases included, through the serde attributes above.
    fn parse(value: &str) -> Option<Self> {
        let deserializer: StrDeserializer<'_, ValueError> = value.into_deserializer();
        ViewMode::deserialize(deserializer).ok()
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Scenario {
    pub params: ProjectionParameters,
    pub start_year: i32,
    pub view: ViewMode,
}

impl Default for Scenario {
    fn default() -> Self {
        Self {
            params: ProjectionParameters::default(),
            start_year: Local::now().year(),
            view: ViewMode::default(),
        }
    }
}

pub fn encode(scenario: &Scenario) -> String {
    let p = &scenario.params;
    form_urlencoded::Serializer::new(String::new())
        .append_pair("currentInvestments", &p.current_investments.to_string())
        .append_pair("monthlySavings", &p.monthly_savings.to_string())
        .append_pair("mortgageBalance", &p.mortgage_balance.to_string())
        .append_pair("mortgageInterestRate", &p.mortgage_interest_rate.to_string())
        .append_pair("mortgageTerm", &p.mortgage_term.to_string())
        .append_pair("returnRate", &p.return_rate.to_string())
        .append_pair("inflationRate", &p.inflation_rate.to_string())
        .append_pair("years", &p.years.to_string())
        .append_pair("startYear", &scenario.start_year.to_string())
        .append_pair("view", scenario.view.as_str())
        .finish()
}

/// Applies every recognised key in `query` on top of `base`. Unknown keys are
/// ignored so links carrying extra tracking parameters still restore.
pub fn decode(query: &str, base: Scenario) -> Result<Scenario, ApiError> {
    let mut scenario = base;
    let query = query.strip_prefix('?').unwrap_or(query);

    for (key, value) in form_urlencoded::parse(query.as_bytes()) {
        let p = &mut scenario.params;
        match &*key {
            "currentInvestments" => p.current_investments = parse_number(&key, &value)?,
            "monthlySavings" => p.monthly_savings = parse_number(&key, &value)?,
            "mortgageBalance" => p.mortgage_balance = parse_number(&key, &value)?,
            "mortgageInterestRate" => p.mortgage_interest_rate = parse_number(&key, &value)?,
            "mortgageTerm" => p.mortgage_term = parse_whole(&key, &value)?,
            "returnRate" => p.return_rate = parse_number(&key, &value)?,
            "inflationRate" => p.inflation_rate = parse_number(&key, &value)?,
            "years" => p.years = parse_whole(&key, &value)?,
            "startYear" => {
                let year: u32 = parse_whole(&key, &value)?;
                scenario.start_year =
                    i32::try_from(year).map_err(|_| invalid_query(&key, &value))?;
            }
            "view" => {
                scenario.view = ViewMode::parse(&value).ok_or_else(|| invalid_query(&key, &value))?
            }
            _ => {}
        }
    }

    Ok(scenario)
}

fn parse_number(key: &str, value: &str) -> Result<f64, ApiError> {
    value
        .trim()
        .parse::<f64>()
        .ok()
        .filter(|v| v.is_finite())
        .ok_or_else(|| invalid_query(key, value))
}

/// Accepts `25` as well as `25.0`, which older links carry.
fn parse_whole(key: &str, value: &str) -> Result<u32, ApiError> {
    let number = parse_number(key, value)?;
    if number < 0.0 || number.fract() != 0.0 || number > u32::MAX as f64 {
        return Err(invalid_query(key, value));
    }
    Ok(number as u32)
}

fn invalid_query(key: &str, value: &str) -> ApiError {
    ApiError::InvalidQuery {
        key: key.to_string(),
        value: value.to_string(),
    }
}
