mod error;
pub mod share;

use axum::{
    Router,
    body::Bytes,
    extract::{Json, RawQuery},
    http::{StatusCode, header},
    response::{IntoResponse, Response},
    routing::get,
};
use clap::{Parser, ValueEnum};
use serde::{Deserialize, Serialize};
use std::net::SocketAddr;
use tokio::net::TcpListener;
use tracing::{info, warn};

pub use error::ApiError;
pub use share::{Scenario, ViewMode};

use crate::core::{
    ProjectionParameters, ProjectionSummary, Snapshot, payment_preview, project, summarize,
};

#[derive(Copy, Clone, Debug, Eq, PartialEq, ValueEnum)]
enum CliViewMode {
    NetWorth,
    Breakdown,
}

impl From<CliViewMode> for ViewMode {
    fn from(value: CliViewMode) -> Self {
        match value {
            CliViewMode::NetWorth => ViewMode::NetWorth,
            CliViewMode::Breakdown => ViewMode::Breakdown,
        }
    }
}

#[derive(Debug, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
struct ProjectPayload {
    current_investments: Option<f64>,
    monthly_savings: Option<f64>,
    mortgage_balance: Option<f64>,
    mortgage_interest_rate: Option<f64>,
    mortgage_term: Option<u32>,
    return_rate: Option<f64>,
    inflation_rate: Option<f64>,
    years: Option<u32>,
    start_year: Option<i32>,
    view: Option<ViewMode>,
}

#[derive(Parser, Debug)]
#[command(
    name = "savefun project",
    about = "Project investments, mortgage amortization and inflation-adjusted net worth"
)]
struct Cli {
    #[arg(long, default_value_t = 10_000.0, help = "Starting investment balance")]
    current_investments: f64,
    #[arg(long, default_value_t = 500.0, help = "Fixed monthly contribution")]
    monthly_savings: f64,
    #[arg(
        long,
        default_value_t = 250_000.0,
        help = "Outstanding mortgage principal; 0 for no mortgage"
    )]
    mortgage_balance: f64,
    #[arg(
        long,
        default_value_t = 4.5,
        help = "Annual mortgage interest rate in percent"
    )]
    mortgage_interest_rate: f64,
    #[arg(long, default_value_t = 25, help = "Mortgage term in years")]
    mortgage_term: u32,
    #[arg(
        long,
        default_value_t = 7.0,
        help = "Expected annual investment return in percent"
    )]
    return_rate: f64,
    #[arg(long, default_value_t = 2.0, help = "Annual inflation in percent")]
    inflation_rate: f64,
    #[arg(long, default_value_t = 30, help = "Projection horizon in years")]
    years: u32,
    #[arg(long, help = "Calendar year for year 0; defaults to the current year")]
    start_year: Option<i32>,
    #[arg(long, value_enum, default_value_t = CliViewMode::NetWorth)]
    view: CliViewMode,
    #[arg(
        long,
        help = "Share query string to restore; its keys override the flags above"
    )]
    from_query: Option<String>,
    #[arg(long, help = "Print only the share query string")]
    share: bool,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct ProjectResponse {
    parameters: ProjectionParameters,
    start_year: i32,
    view: ViewMode,
    mortgage_payment: f64,
    snapshots: Vec<Snapshot>,
    summary: Option<ProjectionSummary>,
    share_query: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct MortgagePaymentResponse {
    monthly_payment: f64,
}

#[derive(Debug, Serialize)]
struct ShareResponse {
    query: String,
}

#[derive(Debug, Serialize)]
struct ErrorResponse {
    error: String,
}

fn validate_scenario(scenario: &Scenario) -> Result<(), ApiError> {
    let p = &scenario.params;

    for (name, value) in [
        ("currentInvestments", p.current_investments),
        ("monthlySavings", p.monthly_savings),
        ("mortgageBalance", p.mortgage_balance),
    ] {
        if !value.is_finite() || value < 0.0 {
            return Err(ApiError::invalid_input(name, "must be >= 0"));
        }
    }

    if !(0.0..=30.0).contains(&p.return_rate) {
        return Err(ApiError::invalid_input("returnRate", "must be between 0 and 30"));
    }

    for (name, rate) in [
        ("mortgageInterestRate", p.mortgage_interest_rate),
        ("inflationRate", p.inflation_rate),
    ] {
        if !(0.0..=20.0).contains(&rate) {
            return Err(ApiError::invalid_input(name, "must be between 0 and 20"));
        }
    }

    if !(1..=40).contains(&p.mortgage_term) {
        return Err(ApiError::invalid_input("mortgageTerm", "must be between 1 and 40"));
    }

    if !(1..=50).contains(&p.years) {
        return Err(ApiError::invalid_input("years", "must be between 1 and 50"));
    }

    if !(2000..=2999).contains(&scenario.start_year) {
        return Err(ApiError::invalid_input(
            "startYear",
            "must be between 2000 and 2999",
        ));
    }

    Ok(())
}

fn scenario_from_cli(cli: &Cli) -> Result<Scenario, ApiError> {
    let base = Scenario::default();
    let scenario = Scenario {
        params: ProjectionParameters {
            current_investments: cli.current_investments,
            monthly_savings: cli.monthly_savings,
            mortgage_balance: cli.mortgage_balance,
            mortgage_interest_rate: cli.mortgage_interest_rate,
            mortgage_term: cli.mortgage_term,
            return_rate: cli.return_rate,
            inflation_rate: cli.inflation_rate,
            years: cli.years,
        },
        start_year: cli.start_year.unwrap_or(base.start_year),
        view: cli.view.into(),
    };

    let scenario = match cli.from_query.as_deref() {
        Some(query) => share::decode(query, scenario)?,
        None => scenario,
    };
    validate_scenario(&scenario)?;
    Ok(scenario)
}

fn scenario_from_payload(payload: ProjectPayload) -> Result<Scenario, ApiError> {
    let mut scenario = Scenario::default();
    let p = &mut scenario.params;

    if let Some(v) = payload.current_investments {
        p.current_investments = v;
    }
    if let Some(v) = payload.monthly_savings {
        p.monthly_savings = v;
    }
    if let Some(v) = payload.mortgage_balance {
        p.mortgage_balance = v;
    }
    if let Some(v) = payload.mortgage_interest_rate {
        p.mortgage_interest_rate = v;
    }
    if let Some(v) = payload.mortgage_term {
        p.mortgage_term = v;
    }
    if let Some(v) = payload.return_rate {
        p.return_rate = v;
    }
    if let Some(v) = payload.inflation_rate {
        p.inflation_rate = v;
    }
    if let Some(v) = payload.years {
        p.years = v;
    }
    if let Some(v) = payload.start_year {
        scenario.start_year = v;
    }
    if let Some(v) = payload.view {
        scenario.view = v;
    }

    validate_scenario(&scenario)?;
    Ok(scenario)
}

/// GET routes read the same flat query string a share link carries.
fn scenario_from_query(query: Option<&str>) -> Result<Scenario, ApiError> {
    let scenario = share::decode(query.unwrap_or_default(), Scenario::default())?;
    validate_scenario(&scenario)?;
    Ok(scenario)
}

fn scenario_from_body(body: &[u8]) -> Result<Scenario, ApiError> {
    let payload =
        serde_json::from_slice::<ProjectPayload>(body).map_err(ApiError::InvalidBody)?;
    scenario_from_payload(payload)
}

fn build_project_response(scenario: &Scenario) -> ProjectResponse {
    let params = &scenario.params;
    let snapshots = project(params);
    let summary = summarize(&snapshots);

    ProjectResponse {
        parameters: params.clone(),
        start_year: scenario.start_year,
        view: scenario.view,
        mortgage_payment: payment_preview(
            params.mortgage_balance,
            params.mortgage_interest_rate,
            params.mortgage_term,
        ),
        snapshots,
        summary,
        share_query: share::encode(scenario),
    }
}

/// Runs one projection from command-line flags (program name first) and
/// returns the text to print.
pub fn run_cli<I, T>(args: I) -> Result<String, ApiError>
where
    I: IntoIterator<Item = T>,
    T: Into<std::ffi::OsString> + Clone,
{
    let cli = Cli::try_parse_from(args)?;
    let scenario = scenario_from_cli(&cli)?;
    if cli.share {
        return Ok(share::encode(&scenario));
    }
    let response = build_project_response(&scenario);
    Ok(serde_json::to_string_pretty(&response)?)
}

pub async fn run_http_server(port: u16) -> Result<(), ApiError> {
    let addr = SocketAddr::from(([0, 0, 0, 0], port));
    let app = Router::new()
        .route(
            "/api/project",
            get(project_get_handler).post(project_post_handler),
        )
        .route("/api/mortgage-payment", get(mortgage_payment_handler))
        .route("/api/share", get(share_handler))
        .fallback(not_found_handler);

    let listener = TcpListener::bind(addr).await?;
    info!("savefun HTTP API listening on http://{addr}");
    info!("Local access: http://127.0.0.1:{port}/api/project");

    axum::serve(listener, app).await?;
    Ok(())
}

async fn not_found_handler() -> Response {
    error_response(StatusCode::NOT_FOUND, "Not found")
}

async fn project_get_handler(RawQuery(query): RawQuery) -> Response {
    project_response(scenario_from_query(query.as_deref()))
}

async fn project_post_handler(body: Bytes) -> Response {
    project_response(scenario_from_body(&body))
}

fn project_response(scenario: Result<Scenario, ApiError>) -> Response {
    match scenario {
        Ok(scenario) => json_response(StatusCode::OK, build_project_response(&scenario)),
        Err(err) => rejected(err),
    }
}

async fn mortgage_payment_handler(RawQuery(query): RawQuery) -> Response {
    let scenario = match scenario_from_query(query.as_deref()) {
        Ok(scenario) => scenario,
        Err(err) => return rejected(err),
    };

    let p = &scenario.params;
    json_response(
        StatusCode::OK,
        MortgagePaymentResponse {
            monthly_payment: payment_preview(
                p.mortgage_balance,
                p.mortgage_interest_rate,
                p.mortgage_term,
            ),
        },
    )
}

async fn share_handler(RawQuery(query): RawQuery) -> Response {
    match scenario_from_query(query.as_deref()) {
        Ok(scenario) => json_response(
            StatusCode::OK,
            ShareResponse {
                query: share::encode(&scenario),
            },
        ),
        Err(err) => rejected(err),
    }
}

fn rejected(err: ApiError) -> Response {
    warn!(error = %err, "rejected request");
    error_response(err.status(), &err.to_string())
}

fn json_response<T: Serialize>(status: StatusCode, body: T) -> Response {
    let mut response = (status, Json(body)).into_response();
    response.headers_mut().insert(
        header::CACHE_CONTROL,
        header::HeaderValue::from_static("no-store"),
    );
    response
}

fn error_response(status: StatusCode, msg: &str) -> Response {
    json_response(
        status,
        ErrorResponse {
            error: msg.to_string(),
        },
    )
}
