mod engine;
mod mortgage;
mod summary;
mod types;

pub use engine::project;
pub use mortgage::{monthly_payment, monthly_rate, payment_preview, round_currency};
pub use summary::{ProjectionSummary, mortgage_payoff_year, summarize};
pub use types::{MAX_PROJECTION_YEARS, ProjectionParameters, Snapshot};
