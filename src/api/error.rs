use axum::http::StatusCode;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ApiError {
    #[error("{field} {reason}")]
    InvalidInput { field: &'static str, reason: String },
    #[error("invalid value {value:?} for share key {key}")]
    InvalidQuery { key: String, value: String },
    #[error("invalid JSON payload: {0}")]
    InvalidBody(#[source] serde_json::Error),
    #[error(transparent)]
    Cli(#[from] clap::Error),
    #[error("failed to encode response: {0}")]
    Json(#[from] serde_json::Error),
    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl ApiError {
    pub(crate) fn invalid_input(field: &'static str, reason: impl Into<String>) -> Self {
        Self::InvalidInput {
            field,
            reason: reason.into(),
        }
    }

    pub fn status(&self) -> StatusCode {
        match self {
            Self::InvalidInput { .. }
            | Self::InvalidQuery { .. }
            | Self::InvalidBody(_)
            | Self::Cli(_) => StatusCode::BAD_REQUEST,
            Self::Json(_) | Self::Io(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}
