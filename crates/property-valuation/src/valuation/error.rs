use axum::http::StatusCode;

use super::chart::ChartError;
use super::market::MarketDataError;
use super::report::ComposeError;

/// Message shown to users for any failure that is not their input.
pub const REPORT_FAILED_MESSAGE: &str = "report generation failed";

/// Rejected form values.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum InputError {
    #[error("{0} is required")]
    MissingField(&'static str),
    #[error("property size must be greater than zero (got {0})")]
    NonPositiveSize(f64),
    #[error("property size must be at least {min} sq.ft. (got {size})")]
    BelowMinimumSize { size: f64, min: f64 },
    #[error("unknown city '{0}'")]
    UnknownCity(String),
    #[error("area '{area}' is not listed for {city}")]
    AreaNotInCity { city: String, area: String },
    #[error("unknown {field} '{value}'")]
    UnknownOption { field: &'static str, value: String },
}

/// Terminal failure for one valuation request.
#[derive(Debug, thiserror::Error)]
pub enum ValuationError {
    #[error("invalid input: {0}")]
    InvalidInput(#[from] InputError),
    #[error("configuration error: {0}")]
    Configuration(#[from] MarketDataError),
    #[error("chart rendering failed: {0}")]
    Render(#[from] ChartError),
    #[error("report composition failed: {0}")]
    Compose(#[from] ComposeError),
}

impl ValuationError {
    /// Text safe to show the person who submitted the form.
    pub fn public_message(&self) -> String {
        match self {
            ValuationError::InvalidInput(err) => err.to_string(),
            _ => REPORT_FAILED_MESSAGE.to_string(),
        }
    }

    pub fn status_code(&self) -> StatusCode {
        match self {
            ValuationError::InvalidInput(_) => StatusCode::UNPROCESSABLE_ENTITY,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Records internal detail; configuration faults mean the market table is broken.
    pub fn log(&self) {
        match self {
            ValuationError::Configuration(err) => {
                tracing::error!(error = %err, "market data misconfigured")
            }
            ValuationError::InvalidInput(err) => {
                tracing::warn!(error = %err, "valuation request rejected")
            }
            other => tracing::warn!(error = %other, "{REPORT_FAILED_MESSAGE}"),
        }
    }
}
