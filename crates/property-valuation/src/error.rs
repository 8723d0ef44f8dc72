use crate::config::ConfigError;
use crate::telemetry::TelemetryError;
use crate::valuation::{MarketDataError, ValuationError};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::json;
use std::fmt;

#[derive(Debug)]
pub enum AppError {
    Config(ConfigError),
    Telemetry(TelemetryError),
    Io(std::io::Error),
    Valuation(ValuationError),
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AppError::Config(err) => write!(f, "configuration error: {}", err),
            AppError::Telemetry(err) => write!(f, "telemetry error: {}", err),
            AppError::Io(err) => write!(f, "io error: {}", err),
            AppError::Valuation(err) => write!(f, "valuation error: {}", err),
        }
    }
}

impl std::error::Error for AppError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            AppError::Config(err) => Some(err),
            AppError::Telemetry(err) => Some(err),
            AppError::Io(err) => Some(err),
            AppError::Valuation(err) => Some(err),
        }
    }
}

impl AppError {
    /// Text for the operator's terminal. Valuation failures keep their detail in the logs.
    pub fn user_message(&self) -> String {
        match self {
            AppError::Valuation(err) => err.public_message(),
            other => other.to_string(),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, message) = match &self {
            AppError::Valuation(err) => (err.status_code(), err.public_message()),
            AppError::Config(_)
            | AppError::Telemetry(_)
            | AppError::Io(_) => (StatusCode::INTERNAL_SERVER_ERROR, self.to_string()),
        };

        let body = Json(json!({ "error": message }));
        (status, body).into_response()
    }
}

impl From<ConfigError> for AppError {
    fn from(value: ConfigError) -> Self {
        Self::Config(value)
    }
}

impl From<TelemetryError> for AppError {
    fn from(value: TelemetryError) -> Self {
        Self::Telemetry(value)
    }
}

impl From<std::io::Error> for AppError {
    fn from(value: std::io::Error) -> Self {
        Self::Io(value)
    }
}

impl From<ValuationError> for AppError {
    fn from(value: ValuationError) -> Self {
        Self::Valuation(value)
    }
}

impl From<MarketDataError> for AppError {
    fn from(value: MarketDataError) -> Self {
        Self::Valuation(ValuationError::Configuration(value))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::valuation::{ComposeError, InputError, REPORT_FAILED_MESSAGE};

    #[test]
    fn valuation_failures_hide_internal_detail() {
        let response =
            AppError::from(MarketDataError::UnknownCity("Surat".to_string())).into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);

        let response =
            AppError::from(ValuationError::from(InputError::MissingField("name"))).into_response();
        assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
    }

    #[test]
    fn terminal_output_hides_composition_detail() {
        let err = AppError::from(ValuationError::from(ComposeError::UnsupportedCharacter {
            field: "name",
            character: '\u{0905}',
        }));
        assert_eq!(err.user_message(), REPORT_FAILED_MESSAGE);
        assert!(err.to_string().contains("cannot encode"));

        let rejected = AppError::from(ValuationError::from(InputError::NonPositiveSize(0.0)));
        assert!(rejected.user_message().contains("greater than zero"));

        let config = AppError::from(ConfigError::InvalidPort);
        assert_eq!(config.user_message(), config.to_string());
    }
}
