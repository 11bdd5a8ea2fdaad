//! Error types and handling for the country weather service

use axum::{
    Json,
    extract::rejection::{PathRejection, QueryRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;
use thiserror::Error;

/// Main error type for the country weather service
#[derive(Error, Debug)]
pub enum AppError {
    /// A country code has no entry in the country directory
    #[error("Country with {code} code not found.")]
    NotFound { code: String },

    /// Directory entry without a capital (uninhabited territories)
    #[error("Country with {code} code has no capital.")]
    NoCapital { code: String },

    /// Request validation errors (missing or malformed parameters)
    #[error("{message}")]
    Validation { message: String },

    /// Outbound weather service call failed (transport or non-2xx)
    #[error("Connection error: {message}")]
    Connection { message: String },

    /// Configuration-related errors
    #[error("Configuration error: {message}")]
    Config { message: String },

    /// The whole request ran past the configured request timeout
    #[error("Request timed out.")]
    Timeout,
}

/// JSON body returned for every error response
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ErrorBody {
    pub error_message: String,
}

impl AppError {
    /// Create a new not-found error for a country code
    pub fn not_found<S: Into<String>>(code: S) -> Self {
        Self::NotFound { code: code.into() }
    }

    pub fn no_capital<S: Into<String>>(code: S) -> Self {
        Self::NoCapital { code: code.into() }
    }

    /// Create a new validation error
    pub fn validation<S: Into<String>>(message: S) -> Self {
        Self::Validation {
            message: message.into(),
        }
    }

    /// Create a new connection error
    pub fn connection<S: Into<String>>(message: S) -> Self {
        Self::Connection {
            message: message.into(),
        }
    }

    /// Create a new configuration error
    pub fn config<S: Into<String>>(message: S) -> Self {
        Self::Config {
            message: message.into(),
        }
    }

    /// HTTP status this error maps to
    #[must_use]
    pub fn status_code(&self) -> StatusCode {
        match self {
            AppError::NotFound { .. } | AppError::NoCapital { .. } => StatusCode::NOT_FOUND,
            AppError::Validation { .. } => StatusCode::BAD_REQUEST,
            AppError::Connection { .. } => StatusCode::BAD_GATEWAY,
            AppError::Timeout => StatusCode::REQUEST_TIMEOUT,
            AppError::Config { .. } => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Get a user-friendly error message
    #[must_use]
    pub fn user_message(&self) -> String {
        match self {
            AppError::NotFound { .. }
            | AppError::NoCapital { .. }
            | AppError::Validation { .. }
            | AppError::Timeout => self.to_string(),
            AppError::Connection { message } => message.clone(),
            AppError::Config { .. } => "Internal server error.".to_string(),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        if status.is_server_error() {
            tracing::error!("Request failed: {}", self);
        } else {
            tracing::debug!("Request rejected: {}", self);
        }

        let body = ErrorBody {
            error_message: self.user_message(),
        };
        (status, Json(body)).into_response()
    }
}

impl From<QueryRejection> for AppError {
    fn from(rejection: QueryRejection) -> Self {
        Self::validation(rejection.body_text())
    }
}

impl From<PathRejection> for AppError {
    fn from(rejection: PathRejection) -> Self {
        Self::validation(rejection.body_text())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_creation() {
        let not_found = AppError::not_found("ZZ");
        assert!(matches!(not_found, AppError::NotFound { .. }));

        let validation_err = AppError::validation("No country codes provided.");
        assert!(matches!(validation_err, AppError::Validation { .. }));

        let connection_err = AppError::connection("Connection lost!");
        assert!(matches!(connection_err, AppError::Connection { .. }));
    }

    #[test]
    fn test_status_codes() {
        assert_eq!(AppError::not_found("ZZ").status_code(), StatusCode::NOT_FOUND);
        assert_eq!(
            AppError::validation("bad").status_code(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            AppError::connection("down").status_code(),
            StatusCode::BAD_GATEWAY
        );
        assert_eq!(
            AppError::config("broken").status_code(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn test_user_messages() {
        assert_eq!(
            AppError::not_found("ZZ").user_message(),
            "Country with ZZ code not found."
        );
        assert_eq!(
            AppError::validation("No country codes provided.").user_message(),
            "No country codes provided."
        );
        assert_eq!(
            AppError::connection("Connection lost!").user_message(),
            "Connection lost!"
        );
    }

    #[test]
    fn test_error_body_uses_camel_case() {
        let body = ErrorBody {
            error_message: "oops".to_string(),
        };
        let json = serde_json::to_value(&body).unwrap();
        assert_eq!(json, serde_json::json!({ "errorMessage": "oops" }));
    }

    #[test]
    fn test_timeout_and_missing_capital() {
        assert_eq!(AppError::Timeout.status_code(), StatusCode::REQUEST_TIMEOUT);
        assert_eq!(AppError::Timeout.user_message(), "Request timed out.");

        let err = AppError::no_capital("AQ");
        assert_eq!(err.status_code(), StatusCode::NOT_FOUND);
        assert_eq!(err.user_message(), "Country with AQ code has no capital.");
    }
}
