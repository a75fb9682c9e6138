//! Error handling module
//!
//! Application-level error type and HTTP response conversion.

use axum::extract::rejection::QueryRejection;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;

use crate::domain::{AmountError, LedgerError};

/// Application error types
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    // Client errors (4xx)
    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    #[error(transparent)]
    Amount(#[from] AmountError),

    // Ledger outcomes
    #[error(transparent)]
    Ledger(#[from] LedgerError),
}

impl From<QueryRejection> for AppError {
    fn from(rejection: QueryRejection) -> Self {
        AppError::InvalidRequest(rejection.body_text())
    }
}

/// Error response body
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
    pub error_code: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
}

impl AppError {
    /// Status, machine-readable code and optional details for the response body.
    fn classify(&self) -> (StatusCode, &'static str, Option<String>) {
        match self {
            AppError::InvalidRequest(msg) => {
                (StatusCode::BAD_REQUEST, "invalid_request", Some(msg.clone()))
            }
            AppError::Amount(e) => (StatusCode::BAD_REQUEST, "invalid_request", Some(e.to_string())),

            AppError::Ledger(LedgerError::UserNotFound(username)) => {
                (StatusCode::NOT_FOUND, "user_not_found", Some(username.clone()))
            }
            AppError::Ledger(LedgerError::InsufficientFunds(username)) => {
                (StatusCode::BAD_REQUEST, "insufficient_funds", Some(username.clone()))
            }
            AppError::Ledger(LedgerError::Storage { .. }) => {
                (StatusCode::INTERNAL_SERVER_ERROR, "storage_error", None)
            }
        }
    }

    /// Message safe to show to the end caller.
    fn public_message(&self, status: StatusCode) -> String {
        if status.is_server_error() {
            "Internal server error".to_string()
        } else {
            self.to_string()
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, error_code, details) = self.classify();

        if status.is_server_error() {
            tracing::error!(error = ?self, "{}", self);
        }

        let body = ErrorResponse {
            error: self.public_message(status),
            error_code: error_code.to_string(),
            details,
        };

        (status, Json(body)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::StoreError;

    #[test]
    fn test_ledger_outcomes_map_to_status() {
        let err = AppError::from(LedgerError::UserNotFound("bob".to_string()));
        assert_eq!(err.into_response().status(), StatusCode::NOT_FOUND);

        let err = AppError::from(LedgerError::InsufficientFunds("alice".to_string()));
        assert_eq!(err.into_response().status(), StatusCode::BAD_REQUEST);

        let err = AppError::from(AmountError::Negative(-5));
        let (status, code, details) = err.classify();
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(code, "invalid_request");
        assert!(details.unwrap().contains("-5"));
    }

    #[test]
    fn test_storage_error_is_opaque() {
        let err = AppError::from(LedgerError::storage(
            "apply",
            StoreError::Database(sqlx::Error::PoolTimedOut),
        ));

        let (status, code, details) = err.classify();
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(code, "storage_error");
        assert!(details.is_none());
        assert_eq!(err.public_message(status), "Internal server error");
    }
}
