use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;

use oba_catalog::CatalogError;
use oba_core::GatewayError;
use oba_ledger::LedgerError;

#[derive(Debug)]
pub enum AppError {
    ValidationError(String),
    NotFoundError(String),
    ConflictError(String),
    PaymentDeclined(String),
    Anyhow(anyhow::Error),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, error_message) = match self {
            AppError::ValidationError(msg) => (StatusCode::BAD_REQUEST, msg),
            AppError::NotFoundError(msg) => (StatusCode::NOT_FOUND, msg),
            AppError::ConflictError(msg) => (StatusCode::CONFLICT, msg),
            AppError::PaymentDeclined(msg) => (StatusCode::PAYMENT_REQUIRED, msg),
            AppError::Anyhow(err) => {
                tracing::error!("Internal Server Error: {}", err);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Internal Server Error".to_string(),
                )
            }
        };

        let body = Json(json!({
            "error": error_message,
        }));

        (status, body).into_response()
    }
}

impl From<LedgerError> for AppError {
    fn from(err: LedgerError) -> Self {
        match err {
            LedgerError::BookingNotFound(_)
            | LedgerError::TransactionNotFound(_)
            | LedgerError::TripNotFound(_) => AppError::NotFoundError(err.to_string()),
            LedgerError::TripHasBookings { .. }
            | LedgerError::TransactionSettled(_)
            | LedgerError::BookingTerminal(_)
            | LedgerError::BookingNotPayable(_) => AppError::ConflictError(err.to_string()),
            _ => AppError::ValidationError(err.to_string()),
        }
    }
}

impl From<CatalogError> for AppError {
    fn from(err: CatalogError) -> Self {
        match err {
            CatalogError::NotFound(_) => AppError::NotFoundError(err.to_string()),
            CatalogError::InvalidDraft(_) => AppError::ValidationError(err.to_string()),
        }
    }
}

impl From<GatewayError> for AppError {
    fn from(err: GatewayError) -> Self {
        AppError::Anyhow(err.into())
    }
}

impl From<oba_core::CoreError> for AppError {
    fn from(err: oba_core::CoreError) -> Self {
        AppError::Anyhow(err.into())
    }
}
