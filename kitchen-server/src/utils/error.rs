//! Unified error handling
//!
//! [`AppError`] is the handler-facing error type; its `IntoResponse`
//! implementation renders the wire contracts:
//!
//! - insufficient ingredients → `409 {code: "INSUFFICIENT_INGREDIENTS",
//!   errors: [...]}` (fixed contract, one entry per shortfall)
//! - everything else → `{error, code}` with the status mapped from the
//!   error code
//!
//! Ledger validation failures are detected before any mutation, so every
//! error response here implies the ledger is exactly as it was before the
//! call.

use axum::Json;
use axum::response::{IntoResponse, Response};
use shared::error::{ConflictBody, ErrorBody, ErrorCode, IngredientShortfall};
use tracing::error;

use crate::ledger::LedgerError;
use crate::reservations::{EngineError, TtlError};

/// Application error enum
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    // ========== Client errors (4xx) ==========
    #[error("Resource not found: {0}")]
    NotFound(String),

    #[error("Validation failed: {0}")]
    Validation(String),

    #[error("Unauthorized")]
    Unauthorized,

    /// Reservation exists but is terminal (committed/released/expired)
    #[error("{0}")]
    ReservationNotActive(String),

    /// Reservation TTL elapsed at the touchpoint
    #[error("Reservation expired")]
    ReservationExpired,

    /// One or more ingredients cannot cover the request
    #[error("Insufficient ingredients")]
    InsufficientIngredients(Vec<IngredientShortfall>),

    /// TTL policy update rejected; carries the specific wire code
    #[error("{message}")]
    TtlRejected { message: String, code: ErrorCode },

    // ========== System errors (5xx) ==========
    #[error("Internal server error: {0}")]
    Internal(String),
}

impl AppError {
    fn code(&self) -> ErrorCode {
        match self {
            Self::NotFound(_) => ErrorCode::NotFound,
            Self::Validation(_) => ErrorCode::BadRequest,
            Self::Unauthorized => ErrorCode::Unauthorized,
            Self::ReservationNotActive(_) => ErrorCode::ReservationNotActive,
            Self::ReservationExpired => ErrorCode::ReservationExpired,
            Self::InsufficientIngredients(_) => ErrorCode::InsufficientIngredients,
            Self::TtlRejected { code, .. } => *code,
            Self::Internal(_) => ErrorCode::InternalServerError,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let code = self.code();
        let status = code.http_status();

        if let Self::InsufficientIngredients(shortfalls) = self {
            let body = ConflictBody::insufficient_ingredients(shortfalls);
            return (status, Json(body)).into_response();
        }

        if let Self::Internal(ref message) = self {
            error!(error = %message, "internal server error");
        }
        let body = ErrorBody::new(self.to_string(), code);
        (status, Json(body)).into_response()
    }
}

impl From<EngineError> for AppError {
    fn from(err: EngineError) -> Self {
        match err {
            EngineError::Validation(message) => Self::Validation(message),
            EngineError::NotFound(id) => Self::NotFound(format!("Reservation {id}")),
            EngineError::NotActive { status, .. } => {
                Self::ReservationNotActive(format!("Reservation is {status}"))
            }
            EngineError::Expired(_) => Self::ReservationExpired,
            EngineError::InsufficientStock(shortfalls) => {
                Self::InsufficientIngredients(shortfalls)
            }
            EngineError::Internal(message) => Self::Internal(message),
        }
    }
}

impl From<LedgerError> for AppError {
    fn from(err: LedgerError) -> Self {
        match err {
            LedgerError::IngredientNotFound(id) => Self::NotFound(format!("Ingredient {id}")),
            LedgerError::InsufficientStock(shortfalls) => {
                Self::InsufficientIngredients(shortfalls)
            }
        }
    }
}

impl From<TtlError> for AppError {
    fn from(err: TtlError) -> Self {
        let code = match err {
            TtlError::TtlOutOfRange => ErrorCode::TtlMinutesOutOfRange,
            TtlError::WarningOutOfRange => ErrorCode::WarningThresholdOutOfRange,
            TtlError::PayloadRequired => ErrorCode::TtlPayloadRequired,
        };
        Self::TtlRejected {
            message: err.to_string(),
            code,
        }
    }
}

/// Result type for API handlers
pub type AppResult<T> = Result<T, AppError>;
