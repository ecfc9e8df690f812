//! Error codes for KitchenSync
//!
//! Codes are serialized as SCREAMING_SNAKE strings so the same values can
//! be matched by Rust and browser clients. Organized by domain:
//!
//! - generic request failures
//! - reservation lifecycle conflicts
//! - ingredient / stock errors
//! - TTL policy validation

use serde::{Deserialize, Serialize};
use std::fmt;

/// Unified error code enum
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(into = "String", try_from = "String")]
pub enum ErrorCode {
    // ==================== Generic ====================
    /// Malformed or invalid request payload
    BadRequest,
    /// Resource not found
    NotFound,
    /// Generic conflict
    Conflict,
    /// Caller is not allowed to perform the operation
    Unauthorized,
    /// Unexpected server failure
    InternalServerError,

    // ==================== Reservations ====================
    /// One or more ingredients cannot cover the requested quantities
    InsufficientIngredients,
    /// Reservation exists but is in a terminal state
    ReservationNotActive,
    /// Reservation TTL has elapsed
    ReservationExpired,

    // ==================== TTL policy ====================
    /// ttl_minutes outside the allowed bounds
    TtlMinutesOutOfRange,
    /// warning_threshold_seconds outside the allowed bounds
    WarningThresholdOutOfRange,
    /// PATCH carried neither ttl_minutes nor warning_threshold_seconds
    TtlPayloadRequired,
}

impl ErrorCode {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::BadRequest => "BAD_REQUEST",
            Self::NotFound => "NOT_FOUND",
            Self::Conflict => "CONFLICT",
            Self::Unauthorized => "UNAUTHORIZED",
            Self::InternalServerError => "INTERNAL_SERVER_ERROR",
            Self::InsufficientIngredients => "INSUFFICIENT_INGREDIENTS",
            Self::ReservationNotActive => "RESERVATION_NOT_ACTIVE",
            Self::ReservationExpired => "RESERVATION_EXPIRED",
            Self::TtlMinutesOutOfRange => "TTL_MINUTES_OUT_OF_RANGE",
            Self::WarningThresholdOutOfRange => "WARNING_THRESHOLD_OUT_OF_RANGE",
            Self::TtlPayloadRequired => "TTL_PAYLOAD_REQUIRED",
        }
    }
}

impl From<ErrorCode> for &'static str {
    fn from(code: ErrorCode) -> Self {
        code.as_str()
    }
}

impl From<ErrorCode> for String {
    fn from(code: ErrorCode) -> Self {
        code.as_str().to_string()
    }
}

/// Error returned when deserializing an unknown code string
#[derive(Debug, Clone, thiserror::Error)]
#[error("unknown error code: {0}")]
pub struct UnknownErrorCode(String);

impl TryFrom<String> for ErrorCode {
    type Error = UnknownErrorCode;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        let code = match value.as_str() {
            "BAD_REQUEST" => Self::BadRequest,
            "NOT_FOUND" => Self::NotFound,
            "CONFLICT" => Self::Conflict,
            "UNAUTHORIZED" => Self::Unauthorized,
            "INTERNAL_SERVER_ERROR" => Self::InternalServerError,
            "INSUFFICIENT_INGREDIENTS" => Self::InsufficientIngredients,
            "RESERVATION_NOT_ACTIVE" => Self::ReservationNotActive,
            "RESERVATION_EXPIRED" => Self::ReservationExpired,
            "TTL_MINUTES_OUT_OF_RANGE" => Self::TtlMinutesOutOfRange,
            "WARNING_THRESHOLD_OUT_OF_RANGE" => Self::WarningThresholdOutOfRange,
            "TTL_PAYLOAD_REQUIRED" => Self::TtlPayloadRequired,
            other => return Err(UnknownErrorCode(other.to_string())),
        };
        Ok(code)
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
