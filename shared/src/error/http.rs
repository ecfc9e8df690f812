//! HTTP status code mapping for error codes

use super::codes::ErrorCode;
use http::StatusCode;

impl ErrorCode {
    /// Get the appropriate HTTP status code for this error code
    pub fn http_status(&self) -> StatusCode {
        match self {
            // 404 Not Found
            Self::NotFound => StatusCode::NOT_FOUND,

            // 409 Conflict
            Self::Conflict
            | Self::InsufficientIngredients
            | Self::ReservationNotActive
            | Self::ReservationExpired => StatusCode::CONFLICT,

            // 401 Unauthorized
            Self::Unauthorized => StatusCode::UNAUTHORIZED,

            // 500 Internal Server Error
            Self::InternalServerError => StatusCode::INTERNAL_SERVER_ERROR,

            // 400 Bad Request (validation and TTL policy errors)
            Self::BadRequest
            | Self::TtlMinutesOutOfRange
            | Self::WarningThresholdOutOfRange
            | Self::TtlPayloadRequired => StatusCode::BAD_REQUEST,
        }
    }
}
