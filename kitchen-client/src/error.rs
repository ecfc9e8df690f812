//! Client error types

use shared::error::{ErrorCode, IngredientShortfall};
use thiserror::Error;

/// Client error type
#[derive(Debug, Error)]
pub enum ClientError {
    /// HTTP request failed (network, timeout, protocol)
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Reservation write rejected for lack of stock
    #[error("Insufficient ingredients")]
    InsufficientIngredients(Vec<IngredientShortfall>),

    /// Reservation already reached a terminal state on the server
    #[error("Reservation ended: {code}")]
    ReservationEnded { code: ErrorCode },

    /// Resource not found
    #[error("Not found: {0}")]
    NotFound(String),

    /// Request rejected as invalid
    #[error("Validation error: {0}")]
    Validation(String),

    /// Authentication required
    #[error("Authentication required")]
    Unauthorized,

    /// Server-side failure
    #[error("Internal error: {0}")]
    Internal(String),

    /// Serialization error
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl ClientError {
    /// Whether the reservation this error refers to is gone for the client
    /// (terminal on the server or unknown to it)
    pub fn ends_reservation(&self) -> bool {
        matches!(
            self,
            Self::ReservationEnded { .. } | Self::NotFound(_)
        )
    }

    /// Whether retrying the same request later could succeed
    pub fn is_transient(&self) -> bool {
        matches!(self, Self::Http(_))
    }
}

/// Result type for client operations
pub type ClientResult<T> = Result<T, ClientError>;
