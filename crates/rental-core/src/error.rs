//! # Rental Error Types
//!
//! Typed error handling for the berth-rental booking engine.
//! All booking and payment operations return `Result<T, RentalError>`.

use thiserror::Error;

/// Core error type for all booking and payment operations
#[derive(Debug, Error)]
pub enum RentalError {
    /// Configuration errors (missing keys, invalid config)
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// Invalid request data
    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    /// Boat not found in the store
    #[error("Boat not found: {boat_id}")]
    BoatNotFound { boat_id: String },

    /// Booking not found in the store
    #[error("Booking not found: {booking_id}")]
    BookingNotFound { booking_id: String },

    /// Requested date range is malformed or reversed
    #[error("Invalid date range: {message}")]
    InvalidDateRange { message: String },

    /// Computed price is not a chargeable amount
    #[error("Invalid price: {message}")]
    InvalidPrice { message: String },

    /// An active booking already overlaps the requested dates
    #[error("Boat {boat_id} is not available for the requested dates")]
    BookingConflict { boat_id: String },

    /// Payment provider API error
    #[error("Provider error [{provider}]: {message}")]
    ProviderError { provider: String, message: String },

    /// Network/HTTP error communicating with provider
    #[error("Network error: {0}")]
    NetworkError(String),

    /// Checkout session missing or expired at the provider
    #[error("Session not found or expired: {session_id}")]
    SessionNotFound { session_id: String },

    /// Session retrieved but its payment status is not paid
    #[error("Payment not confirmed for session {session_id}: status is {status}")]
    PaymentNotConfirmed { session_id: String, status: String },

    /// Document store error
    #[error("Database error: {0}")]
    Database(String),

    /// Internal error (should not happen)
    #[error("Internal error: {0}")]
    Internal(String),

    /// Serialization/deserialization error
    #[error("Serialization error: {0}")]
    Serialization(String),
}

impl RentalError {
    /// Returns true if this error is retryable
    pub fn is_retryable(&self) -> bool {
        matches!(
            self,
            RentalError::NetworkError(_)
                | RentalError::ProviderError { .. }
                | RentalError::Database(_)
        )
    }

    /// Returns the HTTP status code appropriate for this error
    pub fn status_code(&self) -> u16 {
        match self {
            RentalError::Configuration(_) => 500,
            RentalError::InvalidRequest(_) => 400,
            RentalError::BoatNotFound { .. } => 404,
            RentalError::BookingNotFound { .. } => 404,
            RentalError::InvalidDateRange { .. } => 400,
            RentalError::InvalidPrice { .. } => 400,
            RentalError::BookingConflict { .. } => 400,
            RentalError::ProviderError { .. } => 502,
            RentalError::NetworkError(_) => 503,
            RentalError::SessionNotFound { .. } => 404,
            RentalError::PaymentNotConfirmed { .. } => 400,
            RentalError::Database(_) => 500,
            RentalError::Internal(_) => 500,
            RentalError::Serialization(_) => 500,
        }
    }
}

/// Result type alias for booking and payment operations
pub type RentalResult<T> = Result<T, RentalError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_retryable_errors() {
        assert!(RentalError::NetworkError("timeout".into()).is_retryable());
        assert!(RentalError::Database("pool exhausted".into()).is_retryable());
        assert!(!RentalError::BookingConflict {
            boat_id: "b1".into()
        }
        .is_retryable());
    }

    #[test]
    fn test_status_codes() {
        assert_eq!(
            RentalError::InvalidRequest("test".into()).status_code(),
            400
        );
        assert_eq!(
            RentalError::BoatNotFound {
                boat_id: "x".into()
            }
            .status_code(),
            404
        );
        assert_eq!(
            RentalError::BookingConflict {
                boat_id: "x".into()
            }
            .status_code(),
            400
        );
        assert_eq!(
            RentalError::PaymentNotConfirmed {
                session_id: "cs_1".into(),
                status: "unpaid".into()
            }
            .status_code(),
            400
        );
        assert_eq!(
            RentalError::ProviderError {
                provider: "stripe".into(),
                message: "boom".into()
            }
            .status_code(),
            502
        );
    }
}
