//! # Request Handlers
//!
//! Axum request handlers for the booking payment flow: checkout-session
//! creation and post-redirect confirmation.

use crate::auth::AuthUser;
use crate::state::AppState;
use axum::{extract::State, http::StatusCode, response::IntoResponse, Json};
use chrono::{DateTime, NaiveDate, NaiveTime, Utc};
use rental_core::{total_price, DateRange, NewBooking, RentalError};
use serde::{Deserialize, Serialize};
use tracing::{error, info, instrument, warn};

// =============================================================================
// Request/Response Types
// =============================================================================

/// Create checkout-session request. Field names follow the frontend's wire
/// format; everything is optional so missing fields surface as 400s rather
/// than body-rejection errors.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateCheckoutSessionRequest {
    #[serde(default)]
    pub boat_id: Option<String>,
    #[serde(default)]
    pub start_date: Option<String>,
    #[serde(default)]
    pub end_date: Option<String>,
    #[serde(default)]
    pub number_of_guests: Option<u32>,
    #[serde(default)]
    pub special_requests: Option<String>,
}

/// Create checkout-session response
#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateCheckoutSessionResponse {
    /// Hosted checkout URL (redirect the user here)
    pub url: String,
    /// Id of the pending booking
    pub booking_id: String,
}

/// Confirm request carrying the provider's session id
#[derive(Debug, Deserialize)]
pub struct ConfirmRequest {
    #[serde(default)]
    pub session_id: Option<String>,
}

/// Confirm response wrapping the updated booking
#[derive(Debug, Serialize)]
pub struct ConfirmResponse {
    pub success: bool,
    pub data: rental_core::Booking,
}

/// Error response
#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
    pub code: u16,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
}

impl ErrorResponse {
    pub fn new(error: impl Into<String>, code: u16) -> Self {
        Self {
            error: error.into(),
            code,
            details: None,
        }
    }

    pub fn with_details(mut self, details: impl Into<String>) -> Self {
        self.details = Some(details.into());
        self
    }
}

fn rental_error_to_response(err: RentalError) -> (StatusCode, Json<ErrorResponse>) {
    let code = err.status_code();
    let response = ErrorResponse::new(err.to_string(), code);
    (
        StatusCode::from_u16(code).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR),
        Json(response),
    )
}

/// Parse a wire date: RFC 3339, or a plain `YYYY-MM-DD` taken as UTC midnight.
fn parse_date(field: &str, value: &str) -> Result<DateTime<Utc>, RentalError> {
    if let Ok(dt) = DateTime::parse_from_rfc3339(value) {
        return Ok(dt.with_timezone(&Utc));
    }
    if let Ok(date) = NaiveDate::parse_from_str(value, "%Y-%m-%d") {
        return Ok(DateTime::from_naive_utc_and_offset(
            date.and_time(NaiveTime::MIN),
            Utc,
        ));
    }
    Err(RentalError::InvalidDateRange {
        message: format!("{} '{}' is not a valid date", field, value),
    })
}

// =============================================================================
// Handlers
// =============================================================================

/// Health check endpoint
pub async fn health() -> impl IntoResponse {
    Json(serde_json::json!({
        "status": "healthy",
        "service": "berth-rental",
        "version": env!("CARGO_PKG_VERSION")
    }))
}

/// Create a pending booking and a hosted checkout session for it.
///
/// Order of checks: required fields, boat existence, date parsing/ordering,
/// price, availability conflict. The booking insert and the provider call
/// are not transactional; if the payment-record insert fails after session
/// creation, the session stays live at the provider.
#[instrument(skip(state, request), fields(user_id = %user.user_id))]
pub async fn create_checkout_session(
    State(state): State<AppState>,
    user: AuthUser,
    Json(request): Json<CreateCheckoutSessionRequest>,
) -> Result<Json<CreateCheckoutSessionResponse>, (StatusCode, Json<ErrorResponse>)> {
    let (boat_id, start_raw, end_raw) = match (
        request.boat_id.as_deref(),
        request.start_date.as_deref(),
        request.end_date.as_deref(),
    ) {
        (Some(b), Some(s), Some(e)) => (b, s, e),
        _ => {
            return Err((
                StatusCode::BAD_REQUEST,
                Json(ErrorResponse::new(
                    "Missing parameters: boatId, startDate and endDate are required",
                    400,
                )),
            ));
        }
    };

    let boat = state
        .store
        .find_boat(boat_id)
        .await
        .map_err(rental_error_to_response)?
        .ok_or_else(|| {
            rental_error_to_response(RentalError::BoatNotFound {
                boat_id: boat_id.to_string(),
            })
        })?;

    let start = parse_date("startDate", start_raw).map_err(rental_error_to_response)?;
    let end = parse_date("endDate", end_raw).map_err(rental_error_to_response)?;
    let range = DateRange::new(start, end).map_err(rental_error_to_response)?;

    let total = total_price(&range, boat.day_rate).map_err(rental_error_to_response)?;

    if let Some(conflict) = state
        .store
        .find_conflicting_booking(boat_id, &range)
        .await
        .map_err(rental_error_to_response)?
    {
        warn!(
            "Availability conflict with booking {} ({})",
            conflict.id,
            conflict.status.as_str()
        );
        return Err(rental_error_to_response(RentalError::BookingConflict {
            boat_id: boat_id.to_string(),
        }));
    }

    let booking = state
        .store
        .create_booking(NewBooking {
            user_id: user.user_id.clone(),
            boat_id: boat_id.to_string(),
            range,
            total_price: total,
            number_of_guests: request.number_of_guests.unwrap_or(1),
            special_requests: request.special_requests.clone(),
        })
        .await
        .map_err(rental_error_to_response)?;

    let success_url = state.urls.success_url();
    let cancel_url = state.urls.cancel_url(&booking.id);

    info!(
        "Creating checkout: booking={}, boat={}, {} days, total={}",
        booking.id,
        boat.id,
        range.rental_days(),
        total
    );

    let session = state
        .provider
        .create_checkout_session(&booking, &boat, &user.email, &success_url, &cancel_url)
        .await
        .map_err(|e| {
            error!("Failed to create checkout session: {}", e);
            rental_error_to_response(e)
        })?;

    // Partial-failure window: the session already exists at the provider.
    state
        .store
        .create_payment(&booking.id, total)
        .await
        .map_err(rental_error_to_response)?;

    let url = session.checkout_url.ok_or_else(|| {
        rental_error_to_response(RentalError::Internal(
            "Provider returned a session without a checkout URL".to_string(),
        ))
    })?;

    info!("Created checkout session: {}", session.session_id);

    Ok(Json(CreateCheckoutSessionResponse {
        url,
        booking_id: booking.id,
    }))
}

/// Verify a session after the success redirect and confirm the booking.
///
/// Pull-based confirmation: the provider is the source of truth for the
/// payment status; the booking is only flipped when it reports paid.
/// Repeated calls re-apply the same terminal state.
#[instrument(skip(state, request), fields(user_id = %user.user_id))]
pub async fn confirm(
    State(state): State<AppState>,
    user: AuthUser,
    Json(request): Json<ConfirmRequest>,
) -> Result<Json<ConfirmResponse>, (StatusCode, Json<ErrorResponse>)> {
    let session_id = request.session_id.as_deref().ok_or_else(|| {
        (
            StatusCode::BAD_REQUEST,
            Json(ErrorResponse::new("session_id is required", 400)),
        )
    })?;

    let session = state
        .provider
        .retrieve_session(session_id)
        .await
        .map_err(|e| {
            error!("Failed to retrieve session {}: {}", session_id, e);
            rental_error_to_response(e)
        })?;

    if !session.payment_status.is_paid() {
        return Err(rental_error_to_response(RentalError::PaymentNotConfirmed {
            session_id: session_id.to_string(),
            status: session.payment_status.as_str().to_string(),
        }));
    }

    let booking_id = session.booking_id().ok_or_else(|| {
        (
            StatusCode::BAD_REQUEST,
            Json(ErrorResponse::new(
                "Session metadata is missing the booking id",
                400,
            )),
        )
    })?;

    let booking = state
        .store
        .mark_booking_paid(booking_id)
        .await
        .map_err(rental_error_to_response)?
        .ok_or_else(|| {
            rental_error_to_response(RentalError::BookingNotFound {
                booking_id: booking_id.to_string(),
            })
        })?;

    info!("Confirmed booking {} from session {}", booking.id, session_id);

    Ok(Json(ConfirmResponse {
        success: true,
        data: booking,
    }))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_response() {
        let err = ErrorResponse::new("Test error", 400);
        assert_eq!(err.error, "Test error");
        assert_eq!(err.code, 400);
    }

    #[test]
    fn test_rental_error_conversion() {
        let err = RentalError::BookingConflict {
            boat_id: "b1".to_string(),
        };
        let (status, _json) = rental_error_to_response(err);
        assert_eq!(status, StatusCode::BAD_REQUEST);

        let err = RentalError::BoatNotFound {
            boat_id: "b1".to_string(),
        };
        let (status, _json) = rental_error_to_response(err);
        assert_eq!(status, StatusCode::NOT_FOUND);
    }

    #[test]
    fn test_parse_date_formats() {
        let plain = parse_date("startDate", "2025-06-01").unwrap();
        assert_eq!(plain.to_rfc3339(), "2025-06-01T00:00:00+00:00");

        let rfc = parse_date("startDate", "2025-06-01T12:30:00Z").unwrap();
        assert_eq!(rfc.to_rfc3339(), "2025-06-01T12:30:00+00:00");

        assert!(parse_date("startDate", "June 1st").is_err());
    }

    #[test]
    fn test_camel_case_request_shape() {
        let request: CreateCheckoutSessionRequest = serde_json::from_str(
            r#"{"boatId":"b1","startDate":"2025-06-01","endDate":"2025-06-04","numberOfGuests":4}"#,
        )
        .unwrap();

        assert_eq!(request.boat_id.as_deref(), Some("b1"));
        assert_eq!(request.number_of_guests, Some(4));
        assert_eq!(request.special_requests, None);
    }
}
