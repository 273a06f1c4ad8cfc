//! # Payment Provider Trait
//!
//! Seam between the booking flow and the hosted checkout provider.
//! The production implementation lives in `rental-stripe`; tests swap in
//! fakes without touching the handlers.

use crate::booking::{Booking, CheckoutSession};
use crate::error::RentalResult;
use crate::models::Boat;
use async_trait::async_trait;
use std::sync::Arc;

/// A hosted-checkout payment provider.
///
/// The provider owns the payment state machine; this crate only creates
/// sessions, redirects the customer, and reads back the terminal status.
#[async_trait]
pub trait PaymentProvider: Send + Sync {
    /// Create a hosted checkout session for a pending booking.
    ///
    /// # Arguments
    /// * `booking` - The pending booking being paid for
    /// * `boat` - The boat, for the line-item label and image
    /// * `customer_email` - Prefilled on the hosted page
    /// * `success_url` / `cancel_url` - Redirect targets after checkout
    async fn create_checkout_session(
        &self,
        booking: &Booking,
        boat: &Boat,
        customer_email: &str,
        success_url: &str,
        cancel_url: &str,
    ) -> RentalResult<CheckoutSession>;

    /// Retrieve a session by id to read its reported payment status.
    async fn retrieve_session(&self, session_id: &str) -> RentalResult<CheckoutSession>;

    /// Provider name (for logging and session records)
    fn provider_name(&self) -> &'static str;
}

/// Type alias for a shared payment provider (dynamic dispatch)
pub type BoxedPaymentProvider = Arc<dyn PaymentProvider>;

/// Redirect URLs handed to the provider at session creation.
///
/// The success URL carries the provider's session-id placeholder so the
/// frontend can call back into the confirm endpoint; the cancel URL carries
/// our booking id so the frontend can surface the abandoned reservation.
#[derive(Debug, Clone)]
pub struct CheckoutUrls {
    /// Frontend base URL (e.g., "https://sailingloc.example")
    pub frontend_url: String,
}

impl CheckoutUrls {
    pub fn new(frontend_url: impl Into<String>) -> Self {
        Self {
            frontend_url: frontend_url.into(),
        }
    }

    /// Success redirect with the provider's session-id placeholder
    pub fn success_url(&self) -> String {
        format!(
            "{}/payment/success?session_id={{CHECKOUT_SESSION_ID}}",
            self.frontend_url
        )
    }

    /// Cancel redirect carrying the booking id
    pub fn cancel_url(&self, booking_id: &str) -> String {
        format!("{}/payment/cancel?bookingId={}", self.frontend_url, booking_id)
    }
}
