//! # Stripe Checkout Sessions
//!
//! Implementation of Stripe's Checkout Sessions API over raw form-encoded
//! HTTP. Two calls only: create a session for a pending booking, and
//! retrieve a session to read its reported payment status. The payment
//! state machine itself belongs to Stripe.

use crate::config::StripeConfig;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use rental_core::{
    datetime, Boat, Booking, CheckoutSession, PaymentProvider, RentalError, RentalResult,
    SessionPaymentStatus,
};
use reqwest::Client;
use serde::Deserialize;
use tracing::{debug, error, info, instrument};

/// Stripe hosted-checkout provider
pub struct StripeCheckoutProvider {
    config: StripeConfig,
    client: Client,
}

impl StripeCheckoutProvider {
    /// Create a new Stripe checkout provider
    pub fn new(config: StripeConfig) -> Self {
        let client = Client::builder()
            .timeout(std::time::Duration::from_secs(30))
            .build()
            .expect("Failed to create HTTP client");

        Self { config, client }
    }

    /// Create from environment variables
    pub fn from_env() -> RentalResult<Self> {
        let config = StripeConfig::from_env()?;
        Ok(Self::new(config))
    }

    /// Form parameters for a single-line-item booking checkout
    fn build_form_params(
        booking: &Booking,
        boat: &Boat,
        customer_email: &str,
        success_url: &str,
        cancel_url: &str,
    ) -> Vec<(String, String)> {
        let unit_amount = rental_core::to_minor_units(booking.total_price);

        let mut form_params: Vec<(String, String)> = vec![
            ("mode".to_string(), "payment".to_string()),
            ("payment_method_types[0]".to_string(), "card".to_string()),
            ("success_url".to_string(), success_url.to_string()),
            ("cancel_url".to_string(), cancel_url.to_string()),
            (
                "line_items[0][price_data][currency]".to_string(),
                "eur".to_string(),
            ),
            (
                "line_items[0][price_data][unit_amount]".to_string(),
                unit_amount.to_string(),
            ),
            (
                "line_items[0][price_data][product_data][name]".to_string(),
                boat.checkout_label(),
            ),
            ("line_items[0][quantity]".to_string(), "1".to_string()),
            ("customer_email".to_string(), customer_email.to_string()),
            ("metadata[booking_id]".to_string(), booking.id.clone()),
            ("metadata[boat_id]".to_string(), booking.boat_id.clone()),
            ("metadata[user_id]".to_string(), booking.user_id.clone()),
            (
                "metadata[start_date]".to_string(),
                datetime::format(&booking.start_date),
            ),
            (
                "metadata[end_date]".to_string(),
                datetime::format(&booking.end_date),
            ),
        ];

        if !boat.image.is_empty() {
            form_params.push((
                "line_items[0][price_data][product_data][images][0]".to_string(),
                boat.image.clone(),
            ));
        }

        form_params
    }

    /// Map a non-success Stripe response into a typed error
    fn provider_error(status: reqwest::StatusCode, body: &str) -> RentalError {
        error!("Stripe API error: status={}, body={}", status, body);

        if let Ok(error_response) = serde_json::from_str::<StripeErrorResponse>(body) {
            return RentalError::ProviderError {
                provider: "stripe".to_string(),
                message: error_response.error.message,
            };
        }

        RentalError::ProviderError {
            provider: "stripe".to_string(),
            message: format!("HTTP {}: {}", status, body),
        }
    }

    fn session_from_response(response: StripeCheckoutSessionResponse) -> CheckoutSession {
        let created_at = response
            .created
            .and_then(|ts| DateTime::from_timestamp(ts, 0))
            .unwrap_or_else(Utc::now);

        CheckoutSession {
            session_id: response.id,
            provider: "stripe".to_string(),
            checkout_url: response.url,
            payment_status: SessionPaymentStatus::from_provider(&response.payment_status),
            metadata: response.metadata,
            amount_total: response.amount_total,
            created_at,
        }
    }
}

#[async_trait]
impl PaymentProvider for StripeCheckoutProvider {
    #[instrument(skip(self, booking, boat), fields(booking_id = %booking.id, boat_id = %boat.id))]
    async fn create_checkout_session(
        &self,
        booking: &Booking,
        boat: &Boat,
        customer_email: &str,
        success_url: &str,
        cancel_url: &str,
    ) -> RentalResult<CheckoutSession> {
        let form_params =
            Self::build_form_params(booking, boat, customer_email, success_url, cancel_url);

        debug!(
            "Creating Stripe checkout session: amount={} cents",
            rental_core::to_minor_units(booking.total_price)
        );

        let url = format!("{}/v1/checkout/sessions", self.config.api_base_url);

        let response = self
            .client
            .post(&url)
            .header("Authorization", self.config.auth_header())
            .header("Stripe-Version", &self.config.api_version)
            .header("Idempotency-Key", &booking.id)
            .form(&form_params)
            .send()
            .await
            .map_err(|e| RentalError::NetworkError(e.to_string()))?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| RentalError::NetworkError(e.to_string()))?;

        if !status.is_success() {
            return Err(Self::provider_error(status, &body));
        }

        let session_response: StripeCheckoutSessionResponse = serde_json::from_str(&body)
            .map_err(|e| {
                RentalError::Serialization(format!("Failed to parse Stripe response: {}", e))
            })?;

        info!(
            "Created Stripe checkout session: id={}, url={:?}",
            session_response.id, session_response.url
        );

        Ok(Self::session_from_response(session_response))
    }

    #[instrument(skip(self))]
    async fn retrieve_session(&self, session_id: &str) -> RentalResult<CheckoutSession> {
        let url = format!(
            "{}/v1/checkout/sessions/{}",
            self.config.api_base_url, session_id
        );

        let response = self
            .client
            .get(&url)
            .header("Authorization", self.config.auth_header())
            .header("Stripe-Version", &self.config.api_version)
            .send()
            .await
            .map_err(|e| RentalError::NetworkError(e.to_string()))?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| RentalError::NetworkError(e.to_string()))?;

        if status == reqwest::StatusCode::NOT_FOUND {
            return Err(RentalError::SessionNotFound {
                session_id: session_id.to_string(),
            });
        }

        if !status.is_success() {
            return Err(Self::provider_error(status, &body));
        }

        let session_response: StripeCheckoutSessionResponse = serde_json::from_str(&body)
            .map_err(|e| {
                RentalError::Serialization(format!("Failed to parse Stripe response: {}", e))
            })?;

        debug!(
            "Retrieved Stripe session: id={}, payment_status={}",
            session_response.id, session_response.payment_status
        );

        Ok(Self::session_from_response(session_response))
    }

    fn provider_name(&self) -> &'static str {
        "stripe"
    }
}

// =============================================================================
// Stripe API Types
// =============================================================================

#[derive(Debug, Deserialize)]
struct StripeCheckoutSessionResponse {
    id: String,
    /// Absent once the session has completed
    #[serde(default)]
    url: Option<String>,
    payment_status: String,
    #[serde(default)]
    metadata: std::collections::HashMap<String, String>,
    #[serde(default)]
    amount_total: Option<i64>,
    #[serde(default)]
    created: Option<i64>,
}

#[derive(Debug, Deserialize)]
struct StripeErrorResponse {
    error: StripeApiError,
}

#[derive(Debug, Deserialize)]
struct StripeApiError {
    message: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use rental_core::{BoatKind, BookingStatus, PaymentState};
    use wiremock::matchers::{body_string_contains, header, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn sample_boat() -> Boat {
        Boat {
            id: "64f0c2a1b5e6d7a8c9b0e1f2".into(),
            name: "Sea Breeze".into(),
            kind: BoatKind::Sailboat,
            length: 12.5,
            day_rate: 150.0,
            capacity: 8,
            image: "https://cdn.example.com/sea-breeze.jpg".into(),
            destination: "la-rochelle".into(),
            description: None,
            equipment: vec![],
            available: true,
            owner_id: "64f0c2a1b5e6d7a8c9b0e1f3".into(),
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    fn sample_booking() -> Booking {
        Booking {
            id: "64f0c2a1b5e6d7a8c9b0e1f4".into(),
            user_id: "64f0c2a1b5e6d7a8c9b0e1f5".into(),
            boat_id: "64f0c2a1b5e6d7a8c9b0e1f2".into(),
            start_date: Utc.with_ymd_and_hms(2025, 6, 1, 0, 0, 0).unwrap(),
            end_date: Utc.with_ymd_and_hms(2025, 6, 4, 0, 0, 0).unwrap(),
            total_price: 450.0,
            status: BookingStatus::Pending,
            payment_status: PaymentState::Pending,
            number_of_guests: 4,
            special_requests: None,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    #[test]
    fn test_build_form_params() {
        let booking = sample_booking();
        let boat = sample_boat();

        let params = StripeCheckoutProvider::build_form_params(
            &booking,
            &boat,
            "client@example.com",
            "https://front/payment/success?session_id={CHECKOUT_SESSION_ID}",
            "https://front/payment/cancel?bookingId=64f0c2a1b5e6d7a8c9b0e1f4",
        );

        let get = |key: &str| {
            params
                .iter()
                .find(|(k, _)| k == key)
                .map(|(_, v)| v.as_str())
        };

        assert_eq!(get("mode"), Some("payment"));
        assert_eq!(get("payment_method_types[0]"), Some("card"));
        assert_eq!(
            get("line_items[0][price_data][unit_amount]"),
            Some("45000")
        );
        assert_eq!(
            get("line_items[0][price_data][product_data][name]"),
            Some("Boat rental - Sea Breeze")
        );
        assert_eq!(
            get("line_items[0][price_data][product_data][images][0]"),
            Some("https://cdn.example.com/sea-breeze.jpg")
        );
        assert_eq!(
            get("metadata[booking_id]"),
            Some("64f0c2a1b5e6d7a8c9b0e1f4")
        );
        assert_eq!(get("customer_email"), Some("client@example.com"));
    }

    #[tokio::test]
    async fn test_create_session_success() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/v1/checkout/sessions"))
            .and(header("Authorization", "Bearer sk_test_abc"))
            .and(body_string_contains("mode=payment"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "id": "cs_test_123",
                "url": "https://checkout.stripe.com/c/pay/cs_test_123",
                "payment_status": "unpaid",
                "metadata": { "booking_id": "64f0c2a1b5e6d7a8c9b0e1f4" },
                "amount_total": 45000,
                "created": 1717200000
            })))
            .mount(&server)
            .await;

        let provider = StripeCheckoutProvider::new(
            StripeConfig::new("sk_test_abc").with_api_base_url(server.uri()),
        );

        let session = provider
            .create_checkout_session(
                &sample_booking(),
                &sample_boat(),
                "client@example.com",
                "https://front/success",
                "https://front/cancel",
            )
            .await
            .unwrap();

        assert_eq!(session.session_id, "cs_test_123");
        assert_eq!(
            session.checkout_url.as_deref(),
            Some("https://checkout.stripe.com/c/pay/cs_test_123")
        );
        assert!(!session.payment_status.is_paid());
        assert_eq!(session.booking_id(), Some("64f0c2a1b5e6d7a8c9b0e1f4"));
    }

    #[tokio::test]
    async fn test_create_session_provider_error() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/v1/checkout/sessions"))
            .respond_with(ResponseTemplate::new(400).set_body_json(serde_json::json!({
                "error": { "message": "Invalid currency: xyz" }
            })))
            .mount(&server)
            .await;

        let provider = StripeCheckoutProvider::new(
            StripeConfig::new("sk_test_abc").with_api_base_url(server.uri()),
        );

        let err = provider
            .create_checkout_session(
                &sample_booking(),
                &sample_boat(),
                "client@example.com",
                "https://front/success",
                "https://front/cancel",
            )
            .await
            .unwrap_err();

        match err {
            RentalError::ProviderError { provider, message } => {
                assert_eq!(provider, "stripe");
                assert_eq!(message, "Invalid currency: xyz");
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_retrieve_session_paid() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/v1/checkout/sessions/cs_test_123"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "id": "cs_test_123",
                "url": null,
                "payment_status": "paid",
                "metadata": { "booking_id": "64f0c2a1b5e6d7a8c9b0e1f4" },
                "amount_total": 45000,
                "created": 1717200000
            })))
            .mount(&server)
            .await;

        let provider = StripeCheckoutProvider::new(
            StripeConfig::new("sk_test_abc").with_api_base_url(server.uri()),
        );

        let session = provider.retrieve_session("cs_test_123").await.unwrap();
        assert!(session.payment_status.is_paid());
        assert_eq!(session.checkout_url, None);
    }

    #[tokio::test]
    async fn test_retrieve_session_not_found() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/v1/checkout/sessions/cs_missing"))
            .respond_with(ResponseTemplate::new(404).set_body_json(serde_json::json!({
                "error": { "message": "No such checkout.session: cs_missing" }
            })))
            .mount(&server)
            .await;

        let provider = StripeCheckoutProvider::new(
            StripeConfig::new("sk_test_abc").with_api_base_url(server.uri()),
        );

        let err = provider.retrieve_session("cs_missing").await.unwrap_err();
        assert!(matches!(err, RentalError::SessionNotFound { .. }));
    }
}
