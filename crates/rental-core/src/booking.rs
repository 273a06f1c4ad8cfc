//! # Booking Types
//!
//! Booking, date-range, and checkout-session types for berth-rental.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Seconds in one civil day, used for rental-day rounding
const SECONDS_PER_DAY: f64 = 86_400.0;

/// Lifecycle state of a booking
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BookingStatus {
    /// Created, awaiting payment
    Pending,
    /// Payment confirmed
    Confirmed,
    /// Cancelled by user or operator
    Cancelled,
    /// Rental period finished
    Completed,
}

impl Default for BookingStatus {
    fn default() -> Self {
        BookingStatus::Pending
    }
}

impl BookingStatus {
    /// Statuses that block other bookings on the same boat
    pub fn is_active(self) -> bool {
        matches!(self, BookingStatus::Pending | BookingStatus::Confirmed)
    }

    pub fn as_str(self) -> &'static str {
        match self {
            BookingStatus::Pending => "pending",
            BookingStatus::Confirmed => "confirmed",
            BookingStatus::Cancelled => "cancelled",
            BookingStatus::Completed => "completed",
        }
    }
}

/// Payment state tracked alongside the booking lifecycle
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PaymentState {
    Pending,
    Paid,
    Refunded,
}

impl Default for PaymentState {
    fn default() -> Self {
        PaymentState::Pending
    }
}

impl PaymentState {
    pub fn as_str(self) -> &'static str {
        match self {
            PaymentState::Pending => "pending",
            PaymentState::Paid => "paid",
            PaymentState::Refunded => "refunded",
        }
    }
}

/// An inclusive rental date range
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DateRange {
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
}

impl DateRange {
    /// Create a range, rejecting reversed bounds.
    pub fn new(start: DateTime<Utc>, end: DateTime<Utc>) -> Result<Self, crate::RentalError> {
        if end < start {
            return Err(crate::RentalError::InvalidDateRange {
                message: format!("end {} precedes start {}", end, start),
            });
        }
        Ok(Self { start, end })
    }

    /// Number of chargeable rental days: ceiling of the day difference,
    /// never less than one (a same-day rental is one day).
    pub fn rental_days(&self) -> i64 {
        let seconds = (self.end - self.start).num_seconds();
        let days = (seconds as f64 / SECONDS_PER_DAY).ceil() as i64;
        days.max(1)
    }

    /// Inclusive overlap test: ranges that merely touch at a boundary
    /// still conflict, matching the store's availability query.
    pub fn overlaps(&self, other: &DateRange) -> bool {
        self.start <= other.end && self.end >= other.start
    }
}

/// Total price for a range at a per-day rate.
///
/// Returns an error when the rate produces a non-finite or sub-unit amount,
/// which would not be chargeable by the payment provider.
pub fn total_price(range: &DateRange, day_rate: f64) -> Result<f64, crate::RentalError> {
    let total = range.rental_days() as f64 * day_rate;
    if !total.is_finite() || total < 1.0 {
        return Err(crate::RentalError::InvalidPrice {
            message: format!("computed total {} is not chargeable", total),
        });
    }
    Ok(total)
}

/// Major-unit amount converted to the provider's smallest currency unit
pub fn to_minor_units(amount: f64) -> i64 {
    (amount * 100.0).round() as i64
}

/// A boat reservation
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Booking {
    /// Store identifier (24-hex document id)
    #[serde(rename = "_id")]
    pub id: String,

    pub user_id: String,
    pub boat_id: String,

    #[serde(with = "crate::datetime")]
    pub start_date: DateTime<Utc>,
    #[serde(with = "crate::datetime")]
    pub end_date: DateTime<Utc>,

    /// Total price in major currency units
    pub total_price: f64,

    #[serde(default)]
    pub status: BookingStatus,

    #[serde(default)]
    pub payment_status: PaymentState,

    pub number_of_guests: u32,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub special_requests: Option<String>,

    #[serde(with = "crate::datetime")]
    pub created_at: DateTime<Utc>,
    #[serde(with = "crate::datetime")]
    pub updated_at: DateTime<Utc>,
}

impl Booking {
    /// Date range covered by this booking
    pub fn range(&self) -> DateRange {
        DateRange {
            start: self.start_date,
            end: self.end_date,
        }
    }
}

/// Payment status a provider reports for a checkout session
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SessionPaymentStatus {
    Paid,
    Unpaid,
    NoPaymentRequired,
    /// Passthrough for statuses we do not model
    Unknown(String),
}

impl SessionPaymentStatus {
    pub fn from_provider(status: &str) -> Self {
        match status {
            "paid" => SessionPaymentStatus::Paid,
            "unpaid" => SessionPaymentStatus::Unpaid,
            "no_payment_required" => SessionPaymentStatus::NoPaymentRequired,
            other => SessionPaymentStatus::Unknown(other.to_string()),
        }
    }

    pub fn is_paid(&self) -> bool {
        matches!(self, SessionPaymentStatus::Paid)
    }

    pub fn as_str(&self) -> &str {
        match self {
            SessionPaymentStatus::Paid => "paid",
            SessionPaymentStatus::Unpaid => "unpaid",
            SessionPaymentStatus::NoPaymentRequired => "no_payment_required",
            SessionPaymentStatus::Unknown(s) => s,
        }
    }
}

/// A checkout session created or retrieved from a payment provider
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CheckoutSession {
    /// Provider's session ID
    pub session_id: String,

    /// Provider name (e.g., "stripe")
    pub provider: String,

    /// URL to redirect the customer to; absent once the session completes
    #[serde(skip_serializing_if = "Option::is_none")]
    pub checkout_url: Option<String>,

    /// Provider-reported payment status
    pub payment_status: SessionPaymentStatus,

    /// Metadata echoed back by the provider (booking/boat/user ids, dates)
    #[serde(default)]
    pub metadata: std::collections::HashMap<String, String>,

    /// Amount in smallest currency unit, when reported
    #[serde(skip_serializing_if = "Option::is_none")]
    pub amount_total: Option<i64>,

    pub created_at: DateTime<Utc>,
}

impl CheckoutSession {
    /// Booking id carried in session metadata, if present
    pub fn booking_id(&self) -> Option<&str> {
        self.metadata.get("booking_id").map(String::as_str)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn utc(y: i32, m: u32, d: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(y, m, d, 0, 0, 0).unwrap()
    }

    #[test]
    fn test_rental_days_minimum_one() {
        let range = DateRange::new(utc(2025, 6, 1), utc(2025, 6, 1)).unwrap();
        assert_eq!(range.rental_days(), 1);
    }

    #[test]
    fn test_rental_days_ceiling() {
        let range = DateRange::new(utc(2025, 6, 1), utc(2025, 6, 4)).unwrap();
        assert_eq!(range.rental_days(), 3);

        // Partial day rounds up
        let range = DateRange {
            start: Utc.with_ymd_and_hms(2025, 6, 1, 0, 0, 0).unwrap(),
            end: Utc.with_ymd_and_hms(2025, 6, 4, 12, 0, 0).unwrap(),
        };
        assert_eq!(range.rental_days(), 4);
    }

    #[test]
    fn test_reversed_range_rejected() {
        assert!(DateRange::new(utc(2025, 6, 4), utc(2025, 6, 1)).is_err());
    }

    #[test]
    fn test_total_price() {
        let range = DateRange::new(utc(2025, 6, 1), utc(2025, 6, 4)).unwrap();
        assert_eq!(total_price(&range, 150.0).unwrap(), 450.0);
        assert_eq!(to_minor_units(450.0), 45_000);
    }

    #[test]
    fn test_total_price_rejects_zero_rate() {
        let range = DateRange::new(utc(2025, 6, 1), utc(2025, 6, 2)).unwrap();
        assert!(total_price(&range, 0.0).is_err());
    }

    #[test]
    fn test_overlap_inclusive_boundaries() {
        let a = DateRange::new(utc(2025, 6, 1), utc(2025, 6, 5)).unwrap();
        let b = DateRange::new(utc(2025, 6, 5), utc(2025, 6, 9)).unwrap();
        let c = DateRange::new(utc(2025, 6, 6), utc(2025, 6, 9)).unwrap();

        assert!(a.overlaps(&b)); // touching boundary counts
        assert!(b.overlaps(&a));
        assert!(!a.overlaps(&c));
    }

    #[test]
    fn test_active_statuses() {
        assert!(BookingStatus::Pending.is_active());
        assert!(BookingStatus::Confirmed.is_active());
        assert!(!BookingStatus::Cancelled.is_active());
        assert!(!BookingStatus::Completed.is_active());
    }

    #[test]
    fn test_session_payment_status_parse() {
        assert!(SessionPaymentStatus::from_provider("paid").is_paid());
        assert!(!SessionPaymentStatus::from_provider("unpaid").is_paid());
        assert_eq!(
            SessionPaymentStatus::from_provider("weird"),
            SessionPaymentStatus::Unknown("weird".to_string())
        );
    }
}
