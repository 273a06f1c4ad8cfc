//! # Rental Store Trait
//!
//! Storage seam for the payment flow. Only the operations the checkout
//! endpoints need are on the trait; the MongoDB implementation in
//! `rental-store` adds the full-collection readers the export uses.

use crate::booking::{Booking, DateRange};
use crate::error::RentalResult;
use crate::models::{Boat, Payment};
use async_trait::async_trait;
use std::sync::Arc;

/// Fields the caller supplies when creating a booking. The store assigns
/// the id, timestamps, and the initial pending statuses.
#[derive(Debug, Clone)]
pub struct NewBooking {
    pub user_id: String,
    pub boat_id: String,
    pub range: DateRange,
    pub total_price: f64,
    pub number_of_guests: u32,
    pub special_requests: Option<String>,
}

/// Storage operations backing the checkout endpoints
#[async_trait]
pub trait RentalStore: Send + Sync {
    /// Look up a boat by id
    async fn find_boat(&self, boat_id: &str) -> RentalResult<Option<Boat>>;

    /// Find any pending or confirmed booking on the boat whose date range
    /// overlaps the requested one. This is the availability invariant; it is
    /// a read before the insert, not a transaction.
    async fn find_conflicting_booking(
        &self,
        boat_id: &str,
        range: &DateRange,
    ) -> RentalResult<Option<Booking>>;

    /// Insert a booking with status pending
    async fn create_booking(&self, new: NewBooking) -> RentalResult<Booking>;

    /// Insert a payment record for a booking
    async fn create_payment(&self, booking_id: &str, total_amount: f64) -> RentalResult<Payment>;

    /// Flip a booking to confirmed/paid and return the updated record.
    /// Returns `None` when the booking does not exist.
    async fn mark_booking_paid(&self, booking_id: &str) -> RentalResult<Option<Booking>>;
}

/// Type alias for a shared store (dynamic dispatch)
pub type BoxedRentalStore = Arc<dyn RentalStore>;
