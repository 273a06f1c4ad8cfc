//! # rental-core
//!
//! Core types and traits for the berth-rental booking engine.
//!
//! This crate provides:
//! - `PaymentProvider` trait for the hosted-checkout seam
//! - `RentalStore` trait for the storage seam
//! - `Booking`, `DateRange`, and `CheckoutSession` for the payment flow
//! - The platform record types (`User`, `Boat`, `Review`, ...)
//! - `RentalError` for typed error handling
//!
//! ## Example
//!
//! ```rust,ignore
//! use rental_core::{total_price, DateRange, NewBooking};
//!
//! // Validate the requested range and price it
//! let range = DateRange::new(start, end)?;
//! let total = total_price(&range, boat.day_rate)?;
//!
//! // Reject overlapping reservations
//! if store.find_conflicting_booking(&boat.id, &range).await?.is_some() {
//!     return Err(RentalError::BookingConflict { boat_id: boat.id });
//! }
//!
//! // Create the pending booking, then the hosted checkout session
//! let booking = store.create_booking(NewBooking { /* ... */ }).await?;
//! let session = provider
//!     .create_checkout_session(&booking, &boat, email, &success, &cancel)
//!     .await?;
//! ```

pub mod booking;
pub mod datetime;
pub mod error;
pub mod models;
pub mod provider;
pub mod store;

// Re-exports for convenience
pub use booking::{
    to_minor_units, total_price, Booking, BookingStatus, CheckoutSession, DateRange,
    PaymentState, SessionPaymentStatus,
};
pub use error::{RentalError, RentalResult};
pub use models::{
    Availability, Boat, BoatKind, Favorite, Payment, Review, User, UserRole, UserStatus,
};
pub use provider::{BoxedPaymentProvider, CheckoutUrls, PaymentProvider};
pub use store::{BoxedRentalStore, NewBooking, RentalStore};
