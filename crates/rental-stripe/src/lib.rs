//! # rental-stripe
//!
//! Stripe payment provider for berth-rental-rs.
//!
//! This crate implements the `PaymentProvider` seam with Stripe's hosted
//! Checkout Sessions API:
//!
//! - **create_checkout_session** - one EUR line item per booking, metadata
//!   carrying the booking/boat/user ids, customer email prefill
//! - **retrieve_session** - reads back the provider-reported payment status
//!   for the confirm endpoint
//!
//! Confirmation is pull-based: the frontend calls back with the session id
//! after the hosted page redirects. There is no webhook reconciliation.
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use rental_stripe::StripeCheckoutProvider;
//!
//! // Create provider from environment (STRIPE_SECRET_KEY)
//! let provider = StripeCheckoutProvider::from_env()?;
//!
//! let session = provider
//!     .create_checkout_session(&booking, &boat, email, &success_url, &cancel_url)
//!     .await?;
//!
//! // Redirect user to session.checkout_url
//! ```

pub mod checkout;
pub mod config;

// Re-exports
pub use checkout::StripeCheckoutProvider;
pub use config::StripeConfig;
