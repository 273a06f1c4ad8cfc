//! # rental-store
//!
//! MongoDB storage layer for berth-rental-rs.
//!
//! This crate provides:
//! - `MongoRentalStore` implementing the `RentalStore` seam
//! - Full-collection readers for the database export
//! - `MongoConfig` / `connect` for env-driven connection setup

pub mod client;
pub mod store;

// Re-exports
pub use client::{connect, MongoConfig};
pub use store::MongoRentalStore;
