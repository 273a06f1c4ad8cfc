//! # rental-api
//!
//! HTTP API layer for berth-rental-rs.
//!
//! This crate provides:
//! - Axum-based HTTP server
//! - REST endpoints for the booking payment flow
//! - JWT bearer-token authentication
//!
//! ## Endpoints
//!
//! | Method | Path | Description |
//! |--------|------|-------------|
//! | GET | `/health` | Health check |
//! | POST | `/api/payments/create-checkout-session` | Pending booking + hosted session |
//! | POST | `/api/payments/confirm` | Verify session, confirm booking |

pub mod auth;
pub mod handlers;
pub mod routes;
pub mod state;

pub use routes::create_router;
pub use state::{AppConfig, AppState};
