//! # Berth-Rental RS
//!
//! Boat-rental booking payment service.
//!
//! ## Usage
//!
//! ```bash
//! # Set environment variables
//! export STRIPE_SECRET_KEY=sk_test_...
//! export FRONTEND_URL=https://sailingloc.example
//! export MONGO_URI=mongodb://localhost:27017
//! export JWT_SECRET=...
//!
//! # Run the server
//! berth-rental
//! ```

use rental_api::{routes, state::AppState};
use tracing::{info, Level};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize logging
    tracing_subscriber::registry()
        .with(fmt::layer())
        .with(
            EnvFilter::builder()
                .with_default_directive(Level::INFO.into())
                .from_env_lossy(),
        )
        .init();

    // Initialize application state
    let state = AppState::new().await?;

    let addr = state.config.socket_addr()?;
    let is_prod = state.config.is_production();

    info!("Environment: {}", state.config.environment);
    info!("Payment provider: {}", state.provider.provider_name());
    info!("Frontend: {}", state.config.frontend_url);

    // Create router
    let app = routes::create_router(state);

    // Start server
    info!("⛵ Berth-Rental starting on http://{}", addr);

    if !is_prod {
        info!("💳 Checkout: POST http://{}/api/payments/create-checkout-session", addr);
        info!("✅ Confirm:  POST http://{}/api/payments/confirm", addr);
    }

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
