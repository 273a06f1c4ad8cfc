//! # Application State
//!
//! Shared state for the axum application: the storage seam, the payment
//! provider, checkout redirect URLs, and server configuration.

use rental_core::{BoxedPaymentProvider, BoxedRentalStore, CheckoutUrls, RentalError};
use rental_store::{connect, MongoConfig, MongoRentalStore};
use rental_stripe::StripeCheckoutProvider;
use std::sync::Arc;

/// Application configuration
#[derive(Debug, Clone)]
pub struct AppConfig {
    /// Host to bind to
    pub host: String,
    /// Port to listen on
    pub port: u16,
    /// Frontend base URL for checkout redirects
    pub frontend_url: String,
    /// HS256 secret for bearer-token validation
    pub jwt_secret: String,
    /// Environment (development, staging, production)
    pub environment: String,
}

impl AppConfig {
    /// Load from environment variables.
    ///
    /// Required env vars:
    /// - `FRONTEND_URL`
    /// - `JWT_SECRET`
    pub fn from_env() -> Result<Self, RentalError> {
        dotenvy::dotenv().ok();

        let frontend_url = std::env::var("FRONTEND_URL")
            .map_err(|_| RentalError::Configuration("FRONTEND_URL not set".to_string()))?;

        let jwt_secret = std::env::var("JWT_SECRET")
            .map_err(|_| RentalError::Configuration("JWT_SECRET not set".to_string()))?;

        Ok(Self {
            host: std::env::var("HOST").unwrap_or_else(|_| "127.0.0.1".to_string()),
            port: std::env::var("PORT")
                .ok()
                .and_then(|p| p.parse().ok())
                .unwrap_or(8080),
            frontend_url,
            jwt_secret,
            environment: std::env::var("ENVIRONMENT")
                .unwrap_or_else(|_| "development".to_string()),
        })
    }

    /// Get the socket address to bind to
    pub fn socket_addr(&self) -> Result<std::net::SocketAddr, RentalError> {
        format!("{}:{}", self.host, self.port)
            .parse()
            .map_err(|e| RentalError::Configuration(format!("invalid bind address: {}", e)))
    }

    /// Check if running in production
    pub fn is_production(&self) -> bool {
        self.environment == "production"
    }
}

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    /// Storage seam
    pub store: BoxedRentalStore,
    /// Hosted-checkout provider
    pub provider: BoxedPaymentProvider,
    /// Checkout redirect URLs
    pub urls: CheckoutUrls,
    /// Application config
    pub config: AppConfig,
}

impl AppState {
    /// Wire up the production state: MongoDB store + Stripe provider.
    pub async fn new() -> anyhow::Result<Self> {
        let config = AppConfig::from_env()
            .map_err(|e| anyhow::anyhow!("Failed to load config: {}", e))?;

        let mongo_config = MongoConfig::from_env()
            .map_err(|e| anyhow::anyhow!("Failed to load Mongo config: {}", e))?;
        let db = connect(&mongo_config)
            .await
            .map_err(|e| anyhow::anyhow!("Failed to connect to MongoDB: {}", e))?;
        let store = Arc::new(MongoRentalStore::new(db));

        let provider = StripeCheckoutProvider::from_env()
            .map_err(|e| anyhow::anyhow!("Failed to initialize Stripe: {}", e))?;

        Ok(Self::with_parts(store, Arc::new(provider), config))
    }

    /// Assemble state from explicit parts (used by tests with fakes).
    pub fn with_parts(
        store: BoxedRentalStore,
        provider: BoxedPaymentProvider,
        config: AppConfig,
    ) -> Self {
        let urls = CheckoutUrls::new(&config.frontend_url);
        Self {
            store,
            provider,
            urls,
            config,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_socket_addr() {
        let config = AppConfig {
            host: "0.0.0.0".to_string(),
            port: 3000,
            frontend_url: "http://localhost:3000".to_string(),
            jwt_secret: "secret".to_string(),
            environment: "test".to_string(),
        };

        let addr = config.socket_addr().unwrap();
        assert_eq!(addr.to_string(), "0.0.0.0:3000");
    }

    #[test]
    fn test_is_production() {
        let mut config = AppConfig {
            host: "127.0.0.1".to_string(),
            port: 8080,
            frontend_url: "http://localhost:3000".to_string(),
            jwt_secret: "secret".to_string(),
            environment: "production".to_string(),
        };
        assert!(config.is_production());

        config.environment = "development".to_string();
        assert!(!config.is_production());
    }
}
