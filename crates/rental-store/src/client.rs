//! # Store Configuration & Connection
//!
//! Environment-driven MongoDB connection management.

use mongodb::{Client, Database};
use rental_core::{RentalError, RentalResult};
use std::env;
use tracing::info;

/// MongoDB connection configuration
#[derive(Debug, Clone)]
pub struct MongoConfig {
    /// Connection string (mongodb:// or mongodb+srv://)
    pub uri: String,
    /// Database name
    pub database: String,
}

impl MongoConfig {
    /// Load configuration from environment variables.
    ///
    /// Required env vars:
    /// - `MONGO_URI`
    ///
    /// Optional:
    /// - `MONGO_DB` (defaults to "sailingloc")
    pub fn from_env() -> RentalResult<Self> {
        dotenvy::dotenv().ok(); // Load .env file if present

        let uri = env::var("MONGO_URI")
            .map_err(|_| RentalError::Configuration("MONGO_URI not set".to_string()))?;

        let database = env::var("MONGO_DB").unwrap_or_else(|_| "sailingloc".to_string());

        Ok(Self { uri, database })
    }

    /// Create config with explicit values (for testing)
    pub fn new(uri: impl Into<String>, database: impl Into<String>) -> Self {
        Self {
            uri: uri.into(),
            database: database.into(),
        }
    }
}

/// Connect to MongoDB and select the configured database
pub async fn connect(config: &MongoConfig) -> RentalResult<Database> {
    let client = Client::with_uri_str(&config.uri)
        .await
        .map_err(|e| RentalError::Database(format!("connection failed: {}", e)))?;

    info!("Connected to MongoDB database '{}'", config.database);

    Ok(client.database(&config.database))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_explicit_config() {
        let config = MongoConfig::new("mongodb://localhost:27017", "sailingloc_test");
        assert_eq!(config.uri, "mongodb://localhost:27017");
        assert_eq!(config.database, "sailingloc_test");
    }
}
