//! # Rental Export
//!
//! Dumps the berth-rental MongoDB database into a single SQL script.
//!
//! ## Usage
//!
//! ```bash
//! export MONGO_URI=mongodb://localhost:27017
//! export MONGO_DB=sailingloc
//!
//! rental-export
//! ```

use rental_export::{build_script, DatabaseSnapshot, OUTPUT_FILE};
use rental_store::{connect, MongoConfig, MongoRentalStore};
use tracing::{info, Level};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(fmt::layer())
        .with(
            EnvFilter::builder()
                .with_default_directive(Level::INFO.into())
                .from_env_lossy(),
        )
        .init();

    let config = MongoConfig::from_env()
        .map_err(|e| anyhow::anyhow!("Failed to load Mongo config: {}", e))?;
    let db = connect(&config)
        .await
        .map_err(|e| anyhow::anyhow!("Failed to connect to MongoDB: {}", e))?;
    let store = MongoRentalStore::new(db);

    info!("Fetching collections from '{}'", config.database);

    let snapshot = DatabaseSnapshot {
        users: store.list_users().await?,
        boats: store.list_boats().await?,
        bookings: store.list_bookings().await?,
        reviews: store.list_reviews().await?,
        payments: store.list_payments().await?,
        favorites: store.list_favorites().await?,
        availabilities: store.list_availabilities().await?,
    };

    let script = build_script(&snapshot);

    let path = std::env::current_dir()?.join(OUTPUT_FILE);
    std::fs::write(&path, &script)?;

    info!("Export written to {}", path.display());
    for (collection, count) in snapshot.counts() {
        info!("  {:>14}: {} rows", collection, count);
    }

    Ok(())
}
