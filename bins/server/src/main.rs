//! Hotelres API Server
//!
//! Main entry point for the hotel reservation backend.

use std::sync::Arc;

use tokio::net::TcpListener;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use hotelres_api::{AppState, create_router};
use hotelres_core::storage::{StorageConfig, StorageService};
use hotelres_db::{SeaOrmIdentityStore, connect_with_pool};
use hotelres_shared::{AppConfig, JwtConfig, JwtService};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load environment variables from .env file
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "hotelres=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = AppConfig::load()?;

    let db = connect_with_pool(
        &config.database.url,
        config.database.max_connections,
        config.database.min_connections,
    )
    .await?;
    info!("Connected to database");

    // The identity store writes on its own clone of the pool, outside any unit of work.
    let identity = Arc::new(SeaOrmIdentityStore::new(db.clone()));

    let storage = StorageService::from_config(StorageConfig::from_settings(&config.storage))?;
    info!(provider = storage.config().provider.name(), "Profile image storage configured");

    let jwt_config = JwtConfig::from(&config.jwt);

    let state = AppState {
        db: Arc::new(db),
        jwt_service: Arc::new(JwtService::new(jwt_config)),
        identity,
        storage,
    };

    let app = create_router(state);

    let addr = format!("{}:{}", config.server.host, config.server.port);
    let listener = TcpListener::bind(&addr).await?;
    info!("Server listening on {}", addr);

    axum::serve(listener, app).await?;

    Ok(())
}
