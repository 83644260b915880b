//! Wadash Server - Main Entry Point
//!
//! Dashboard backend for the Whapi WhatsApp gateway.

use std::sync::Arc;
use std::time::Duration;

use anyhow::Result;
use tracing::info;

use wd_server::{api, config, gateway, store};

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "wd_server=debug,tower_http=debug".into()),
        )
        .json()
        .init();

    // Load configuration
    dotenvy::dotenv().ok();
    let config = config::Config::from_env()?;

    info!(
        version = env!("CARGO_PKG_VERSION"),
        "Starting Wadash Server"
    );

    // Initialize database
    let db_pool = store::create_pool(&config.database_url).await?;
    store::run_migrations(&db_pool).await?;

    // Gateway client for outbound calls
    let gateway = gateway::GatewayClient::new(
        &config.gateway_url,
        &config.gateway_token,
        Duration::from_secs(config.gateway_timeout_secs),
    )?;

    // Build application state
    let store: store::DynStore = Arc::new(store::PgStore::new(db_pool));
    let state = api::AppState::new(config.clone(), gateway, store);

    // Build router
    let app = api::create_router(state);

    // Start server
    let listener = tokio::net::TcpListener::bind(&config.bind_address).await?;
    info!(address = %config.bind_address, "Server listening");

    // Graceful shutdown handler
    let shutdown_signal = async {
        tokio::signal::ctrl_c()
            .await
            .expect("Failed to install CTRL+C signal handler");
        info!("Received shutdown signal, cleaning up...");
    };

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal)
        .await?;

    info!("Server shutdown complete");

    Ok(())
}
