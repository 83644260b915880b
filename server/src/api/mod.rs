//! API Router and Application State
//!
//! Central routing configuration and shared state.

use std::sync::Arc;

use axum::extract::State;
use axum::routing::{get, post};
use axum::{Json, Router};
use serde::Serialize;
use tower_http::{
    compression::CompressionLayer,
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

use crate::config::Config;
use crate::error::ApiResult;
use crate::gateway::GatewayClient;
use crate::store::{DynStore, Stats};
use crate::{groups, messages, webhook};

/// Shared application state.
///
/// The gateway client and store are constructed once at startup and
/// injected here; handlers never reach for globals.
#[derive(Clone)]
pub struct AppState {
    /// Server configuration
    pub config: Arc<Config>,
    /// Client for the external messaging gateway
    pub gateway: GatewayClient,
    /// Persistence collaborator for mirrored traffic
    pub store: DynStore,
}

impl AppState {
    /// Create new application state.
    #[must_use]
    pub fn new(config: Config, gateway: GatewayClient, store: DynStore) -> Self {
        Self {
            config: Arc::new(config),
            gateway,
            store,
        }
    }
}

/// Create the main application router.
pub fn create_router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        // Health check
        .route("/health", get(health_check))
        // Outbound sends and gateway history proxy
        .nest("/api/messages", messages::router())
        .route("/api/contacts", get(messages::handlers::list_contacts))
        // Group management
        .route("/api/groups", post(groups::handlers::manage_group))
        // Gateway webhooks
        .nest("/api/webhook", webhook::router())
        // Dashboard counters
        .route("/api/stats", get(stats))
        // Middleware
        .layer(TraceLayer::new_for_http())
        .layer(CompressionLayer::new())
        .layer(cors)
        // State
        .with_state(state)
}

/// Health check response.
#[derive(Serialize)]
struct HealthResponse {
    /// Service status
    status: &'static str,
}

/// Health check endpoint.
async fn health_check() -> Json<HealthResponse> {
    Json(HealthResponse { status: "ok" })
}

/// GET /api/stats — dashboard counters over mirrored traffic.
async fn stats(State(state): State<AppState>) -> ApiResult<Json<Stats>> {
    let stats = state.store.stats().await?;
    Ok(Json(stats))
}
