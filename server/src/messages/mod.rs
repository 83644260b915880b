//! Outbound Messages
//!
//! Validation, payload building, and forwarding of outbound sends to the
//! gateway.

pub mod builder;
pub mod handlers;
pub mod types;

use axum::routing::{get, post};
use axum::Router;

use crate::api::AppState;

/// Routes for outbound sends and the gateway history proxy.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/send", post(handlers::send_message))
        .route("/{contact_id}", get(handlers::list_messages))
}
