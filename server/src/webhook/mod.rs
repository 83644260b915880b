//! Gateway Webhooks
//!
//! Receives callbacks from the messaging gateway: token authentication,
//! envelope validation, and event dispatch to the store.

pub mod dispatch;
pub mod handlers;
pub mod types;

use axum::routing::{get, post};
use axum::Router;

use crate::api::AppState;

/// Webhook receiver routes. The gateway delivers with POST or PATCH.
pub fn router() -> Router<AppState> {
    Router::new()
        .route(
            "/",
            get(handlers::verify)
                .post(handlers::receive)
                .patch(handlers::receive),
        )
        .route(
            "/messages",
            post(handlers::receive_messages).patch(handlers::receive_messages),
        )
        .route(
            "/contacts",
            post(handlers::receive_contacts).patch(handlers::receive_contacts),
        )
        .route(
            "/status",
            post(handlers::receive_status).patch(handlers::receive_status),
        )
}
