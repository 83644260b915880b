//! Message API Handlers
//!
//! Outbound send plus gateway history proxies for the dashboard.

use axum::extract::{Path, State};
use axum::Json;
use serde_json::{json, Value};
use tracing::{debug, info};

use super::builder;
use super::types::{MessageType, SendMessageRequest};
use crate::api::AppState;
use crate::error::{ApiError, ApiResult};
use crate::phone;

/// POST /api/messages/send
pub async fn send_message(
    State(state): State<AppState>,
    Json(req): Json<SendMessageRequest>,
) -> ApiResult<Json<Value>> {
    if req.to.trim().is_empty() {
        return Err(ApiError::Validation("Missing required field: to".into()));
    }

    let message_type = match req.message_type.as_deref() {
        None => MessageType::Text,
        Some(s) => MessageType::parse_str(s)
            .ok_or_else(|| ApiError::UnsupportedType(format!("Unsupported message type: {s}")))?,
    };

    let recipient = phone::to_recipient(&req.to, &state.config.default_country_code)?;
    let outbound = builder::build(message_type, &req, &recipient)?;

    // Payload may carry media data; log only the route.
    debug!(endpoint = outbound.endpoint, "Forwarding message to gateway");
    let data = state
        .gateway
        .post(outbound.endpoint, &outbound.payload)
        .await?;

    info!(message_type = %message_type, "Message sent");
    Ok(Json(json!({
        "success": true,
        "data": data,
        "message": "Message sent successfully",
    })))
}

/// GET /api/contacts — proxied gateway contact list.
pub async fn list_contacts(State(state): State<AppState>) -> ApiResult<Json<Value>> {
    let data = state.gateway.get_contacts().await?;
    Ok(Json(data))
}

/// GET /api/messages/{contact_id} — proxied gateway message history.
pub async fn list_messages(
    State(state): State<AppState>,
    Path(contact_id): Path<String>,
) -> ApiResult<Json<Value>> {
    let data = state.gateway.get_messages(&contact_id).await?;
    Ok(Json(data))
}
