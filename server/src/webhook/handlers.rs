//! Webhook HTTP Handlers
//!
//! Token authentication, envelope validation, and the gateway's
//! challenge-response verification handshake. Authentication runs before
//! any body parsing; a rejected envelope is dropped, never queued.

use axum::body::Bytes;
use axum::extract::State;
use axum::http::{header, HeaderMap};
use axum::Json;
use serde_json::{json, Value};
use tracing::{info, warn};

use super::dispatch;
use super::types::{WebhookEnvelope, WebhookEvent};
use crate::api::AppState;
use crate::config::Config;
use crate::error::{ApiError, ApiResult};

/// Header carrying the gateway's webhook token.
const TOKEN_HEADER: &str = "x-whapi-token";

/// Header carrying the verification challenge on GET.
const CHALLENGE_HEADER: &str = "x-whapi-challenge";

/// POST|PATCH /api/webhook
pub async fn receive(
    State(state): State<AppState>,
    headers: HeaderMap,
    body: Bytes,
) -> ApiResult<Json<Value>> {
    authenticate(&headers, &state.config)?;
    let envelope = parse_envelope(&body)?;

    dispatch::handle(&state, &envelope).await?;

    Ok(Json(json!({
        "success": true,
        "message": format!("Webhook processed: {}", envelope.event),
        "timestamp": chrono::Utc::now().to_rfc3339(),
    })))
}

/// GET /api/webhook — gateway verification handshake.
pub async fn verify(headers: HeaderMap) -> Json<Value> {
    if let Some(challenge) = headers
        .get(CHALLENGE_HEADER)
        .and_then(|v| v.to_str().ok())
    {
        info!("Webhook verification challenge received");
        return Json(json!({ "challenge": challenge }));
    }
    Json(json!({ "status": "ok" }))
}

/// POST|PATCH /api/webhook/messages
pub async fn receive_messages(
    State(state): State<AppState>,
    headers: HeaderMap,
    body: Bytes,
) -> ApiResult<Json<Value>> {
    receive_pinned(&state, &headers, &body, WebhookEvent::Message).await
}

/// POST|PATCH /api/webhook/contacts
pub async fn receive_contacts(
    State(state): State<AppState>,
    headers: HeaderMap,
    body: Bytes,
) -> ApiResult<Json<Value>> {
    receive_pinned(&state, &headers, &body, WebhookEvent::Contact).await
}

/// POST|PATCH /api/webhook/status
pub async fn receive_status(
    State(state): State<AppState>,
    headers: HeaderMap,
    body: Bytes,
) -> ApiResult<Json<Value>> {
    receive_pinned(&state, &headers, &body, WebhookEvent::Status).await
}

/// Event-pinned variant: the envelope's event must match the route.
async fn receive_pinned(
    state: &AppState,
    headers: &HeaderMap,
    body: &Bytes,
    expected: WebhookEvent,
) -> ApiResult<Json<Value>> {
    authenticate(headers, &state.config)?;
    let envelope = parse_envelope(body)?;

    if WebhookEvent::parse_str(&envelope.event) != Some(expected) {
        return Err(ApiError::Validation("Invalid event type".into()));
    }

    dispatch::handle(state, &envelope).await?;
    Ok(Json(json!({ "success": true })))
}

fn parse_envelope(body: &Bytes) -> Result<WebhookEnvelope, ApiError> {
    serde_json::from_slice(body).map_err(|e| {
        warn!(error = %e, "Webhook body failed envelope validation");
        ApiError::MalformedPayload
    })
}

/// Pull the bearer token from the custom header or the Authorization header.
fn extract_token(headers: &HeaderMap) -> Option<&str> {
    if let Some(token) = headers.get(TOKEN_HEADER).and_then(|v| v.to_str().ok()) {
        return Some(token);
    }
    headers
        .get(header::AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.strip_prefix("Bearer "))
}

/// Constant-time comparison against the shared secret.
fn token_matches(token: &str, secret: &str) -> bool {
    token.len() == secret.len()
        && token
            .as_bytes()
            .iter()
            .zip(secret.as_bytes())
            .fold(0u8, |acc, (a, b)| acc | (a ^ b))
            == 0
}

fn authenticate(headers: &HeaderMap, config: &Config) -> Result<(), ApiError> {
    let Some(token) = extract_token(headers) else {
        warn!("No webhook token found in headers");
        return Err(ApiError::Auth);
    };
    if !token_matches(token, &config.gateway_token) {
        warn!("Webhook token mismatch");
        return Err(ApiError::Auth);
    }
    Ok(())
}
