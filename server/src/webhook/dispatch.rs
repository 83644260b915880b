//! Webhook Event Dispatch
//!
//! Routes validated envelopes to the persistence collaborator by event
//! type. The store call is awaited before the HTTP response so a failed
//! upsert answers 500 and the gateway may redeliver.

use tracing::{info, warn};

use super::types::{ContactPayload, MessagePayload, WebhookEnvelope, WebhookEvent};
use crate::api::AppState;
use crate::error::ApiError;

/// Dispatch a validated envelope.
///
/// Unknown events are acknowledged without action so new gateway event
/// types never break delivery.
pub async fn handle(state: &AppState, envelope: &WebhookEnvelope) -> Result<(), ApiError> {
    let Some(event) = WebhookEvent::parse_str(&envelope.event) else {
        warn!(event = %envelope.event, "Unhandled webhook event type");
        return Ok(());
    };

    match event {
        WebhookEvent::Message => {
            let payload: MessagePayload = serde_json::from_value(envelope.data.clone())
                .map_err(|_| ApiError::MalformedPayload)?;
            info!(message_id = %payload.id, "Processing message event");
            state.store.upsert_message(&payload.into()).await?;
        }
        WebhookEvent::Contact => {
            let payload: ContactPayload = serde_json::from_value(envelope.data.clone())
                .map_err(|_| ApiError::MalformedPayload)?;
            info!(contact_id = %payload.id, "Processing contact event");
            state.store.upsert_contact(&payload.into()).await?;
        }
        WebhookEvent::Status => {
            // Observed for delivery tracking, not persisted.
            info!(data = %envelope.data, "Status update received");
        }
    }

    Ok(())
}
