//! Outbound Message Builder
//!
//! Maps a generic send request onto the gateway-specific payload shape for
//! its message type. Every required-field check happens here, before any
//! gateway traffic.

use base64::Engine as _;
use serde_json::{json, Value};

use super::types::{MessageType, SendMessageRequest, SendOptions};
use crate::error::ApiError;

/// A gateway-ready outbound message: endpoint path plus JSON payload.
#[derive(Debug, Clone, PartialEq)]
pub struct OutboundMessage {
    pub endpoint: &'static str,
    pub payload: Value,
}

/// Build the gateway payload for a send request.
///
/// `recipient` is the already-normalized recipient address. Fails with
/// `Validation` when fields required by the message type are missing.
pub fn build(
    message_type: MessageType,
    req: &SendMessageRequest,
    recipient: &str,
) -> Result<OutboundMessage, ApiError> {
    let opts = &req.options;

    let payload = match message_type {
        MessageType::Text => {
            let body = non_empty(req.message.as_deref())
                .ok_or_else(|| validation("Message is required for text messages"))?;
            json!({ "to": recipient, "body": body })
        }

        MessageType::Image => {
            let media = media_source(opts, "image")?;
            let mut payload = json!({ "to": recipient, "media": media });
            if let Some(caption) = non_empty(req.message.as_deref()) {
                payload["caption"] = json!(caption);
            }
            payload
        }

        MessageType::Document => {
            let media = media_source(opts, "document")?;
            let mut payload = json!({
                "to": recipient,
                "media": media,
                "filename": opts.filename.as_deref().unwrap_or("document"),
            });
            if let Some(caption) = non_empty(req.message.as_deref()) {
                payload["caption"] = json!(caption);
            }
            payload
        }

        MessageType::Audio => {
            // URL sources are passed by reference; inline base64 is sent
            // as raw data with an explicit MIME type.
            let media = match (&opts.url, &opts.base64) {
                (Some(url), None) => json!({ "url": url }),
                (None, Some(b64)) => json!({ "data": inline_data(b64)? }),
                (Some(_), Some(_)) => {
                    return Err(validation(
                        "Provide either an audio URL or base64 data, not both",
                    ))
                }
                (None, None) => {
                    return Err(validation("Either audio URL or base64 data is required"))
                }
            };
            json!({
                "to": recipient,
                "media": media,
                "mime_type": opts.mime_type.as_deref().unwrap_or("audio/mpeg"),
            })
        }

        MessageType::Location => {
            let (Some(latitude), Some(longitude)) = (opts.latitude, opts.longitude) else {
                return Err(validation(
                    "Latitude and longitude are required for location messages",
                ));
            };
            json!({
                "to": recipient,
                "latitude": latitude,
                "longitude": longitude,
                "name": opts.name.as_deref().unwrap_or(""),
                "address": opts.address.as_deref().unwrap_or(""),
            })
        }

        MessageType::Buttons => {
            let body = non_empty(req.message.as_deref()).ok_or_else(|| {
                validation("Message and buttons are required for button messages")
            })?;
            if opts.buttons.is_empty() || opts.buttons.len() > 3 {
                return Err(validation("Between 1 and 3 buttons are required"));
            }
            // Ids that collide after normalization are the caller's problem.
            let buttons: Vec<Value> = opts
                .buttons
                .iter()
                .map(|label| json!({ "reply": { "id": button_id(label), "title": label } }))
                .collect();
            json!({ "to": recipient, "body": body, "buttons": buttons })
        }
    };

    Ok(OutboundMessage {
        endpoint: message_type.endpoint(),
        payload,
    })
}

fn validation(msg: &str) -> ApiError {
    ApiError::Validation(msg.to_string())
}

fn non_empty(s: Option<&str>) -> Option<&str> {
    s.map(str::trim).filter(|s| !s.is_empty())
}

/// Exactly one of URL / base64, passed through as a direct string.
fn media_source(opts: &SendOptions, kind: &str) -> Result<String, ApiError> {
    match (&opts.url, &opts.base64) {
        (Some(url), None) => Ok(url.clone()),
        (None, Some(b64)) => Ok(b64.clone()),
        (Some(_), Some(_)) => Err(ApiError::Validation(format!(
            "Provide either a {kind} URL or base64 data, not both"
        ))),
        (None, None) => Err(ApiError::Validation(format!(
            "Either {kind} URL or base64 data is required"
        ))),
    }
}

/// Strip a data-URI prefix and check the remainder decodes as base64.
fn inline_data(b64: &str) -> Result<String, ApiError> {
    let data = match b64.split_once("base64,") {
        Some((_, rest)) => rest,
        None => b64,
    };
    base64::engine::general_purpose::STANDARD
        .decode(data)
        .map_err(|_| validation("Audio base64 data is not valid base64"))?;
    Ok(data.to_string())
}

/// Button label to reply id: lowercased, whitespace runs collapsed to `_`.
fn button_id(label: &str) -> String {
    label
        .to_lowercase()
        .split_whitespace()
        .collect::<Vec<_>>()
        .join("_")
}
