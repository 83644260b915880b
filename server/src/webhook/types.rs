//! Webhook Types
//!
//! Envelope and event payload shapes for gateway callbacks.

use serde::Deserialize;
use serde_json::Value;

use crate::store::{ContactRecord, MessageRecord};

/// Outer envelope of every gateway webhook callback.
#[derive(Debug, Clone, Deserialize)]
pub struct WebhookEnvelope {
    pub event: String,
    pub data: Value,
    pub timestamp: i64,
}

/// Known webhook event types.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WebhookEvent {
    /// A message was observed by the gateway.
    Message,
    /// A delivery status changed. Observed, not stored.
    Status,
    /// A contact appeared or changed.
    Contact,
}

impl WebhookEvent {
    /// Parse from the envelope's `event` field.
    pub fn parse_str(s: &str) -> Option<Self> {
        match s {
            "message" => Some(Self::Message),
            "status" => Some(Self::Status),
            "contact" => Some(Self::Contact),
            _ => None,
        }
    }

    /// Convert to the wire form.
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Message => "message",
            Self::Status => "status",
            Self::Contact => "contact",
        }
    }
}

impl std::fmt::Display for WebhookEvent {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Contact payload carried by `contact` events.
#[derive(Debug, Clone, Deserialize)]
pub struct ContactPayload {
    pub id: String,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub pushname: Option<String>,
    #[serde(rename = "type")]
    pub kind: String,
    #[serde(default)]
    pub image: Option<String>,
}

impl From<ContactPayload> for ContactRecord {
    fn from(p: ContactPayload) -> Self {
        Self {
            whatsapp_id: p.id,
            name: p.name,
            pushname: p.pushname,
            kind: p.kind,
            image: p.image,
        }
    }
}

/// Message payload carried by `message` events.
#[derive(Debug, Clone, Deserialize)]
pub struct MessagePayload {
    pub id: String,
    pub from: String,
    pub to: String,
    #[serde(rename = "type")]
    pub kind: String,
    pub timestamp: i64,
    #[serde(default)]
    pub content: Value,
}

impl From<MessagePayload> for MessageRecord {
    fn from(p: MessagePayload) -> Self {
        Self {
            whatsapp_id: p.id,
            sender: p.from,
            recipient: p.to,
            kind: p.kind,
            content: p.content,
            timestamp: p.timestamp,
        }
    }
}
