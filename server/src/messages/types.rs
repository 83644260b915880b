//! Outbound Message Types

use serde::Deserialize;

/// Message types accepted by the send endpoint.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MessageType {
    Text,
    Image,
    Document,
    Audio,
    Location,
    Buttons,
}

impl MessageType {
    /// Parse from the wire form (e.g., `"text"`).
    pub fn parse_str(s: &str) -> Option<Self> {
        match s {
            "text" => Some(Self::Text),
            "image" => Some(Self::Image),
            "document" => Some(Self::Document),
            "audio" => Some(Self::Audio),
            "location" => Some(Self::Location),
            "buttons" => Some(Self::Buttons),
            _ => None,
        }
    }

    /// Convert to the wire form.
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Text => "text",
            Self::Image => "image",
            Self::Document => "document",
            Self::Audio => "audio",
            Self::Location => "location",
            Self::Buttons => "buttons",
        }
    }

    /// Gateway endpoint this message type is delivered through.
    pub const fn endpoint(&self) -> &'static str {
        match self {
            Self::Text => "messages/text",
            Self::Image => "messages/image",
            Self::Document => "messages/document",
            Self::Audio => "messages/audio",
            Self::Location => "messages/location",
            Self::Buttons => "messages/buttons",
        }
    }
}

impl std::fmt::Display for MessageType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Body of `POST /api/messages/send`.
///
/// `type` defaults to `text` when omitted; unknown values are rejected
/// with `UNSUPPORTED_TYPE` by the handler.
#[derive(Debug, Deserialize)]
pub struct SendMessageRequest {
    pub to: String,
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default, rename = "type")]
    pub message_type: Option<String>,
    #[serde(default)]
    pub options: SendOptions,
}

/// Type-dependent options for an outbound message.
#[derive(Debug, Default, Deserialize)]
pub struct SendOptions {
    pub url: Option<String>,
    pub base64: Option<String>,
    pub filename: Option<String>,
    #[serde(rename = "mimeType")]
    pub mime_type: Option<String>,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
    pub name: Option<String>,
    pub address: Option<String>,
    #[serde(default)]
    pub buttons: Vec<String>,
}
