//! Whapi Gateway Client
//!
//! Authenticated HTTP calls to the external messaging gateway. Non-success
//! responses and transport failures are normalized into [`GatewayError`].
//! The client itself never retries; webhook redelivery by the gateway is
//! the only retry in the system.

use std::time::Duration;

use reqwest::{Method, StatusCode};
use serde_json::{json, Value};
use thiserror::Error;
use tracing::error;

/// Gateway call errors.
#[derive(Debug, Error)]
pub enum GatewayError {
    /// The gateway answered with a non-success status.
    #[error("{message}")]
    Api {
        status: StatusCode,
        message: String,
    },

    /// No usable response from the gateway.
    #[error("request failed")]
    Transport(#[source] reqwest::Error),
}

/// Client for the external Whapi gateway.
#[derive(Debug, Clone)]
pub struct GatewayClient {
    http: reqwest::Client,
    base_url: String,
    access_token: String,
}

impl GatewayClient {
    /// Build a client with a bearer token and request timeout.
    pub fn new(base_url: &str, access_token: &str, timeout: Duration) -> anyhow::Result<Self> {
        let http = reqwest::Client::builder().timeout(timeout).build()?;
        Ok(Self {
            http,
            base_url: base_url.trim_end_matches('/').to_string(),
            access_token: access_token.to_string(),
        })
    }

    /// POST a JSON payload to a gateway endpoint.
    pub async fn post(&self, endpoint: &str, payload: &Value) -> Result<Value, GatewayError> {
        self.request(Method::POST, endpoint, Some(payload)).await
    }

    /// GET a gateway endpoint.
    pub async fn get(&self, endpoint: &str) -> Result<Value, GatewayError> {
        self.request(Method::GET, endpoint, None).await
    }

    /// DELETE a gateway endpoint with a JSON payload.
    pub async fn delete(&self, endpoint: &str, payload: &Value) -> Result<Value, GatewayError> {
        self.request(Method::DELETE, endpoint, Some(payload)).await
    }

    /// Fetch the gateway's contact list.
    pub async fn get_contacts(&self) -> Result<Value, GatewayError> {
        self.get("contacts").await
    }

    /// Fetch message history for a contact.
    pub async fn get_messages(&self, contact_id: &str) -> Result<Value, GatewayError> {
        self.get(&format!("messages/{contact_id}")).await
    }

    /// Create a group with the given recipient addresses.
    pub async fn create_group(
        &self,
        name: &str,
        participants: &[String],
    ) -> Result<Value, GatewayError> {
        self.post("groups", &json!({ "name": name, "participants": participants }))
            .await
    }

    /// Add participants to an existing group.
    pub async fn add_participants(
        &self,
        group_id: &str,
        participants: &[String],
    ) -> Result<Value, GatewayError> {
        self.post(
            &format!("groups/{group_id}/participants"),
            &json!({ "participants": participants }),
        )
        .await
    }

    /// Remove participants from an existing group.
    pub async fn remove_participants(
        &self,
        group_id: &str,
        participants: &[String],
    ) -> Result<Value, GatewayError> {
        self.delete(
            &format!("groups/{group_id}/participants"),
            &json!({ "participants": participants }),
        )
        .await
    }

    async fn request(
        &self,
        method: Method,
        endpoint: &str,
        body: Option<&Value>,
    ) -> Result<Value, GatewayError> {
        let url = format!("{}/{}", self.base_url, endpoint);

        let mut req = self
            .http
            .request(method, &url)
            .bearer_auth(&self.access_token)
            .header("Content-Type", "application/json");
        if let Some(body) = body {
            req = req.json(body);
        }

        let resp = req.send().await.map_err(|e| {
            error!(endpoint, error = %e, "Gateway request failed");
            GatewayError::Transport(e)
        })?;

        let status = resp.status();
        if status.is_success() {
            return resp.json().await.map_err(|e| {
                error!(endpoint, error = %e, "Gateway response was not JSON");
                GatewayError::Transport(e)
            });
        }

        let body: Value = resp.json().await.unwrap_or(Value::Null);
        let message = extract_error_message(status, &body);
        error!(endpoint, status = status.as_u16(), %message, "Gateway API error");
        Err(GatewayError::Api { status, message })
    }
}

/// Extract a human-readable message from a gateway error response.
///
/// Prefers a string `error` field, then `error.message`, then `message`,
/// falling back to the HTTP status text.
fn extract_error_message(status: StatusCode, body: &Value) -> String {
    if let Some(s) = body.get("error").and_then(Value::as_str) {
        return s.to_string();
    }
    if let Some(s) = body.pointer("/error/message").and_then(Value::as_str) {
        return s.to_string();
    }
    if let Some(s) = body.get("message").and_then(Value::as_str) {
        return s.to_string();
    }
    format!(
        "API Error: {}",
        status.canonical_reason().unwrap_or("unknown")
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn prefers_string_error_field() {
        let body = json!({ "error": "token expired", "message": "ignored" });
        assert_eq!(
            extract_error_message(StatusCode::UNAUTHORIZED, &body),
            "token expired"
        );
    }

    #[test]
    fn falls_back_to_nested_error_message() {
        let body = json!({ "error": { "message": "bad recipient" } });
        assert_eq!(
            extract_error_message(StatusCode::BAD_REQUEST, &body),
            "bad recipient"
        );
    }

    #[test]
    fn falls_back_to_top_level_message() {
        let body = json!({ "message": "quota exceeded" });
        assert_eq!(
            extract_error_message(StatusCode::TOO_MANY_REQUESTS, &body),
            "quota exceeded"
        );
    }

    #[test]
    fn falls_back_to_status_text() {
        assert_eq!(
            extract_error_message(StatusCode::BAD_GATEWAY, &Value::Null),
            "API Error: Bad Gateway"
        );
    }
}
