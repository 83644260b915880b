//! Reusable test helpers for HTTP integration tests.
//!
//! Provides a router wired to a fake in-memory store, plus a stub gateway
//! server for tests that exercise the outbound path, so tests drive the
//! full axum stack without Postgres or the real gateway.
#![allow(dead_code)]

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use axum::body::Body;
use axum::extract::Request as AxumRequest;
use axum::http::{self, Method, Request, StatusCode};
use axum::Router;
use http_body_util::BodyExt;
use serde_json::{json, Value};
use tokio::sync::Mutex;
use tower::ServiceExt;

use wd_server::api::{create_router, AppState};
use wd_server::config::Config;
use wd_server::gateway::GatewayClient;
use wd_server::store::{ContactRecord, MessageRecord, Stats, Store, StoreError};

/// Token `Config::default_for_test()` expects on webhooks.
pub const TEST_TOKEN: &str = "test-token";

/// In-memory [`Store`] fake recording every upsert.
///
/// Mirrors the Postgres store's one behavioral rule: a message upsert
/// fails unless its counterparty contact is already present.
#[derive(Default)]
pub struct FakeStore {
    pub contacts: Mutex<Vec<ContactRecord>>,
    pub messages: Mutex<Vec<MessageRecord>>,
}

impl FakeStore {
    pub async fn contact_count(&self) -> usize {
        self.contacts.lock().await.len()
    }

    pub async fn message_count(&self) -> usize {
        self.messages.lock().await.len()
    }
}

#[async_trait]
impl Store for FakeStore {
    async fn upsert_contact(&self, contact: &ContactRecord) -> Result<(), StoreError> {
        let mut contacts = self.contacts.lock().await;
        contacts.retain(|c| c.whatsapp_id != contact.whatsapp_id);
        contacts.push(contact.clone());
        Ok(())
    }

    async fn upsert_message(&self, message: &MessageRecord) -> Result<(), StoreError> {
        let counterparty = if message.sender == "me" {
            &message.recipient
        } else {
            &message.sender
        };
        {
            let contacts = self.contacts.lock().await;
            if !contacts.iter().any(|c| &c.whatsapp_id == counterparty) {
                return Err(StoreError::ContactNotFound(counterparty.clone()));
            }
        }
        let mut messages = self.messages.lock().await;
        messages.retain(|m| m.whatsapp_id != message.whatsapp_id);
        messages.push(message.clone());
        Ok(())
    }

    async fn stats(&self) -> Result<Stats, StoreError> {
        let messages = self.messages.lock().await;
        Ok(Stats {
            total_messages: messages.len() as i64,
            ..Stats::default()
        })
    }
}

/// Router plus handles on its collaborators.
pub struct TestApp {
    pub router: Router,
    pub store: Arc<FakeStore>,
}

/// Build an app whose gateway client points at `gateway_url`.
pub fn test_app_with_gateway(gateway_url: &str) -> TestApp {
    let mut config = Config::default_for_test();
    config.gateway_url = gateway_url.to_string();

    let gateway = GatewayClient::new(
        &config.gateway_url,
        &config.gateway_token,
        Duration::from_secs(config.gateway_timeout_secs),
    )
    .expect("Failed to build gateway client");

    let store = Arc::new(FakeStore::default());
    let state = AppState::new(config, gateway, store.clone());

    TestApp {
        router: create_router(state),
        store,
    }
}

/// Build an app whose gateway is unreachable. Tests using this expect no
/// gateway traffic; an unexpected call surfaces as a 500.
pub fn test_app() -> TestApp {
    test_app_with_gateway("http://127.0.0.1:9")
}

/// Requests seen by the stub gateway: (path, JSON body).
pub type SeenRequests = Arc<Mutex<Vec<(String, Value)>>>;

/// Spawn a stub gateway that answers every request with `status` and
/// `response`, recording each request's path and body.
pub async fn spawn_stub_gateway(status: StatusCode, response: Value) -> (String, SeenRequests) {
    let seen: SeenRequests = Arc::default();
    let seen_handler = seen.clone();

    let app = Router::new().fallback(move |req: AxumRequest| {
        let seen = seen_handler.clone();
        let response = response.clone();
        async move {
            let path = req.uri().path().to_string();
            let bytes = axum::body::to_bytes(req.into_body(), usize::MAX)
                .await
                .unwrap_or_default();
            let body = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
            seen.lock().await.push((path, body));
            (status, axum::Json(response))
        }
    });

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("Failed to bind stub gateway");
    let addr = listener.local_addr().expect("No local addr");
    tokio::spawn(async move {
        axum::serve(listener, app).await.expect("Stub gateway exited");
    });

    (format!("http://{addr}"), seen)
}

/// Send a JSON request through the router and decode the JSON response.
pub async fn request_json(
    router: &Router,
    method: Method,
    uri: &str,
    headers: &[(&str, &str)],
    body: Value,
) -> (StatusCode, Value) {
    let mut builder = Request::builder()
        .method(method)
        .uri(uri)
        .header(http::header::CONTENT_TYPE, "application/json");
    for (name, value) in headers {
        builder = builder.header(*name, *value);
    }
    let request = builder
        .body(Body::from(body.to_string()))
        .expect("Failed to build request");

    let response = router
        .clone()
        .oneshot(request)
        .await
        .expect("Request failed");
    let status = response.status();
    let bytes = response
        .into_body()
        .collect()
        .await
        .expect("Failed to read body")
        .to_bytes();
    let body = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap_or(Value::Null)
    };

    (status, body)
}

/// A webhook envelope with the given event and data.
pub fn envelope(event: &str, data: Value) -> Value {
    json!({ "event": event, "data": data, "timestamp": 1_722_500_000 })
}

/// A contact event payload for the given gateway id.
pub fn contact_data(id: &str) -> Value {
    json!({
        "id": id,
        "name": "Ada",
        "pushname": "ada",
        "type": "individual",
    })
}

/// A message event payload from `from` to `to`.
pub fn message_data(id: &str, from: &str, to: &str) -> Value {
    json!({
        "id": id,
        "from": from,
        "to": to,
        "type": "text",
        "timestamp": 1_722_500_000,
        "content": { "body": "hello" },
    })
}
