//! HTTP integration tests for group management.

mod helpers;

use axum::http::{Method, StatusCode};
use helpers::{request_json, spawn_stub_gateway, test_app, test_app_with_gateway};
use serde_json::json;

#[tokio::test]
async fn unknown_action_is_rejected() {
    let app = test_app();

    let (status, body) = request_json(
        &app.router,
        Method::POST,
        "/api/groups",
        &[],
        json!({ "action": "rename", "participants": ["08012345678"] }),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "UNSUPPORTED_TYPE");
}

#[tokio::test]
async fn empty_participants_is_rejected() {
    let app = test_app();

    let (status, body) = request_json(
        &app.router,
        Method::POST,
        "/api/groups",
        &[],
        json!({ "action": "create", "name": "Friends", "participants": [] }),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "VALIDATION_ERROR");
}

#[tokio::test]
async fn invalid_participant_number_is_rejected() {
    let app = test_app();

    let (status, body) = request_json(
        &app.router,
        Method::POST,
        "/api/groups",
        &[],
        json!({ "action": "create", "name": "Friends", "participants": ["not-a-number"] }),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "VALIDATION_ERROR");
}

#[tokio::test]
async fn create_requires_a_name() {
    let app = test_app();

    let (status, body) = request_json(
        &app.router,
        Method::POST,
        "/api/groups",
        &[],
        json!({ "action": "create", "name": "   ", "participants": ["08012345678"] }),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "VALIDATION_ERROR");
}

#[tokio::test]
async fn create_normalizes_participants_and_forwards() {
    let (gateway_url, seen) =
        spawn_stub_gateway(StatusCode::OK, json!({ "group_id": "g1" })).await;
    let app = test_app_with_gateway(&gateway_url);

    let (status, body) = request_json(
        &app.router,
        Method::POST,
        "/api/groups",
        &[],
        json!({
            "action": "create",
            "name": "  Friends  ",
            "participants": ["08012345678", "2347098765432"],
        }),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["success"], true);
    assert_eq!(body["message"], "Group created successfully");

    let seen = seen.lock().await;
    let (path, payload) = &seen[0];
    assert_eq!(path, "/groups");
    assert_eq!(payload["name"], "Friends");
    assert_eq!(payload["participants"][0], "2348012345678@s.whatsapp.net");
    assert_eq!(payload["participants"][1], "2347098765432@s.whatsapp.net");
}

#[tokio::test]
async fn add_participants_requires_group_id() {
    let app = test_app();

    let (status, body) = request_json(
        &app.router,
        Method::POST,
        "/api/groups",
        &[],
        json!({ "action": "add_participants", "participants": ["08012345678"] }),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "VALIDATION_ERROR");
}

#[tokio::test]
async fn add_participants_forwards_to_group_endpoint() {
    let (gateway_url, seen) = spawn_stub_gateway(StatusCode::OK, json!({ "added": 1 })).await;
    let app = test_app_with_gateway(&gateway_url);

    let (status, body) = request_json(
        &app.router,
        Method::POST,
        "/api/groups",
        &[],
        json!({
            "action": "add_participants",
            "groupId": "g1",
            "participants": ["08012345678"],
        }),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["message"], "Participants added successfully");
    assert_eq!(seen.lock().await[0].0, "/groups/g1/participants");
}

#[tokio::test]
async fn remove_participants_forwards_to_group_endpoint() {
    let (gateway_url, seen) = spawn_stub_gateway(StatusCode::OK, json!({ "removed": 1 })).await;
    let app = test_app_with_gateway(&gateway_url);

    let (status, body) = request_json(
        &app.router,
        Method::POST,
        "/api/groups",
        &[],
        json!({
            "action": "remove_participants",
            "groupId": "g1",
            "participants": ["08012345678"],
        }),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["message"], "Participants removed successfully");

    let seen = seen.lock().await;
    let (path, payload) = &seen[0];
    assert_eq!(path, "/groups/g1/participants");
    assert_eq!(payload["participants"][0], "2348012345678@s.whatsapp.net");
}

#[tokio::test]
async fn gateway_error_propagates_as_500() {
    let (gateway_url, _seen) = spawn_stub_gateway(
        StatusCode::FORBIDDEN,
        json!({ "error": "not allowed to create groups" }),
    )
    .await;
    let app = test_app_with_gateway(&gateway_url);

    let (status, body) = request_json(
        &app.router,
        Method::POST,
        "/api/groups",
        &[],
        json!({ "action": "create", "name": "Friends", "participants": ["08012345678"] }),
    )
    .await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body["error"], "GATEWAY_ERROR");
    assert_eq!(body["message"], "not allowed to create groups");
}
