//! Integration tests for the directory service API.

use axum::{
    body::Body,
    http::{header, Method, Request, StatusCode},
    Router,
};
use phone_directory::{
    api::{create_router, AppState},
    store::Store,
};
use serde_json::{json, Value};
use tower::ServiceExt;

/// Create a test app backed by a fresh in-memory store.
fn test_app() -> Router {
    create_router(AppState::new(Store::memory()))
}

/// Send one request and decode the response.
async fn send(app: &Router, method: Method, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
    let request = match body {
        Some(json) => Request::builder()
            .method(method)
            .uri(uri)
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(json.to_string()))
            .unwrap(),
        None => Request::builder()
            .method(method)
            .uri(uri)
            .body(Body::empty())
            .unwrap(),
    };

    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let json = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap()
    };
    (status, json)
}

#[tokio::test]
async fn test_health_endpoint() {
    let app = test_app();

    let (status, body) = send(&app, Method::GET, "/health", None).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "ok");
    assert_eq!(body["store_healthy"], true);
}

#[tokio::test]
async fn test_lookup_missing_entry_returns_not_found() {
    let app = test_app();

    let (status, body) = send(&app, Method::GET, "/+14155551234", None).await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["code"], "NOT_FOUND");
}

#[tokio::test]
async fn test_create_then_lookup() {
    let app = test_app();

    let (status, body) = send(
        &app,
        Method::POST,
        "/",
        Some(json!({"phone": "+15551234567", "address": "1 Main St"})),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["phone"], "+15551234567");
    assert_eq!(body["address"], "1 Main St");

    let (status, body) = send(&app, Method::GET, "/+15551234567", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["phone"], "+15551234567");
    assert_eq!(body["address"], "1 Main St");
}

#[tokio::test]
async fn test_create_normalizes_the_key() {
    let app = test_app();

    // Created with punctuation, stored and returned canonicalized
    let (status, body) = send(
        &app,
        Method::POST,
        "/",
        Some(json!({"phone": "+1 (555) 123-4567", "address": "1 Main St"})),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["phone"], "+15551234567");

    // A different spelling of the same number resolves to the same entry
    let (status, body) = send(&app, Method::GET, "/15551234567", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["address"], "1 Main St");
}

#[tokio::test]
async fn test_duplicate_create_conflicts_and_preserves_the_first_address() {
    let app = test_app();

    send(
        &app,
        Method::POST,
        "/",
        Some(json!({"phone": "+15551234567", "address": "1 Main St"})),
    )
    .await;

    let (status, body) = send(
        &app,
        Method::POST,
        "/",
        Some(json!({"phone": "+15551234567", "address": "2 Oak St"})),
    )
    .await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(body["code"], "DUPLICATE_ENTRY");

    let (status, body) = send(&app, Method::GET, "/+15551234567", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["address"], "1 Main St");
}

#[tokio::test]
async fn test_replace_missing_entry_does_not_create() {
    let app = test_app();

    let (status, body) = send(
        &app,
        Method::PUT,
        "/+15551234567",
        Some(json!({"address": "3 Elm St"})),
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["code"], "NOT_FOUND");

    // Still absent afterwards
    let (status, _) = send(&app, Method::GET, "/+15551234567", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_replace_rejects_a_mismatched_body_phone() {
    let app = test_app();

    send(
        &app,
        Method::POST,
        "/",
        Some(json!({"phone": "+15551234567", "address": "1 Main St"})),
    )
    .await;

    let (status, body) = send(
        &app,
        Method::PUT,
        "/+15551234567",
        Some(json!({"address": "3 Elm St", "phone": "+14155551234"})),
    )
    .await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(body["code"], "INVALID_PHONE_NUMBER");
}

#[tokio::test]
async fn test_replace_accepts_an_agreeing_body_phone() {
    let app = test_app();

    send(
        &app,
        Method::POST,
        "/",
        Some(json!({"phone": "+15551234567", "address": "1 Main St"})),
    )
    .await;

    // Body phone in a different spelling of the same number is fine
    let (status, body) = send(
        &app,
        Method::PUT,
        "/+15551234567",
        Some(json!({"address": "3 Elm St", "phone": "+1 (555) 123-4567"})),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["address"], "3 Elm St");
}

#[tokio::test]
async fn test_delete_missing_entry_returns_not_found() {
    let app = test_app();

    let (status, body) = send(&app, Method::DELETE, "/+15551234567", None).await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["code"], "NOT_FOUND");
}

#[tokio::test]
async fn test_invalid_phone_number_rejected_on_every_endpoint() {
    let app = test_app();

    let (status, body) = send(&app, Method::GET, "/not-a-phone", None).await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(body["code"], "INVALID_PHONE_NUMBER");

    let (status, _) = send(
        &app,
        Method::POST,
        "/",
        Some(json!({"phone": "not-a-phone", "address": "1 Main St"})),
    )
    .await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);

    let (status, _) = send(
        &app,
        Method::PUT,
        "/not-a-phone",
        Some(json!({"address": "1 Main St"})),
    )
    .await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);

    let (status, _) = send(&app, Method::DELETE, "/not-a-phone", None).await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
}

#[tokio::test]
async fn test_empty_address_rejected_on_writes() {
    let app = test_app();

    let (status, body) = send(
        &app,
        Method::POST,
        "/",
        Some(json!({"phone": "+15551234567", "address": "  "})),
    )
    .await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(body["code"], "EMPTY_ADDRESS");

    let (status, _) = send(
        &app,
        Method::PUT,
        "/+15551234567",
        Some(json!({"address": ""})),
    )
    .await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
}

/// The full lifecycle: create, look up, conflict, replace, delete, gone.
#[tokio::test]
async fn test_entry_lifecycle() {
    let app = test_app();

    let (status, body) = send(
        &app,
        Method::POST,
        "/",
        Some(json!({"phone": "+15551234567", "address": "1 Main St"})),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["phone"], "+15551234567");
    assert_eq!(body["address"], "1 Main St");

    let (status, body) = send(&app, Method::GET, "/+15551234567", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["address"], "1 Main St");

    let (status, _) = send(
        &app,
        Method::POST,
        "/",
        Some(json!({"phone": "+15551234567", "address": "2 Oak St"})),
    )
    .await;
    assert_eq!(status, StatusCode::CONFLICT);

    let (_, body) = send(&app, Method::GET, "/+15551234567", None).await;
    assert_eq!(body["address"], "1 Main St");

    let (status, body) = send(
        &app,
        Method::PUT,
        "/+15551234567",
        Some(json!({"address": "3 Elm St"})),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["address"], "3 Elm St");

    let (_, body) = send(&app, Method::GET, "/+15551234567", None).await;
    assert_eq!(body["address"], "3 Elm St");

    // Delete returns the entry as it stood before deletion
    let (status, body) = send(&app, Method::DELETE, "/+15551234567", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["phone"], "+15551234567");
    assert_eq!(body["address"], "3 Elm St");

    let (status, _) = send(&app, Method::GET, "/+15551234567", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}
