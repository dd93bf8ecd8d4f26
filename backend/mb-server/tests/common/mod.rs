#![allow(dead_code)]

//! Test infrastructure for mb-server API tests

use mb_core::UserId;
use mb_db::UserRepository;
use mb_live::LiveConfig;
use mb_server::AppState;

use std::time::Duration;

use axum::{
    Router,
    body::Body,
    http::{Request, StatusCode},
};
use http_body_util::BodyExt;
use sqlx::SqlitePool;
use tower::ServiceExt;

/// Create a test pool with in-memory SQLite
pub async fn create_test_pool() -> SqlitePool {
    mb_db::connect_in_memory()
        .await
        .expect("Failed to create test database")
}

/// Create AppState for testing
pub async fn create_test_app_state() -> AppState {
    let pool = create_test_pool().await;

    AppState::new(
        pool,
        LiveConfig::new(64, Duration::from_secs(5)),
        Duration::from_secs(15),
    )
}

/// Create a test user
pub async fn create_test_user(pool: &SqlitePool, username: &str) -> UserId {
    UserRepository::new(pool.clone())
        .create(username)
        .await
        .expect("Failed to create test user")
}

/// Build a request, optionally as a user and with a JSON body
pub fn request(
    method: &str,
    uri: &str,
    user: Option<UserId>,
    body: Option<serde_json::Value>,
) -> Request<Body> {
    let mut builder = Request::builder().method(method).uri(uri);

    if let Some(user) = user {
        builder = builder.header("X-User-Id", user.get().to_string());
    }

    match body {
        Some(json) => builder
            .header("Content-Type", "application/json")
            .body(Body::from(json.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    }
}

/// Send a request and decode the JSON response (Null for empty bodies)
pub async fn send(app: &Router, request: Request<Body>) -> (StatusCode, serde_json::Value) {
    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let body = response.into_body().collect().await.unwrap().to_bytes();

    let json = if body.is_empty() {
        serde_json::Value::Null
    } else {
        serde_json::from_slice(&body).unwrap()
    };

    (status, json)
}

/// Open a room for a board through the API, returning its id
pub async fn open_room(app: &Router, board_id: i64, capacity: i64, owner: UserId) -> i64 {
    let (status, json) = send(
        app,
        request(
            "POST",
            &format!("/api/v1/boards/{}/room", board_id),
            Some(owner),
            Some(serde_json::json!({ "capacity": capacity })),
        ),
    )
    .await;

    assert_eq!(status, StatusCode::CREATED);
    json["room"]["id"].as_i64().unwrap()
}

/// Join a room through the API
pub async fn join(app: &Router, room_id: i64, user: UserId) -> (StatusCode, serde_json::Value) {
    send(
        app,
        request("POST", &format!("/api/v1/rooms/{}/join", room_id), Some(user), None),
    )
    .await
}

/// Leave a room through the API
pub async fn leave(app: &Router, room_id: i64, user: UserId) -> (StatusCode, serde_json::Value) {
    send(
        app,
        request("DELETE", &format!("/api/v1/rooms/{}/leave", room_id), Some(user), None),
    )
    .await
}
