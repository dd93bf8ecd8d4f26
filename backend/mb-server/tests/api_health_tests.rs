//! Integration tests for health endpoints
mod common;

use crate::common::{create_test_app_state, create_test_user, join, open_room, request, send};

use axum::http::StatusCode;
use http_body_util::BodyExt;
use tower::ServiceExt;

use mb_server::routes::build_router;

#[tokio::test]
async fn test_health_reports_components() {
    let state = create_test_app_state().await;
    let alice = create_test_user(&state.pool, "alice").await;
    let app = build_router(state.clone());
    let room_id = open_room(&app, 1, 4, alice).await;
    join(&app, room_id, alice).await;

    let (status, json) = send(&app, request("GET", "/health", None, None)).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["status"], "healthy");
    assert_eq!(json["components"]["database"], "operational");
    assert_eq!(json["components"]["broadcaster"], "operational");
    assert_eq!(json["trackedRooms"], 1);
    assert_eq!(json["lanes"], 1);
}

#[tokio::test]
async fn given_unknown_rooms_requested_when_health_checked_then_lane_count_unchanged() {
    // Given
    let state = create_test_app_state().await;
    let alice = create_test_user(&state.pool, "alice").await;
    let app = build_router(state.clone());
    for room_id in 500..520 {
        let uri = format!("/api/v1/rooms/{}/occupancy", room_id);
        let (status, _) = send(&app, request("GET", &uri, Some(alice), None)).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
    }

    // When
    let (status, json) = send(&app, request("GET", "/health", None, None)).await;

    // Then
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["lanes"], 0);
}

#[tokio::test]
async fn test_liveness_ok() {
    let state = create_test_app_state().await;
    let app = build_router(state);

    let response = app.oneshot(request("GET", "/live", None, None)).await.unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = response.into_body().collect().await.unwrap().to_bytes();
    assert_eq!(&body[..], b"OK");
}

#[tokio::test]
async fn test_readiness_ok_when_running() {
    let state = create_test_app_state().await;
    let app = build_router(state);

    let response = app.oneshot(request("GET", "/ready", None, None)).await.unwrap();

    assert_eq!(response.status(), StatusCode::OK);
}

#[tokio::test]
async fn test_readiness_unavailable_after_shutdown() {
    let state = create_test_app_state().await;
    let app = build_router(state.clone());
    state.coordinator.shutdown().await;

    let response = app
        .clone()
        .oneshot(request("GET", "/ready", None, None))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::SERVICE_UNAVAILABLE);

    let (_, json) = send(&app, request("GET", "/health", None, None)).await;
    assert_eq!(json["status"], "degraded");
    assert_eq!(json["components"]["broadcaster"], "shut_down");
}

#[tokio::test]
async fn test_readiness_unavailable_when_database_closed() {
    let state = create_test_app_state().await;
    let app = build_router(state.clone());
    state.pool.close().await;

    let response = app.oneshot(request("GET", "/ready", None, None)).await.unwrap();

    assert_eq!(response.status(), StatusCode::SERVICE_UNAVAILABLE);
}
