use crate::AppState;

use axum::{
    Json,
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde_json::json;

/// GET /health - Comprehensive health check with component status
pub async fn health(State(state): State<AppState>) -> Response {
    let database_ok = ping_database(&state).await;
    let broadcaster = state.coordinator.broadcaster();
    let broadcaster_ok = !broadcaster.is_shut_down().await;
    let live_channels = broadcaster.channel_count().await;

    let status = if database_ok && broadcaster_ok {
        "healthy"
    } else {
        "degraded"
    };
    let database = if database_ok {
        "operational"
    } else {
        "unreachable"
    };
    let broadcaster_state = if broadcaster_ok {
        "operational"
    } else {
        "shut_down"
    };

    let health = json!({
        "status": status,
        "version": env!("CARGO_PKG_VERSION"),
        "components": {
            "database": database,
            "broadcaster": broadcaster_state,
        },
        "trackedRooms": state.coordinator.tracker().tracked_room_count(),
        "lanes": state.coordinator.lane_count(),
        "liveChannels": live_channels,
        "timestamp": chrono::Utc::now().to_rfc3339(),
    });

    (StatusCode::OK, Json(health)).into_response()
}

/// GET /live - Liveness probe (is the process alive?)
pub async fn liveness() -> Response {
    (StatusCode::OK, "OK").into_response()
}

/// GET /ready - Readiness probe (ready to accept traffic?)
pub async fn readiness(State(state): State<AppState>) -> Response {
    if state.coordinator.broadcaster().is_shut_down().await {
        return (StatusCode::SERVICE_UNAVAILABLE, "Shutting down").into_response();
    }

    if !ping_database(&state).await {
        return (StatusCode::SERVICE_UNAVAILABLE, "Database unavailable").into_response();
    }

    (StatusCode::OK, "Ready").into_response()
}

async fn ping_database(state: &AppState) -> bool {
    match sqlx::query("SELECT 1").execute(&state.pool).await {
        Ok(_) => true,
        Err(e) => {
            log::warn!("Database ping failed: {}", e);
            false
        }
    }
}
