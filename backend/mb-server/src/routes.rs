use crate::{
    AppState, admin, board_updates, close_room, get_occupancy, get_room, health, join_room,
    leave_room, list_my_rooms, open_room, room_updates,
};

use axum::{
    Router,
    routing::{delete, get, post},
};
use tower_http::cors::{Any, CorsLayer};

/// Build the application router with all endpoints
pub fn build_router(state: AppState) -> Router {
    Router::new()
        // Rooms
        .route(
            "/api/v1/boards/{board_id}/room",
            post(open_room).get(get_room).delete(close_room),
        )
        // Memberships
        .route("/api/v1/rooms/{room_id}/join", post(join_room))
        .route("/api/v1/rooms/{room_id}/leave", delete(leave_room))
        .route("/api/v1/rooms/{room_id}/occupancy", get(get_occupancy))
        .route("/api/v1/users/me/rooms", get(list_my_rooms))
        // Live streams
        .route("/sse/rooms/{room_id}", get(room_updates))
        .route("/sse/boards/{board_id}", get(board_updates))
        // Health check endpoints
        .route("/health", get(health::health))
        .route("/live", get(health::liveness))
        .route("/ready", get(health::readiness))
        // Admin endpoints
        .route(
            "/admin/rooms/{room_id}/reconcile",
            post(admin::reconcile_handler),
        )
        // Add shared state
        .with_state(state)
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
}
