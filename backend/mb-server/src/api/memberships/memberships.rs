//! Membership REST API handlers
//!
//! Join and leave are the only writes; every accepted one is pushed to the
//! room's live subscribers before the response is returned.

use crate::api::memberships::list_rooms_query::{DEFAULT_LIMIT, MAX_LIMIT};
use crate::{
    ApiError, ApiResult, AppState, CurrentUser, JoinedRoomDto, JoinedRoomListResponse,
    ListRoomsQuery, OccupancyResponse,
};

use mb_core::RoomId;
use mb_live::membership_span;

use std::panic::Location;

use axum::{
    Json,
    extract::{Path, Query, State},
};
use error_location::ErrorLocation;
use tracing::Instrument;

// =============================================================================
// Handlers
// =============================================================================

/// POST /api/v1/rooms/:room_id/join
///
/// Join a room as the caller
pub async fn join_room(
    State(state): State<AppState>,
    CurrentUser(user_id): CurrentUser,
    Path(room_id): Path<i64>,
) -> ApiResult<Json<OccupancyResponse>> {
    let room_id = RoomId(room_id);

    let outcome = state
        .coordinator
        .join(room_id, user_id)
        .instrument(membership_span("join", room_id, user_id))
        .await?;

    Ok(Json(outcome.into()))
}

/// DELETE /api/v1/rooms/:room_id/leave
///
/// Leave a room as the caller
pub async fn leave_room(
    State(state): State<AppState>,
    CurrentUser(user_id): CurrentUser,
    Path(room_id): Path<i64>,
) -> ApiResult<Json<OccupancyResponse>> {
    let room_id = RoomId(room_id);

    let outcome = state
        .coordinator
        .leave(room_id, user_id)
        .instrument(membership_span("leave", room_id, user_id))
        .await?;

    Ok(Json(outcome.into()))
}

/// GET /api/v1/rooms/:room_id/occupancy
///
/// Current occupancy of a room
pub async fn get_occupancy(
    State(state): State<AppState>,
    _user: CurrentUser,
    Path(room_id): Path<i64>,
) -> ApiResult<Json<OccupancyResponse>> {
    let room_id = RoomId(room_id);
    let current_occupancy = state.coordinator.current_occupancy(room_id).await?;

    Ok(Json(OccupancyResponse {
        room_id: room_id.get(),
        current_occupancy,
    }))
}

/// GET /api/v1/users/me/rooms
///
/// Rooms the caller has joined, most recent first
pub async fn list_my_rooms(
    State(state): State<AppState>,
    CurrentUser(user_id): CurrentUser,
    Query(query): Query<ListRoomsQuery>,
) -> ApiResult<Json<JoinedRoomListResponse>> {
    let limit = query.limit.unwrap_or(DEFAULT_LIMIT);
    if !(1..=MAX_LIMIT).contains(&limit) {
        return Err(ApiError::Validation {
            code: "VALIDATION_ERROR",
            message: format!("limit must be between 1 and {}", MAX_LIMIT),
            field: Some("limit".into()),
            location: ErrorLocation::from(Location::caller()),
        });
    }
    let offset = query.offset.unwrap_or(0);

    let rooms = state
        .coordinator
        .rooms_for_user(user_id, limit, offset)
        .await?;

    Ok(Json(JoinedRoomListResponse {
        rooms: rooms.into_iter().map(JoinedRoomDto::from).collect(),
    }))
}
