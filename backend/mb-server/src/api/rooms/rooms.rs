//! Room REST API handlers
//!
//! A board owns at most one chat room. Opening and closing go through the
//! membership coordinator so the live state follows the stored rooms.

use crate::{AppState, ApiResult, CurrentUser, OpenRoomRequest, RoomResponse};

use mb_core::BoardId;

use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};

// =============================================================================
// Handlers
// =============================================================================

/// POST /api/v1/boards/:board_id/room
///
/// Open the chat room of a board
pub async fn open_room(
    State(state): State<AppState>,
    CurrentUser(user_id): CurrentUser,
    Path(board_id): Path<i64>,
    Json(req): Json<OpenRoomRequest>,
) -> ApiResult<(StatusCode, Json<RoomResponse>)> {
    let room = state
        .coordinator
        .open_room(BoardId(board_id), req.capacity)
        .await?;

    log::info!(
        "{} opened {} for board {} (capacity {})",
        user_id,
        room.id,
        board_id,
        room.capacity
    );

    Ok((StatusCode::CREATED, Json(RoomResponse { room: room.into() })))
}

/// DELETE /api/v1/boards/:board_id/room
///
/// Close the chat room of a board. Live streams of the room end.
pub async fn close_room(
    State(state): State<AppState>,
    CurrentUser(user_id): CurrentUser,
    Path(board_id): Path<i64>,
) -> ApiResult<StatusCode> {
    let room_id = state.coordinator.close_room(BoardId(board_id)).await?;

    log::info!("{} closed {} of board {}", user_id, room_id, board_id);

    Ok(StatusCode::NO_CONTENT)
}

/// GET /api/v1/boards/:board_id/room
///
/// Get the room of a board with its live occupancy
pub async fn get_room(
    State(state): State<AppState>,
    _user: CurrentUser,
    Path(board_id): Path<i64>,
) -> ApiResult<Json<RoomResponse>> {
    let room = state.coordinator.room_for_board(BoardId(board_id)).await?;

    Ok(Json(RoomResponse { room: room.into() }))
}
