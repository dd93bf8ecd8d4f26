//! Live occupancy streams
//!
//! Each accepted join or leave is delivered as one Server-Sent Event whose
//! `data:` line is the JSON update. The stream ends when the room closes or
//! the server shuts down.

use crate::{ApiResult, AppState, CurrentUser};

use mb_core::{BoardId, RoomId, UpdateEvent};
use mb_live::RoomSubscription;

use std::convert::Infallible;
use std::time::Duration;

use axum::{
    extract::{Path, State},
    response::sse::{Event, KeepAlive, Sse},
};
use futures::{Stream, StreamExt};

const UPDATE_EVENT_NAME: &str = "occupancy";

/// GET /sse/rooms/:room_id
pub async fn room_updates(
    State(state): State<AppState>,
    CurrentUser(user_id): CurrentUser,
    Path(room_id): Path<i64>,
) -> ApiResult<Sse<impl Stream<Item = Result<Event, Infallible>>>> {
    let subscription = state.coordinator.subscribe(RoomId(room_id)).await?;

    log::info!("{} subscribed to {}", user_id, subscription.room_id());

    Ok(into_sse(subscription, state.sse_keep_alive))
}

/// GET /sse/boards/:board_id
pub async fn board_updates(
    State(state): State<AppState>,
    CurrentUser(user_id): CurrentUser,
    Path(board_id): Path<i64>,
) -> ApiResult<Sse<impl Stream<Item = Result<Event, Infallible>>>> {
    let room = state.coordinator.room_for_board(BoardId(board_id)).await?;
    let subscription = state.coordinator.subscribe(room.id).await?;

    log::info!(
        "{} subscribed to {} through board {}",
        user_id,
        room.id,
        board_id
    );

    Ok(into_sse(subscription, state.sse_keep_alive))
}

fn into_sse(
    subscription: RoomSubscription,
    keep_alive: Duration,
) -> Sse<impl Stream<Item = Result<Event, Infallible>>> {
    let stream = subscription
        .into_stream()
        .filter_map(|update| async move { to_event(&update).map(Ok::<Event, Infallible>) });

    Sse::new(stream).keep_alive(KeepAlive::new().interval(keep_alive))
}

fn to_event(update: &UpdateEvent) -> Option<Event> {
    match Event::default().event(UPDATE_EVENT_NAME).json_data(update) {
        Ok(event) => Some(event),
        Err(e) => {
            log::error!("Failed to encode update for {}: {}", update.room_id, e);
            None
        }
    }
}
