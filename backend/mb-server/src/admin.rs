//! Administrative endpoints for live state management.

use crate::{ApiResult, AppState, OccupancyResponse};

use mb_core::RoomId;

use axum::{
    Json,
    extract::{Path, State},
};
use log::info;

/// Rebuild a room's live occupancy from its stored members.
///
/// Repairs the persisted count when it drifted and notifies subscribers if
/// the occupancy they last saw was wrong.
pub async fn reconcile_handler(
    State(state): State<AppState>,
    Path(room_id): Path<i64>,
) -> ApiResult<Json<OccupancyResponse>> {
    let room_id = RoomId(room_id);
    info!("Reconcile requested for {}", room_id);

    let current_occupancy = state.coordinator.reconcile(room_id).await?;

    info!("{} reconciled at occupancy {}", room_id, current_occupancy);

    Ok(Json(OccupancyResponse {
        room_id: room_id.get(),
        current_occupancy,
    }))
}
