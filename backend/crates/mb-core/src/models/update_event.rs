use crate::RoomId;

use serde::{Deserialize, Serialize};

/// Live occupancy change pushed to every subscriber of a room.
///
/// Wire shape: `{ "roomId": 1, "currentOccupancy": 2, "actorUsername": "kim" }`.
/// Never persisted; a subscriber that connects late does not see past events.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateEvent {
    pub room_id: RoomId,
    pub current_occupancy: u32,
    /// Who triggered the change; empty for system-driven updates
    #[serde(default)]
    pub actor_username: String,
}

impl UpdateEvent {
    pub fn new(room_id: RoomId, current_occupancy: u32, actor_username: impl Into<String>) -> Self {
        Self {
            room_id,
            current_occupancy,
            actor_username: actor_username.into(),
        }
    }

    /// Event raised without a user action, e.g. after reconciliation
    pub fn system(room_id: RoomId, current_occupancy: u32) -> Self {
        Self::new(room_id, current_occupancy, String::new())
    }
}
