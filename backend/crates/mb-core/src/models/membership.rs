use crate::{RoomId, UserId};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Durable record that a user holds a slot in a room.
/// At most one exists per (room, user) pair.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Membership {
    pub room_id: RoomId,
    pub user_id: UserId,
    pub joined_at: DateTime<Utc>,
}

impl Membership {
    pub fn new(room_id: RoomId, user_id: UserId) -> Self {
        Self {
            room_id,
            user_id,
            joined_at: Utc::now(),
        }
    }
}
