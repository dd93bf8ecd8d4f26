use crate::{BoardId, RoomId};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A room as seen from one of its members, for "my rooms" listings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct JoinedRoom {
    pub room_id: RoomId,
    pub board_id: BoardId,
    pub name: String,
    pub capacity: u32,
    pub member_count: u32,
    pub joined_at: DateTime<Utc>,
}
