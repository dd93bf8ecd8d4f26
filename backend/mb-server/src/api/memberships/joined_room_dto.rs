use mb_core::JoinedRoom;

use serde::Serialize;

/// A room the caller belongs to
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct JoinedRoomDto {
    pub room_id: i64,
    pub board_id: i64,
    pub name: String,
    pub capacity: u32,
    pub current_occupancy: u32,
    pub joined_at: i64,
}

impl From<JoinedRoom> for JoinedRoomDto {
    fn from(r: JoinedRoom) -> Self {
        Self {
            room_id: r.room_id.get(),
            board_id: r.board_id.get(),
            name: r.name,
            capacity: r.capacity,
            current_occupancy: r.member_count,
            joined_at: r.joined_at.timestamp(),
        }
    }
}
