use mb_core::Room;

use serde::Serialize;

/// Room DTO for JSON serialization
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RoomDto {
    pub id: i64,
    pub board_id: i64,
    pub name: String,
    pub capacity: u32,
    pub current_occupancy: u32,
    pub remaining: u32,
    pub is_full: bool,
    pub created_at: i64,
    pub updated_at: i64,
}

impl From<Room> for RoomDto {
    fn from(r: Room) -> Self {
        let remaining = r.remaining();
        let is_full = r.is_full();
        Self {
            id: r.id.get(),
            board_id: r.board_id.get(),
            name: r.name,
            capacity: r.capacity,
            current_occupancy: r.member_count,
            remaining,
            is_full,
            created_at: r.created_at.timestamp(),
            updated_at: r.updated_at.timestamp(),
        }
    }
}
