use crate::JoinedRoomDto;
use serde::Serialize;

/// List of joined rooms response
#[derive(Debug, Serialize)]
pub struct JoinedRoomListResponse {
    pub rooms: Vec<JoinedRoomDto>,
}
