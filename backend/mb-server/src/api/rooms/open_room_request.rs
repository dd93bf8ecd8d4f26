use serde::Deserialize;

#[derive(Debug, Deserialize)]
pub struct OpenRoomRequest {
    /// Maximum concurrent members (required, positive)
    pub capacity: i64,
}
