use serde::Deserialize;

pub const DEFAULT_LIMIT: u32 = 50;
pub const MAX_LIMIT: u32 = 200;

/// Paging for the caller's joined rooms
#[derive(Debug, Deserialize)]
pub struct ListRoomsQuery {
    /// Page size, 1..=200 (default: 50)
    pub limit: Option<u32>,
    /// Rows to skip (default: 0)
    pub offset: Option<u32>,
}
