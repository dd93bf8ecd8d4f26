use mb_live::MembershipOutcome;

use serde::Serialize;

/// Occupancy of a room after (or without) a membership change
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OccupancyResponse {
    pub room_id: i64,
    pub current_occupancy: u32,
}

impl From<MembershipOutcome> for OccupancyResponse {
    fn from(o: MembershipOutcome) -> Self {
        Self {
            room_id: o.room_id.get(),
            current_occupancy: o.current_occupancy,
        }
    }
}
