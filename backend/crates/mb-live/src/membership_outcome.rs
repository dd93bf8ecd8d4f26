use mb_core::RoomId;

/// Result of an accepted join or leave
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MembershipOutcome {
    pub room_id: RoomId,
    /// Occupancy right after the transition was applied
    pub current_occupancy: u32,
}
