pub mod capacity_tracker;
pub mod error;
pub mod live_config;
pub mod membership_coordinator;
pub mod membership_outcome;
pub mod metrics;
pub mod room_broadcaster;
pub mod room_subscription;
pub mod store;
pub(crate) mod transition_guard;

pub use capacity_tracker::{CapacityTracker, JoinDecision, LeaveDecision};
pub use error::{
    BROADCAST_UNAVAILABLE, CAPACITY_EXCEEDED, DUPLICATE_JOIN, INVALID_CAPACITY, LiveError,
    NOT_MEMBER, PERSISTENCE_FAILURE, ROOM_ALREADY_EXISTS, ROOM_NOT_FOUND, Result,
};
pub use live_config::LiveConfig;
pub use membership_coordinator::MembershipCoordinator;
pub use membership_outcome::MembershipOutcome;
pub use metrics::Metrics;
pub use room_broadcaster::RoomBroadcaster;
pub use room_subscription::RoomSubscription;
pub use store::{RoomStore, SqliteRoomStore};

#[cfg(test)]
mod tests;

use mb_core::{RoomId, UserId};

use tracing::info_span;

/// Create a tracing span for one membership transition.
/// All log entries emitted while it is entered carry these fields.
pub fn membership_span(operation: &str, room_id: RoomId, user_id: UserId) -> tracing::Span {
    info_span!(
        "membership",
        operation = %operation,
        room_id = %room_id.get(),
        user_id = %user_id.get(),
    )
}
