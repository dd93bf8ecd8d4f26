//! Room entity - the chat/membership container tied 1:1 to a board.

use crate::{BoardId, CoreError, Result as CoreErrorResult, RoomId};

use std::panic::Location;

use chrono::{DateTime, Utc};
use error_location::ErrorLocation;
use serde::{Deserialize, Serialize};

/// A room has a fixed capacity chosen when its board is created.
/// `member_count` is the persisted occupancy and trails the live tracker
/// only while a transition is in flight.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Room {
    pub id: RoomId,
    pub board_id: BoardId,
    pub name: String,
    /// Hard ceiling on concurrent members, immutable after creation
    pub capacity: u32,
    pub member_count: u32,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Room {
    /// Display name given to the room of a freshly created board
    pub fn default_name(board_id: BoardId) -> String {
        format!("Board {} chat room", board_id.get())
    }

    /// Check a requested capacity and narrow it to the stored width.
    #[track_caller]
    pub fn validate_capacity(value: i64) -> CoreErrorResult<u32> {
        match u32::try_from(value) {
            Ok(capacity) if capacity > 0 => Ok(capacity),
            _ => Err(CoreError::InvalidCapacity {
                value,
                location: ErrorLocation::from(Location::caller()),
            }),
        }
    }

    pub fn is_full(&self) -> bool {
        self.member_count >= self.capacity
    }

    pub fn remaining(&self) -> u32 {
        self.capacity.saturating_sub(self.member_count)
    }
}
