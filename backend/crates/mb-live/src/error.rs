use mb_core::{BoardId, RoomId, UserId};
use mb_db::DbError;

use std::panic::Location;

use error_location::ErrorLocation;
use thiserror::Error;

// Stable machine-readable codes, surfaced to clients by the transport layer
pub const ROOM_NOT_FOUND: &str = "ROOM_NOT_FOUND";
pub const CAPACITY_EXCEEDED: &str = "CAPACITY_EXCEEDED";
pub const DUPLICATE_JOIN: &str = "DUPLICATE_JOIN";
pub const NOT_MEMBER: &str = "NOT_MEMBER";
pub const PERSISTENCE_FAILURE: &str = "PERSISTENCE_FAILURE";
pub const BROADCAST_UNAVAILABLE: &str = "BROADCAST_UNAVAILABLE";
pub const INVALID_CAPACITY: &str = "INVALID_CAPACITY";
pub const ROOM_ALREADY_EXISTS: &str = "ROOM_ALREADY_EXISTS";

#[derive(Error, Debug)]
pub enum LiveError {
    #[error("Room not found: {message} {location}")]
    RoomNotFound {
        message: String,
        location: ErrorLocation,
    },

    #[error("{room_id} is full (capacity {capacity}) {location}")]
    CapacityExceeded {
        room_id: RoomId,
        capacity: u32,
        location: ErrorLocation,
    },

    #[error("{user_id} is already a member of {room_id} {location}")]
    DuplicateJoin {
        room_id: RoomId,
        user_id: UserId,
        location: ErrorLocation,
    },

    #[error("{user_id} is not a member of {room_id} {location}")]
    NotMember {
        room_id: RoomId,
        user_id: UserId,
        location: ErrorLocation,
    },

    #[error("Persistence failure: {source} {location}")]
    PersistenceFailure {
        #[source]
        source: DbError,
        location: ErrorLocation,
    },

    #[error("Broadcast unavailable for {room_id} {location}")]
    BroadcastUnavailable {
        room_id: RoomId,
        location: ErrorLocation,
    },

    #[error("Invalid capacity: {value} (must be at least 1) {location}")]
    InvalidCapacity { value: i64, location: ErrorLocation },

    #[error("{board_id} already has a room {location}")]
    RoomAlreadyExists {
        board_id: BoardId,
        location: ErrorLocation,
    },
}

impl LiveError {
    #[track_caller]
    pub fn room_not_found(message: impl Into<String>) -> Self {
        Self::RoomNotFound {
            message: message.into(),
            location: ErrorLocation::from(Location::caller()),
        }
    }

    pub fn error_code(&self) -> &'static str {
        match self {
            Self::RoomNotFound { .. } => ROOM_NOT_FOUND,
            Self::CapacityExceeded { .. } => CAPACITY_EXCEEDED,
            Self::DuplicateJoin { .. } => DUPLICATE_JOIN,
            Self::NotMember { .. } => NOT_MEMBER,
            Self::PersistenceFailure { .. } => PERSISTENCE_FAILURE,
            Self::BroadcastUnavailable { .. } => BROADCAST_UNAVAILABLE,
            Self::InvalidCapacity { .. } => INVALID_CAPACITY,
            Self::RoomAlreadyExists { .. } => ROOM_ALREADY_EXISTS,
        }
    }

    /// Only a failed durable write is worth retrying; every other error is a
    /// definite answer about the room's state.
    pub fn is_retryable(&self) -> bool {
        matches!(self, Self::PersistenceFailure { .. })
    }

    /// A durable call that hit its deadline: the write may or may not have
    /// landed, so the caller cannot know the stored state.
    pub fn is_persistence_timeout(&self) -> bool {
        matches!(self, Self::PersistenceFailure { source, .. } if source.is_timeout())
    }

    /// Message without the source location, safe to show to clients
    pub fn client_message(&self) -> String {
        match self {
            Self::RoomNotFound { message, .. } => format!("Room not found: {}", message),
            Self::CapacityExceeded { capacity, .. } => {
                format!("Room is full (capacity {})", capacity)
            }
            Self::DuplicateJoin { .. } => String::from("Already a member of this room"),
            Self::NotMember { .. } => String::from("Not a member of this room"),
            Self::PersistenceFailure { .. } => {
                String::from("Membership could not be saved, please retry")
            }
            Self::BroadcastUnavailable { .. } => String::from("Live updates are unavailable"),
            Self::InvalidCapacity { value, .. } => {
                format!("Capacity must be at least 1, got {}", value)
            }
            Self::RoomAlreadyExists { .. } => String::from("Board already has a room"),
        }
    }
}

impl From<DbError> for LiveError {
    #[track_caller]
    fn from(source: DbError) -> Self {
        Self::PersistenceFailure {
            source,
            location: ErrorLocation::from(Location::caller()),
        }
    }
}

pub type Result<T> = std::result::Result<T, LiveError>;
