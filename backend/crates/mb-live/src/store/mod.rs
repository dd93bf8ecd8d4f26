//! Durable facade the coordinator drives.
//!
//! Implementations hold no business rules: capacity, duplicate and
//! membership checks all happen in the coordinator before a write is issued.

mod sqlite_room_store;

pub use sqlite_room_store::SqliteRoomStore;

use mb_core::{BoardId, JoinedRoom, Membership, Room, RoomId, UserId};
use mb_db::Result as DbErrorResult;

use async_trait::async_trait;

#[async_trait]
pub trait RoomStore: Send + Sync {
    async fn find_room(&self, room_id: RoomId) -> DbErrorResult<Option<Room>>;

    async fn find_room_by_board_id(&self, board_id: BoardId) -> DbErrorResult<Option<Room>>;

    async fn find_all_rooms(&self) -> DbErrorResult<Vec<Room>>;

    async fn create_room_for_board(&self, board_id: BoardId, capacity: u32)
    -> DbErrorResult<Room>;

    /// Remove a board's room and, with it, every membership row
    async fn delete_room_for_board(&self, board_id: BoardId) -> DbErrorResult<Option<RoomId>>;

    async fn save_member_count(&self, room_id: RoomId, count: u32) -> DbErrorResult<bool>;

    async fn insert_membership(&self, membership: &Membership) -> DbErrorResult<()>;

    async fn delete_membership(&self, room_id: RoomId, user_id: UserId) -> DbErrorResult<bool>;

    async fn count_members(&self, room_id: RoomId) -> DbErrorResult<u32>;

    async fn list_member_ids(&self, room_id: RoomId) -> DbErrorResult<Vec<UserId>>;

    async fn find_username(&self, user_id: UserId) -> DbErrorResult<Option<String>>;

    async fn find_rooms_for_user(
        &self,
        user_id: UserId,
        limit: u32,
        offset: u32,
    ) -> DbErrorResult<Vec<JoinedRoom>>;
}
