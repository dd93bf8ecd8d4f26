use crate::RoomStore;

use mb_core::{BoardId, JoinedRoom, Membership, Room, RoomId, UserId};
use mb_db::{MembershipRepository, Result as DbErrorResult, RoomRepository, UserRepository};

use async_trait::async_trait;
use sqlx::SqlitePool;

/// [`RoomStore`] backed by the SQLite repositories
#[derive(Clone)]
pub struct SqliteRoomStore {
    rooms: RoomRepository,
    memberships: MembershipRepository,
    users: UserRepository,
}

impl SqliteRoomStore {
    pub fn new(pool: SqlitePool) -> Self {
        Self {
            rooms: RoomRepository::new(pool.clone()),
            memberships: MembershipRepository::new(pool.clone()),
            users: UserRepository::new(pool),
        }
    }
}

#[async_trait]
impl RoomStore for SqliteRoomStore {
    async fn find_room(&self, room_id: RoomId) -> DbErrorResult<Option<Room>> {
        self.rooms.find_by_id(room_id).await
    }

    async fn find_room_by_board_id(&self, board_id: BoardId) -> DbErrorResult<Option<Room>> {
        self.rooms.find_by_board_id(board_id).await
    }

    async fn find_all_rooms(&self) -> DbErrorResult<Vec<Room>> {
        self.rooms.find_all().await
    }

    async fn create_room_for_board(
        &self,
        board_id: BoardId,
        capacity: u32,
    ) -> DbErrorResult<Room> {
        self.rooms.create_for_board(board_id, capacity).await
    }

    async fn delete_room_for_board(&self, board_id: BoardId) -> DbErrorResult<Option<RoomId>> {
        self.rooms.delete_by_board_id(board_id).await
    }

    async fn save_member_count(&self, room_id: RoomId, count: u32) -> DbErrorResult<bool> {
        self.rooms.save_member_count(room_id, count).await
    }

    async fn insert_membership(&self, membership: &Membership) -> DbErrorResult<()> {
        self.memberships.insert(membership).await
    }

    async fn delete_membership(&self, room_id: RoomId, user_id: UserId) -> DbErrorResult<bool> {
        self.memberships.delete(room_id, user_id).await
    }

    async fn count_members(&self, room_id: RoomId) -> DbErrorResult<u32> {
        self.memberships.count_by_room(room_id).await
    }

    async fn list_member_ids(&self, room_id: RoomId) -> DbErrorResult<Vec<UserId>> {
        self.memberships.list_user_ids(room_id).await
    }

    async fn find_username(&self, user_id: UserId) -> DbErrorResult<Option<String>> {
        self.users.find_username(user_id).await
    }

    async fn find_rooms_for_user(
        &self,
        user_id: UserId,
        limit: u32,
        offset: u32,
    ) -> DbErrorResult<Vec<JoinedRoom>> {
        self.memberships
            .find_rooms_for_user(user_id, limit, offset)
            .await
    }
}
