use mb_core::{BoardId, JoinedRoom, Membership, Room, RoomId, UserId};
use mb_db::{DbError, Result as DbErrorResult};
use mb_live::{RoomStore, SqliteRoomStore};

use std::sync::atomic::{AtomicBool, AtomicU32, Ordering};

use async_trait::async_trait;
use sqlx::SqlitePool;

/// Store that delegates to SQLite but can be told to fail or hang
/// specific writes.
pub struct FaultyStore {
    inner: SqliteRoomStore,
    pub failing_inserts: AtomicU32,
    pub failing_deletes: AtomicU32,
    pub failing_count_saves: AtomicU32,
    pub stall_inserts: AtomicBool,
}

impl FaultyStore {
    pub fn new(pool: SqlitePool) -> Self {
        Self {
            inner: SqliteRoomStore::new(pool),
            failing_inserts: AtomicU32::new(0),
            failing_deletes: AtomicU32::new(0),
            failing_count_saves: AtomicU32::new(0),
            stall_inserts: AtomicBool::new(false),
        }
    }

    pub fn fail_next_inserts(&self, count: u32) {
        self.failing_inserts.store(count, Ordering::SeqCst);
    }

    pub fn fail_next_deletes(&self, count: u32) {
        self.failing_deletes.store(count, Ordering::SeqCst);
    }

    pub fn fail_next_count_saves(&self, count: u32) {
        self.failing_count_saves.store(count, Ordering::SeqCst);
    }

    pub fn stall_inserts(&self, stall: bool) {
        self.stall_inserts.store(stall, Ordering::SeqCst);
    }
}

fn take_failure(counter: &AtomicU32) -> bool {
    counter
        .fetch_update(Ordering::SeqCst, Ordering::SeqCst, |n| n.checked_sub(1))
        .is_ok()
}

fn injected() -> DbError {
    DbError::from(sqlx::Error::PoolTimedOut)
}

#[async_trait]
impl RoomStore for FaultyStore {
    async fn find_room(&self, room_id: RoomId) -> DbErrorResult<Option<Room>> {
        self.inner.find_room(room_id).await
    }

    async fn find_room_by_board_id(&self, board_id: BoardId) -> DbErrorResult<Option<Room>> {
        self.inner.find_room_by_board_id(board_id).await
    }

    async fn find_all_rooms(&self) -> DbErrorResult<Vec<Room>> {
        self.inner.find_all_rooms().await
    }

    async fn create_room_for_board(
        &self,
        board_id: BoardId,
        capacity: u32,
    ) -> DbErrorResult<Room> {
        self.inner.create_room_for_board(board_id, capacity).await
    }

    async fn delete_room_for_board(&self, board_id: BoardId) -> DbErrorResult<Option<RoomId>> {
        self.inner.delete_room_for_board(board_id).await
    }

    async fn save_member_count(&self, room_id: RoomId, count: u32) -> DbErrorResult<bool> {
        if take_failure(&self.failing_count_saves) {
            return Err(injected());
        }
        self.inner.save_member_count(room_id, count).await
    }

    async fn insert_membership(&self, membership: &Membership) -> DbErrorResult<()> {
        if self.stall_inserts.load(Ordering::SeqCst) {
            std::future::pending::<()>().await;
        }
        if take_failure(&self.failing_inserts) {
            return Err(injected());
        }
        self.inner.insert_membership(membership).await
    }

    async fn delete_membership(&self, room_id: RoomId, user_id: UserId) -> DbErrorResult<bool> {
        if take_failure(&self.failing_deletes) {
            return Err(injected());
        }
        self.inner.delete_membership(room_id, user_id).await
    }

    async fn count_members(&self, room_id: RoomId) -> DbErrorResult<u32> {
        self.inner.count_members(room_id).await
    }

    async fn list_member_ids(&self, room_id: RoomId) -> DbErrorResult<Vec<UserId>> {
        self.inner.list_member_ids(room_id).await
    }

    async fn find_username(&self, user_id: UserId) -> DbErrorResult<Option<String>> {
        self.inner.find_username(user_id).await
    }

    async fn find_rooms_for_user(
        &self,
        user_id: UserId,
        limit: u32,
        offset: u32,
    ) -> DbErrorResult<Vec<JoinedRoom>> {
        self.inner.find_rooms_for_user(user_id, limit, offset).await
    }
}
