//! Room registry: the authoritative room record for each board.
//!
//! `member_count` is written only by the membership coordinator after its
//! in-memory decision has been made; this repository applies no rules of
//! its own.

use crate::repositories::{non_negative, timestamp};
use crate::{DbError, Result as DbErrorResult};

use mb_core::{BoardId, Room, RoomId};

use std::panic::Location;

use chrono::Utc;
use error_location::ErrorLocation;
use sqlx::{FromRow, SqlitePool};

#[derive(FromRow)]
struct RoomRow {
    id: i64,
    board_id: i64,
    name: String,
    capacity: i64,
    member_count: i64,
    created_at: i64,
    updated_at: i64,
}

impl TryFrom<RoomRow> for Room {
    type Error = DbError;

    fn try_from(r: RoomRow) -> DbErrorResult<Self> {
        Ok(Room {
            id: RoomId(r.id),
            board_id: BoardId(r.board_id),
            name: r.name,
            capacity: non_negative(r.capacity, "chat_rooms.capacity")?,
            member_count: non_negative(r.member_count, "chat_rooms.member_count")?,
            created_at: timestamp(r.created_at, "chat_rooms.created_at")?,
            updated_at: timestamp(r.updated_at, "chat_rooms.updated_at")?,
        })
    }
}

#[derive(Clone)]
pub struct RoomRepository {
    pool: SqlitePool,
}

impl RoomRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Create the room belonging to a board. Fails with a unique violation if
    /// the board already has one.
    pub async fn create_for_board(&self, board_id: BoardId, capacity: u32) -> DbErrorResult<Room> {
        let now = Utc::now().timestamp();
        let name = Room::default_name(board_id);

        let result = sqlx::query(
            r#"
                INSERT INTO chat_rooms (board_id, name, capacity, member_count, created_at, updated_at)
                VALUES (?, ?, ?, 0, ?, ?)
                "#,
        )
        .bind(board_id.get())
        .bind(&name)
        .bind(i64::from(capacity))
        .bind(now)
        .bind(now)
        .execute(&self.pool)
        .await?;

        let room_id = RoomId(result.last_insert_rowid());

        self.find_by_id(room_id)
            .await?
            .ok_or_else(|| DbError::NotFound {
                message: format!("{} vanished after insert", room_id),
                location: ErrorLocation::from(Location::caller()),
            })
    }

    pub async fn find_by_id(&self, room_id: RoomId) -> DbErrorResult<Option<Room>> {
        let row = sqlx::query_as::<_, RoomRow>(
            r#"
                SELECT id, board_id, name, capacity, member_count, created_at, updated_at
                FROM chat_rooms
                WHERE id = ?
                "#,
        )
        .bind(room_id.get())
        .fetch_optional(&self.pool)
        .await?;

        row.map(Room::try_from).transpose()
    }

    pub async fn find_by_board_id(&self, board_id: BoardId) -> DbErrorResult<Option<Room>> {
        let row = sqlx::query_as::<_, RoomRow>(
            r#"
                SELECT id, board_id, name, capacity, member_count, created_at, updated_at
                FROM chat_rooms
                WHERE board_id = ?
                "#,
        )
        .bind(board_id.get())
        .fetch_optional(&self.pool)
        .await?;

        row.map(Room::try_from).transpose()
    }

    pub async fn find_all(&self) -> DbErrorResult<Vec<Room>> {
        let rows = sqlx::query_as::<_, RoomRow>(
            r#"
                SELECT id, board_id, name, capacity, member_count, created_at, updated_at
                FROM chat_rooms
                ORDER BY updated_at DESC, id DESC
                "#,
        )
        .fetch_all(&self.pool)
        .await?;

        rows.into_iter()
            .map(Room::try_from)
            .collect::<DbErrorResult<Vec<_>>>()
    }

    /// Persist the occupancy decided by the coordinator.
    /// Returns false if the room no longer exists.
    pub async fn save_member_count(&self, room_id: RoomId, count: u32) -> DbErrorResult<bool> {
        let now = Utc::now().timestamp();

        let result = sqlx::query(
            r#"
                UPDATE chat_rooms
                SET member_count = ?, updated_at = ?
                WHERE id = ?
                "#,
        )
        .bind(i64::from(count))
        .bind(now)
        .bind(room_id.get())
        .execute(&self.pool)
        .await?;

        Ok(result.rows_affected() > 0)
    }

    /// Remove a board's room; its memberships go with it (ON DELETE CASCADE).
    pub async fn delete_by_board_id(&self, board_id: BoardId) -> DbErrorResult<Option<RoomId>> {
        let room_id = sqlx::query_scalar::<_, i64>("SELECT id FROM chat_rooms WHERE board_id = ?")
            .bind(board_id.get())
            .fetch_optional(&self.pool)
            .await?;

        let Some(room_id) = room_id else {
            return Ok(None);
        };

        sqlx::query("DELETE FROM chat_rooms WHERE id = ?")
            .bind(room_id)
            .execute(&self.pool)
            .await?;

        Ok(Some(RoomId(room_id)))
    }
}
