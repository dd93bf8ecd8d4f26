use crate::repositories::{non_negative, timestamp};
use crate::{DbError, Result as DbErrorResult};

use mb_core::{BoardId, JoinedRoom, Membership, RoomId, UserId};

use sqlx::{FromRow, SqlitePool};

#[derive(FromRow)]
struct JoinedRoomRow {
    room_id: i64,
    board_id: i64,
    name: String,
    capacity: i64,
    member_count: i64,
    joined_at: i64,
}

impl TryFrom<JoinedRoomRow> for JoinedRoom {
    type Error = DbError;

    fn try_from(r: JoinedRoomRow) -> DbErrorResult<Self> {
        Ok(JoinedRoom {
            room_id: RoomId(r.room_id),
            board_id: BoardId(r.board_id),
            name: r.name,
            capacity: non_negative(r.capacity, "chat_rooms.capacity")?,
            member_count: non_negative(r.member_count, "chat_rooms.member_count")?,
            joined_at: timestamp(r.joined_at, "room_members.joined_at")?,
        })
    }
}

/// Membership store: one row per (room, user)
#[derive(Clone)]
pub struct MembershipRepository {
    pool: SqlitePool,
}

impl MembershipRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    pub async fn insert(&self, membership: &Membership) -> DbErrorResult<()> {
        sqlx::query(
            r#"
                INSERT INTO room_members (room_id, user_id, joined_at)
                VALUES (?, ?, ?)
                "#,
        )
        .bind(membership.room_id.get())
        .bind(membership.user_id.get())
        .bind(membership.joined_at.timestamp())
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    /// Returns true if a membership row was removed
    pub async fn delete(&self, room_id: RoomId, user_id: UserId) -> DbErrorResult<bool> {
        let result = sqlx::query("DELETE FROM room_members WHERE room_id = ? AND user_id = ?")
            .bind(room_id.get())
            .bind(user_id.get())
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }

    pub async fn count_by_room(&self, room_id: RoomId) -> DbErrorResult<u32> {
        let count =
            sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM room_members WHERE room_id = ?")
                .bind(room_id.get())
                .fetch_one(&self.pool)
                .await?;

        non_negative(count, "COUNT(room_members)")
    }

    /// Members of a room in join order
    pub async fn list_user_ids(&self, room_id: RoomId) -> DbErrorResult<Vec<UserId>> {
        let ids = sqlx::query_scalar::<_, i64>(
            r#"
                SELECT user_id
                FROM room_members
                WHERE room_id = ?
                ORDER BY joined_at, user_id
                "#,
        )
        .bind(room_id.get())
        .fetch_all(&self.pool)
        .await?;

        Ok(ids.into_iter().map(UserId).collect())
    }

    /// Rooms a user belongs to, most recently joined first
    pub async fn find_rooms_for_user(
        &self,
        user_id: UserId,
        limit: u32,
        offset: u32,
    ) -> DbErrorResult<Vec<JoinedRoom>> {
        let rows = sqlx::query_as::<_, JoinedRoomRow>(
            r#"
                SELECT r.id AS room_id, r.board_id, r.name, r.capacity, r.member_count,
                    m.joined_at
                FROM room_members m
                JOIN chat_rooms r ON r.id = m.room_id
                WHERE m.user_id = ?
                ORDER BY m.joined_at DESC, r.id DESC
                LIMIT ? OFFSET ?
                "#,
        )
        .bind(user_id.get())
        .bind(i64::from(limit))
        .bind(i64::from(offset))
        .fetch_all(&self.pool)
        .await?;

        rows.into_iter()
            .map(JoinedRoom::try_from)
            .collect::<DbErrorResult<Vec<_>>>()
    }
}
