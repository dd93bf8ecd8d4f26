use mb_core::{BoardId, Room, UserId};
use mb_db::{RoomRepository, UserRepository};

use sqlx::SqlitePool;

/// Creates a room for the given board with the given capacity
pub async fn create_test_room(pool: &SqlitePool, board_id: i64, capacity: u32) -> Room {
    RoomRepository::new(pool.clone())
        .create_for_board(BoardId(board_id), capacity)
        .await
        .expect("Failed to create test room")
}

/// Inserts a user row so username lookups resolve
pub async fn create_test_user(pool: &SqlitePool, username: &str) -> UserId {
    UserRepository::new(pool.clone())
        .create(username)
        .await
        .expect("Failed to create test user")
}
