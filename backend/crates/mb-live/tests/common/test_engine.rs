use mb_core::{BoardId, RoomId, UpdateEvent, UserId};
use mb_db::UserRepository;
use mb_live::{LiveConfig, MembershipCoordinator, RoomStore, RoomSubscription, SqliteRoomStore};

use std::sync::Arc;
use std::time::Duration;

use sqlx::SqlitePool;
use tokio::time::timeout;

pub const TEST_WRITE_TIMEOUT: Duration = Duration::from_secs(5);

/// Creates an in-memory SQLite pool with migrations run
pub async fn create_test_pool() -> SqlitePool {
    mb_db::connect_in_memory()
        .await
        .expect("Failed to create test pool")
}

pub fn test_config() -> LiveConfig {
    LiveConfig::new(64, TEST_WRITE_TIMEOUT)
}

/// Coordinator over a fresh in-memory database
pub async fn create_test_engine() -> (Arc<MembershipCoordinator>, SqlitePool) {
    let pool = create_test_pool().await;
    let store: Arc<dyn RoomStore> = Arc::new(SqliteRoomStore::new(pool.clone()));
    let coordinator = Arc::new(MembershipCoordinator::new(store, test_config()));
    (coordinator, pool)
}

/// Coordinator over an arbitrary store
pub fn engine_with_store(
    store: Arc<dyn RoomStore>,
    config: LiveConfig,
) -> Arc<MembershipCoordinator> {
    Arc::new(MembershipCoordinator::new(store, config))
}

pub async fn open_test_room(
    coordinator: &MembershipCoordinator,
    board_id: i64,
    capacity: i64,
) -> RoomId {
    coordinator
        .open_room(BoardId(board_id), capacity)
        .await
        .expect("Failed to open test room")
        .id
}

pub async fn create_test_user(pool: &SqlitePool, username: &str) -> UserId {
    UserRepository::new(pool.clone())
        .create(username)
        .await
        .expect("Failed to create test user")
}

/// Next event, failing the test if none arrives within a second
pub async fn next_event(subscription: &mut RoomSubscription) -> UpdateEvent {
    timeout(Duration::from_secs(1), subscription.recv())
        .await
        .expect("Timed out waiting for update")
        .expect("Channel closed while waiting for update")
}
