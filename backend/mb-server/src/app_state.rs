use mb_live::{LiveConfig, MembershipCoordinator, RoomStore, SqliteRoomStore};

use std::sync::Arc;
use std::time::Duration;

use sqlx::SqlitePool;

/// Shared state handed to every handler
#[derive(Clone)]
pub struct AppState {
    pub pool: SqlitePool,
    pub coordinator: Arc<MembershipCoordinator>,
    /// Interval between keep-alive comments on idle live streams
    pub sse_keep_alive: Duration,
}

impl AppState {
    pub fn new(pool: SqlitePool, live_config: LiveConfig, sse_keep_alive: Duration) -> Self {
        let store: Arc<dyn RoomStore> = Arc::new(SqliteRoomStore::new(pool.clone()));

        Self {
            pool,
            coordinator: Arc::new(MembershipCoordinator::new(store, live_config)),
            sse_keep_alive,
        }
    }
}
