use sqlx::SqlitePool;

/// Creates an in-memory SQLite pool with migrations run
pub async fn create_test_pool() -> SqlitePool {
    mb_db::connect_in_memory()
        .await
        .expect("Failed to create test pool")
}
