use crate::Result as DbErrorResult;

use mb_core::UserId;

use chrono::Utc;
use sqlx::SqlitePool;

/// Read-mostly view of the users table maintained by the identity side
#[derive(Clone)]
pub struct UserRepository {
    pool: SqlitePool,
}

impl UserRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    pub async fn create(&self, username: &str) -> DbErrorResult<UserId> {
        let result = sqlx::query("INSERT INTO users (username, created_at) VALUES (?, ?)")
            .bind(username)
            .bind(Utc::now().timestamp())
            .execute(&self.pool)
            .await?;

        Ok(UserId(result.last_insert_rowid()))
    }

    pub async fn find_username(&self, user_id: UserId) -> DbErrorResult<Option<String>> {
        let username = sqlx::query_scalar::<_, String>("SELECT username FROM users WHERE id = ?")
            .bind(user_id.get())
            .fetch_optional(&self.pool)
            .await?;

        Ok(username)
    }
}
