//! Auth token repository
//!
//! Only the SHA-256 digest of a key is stored; at most one row per user.

use chrono::Utc;
use shared::models::User;
use sqlx::SqlitePool;

use super::RepoResult;

/// Store `key_hash` as the user's only token, replacing any previous one
pub async fn replace(pool: &SqlitePool, user_id: i64, key_hash: &str) -> RepoResult<()> {
    sqlx::query(
        "INSERT INTO auth_tokens (key_hash, user_id, created_at) VALUES (?, ?, ?) \
         ON CONFLICT(user_id) DO UPDATE SET key_hash = excluded.key_hash, created_at = excluded.created_at",
    )
    .bind(key_hash)
    .bind(user_id)
    .bind(Utc::now())
    .execute(pool)
    .await?;
    Ok(())
}

/// Owner of a token digest
pub async fn find_user(pool: &SqlitePool, key_hash: &str) -> RepoResult<Option<User>> {
    let user = sqlx::query_as::<_, User>(
        "SELECT u.id, u.username, u.email, u.first_name, u.last_name, u.is_staff, u.is_active, u.date_joined \
         FROM auth_tokens t JOIN users u ON u.id = t.user_id WHERE t.key_hash = ?",
    )
    .bind(key_hash)
    .fetch_optional(pool)
    .await?;
    Ok(user)
}

/// Drop the user's token; returns whether one existed
pub async fn delete_for_user(pool: &SqlitePool, user_id: i64) -> RepoResult<bool> {
    let rows = sqlx::query("DELETE FROM auth_tokens WHERE user_id = ?")
        .bind(user_id)
        .execute(pool)
        .await?;
    Ok(rows.rows_affected() > 0)
}
