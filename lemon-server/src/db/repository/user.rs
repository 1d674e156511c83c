//! User and group membership repository

use chrono::Utc;
use shared::models::User;
use sqlx::SqlitePool;

use super::{RepoError, RepoResult};

const USER_COLUMNS: &str =
    "id, username, email, first_name, last_name, is_staff, is_active, date_joined";

/// New account; the password is already hashed
#[derive(Debug, Clone)]
pub struct NewUser {
    pub username: String,
    pub email: String,
    pub first_name: String,
    pub last_name: String,
    pub password_hash: String,
    pub is_staff: bool,
}

pub async fn find_by_id(pool: &SqlitePool, id: i64) -> RepoResult<Option<User>> {
    let sql = format!("SELECT {USER_COLUMNS} FROM users WHERE id = ?");
    let user = sqlx::query_as::<_, User>(&sql)
        .bind(id)
        .fetch_optional(pool)
        .await?;
    Ok(user)
}

pub async fn find_by_username(pool: &SqlitePool, username: &str) -> RepoResult<Option<User>> {
    let sql = format!("SELECT {USER_COLUMNS} FROM users WHERE username = ?");
    let user = sqlx::query_as::<_, User>(&sql)
        .bind(username)
        .fetch_optional(pool)
        .await?;
    Ok(user)
}

/// User plus stored password hash, for login
pub async fn find_credentials(
    pool: &SqlitePool,
    username: &str,
) -> RepoResult<Option<(User, String)>> {
    #[derive(sqlx::FromRow)]
    struct Row {
        #[sqlx(flatten)]
        user: User,
        password_hash: String,
    }

    let sql = format!("SELECT {USER_COLUMNS}, password_hash FROM users WHERE username = ?");
    let row = sqlx::query_as::<_, Row>(&sql)
        .bind(username)
        .fetch_optional(pool)
        .await?;
    Ok(row.map(|r| (r.user, r.password_hash)))
}

pub async fn exists(pool: &SqlitePool, id: i64) -> RepoResult<bool> {
    let found: Option<i64> = sqlx::query_scalar("SELECT id FROM users WHERE id = ?")
        .bind(id)
        .fetch_optional(pool)
        .await?;
    Ok(found.is_some())
}

pub async fn create(pool: &SqlitePool, data: NewUser) -> RepoResult<User> {
    let id: i64 = sqlx::query_scalar(
        "INSERT INTO users (username, email, first_name, last_name, password_hash, is_staff, is_active, date_joined) \
         VALUES (?, ?, ?, ?, ?, ?, 1, ?) RETURNING id",
    )
    .bind(&data.username)
    .bind(&data.email)
    .bind(&data.first_name)
    .bind(&data.last_name)
    .bind(&data.password_hash)
    .bind(data.is_staff)
    .bind(Utc::now())
    .fetch_one(pool)
    .await?;
    find_by_id(pool, id)
        .await?
        .ok_or_else(|| RepoError::Database("Failed to create user".into()))
}

/// Update the writable profile fields; `None` keeps the stored value
pub async fn update_profile(
    pool: &SqlitePool,
    id: i64,
    email: Option<&str>,
    first_name: Option<&str>,
    last_name: Option<&str>,
) -> RepoResult<User> {
    let rows = sqlx::query(
        "UPDATE users SET email = COALESCE(?1, email), first_name = COALESCE(?2, first_name), \
         last_name = COALESCE(?3, last_name) WHERE id = ?4",
    )
    .bind(email)
    .bind(first_name)
    .bind(last_name)
    .bind(id)
    .execute(pool)
    .await?;
    if rows.rows_affected() == 0 {
        return Err(RepoError::NotFound(format!("User {id} not found")));
    }
    find_by_id(pool, id)
        .await?
        .ok_or_else(|| RepoError::NotFound(format!("User {id} not found")))
}

pub async fn set_active(pool: &SqlitePool, id: i64, active: bool) -> RepoResult<()> {
    sqlx::query("UPDATE users SET is_active = ? WHERE id = ?")
        .bind(active)
        .bind(id)
        .execute(pool)
        .await?;
    Ok(())
}

// ── Groups ──────────────────────────────────────────────────────────

/// Names of the groups a user belongs to, alphabetical
pub async fn group_names(pool: &SqlitePool, user_id: i64) -> RepoResult<Vec<String>> {
    let names = sqlx::query_scalar::<_, String>(
        "SELECT g.name FROM groups g JOIN user_groups ug ON ug.group_id = g.id \
         WHERE ug.user_id = ? ORDER BY g.name",
    )
    .bind(user_id)
    .fetch_all(pool)
    .await?;
    Ok(names)
}

/// Add a user to a group; already being a member is not an error
pub async fn add_to_group(pool: &SqlitePool, user_id: i64, group: &str) -> RepoResult<()> {
    let rows = sqlx::query(
        "INSERT OR IGNORE INTO user_groups (user_id, group_id) \
         SELECT ?, id FROM groups WHERE name = ?",
    )
    .bind(user_id)
    .bind(group)
    .execute(pool)
    .await?;
    if rows.rows_affected() == 0 {
        // Either already a member or the group does not exist
        let group_exists: Option<i64> = sqlx::query_scalar("SELECT id FROM groups WHERE name = ?")
            .bind(group)
            .fetch_optional(pool)
            .await?;
        if group_exists.is_none() {
            return Err(RepoError::NotFound(format!("Group {group} not found")));
        }
    }
    Ok(())
}

/// Remove a user from a group; returns whether a membership was removed
pub async fn remove_from_group(pool: &SqlitePool, user_id: i64, group: &str) -> RepoResult<bool> {
    let rows = sqlx::query(
        "DELETE FROM user_groups WHERE user_id = ? \
         AND group_id = (SELECT id FROM groups WHERE name = ?)",
    )
    .bind(user_id)
    .bind(group)
    .execute(pool)
    .await?;
    Ok(rows.rows_affected() > 0)
}

/// Members of a group ordered by id
pub async fn list_group_members(pool: &SqlitePool, group: &str) -> RepoResult<Vec<User>> {
    let sql = format!(
        "SELECT {} FROM users u JOIN user_groups ug ON ug.user_id = u.id \
         JOIN groups g ON g.id = ug.group_id WHERE g.name = ? ORDER BY u.id",
        USER_COLUMNS
            .split(", ")
            .map(|c| format!("u.{c}"))
            .collect::<Vec<_>>()
            .join(", ")
    );
    let users = sqlx::query_as::<_, User>(&sql)
        .bind(group)
        .fetch_all(pool)
        .await?;
    Ok(users)
}
