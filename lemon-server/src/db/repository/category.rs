//! Category repository

use shared::models::Category;
use sqlx::SqlitePool;

use super::{RepoError, RepoResult};

pub async fn find_all(pool: &SqlitePool) -> RepoResult<Vec<Category>> {
    let categories =
        sqlx::query_as::<_, Category>("SELECT id, slug, title FROM category ORDER BY id")
            .fetch_all(pool)
            .await?;
    Ok(categories)
}

pub async fn find_by_id(pool: &SqlitePool, id: i64) -> RepoResult<Option<Category>> {
    let category =
        sqlx::query_as::<_, Category>("SELECT id, slug, title FROM category WHERE id = ?")
            .bind(id)
            .fetch_optional(pool)
            .await?;
    Ok(category)
}

/// Lookup by exact title, for the `category=<title>` menu filter
pub async fn find_by_title(pool: &SqlitePool, title: &str) -> RepoResult<Option<Category>> {
    let category = sqlx::query_as::<_, Category>(
        "SELECT id, slug, title FROM category WHERE title = ? ORDER BY id LIMIT 1",
    )
    .bind(title)
    .fetch_optional(pool)
    .await?;
    Ok(category)
}

pub async fn create(pool: &SqlitePool, slug: &str, title: &str) -> RepoResult<Category> {
    let category = sqlx::query_as::<_, Category>(
        "INSERT INTO category (slug, title) VALUES (?, ?) RETURNING id, slug, title",
    )
    .bind(slug)
    .bind(title)
    .fetch_one(pool)
    .await?;
    Ok(category)
}

/// Write both fields; callers merge partial updates beforehand
pub async fn update(pool: &SqlitePool, id: i64, slug: &str, title: &str) -> RepoResult<Category> {
    sqlx::query_as::<_, Category>(
        "UPDATE category SET slug = ?, title = ? WHERE id = ? RETURNING id, slug, title",
    )
    .bind(slug)
    .bind(title)
    .bind(id)
    .fetch_optional(pool)
    .await?
    .ok_or_else(|| RepoError::NotFound(format!("Category {id} not found")))
}

/// Number of menu items filed under a category
pub async fn menu_item_count(pool: &SqlitePool, id: i64) -> RepoResult<i64> {
    let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM menu_item WHERE category_id = ?")
        .bind(id)
        .fetch_one(pool)
        .await?;
    Ok(count)
}

/// Delete a category; returns whether a row was removed
///
/// Fails with [`RepoError::Validation`] while menu items still reference it.
pub async fn delete(pool: &SqlitePool, id: i64) -> RepoResult<bool> {
    let rows = sqlx::query("DELETE FROM category WHERE id = ?")
        .bind(id)
        .execute(pool)
        .await?;
    Ok(rows.rows_affected() > 0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::DbService;

    #[tokio::test]
    async fn crud_cycle() {
        let db = DbService::in_memory().await.unwrap();
        let mains = create(&db.pool, "mains", "Mains").await.unwrap();
        assert_eq!(mains.title, "Mains");

        let renamed = update(&db.pool, mains.id, "main-courses", "Main courses")
            .await
            .unwrap();
        assert_eq!(renamed.slug, "main-courses");
        assert_eq!(find_all(&db.pool).await.unwrap().len(), 1);
        assert_eq!(
            find_by_title(&db.pool, "Main courses").await.unwrap().map(|c| c.id),
            Some(mains.id)
        );

        assert!(delete(&db.pool, mains.id).await.unwrap());
        assert!(!delete(&db.pool, mains.id).await.unwrap());
        assert!(find_by_id(&db.pool, mains.id).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn update_missing_is_not_found() {
        let db = DbService::in_memory().await.unwrap();
        let err = update(&db.pool, 42, "x", "X").await.unwrap_err();
        assert!(matches!(err, RepoError::NotFound(_)));
    }
}
