//! Menu item repository
//!
//! Items are always read joined with their category.

use rust_decimal::Decimal;
use shared::models::{Category, MenuItem};
use shared::money::{from_cents, to_cents};
use sqlx::SqlitePool;

use super::{RepoError, RepoResult, SqlFilter};
use crate::utils::listing::PageRequest;

pub(crate) const MENU_ITEM_SELECT: &str = "SELECT m.id, m.name, m.price_cents, m.description, m.featured, \
     c.id AS category_id, c.slug AS category_slug, c.title AS category_title \
     FROM menu_item m JOIN category c ON c.id = m.category_id";

#[derive(Debug, sqlx::FromRow)]
pub(crate) struct MenuItemRow {
    pub id: i64,
    pub name: String,
    pub price_cents: i64,
    pub description: String,
    pub featured: bool,
    pub category_id: i64,
    pub category_slug: String,
    pub category_title: String,
}

impl From<MenuItemRow> for MenuItem {
    fn from(row: MenuItemRow) -> Self {
        MenuItem {
            id: row.id,
            name: row.name,
            price: from_cents(row.price_cents),
            description: row.description,
            featured: row.featured,
            category: Category {
                id: row.category_id,
                slug: row.category_slug,
                title: row.category_title,
            },
        }
    }
}

/// Validated column values for insert / update
#[derive(Debug, Clone)]
pub struct MenuItemFields {
    pub name: String,
    pub price: Decimal,
    pub description: String,
    pub featured: bool,
    pub category_id: i64,
}

pub async fn find_by_id(pool: &SqlitePool, id: i64) -> RepoResult<Option<MenuItem>> {
    let sql = format!("{MENU_ITEM_SELECT} WHERE m.id = ?");
    let row = sqlx::query_as::<_, MenuItemRow>(&sql)
        .bind(id)
        .fetch_optional(pool)
        .await?;
    Ok(row.map(MenuItem::from))
}

/// One page of items matching `filter`, plus the total match count
pub async fn list(
    pool: &SqlitePool,
    filter: &SqlFilter,
    order_by: &str,
    page: PageRequest,
) -> RepoResult<(Vec<MenuItem>, i64)> {
    let where_clause = filter.where_clause();

    let count_sql = format!(
        "SELECT COUNT(*) FROM menu_item m JOIN category c ON c.id = m.category_id{where_clause}"
    );
    let total: i64 = filter
        .bind_scalar(sqlx::query_scalar(&count_sql))
        .fetch_one(pool)
        .await?;

    let sql = format!("{MENU_ITEM_SELECT}{where_clause} ORDER BY {order_by} LIMIT ? OFFSET ?");
    let rows = filter
        .bind_as(sqlx::query_as::<_, MenuItemRow>(&sql))
        .bind(page.limit())
        .bind(page.offset())
        .fetch_all(pool)
        .await?;

    Ok((rows.into_iter().map(MenuItem::from).collect(), total))
}

pub async fn create(pool: &SqlitePool, fields: &MenuItemFields) -> RepoResult<MenuItem> {
    let id: i64 = sqlx::query_scalar(
        "INSERT INTO menu_item (name, price_cents, description, featured, category_id) \
         VALUES (?, ?, ?, ?, ?) RETURNING id",
    )
    .bind(&fields.name)
    .bind(to_cents(fields.price))
    .bind(&fields.description)
    .bind(fields.featured)
    .bind(fields.category_id)
    .fetch_one(pool)
    .await?;
    find_by_id(pool, id)
        .await?
        .ok_or_else(|| RepoError::Database("Failed to create menu item".into()))
}

pub async fn update(pool: &SqlitePool, id: i64, fields: &MenuItemFields) -> RepoResult<MenuItem> {
    let rows = sqlx::query(
        "UPDATE menu_item SET name = ?, price_cents = ?, description = ?, featured = ?, category_id = ? \
         WHERE id = ?",
    )
    .bind(&fields.name)
    .bind(to_cents(fields.price))
    .bind(&fields.description)
    .bind(fields.featured)
    .bind(fields.category_id)
    .bind(id)
    .execute(pool)
    .await?;
    if rows.rows_affected() == 0 {
        return Err(RepoError::NotFound(format!("Menu item {id} not found")));
    }
    find_by_id(pool, id)
        .await?
        .ok_or_else(|| RepoError::NotFound(format!("Menu item {id} not found")))
}

/// Delete an item; cart lines and order items referencing it go with it
pub async fn delete(pool: &SqlitePool, id: i64) -> RepoResult<bool> {
    let rows = sqlx::query("DELETE FROM menu_item WHERE id = ?")
        .bind(id)
        .execute(pool)
        .await?;
    Ok(rows.rows_affected() > 0)
}
