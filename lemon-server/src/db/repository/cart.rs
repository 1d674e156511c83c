//! Cart repository
//!
//! A user has at most one cart line. Creation is a single conditional
//! INSERT so two concurrent adds cannot both succeed.

use rust_decimal::Decimal;
use shared::models::{CartEntry, MenuItem, UserSummary};
use shared::money::{from_cents, to_cents};
use sqlx::{SqliteConnection, SqlitePool};

use super::RepoResult;
use super::menu_item::MenuItemRow;

/// Cart line as stored, before joins
#[derive(Debug, Clone, PartialEq, sqlx::FromRow)]
pub struct CartLine {
    pub user_id: i64,
    pub menuitem_id: i64,
    pub quantity: i64,
    pub unit_price_cents: i64,
    pub price_cents: i64,
}

#[derive(Debug, sqlx::FromRow)]
struct CartEntryRow {
    user_id: i64,
    username: String,
    email: String,
    quantity: i64,
    unit_price_cents: i64,
    price_cents: i64,
    #[sqlx(flatten)]
    item: MenuItemRow,
}

impl From<CartEntryRow> for CartEntry {
    fn from(row: CartEntryRow) -> Self {
        CartEntry {
            user: UserSummary {
                id: row.user_id,
                username: row.username,
                email: row.email,
            },
            menuitem: MenuItem::from(row.item),
            quantity: row.quantity,
            unit_price: from_cents(row.unit_price_cents),
            price: from_cents(row.price_cents),
        }
    }
}

/// Insert the user's cart line unless one already exists
///
/// Returns `false` when the user already had a cart.
pub async fn insert_if_absent(
    pool: &SqlitePool,
    user_id: i64,
    menuitem_id: i64,
    quantity: i64,
    unit_price: Decimal,
    price: Decimal,
) -> RepoResult<bool> {
    let rows = sqlx::query(
        "INSERT INTO cart (user_id, menuitem_id, quantity, unit_price_cents, price_cents) \
         SELECT ?1, ?2, ?3, ?4, ?5 WHERE NOT EXISTS (SELECT 1 FROM cart WHERE user_id = ?1)",
    )
    .bind(user_id)
    .bind(menuitem_id)
    .bind(quantity)
    .bind(to_cents(unit_price))
    .bind(to_cents(price))
    .execute(pool)
    .await?;
    Ok(rows.rows_affected() > 0)
}

/// Whether the user holds a cart line
pub async fn exists_for_user(pool: &SqlitePool, user_id: i64) -> RepoResult<bool> {
    let found: bool = sqlx::query_scalar("SELECT EXISTS (SELECT 1 FROM cart WHERE user_id = ?)")
        .bind(user_id)
        .fetch_one(pool)
        .await?;
    Ok(found)
}

/// The user's cart line with user and menu item expanded
pub async fn find_for_user(pool: &SqlitePool, user_id: i64) -> RepoResult<Option<CartEntry>> {
    let row = sqlx::query_as::<_, CartEntryRow>(
        "SELECT u.id AS user_id, u.username, u.email, ct.quantity, ct.unit_price_cents, ct.price_cents, \
         m.id, m.name, m.price_cents, m.description, m.featured, \
         c.id AS category_id, c.slug AS category_slug, c.title AS category_title \
         FROM cart ct \
         JOIN users u ON u.id = ct.user_id \
         JOIN menu_item m ON m.id = ct.menuitem_id \
         JOIN category c ON c.id = m.category_id \
         WHERE ct.user_id = ? ORDER BY ct.id LIMIT 1",
    )
    .bind(user_id)
    .fetch_optional(pool)
    .await?;
    Ok(row.map(CartEntry::from))
}

/// Remove every cart line of the user; returns the number removed
pub async fn delete_for_user(pool: &SqlitePool, user_id: i64) -> RepoResult<u64> {
    let rows = sqlx::query("DELETE FROM cart WHERE user_id = ?")
        .bind(user_id)
        .execute(pool)
        .await?;
    Ok(rows.rows_affected())
}

/// Delete and return the user's cart line inside a checkout transaction
pub async fn take_for_user(
    conn: &mut SqliteConnection,
    user_id: i64,
) -> RepoResult<Option<CartLine>> {
    let line = sqlx::query_as::<_, CartLine>(
        "DELETE FROM cart WHERE user_id = ? \
         RETURNING user_id, menuitem_id, quantity, unit_price_cents, price_cents",
    )
    .bind(user_id)
    .fetch_optional(&mut *conn)
    .await?;
    Ok(line)
}
