//! Order and order item repository

use chrono::NaiveDate;
use shared::models::{MenuItem, Order, OrderItem};
use shared::money::from_cents;
use sqlx::{SqliteConnection, SqlitePool};

use super::menu_item::MenuItemRow;
use super::{RepoError, RepoResult, SqlFilter};
use crate::utils::listing::PageRequest;

const ORDER_SELECT: &str = "SELECT o.id AS order_id, o.user_id AS order_user_id, o.delivery_crew_id, o.status, \
     o.total_cents, o.date, \
     oi.id AS orderitem_id, oi.user_id AS orderitem_user_id, oi.quantity AS orderitem_quantity, \
     oi.unit_price_cents AS orderitem_unit_price_cents, oi.price_cents AS orderitem_price_cents, \
     m.id, m.name, m.price_cents, m.description, m.featured, \
     c.id AS category_id, c.slug AS category_slug, c.title AS category_title \
     FROM orders o \
     LEFT JOIN order_item oi ON oi.id = o.orderitem_id \
     LEFT JOIN menu_item m ON m.id = oi.menuitem_id \
     LEFT JOIN category c ON c.id = m.category_id";

/// Flat join row; the order item columns are NULL for orders without one
#[derive(Debug, sqlx::FromRow)]
struct OrderRow {
    order_id: i64,
    order_user_id: i64,
    delivery_crew_id: Option<i64>,
    status: bool,
    total_cents: i64,
    date: NaiveDate,
    orderitem_id: Option<i64>,
    orderitem_user_id: Option<i64>,
    orderitem_quantity: Option<i64>,
    orderitem_unit_price_cents: Option<i64>,
    orderitem_price_cents: Option<i64>,
    id: Option<i64>,
    name: Option<String>,
    price_cents: Option<i64>,
    description: Option<String>,
    featured: Option<bool>,
    category_id: Option<i64>,
    category_slug: Option<String>,
    category_title: Option<String>,
}

impl OrderRow {
    fn into_order(self) -> Order {
        let menuitem = match (
            self.id,
            self.name,
            self.price_cents,
            self.description,
            self.featured,
            self.category_id,
            self.category_slug,
            self.category_title,
        ) {
            (
                Some(id),
                Some(name),
                Some(price_cents),
                Some(description),
                Some(featured),
                Some(category_id),
                Some(category_slug),
                Some(category_title),
            ) => Some(MenuItem::from(MenuItemRow {
                id,
                name,
                price_cents,
                description,
                featured,
                category_id,
                category_slug,
                category_title,
            })),
            _ => None,
        };

        let orderitem = match (
            self.orderitem_id,
            self.orderitem_user_id,
            self.orderitem_quantity,
            self.orderitem_unit_price_cents,
            self.orderitem_price_cents,
            menuitem,
        ) {
            (Some(id), Some(user_id), Some(quantity), Some(unit), Some(price), Some(menuitem)) => {
                Some(OrderItem {
                    id,
                    user_id,
                    menuitem,
                    quantity,
                    unit_price: from_cents(unit),
                    price: from_cents(price),
                })
            }
            _ => None,
        };

        Order {
            id: self.order_id,
            user_id: self.order_user_id,
            delivery_crew: self.delivery_crew_id,
            status: self.status,
            total: from_cents(self.total_cents),
            date: self.date,
            orderitem,
        }
    }
}

/// Order item snapshot written at checkout
#[derive(Debug, Clone)]
pub struct NewOrderItem {
    pub user_id: i64,
    pub menuitem_id: i64,
    pub quantity: i64,
    pub unit_price_cents: i64,
    pub price_cents: i64,
}

/// Insert an order item inside the checkout transaction
///
/// A second item for the same (user, menu item) pair is a
/// [`RepoError::Duplicate`].
pub async fn insert_order_item(conn: &mut SqliteConnection, item: &NewOrderItem) -> RepoResult<i64> {
    let id: i64 = sqlx::query_scalar(
        "INSERT INTO order_item (user_id, menuitem_id, quantity, unit_price_cents, price_cents) \
         VALUES (?, ?, ?, ?, ?) RETURNING id",
    )
    .bind(item.user_id)
    .bind(item.menuitem_id)
    .bind(item.quantity)
    .bind(item.unit_price_cents)
    .bind(item.price_cents)
    .fetch_one(&mut *conn)
    .await?;
    Ok(id)
}

/// Insert a pending, unassigned order inside the checkout transaction
pub async fn insert_order(
    conn: &mut SqliteConnection,
    user_id: i64,
    orderitem_id: i64,
    total_cents: i64,
    date: NaiveDate,
) -> RepoResult<i64> {
    let id: i64 = sqlx::query_scalar(
        "INSERT INTO orders (user_id, delivery_crew_id, status, total_cents, date, orderitem_id) \
         VALUES (?, NULL, 0, ?, ?, ?) RETURNING id",
    )
    .bind(user_id)
    .bind(total_cents)
    .bind(date)
    .bind(orderitem_id)
    .fetch_one(&mut *conn)
    .await?;
    Ok(id)
}

pub async fn find_by_id(pool: &SqlitePool, id: i64) -> RepoResult<Option<Order>> {
    let sql = format!("{ORDER_SELECT} WHERE o.id = ?");
    let row = sqlx::query_as::<_, OrderRow>(&sql)
        .bind(id)
        .fetch_optional(pool)
        .await?;
    Ok(row.map(OrderRow::into_order))
}

/// One page of orders matching `filter` (conditions on alias `o`)
pub async fn list_page(
    pool: &SqlitePool,
    filter: &SqlFilter,
    order_by: &str,
    page: PageRequest,
) -> RepoResult<Vec<Order>> {
    let sql = format!(
        "{ORDER_SELECT}{} ORDER BY {order_by} LIMIT ? OFFSET ?",
        filter.where_clause()
    );
    let rows = filter
        .bind_as(sqlx::query_as::<_, OrderRow>(&sql))
        .bind(page.limit())
        .bind(page.offset())
        .fetch_all(pool)
        .await?;
    Ok(rows.into_iter().map(OrderRow::into_order).collect())
}

/// Every order matching `filter`, unpaginated
pub async fn list_all(pool: &SqlitePool, filter: &SqlFilter, order_by: &str) -> RepoResult<Vec<Order>> {
    let sql = format!("{ORDER_SELECT}{} ORDER BY {order_by}", filter.where_clause());
    let rows = filter
        .bind_as(sqlx::query_as::<_, OrderRow>(&sql))
        .fetch_all(pool)
        .await?;
    Ok(rows.into_iter().map(OrderRow::into_order).collect())
}

/// Write the mutable fields and restamp the date
pub async fn update(
    pool: &SqlitePool,
    id: i64,
    status: bool,
    delivery_crew: Option<i64>,
    date: NaiveDate,
) -> RepoResult<Order> {
    let rows = sqlx::query("UPDATE orders SET status = ?, delivery_crew_id = ?, date = ? WHERE id = ?")
        .bind(status)
        .bind(delivery_crew)
        .bind(date)
        .bind(id)
        .execute(pool)
        .await?;
    if rows.rows_affected() == 0 {
        return Err(RepoError::NotFound(format!("Order {id} not found")));
    }
    find_by_id(pool, id)
        .await?
        .ok_or_else(|| RepoError::NotFound(format!("Order {id} not found")))
}

/// Delete an order row only
///
/// The referenced order item stays, and with it the (user, menu item)
/// uniqueness it carries.
pub async fn delete(pool: &SqlitePool, id: i64) -> RepoResult<bool> {
    let rows = sqlx::query("DELETE FROM orders WHERE id = ?")
        .bind(id)
        .execute(pool)
        .await?;
    Ok(rows.rows_affected() > 0)
}
