//! Booking repository

use chrono::{NaiveDate, NaiveTime, Utc};
use shared::models::Booking;
use sqlx::SqlitePool;

use super::{RepoError, RepoResult, SqlFilter};
use crate::utils::listing::PageRequest;

const BOOKING_COLUMNS: &str = "id, customer_name, email, phone, date, time, number_of_guests, \
     created_at, updated_at, owner_id";

/// Validated booking fields
#[derive(Debug, Clone)]
pub struct BookingFields {
    pub customer_name: String,
    pub email: String,
    pub phone: String,
    pub date: NaiveDate,
    pub time: NaiveTime,
    pub number_of_guests: i64,
}

pub async fn find_by_id(pool: &SqlitePool, id: i64) -> RepoResult<Option<Booking>> {
    let sql = format!("SELECT {BOOKING_COLUMNS} FROM booking WHERE id = ?");
    let booking = sqlx::query_as::<_, Booking>(&sql)
        .bind(id)
        .fetch_optional(pool)
        .await?;
    Ok(booking)
}

/// One page of bookings matching `filter`, plus the total
pub async fn list(
    pool: &SqlitePool,
    filter: &SqlFilter,
    order_by: &str,
    page: PageRequest,
) -> RepoResult<(Vec<Booking>, i64)> {
    let where_clause = filter.where_clause();

    let count_sql = format!("SELECT COUNT(*) FROM booking{where_clause}");
    let total: i64 = filter
        .bind_scalar(sqlx::query_scalar(&count_sql))
        .fetch_one(pool)
        .await?;

    let sql = format!(
        "SELECT {BOOKING_COLUMNS} FROM booking{where_clause} ORDER BY {order_by} LIMIT ? OFFSET ?"
    );
    let bookings = filter
        .bind_as(sqlx::query_as::<_, Booking>(&sql))
        .bind(page.limit())
        .bind(page.offset())
        .fetch_all(pool)
        .await?;

    Ok((bookings, total))
}

pub async fn create(
    pool: &SqlitePool,
    fields: &BookingFields,
    owner_id: Option<i64>,
) -> RepoResult<Booking> {
    let now = Utc::now();
    let sql = format!(
        "INSERT INTO booking (customer_name, email, phone, date, time, number_of_guests, created_at, updated_at, owner_id) \
         VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?) RETURNING {BOOKING_COLUMNS}"
    );
    let booking = sqlx::query_as::<_, Booking>(&sql)
        .bind(&fields.customer_name)
        .bind(&fields.email)
        .bind(&fields.phone)
        .bind(fields.date)
        .bind(fields.time)
        .bind(fields.number_of_guests)
        .bind(now)
        .bind(now)
        .bind(owner_id)
        .fetch_one(pool)
        .await?;
    Ok(booking)
}

/// Overwrite every field and bump `updated_at`
pub async fn update(pool: &SqlitePool, id: i64, fields: &BookingFields) -> RepoResult<Booking> {
    let sql = format!(
        "UPDATE booking SET customer_name = ?, email = ?, phone = ?, date = ?, time = ?, \
         number_of_guests = ?, updated_at = ? WHERE id = ? RETURNING {BOOKING_COLUMNS}"
    );
    sqlx::query_as::<_, Booking>(&sql)
        .bind(&fields.customer_name)
        .bind(&fields.email)
        .bind(&fields.phone)
        .bind(fields.date)
        .bind(fields.time)
        .bind(fields.number_of_guests)
        .bind(Utc::now())
        .bind(id)
        .fetch_optional(pool)
        .await?
        .ok_or_else(|| RepoError::NotFound(format!("Booking {id} not found")))
}

pub async fn delete(pool: &SqlitePool, id: i64) -> RepoResult<bool> {
    let rows = sqlx::query("DELETE FROM booking WHERE id = ?")
        .bind(id)
        .execute(pool)
        .await?;
    Ok(rows.rows_affected() > 0)
}
