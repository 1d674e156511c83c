//! Booking Manager
//!
//! Reservations are owned by name: a booking belongs to the user whose
//! username equals its `customer_name`. Managers see and write every row.
//! With `BOOKING_STRICT_OWNERSHIP` the creating user's id must match too.

use serde::Deserialize;
use shared::models::{Booking, BookingCreate, BookingUpdate};
use shared::response::PaginatedResponse;

use crate::auth::{Action, CurrentUser, Owner, Resource};
use crate::core::ServerState;
use crate::db::repository::booking::BookingFields;
use crate::db::repository::{SqlFilter, booking as booking_repo};
use crate::utils::listing::{OrderField, PageRequest, parse_ordering};
use crate::utils::validation::{
    MAX_NAME_LEN, MAX_PHONE_LEN, validate_email, validate_required_text,
};
use crate::utils::{AppError, AppResult, ErrorCode};

const BOOKING_FIELDS: &[OrderField] = &[
    ("date", "date"),
    ("time", "time"),
    ("customer_name", "customer_name"),
    ("number_of_guests", "number_of_guests"),
];

/// List parameters
#[derive(Debug, Clone, Default, Deserialize)]
pub struct BookingListQuery {
    pub date: Option<String>,
    pub number_of_guests: Option<String>,
    pub search: Option<String>,
    pub ordering: Option<String>,
    #[serde(alias = "page_size")]
    pub perpage: Option<String>,
    pub page: Option<String>,
}

fn owner_of(booking: &Booking) -> Owner<'_> {
    Owner::Booking {
        customer_name: &booking.customer_name,
        owner_id: booking.owner_id,
    }
}

fn validate(fields: &BookingFields) -> AppResult<()> {
    validate_required_text(&fields.customer_name, "customer_name", MAX_NAME_LEN)?;
    validate_email(&fields.email, "email")?;
    validate_required_text(&fields.phone, "phone", MAX_PHONE_LEN)?;
    if fields.number_of_guests < 1 {
        return Err(AppError::new(ErrorCode::BookingInvalidGuests)
            .with_detail("number_of_guests", fields.number_of_guests));
    }
    Ok(())
}

async fn load(state: &ServerState, id: i64) -> AppResult<Booking> {
    booking_repo::find_by_id(&state.pool, id)
        .await?
        .ok_or_else(|| AppError::new(ErrorCode::BookingNotFound).with_detail("booking_id", id))
}

/// Bookings visible to the caller, one page at a time
pub async fn list_bookings(
    state: &ServerState,
    user: &CurrentUser,
    query: &BookingListQuery,
) -> AppResult<PaginatedResponse<Booking>> {
    state
        .policy()
        .authorize(user, Resource::Booking, Action::List, None)?;

    let mut filter = SqlFilter::new();
    if !user.is_manager() {
        filter.eq_text("customer_name", user.username.as_str());
        if state.config.booking_strict_ownership {
            filter.eq_i64("owner_id", user.id);
        }
    }
    if let Some(raw) = query.date.as_deref().map(str::trim).filter(|s| !s.is_empty()) {
        let date: chrono::NaiveDate = raw.parse().map_err(|_| {
            AppError::field("date", format!("Date has wrong format `{raw}`, use YYYY-MM-DD."))
        })?;
        filter.eq_text("date", date.to_string());
    }
    if let Some(raw) = query.number_of_guests.as_deref().map(str::trim).filter(|s| !s.is_empty()) {
        let guests: i64 = raw
            .parse()
            .map_err(|_| AppError::field("number_of_guests", "A valid integer is required."))?;
        filter.eq_i64("number_of_guests", guests);
    }
    if let Some(term) = query.search.as_deref().map(str::trim).filter(|s| !s.is_empty()) {
        filter.search(&["customer_name", "email", "phone"], term);
    }

    let order_by = parse_ordering(query.ordering.as_deref(), BOOKING_FIELDS, "date,time", "id")?;
    let page = PageRequest::parse(
        query.page.as_deref(),
        query.perpage.as_deref(),
        state.config.menu_page_size,
        state.config.max_page_size,
    )?;

    let (items, total) = booking_repo::list(&state.pool, &filter, &order_by, page).await?;
    Ok(PaginatedResponse::new(items, page.page, page.per_page, total.max(0) as u64))
}

pub async fn get_booking(state: &ServerState, user: &CurrentUser, id: i64) -> AppResult<Booking> {
    let booking = load(state, id).await?;
    state
        .policy()
        .authorize(user, Resource::Booking, Action::Read, Some(owner_of(&booking)))?;
    Ok(booking)
}

/// Create a booking; a non-manager always books under their own username
pub async fn create_booking(
    state: &ServerState,
    user: &CurrentUser,
    payload: BookingCreate,
) -> AppResult<Booking> {
    state
        .policy()
        .authorize(user, Resource::Booking, Action::Create, None)?;

    let customer_name = if user.is_manager() {
        payload.customer_name
    } else {
        user.username.clone()
    };
    let fields = BookingFields {
        customer_name,
        email: payload.email,
        phone: payload.phone,
        date: payload.date,
        time: payload.time,
        number_of_guests: payload.number_of_guests,
    };
    validate(&fields)?;

    let booking = booking_repo::create(&state.pool, &fields, Some(user.id)).await?;
    tracing::info!(
        booking_id = booking.id,
        user_id = user.id,
        date = %booking.date,
        guests = booking.number_of_guests,
        "Booking created"
    );
    Ok(booking)
}

/// PUT: replace every field
pub async fn replace_booking(
    state: &ServerState,
    user: &CurrentUser,
    id: i64,
    payload: BookingCreate,
) -> AppResult<Booking> {
    let existing = load(state, id).await?;
    // Ownership is judged on the stored row, before the payload renames it
    state
        .policy()
        .authorize(user, Resource::Booking, Action::Replace, Some(owner_of(&existing)))?;

    let customer_name = if payload.customer_name.trim().is_empty() {
        existing.customer_name
    } else {
        payload.customer_name
    };
    let fields = BookingFields {
        customer_name,
        email: payload.email,
        phone: payload.phone,
        date: payload.date,
        time: payload.time,
        number_of_guests: payload.number_of_guests,
    };
    save(state, user, id, fields).await
}

/// PATCH: overwrite only the given fields
pub async fn patch_booking(
    state: &ServerState,
    user: &CurrentUser,
    id: i64,
    payload: BookingUpdate,
) -> AppResult<Booking> {
    let existing = load(state, id).await?;
    state
        .policy()
        .authorize(user, Resource::Booking, Action::Patch, Some(owner_of(&existing)))?;

    let fields = BookingFields {
        customer_name: payload.customer_name.unwrap_or(existing.customer_name),
        email: payload.email.unwrap_or(existing.email),
        phone: payload.phone.unwrap_or(existing.phone),
        date: payload.date.unwrap_or(existing.date),
        time: payload.time.unwrap_or(existing.time),
        number_of_guests: payload.number_of_guests.unwrap_or(existing.number_of_guests),
    };
    save(state, user, id, fields).await
}

async fn save(
    state: &ServerState,
    user: &CurrentUser,
    id: i64,
    fields: BookingFields,
) -> AppResult<Booking> {
    validate(&fields)?;
    let booking = booking_repo::update(&state.pool, id, &fields).await?;
    tracing::info!(booking_id = id, user_id = user.id, "Booking updated");
    Ok(booking)
}

pub async fn delete_booking(state: &ServerState, user: &CurrentUser, id: i64) -> AppResult<()> {
    let existing = load(state, id).await?;
    state
        .policy()
        .authorize(user, Resource::Booking, Action::Delete, Some(owner_of(&existing)))?;
    booking_repo::delete(&state.pool, id).await?;
    tracing::info!(booking_id = id, user_id = user.id, "Booking deleted");
    Ok(())
}
