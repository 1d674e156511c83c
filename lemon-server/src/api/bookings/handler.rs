//! Booking API Handlers

use axum::extract::State;
use http::StatusCode;
use shared::models::{Booking, BookingCreate, BookingUpdate};
use shared::response::PaginatedResponse;

use crate::auth::CurrentUser;
use crate::bookings::{self, BookingListQuery};
use crate::core::ServerState;
use crate::utils::AppResult;
use crate::utils::extract::{Json, Path, Query};

/// GET /api/bookings/
pub async fn list(
    State(state): State<ServerState>,
    user: CurrentUser,
    Query(query): Query<BookingListQuery>,
) -> AppResult<Json<PaginatedResponse<Booking>>> {
    Ok(Json(bookings::list_bookings(&state, &user, &query).await?))
}

/// GET /api/bookings/{id}
pub async fn get_by_id(
    State(state): State<ServerState>,
    user: CurrentUser,
    Path(id): Path<i64>,
) -> AppResult<Json<Booking>> {
    Ok(Json(bookings::get_booking(&state, &user, id).await?))
}

/// POST /api/bookings/
pub async fn create(
    State(state): State<ServerState>,
    user: CurrentUser,
    Json(payload): Json<BookingCreate>,
) -> AppResult<(StatusCode, Json<Booking>)> {
    let booking = bookings::create_booking(&state, &user, payload).await?;
    Ok((StatusCode::CREATED, Json(booking)))
}

/// PUT /api/bookings/{id}
pub async fn replace(
    State(state): State<ServerState>,
    user: CurrentUser,
    Path(id): Path<i64>,
    Json(payload): Json<BookingCreate>,
) -> AppResult<Json<Booking>> {
    Ok(Json(bookings::replace_booking(&state, &user, id, payload).await?))
}

/// PATCH /api/bookings/{id}
pub async fn update(
    State(state): State<ServerState>,
    user: CurrentUser,
    Path(id): Path<i64>,
    Json(payload): Json<BookingUpdate>,
) -> AppResult<Json<Booking>> {
    Ok(Json(bookings::patch_booking(&state, &user, id, payload).await?))
}

/// DELETE /api/bookings/{id}
pub async fn delete(
    State(state): State<ServerState>,
    user: CurrentUser,
    Path(id): Path<i64>,
) -> AppResult<StatusCode> {
    bookings::delete_booking(&state, &user, id).await?;
    Ok(StatusCode::NO_CONTENT)
}
