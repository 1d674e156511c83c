//! Order API Handlers
//!
//! Thin adapters over [`crate::orders`]; PUT and PATCH answer 205 Reset
//! Content with the updated order.

use axum::extract::State;
use http::StatusCode;
use serde::Serialize;
use shared::models::{Order, OrderPatch, OrderPlaced, OrderReplace};

use crate::auth::CurrentUser;
use crate::core::ServerState;
use crate::orders::{self, OrderListQuery, OrderUpdate};
use crate::utils::AppResult;
use crate::utils::extract::{Json, Path, Query};

#[derive(Debug, Serialize)]
pub struct OrderCreated {
    message: &'static str,
    #[serde(flatten)]
    placed: OrderPlaced,
}

/// GET /api/orders
pub async fn list(
    State(state): State<ServerState>,
    user: CurrentUser,
    Query(query): Query<OrderListQuery>,
) -> AppResult<Json<Vec<Order>>> {
    Ok(Json(orders::list_orders(&state, &user, &query).await?))
}

/// POST /api/orders - checkout the caller's cart
pub async fn place(
    State(state): State<ServerState>,
    user: CurrentUser,
) -> AppResult<(StatusCode, Json<OrderCreated>)> {
    let placed = orders::place_order(&state, &user).await?;
    Ok((
        StatusCode::CREATED,
        Json(OrderCreated {
            message: "Order is created.",
            placed,
        }),
    ))
}

/// GET /api/orders/{id}
pub async fn get_by_id(
    State(state): State<ServerState>,
    user: CurrentUser,
    Path(id): Path<i64>,
) -> AppResult<Json<Order>> {
    Ok(Json(orders::get_order(&state, &user, id).await?))
}

/// PUT /api/orders/{id}
pub async fn replace(
    State(state): State<ServerState>,
    user: CurrentUser,
    Path(id): Path<i64>,
    Json(payload): Json<OrderReplace>,
) -> AppResult<(StatusCode, Json<Order>)> {
    let order = orders::update_order(&state, &user, id, OrderUpdate::Replace(payload)).await?;
    Ok((StatusCode::RESET_CONTENT, Json(order)))
}

/// PATCH /api/orders/{id}
pub async fn update(
    State(state): State<ServerState>,
    user: CurrentUser,
    Path(id): Path<i64>,
    Json(payload): Json<OrderPatch>,
) -> AppResult<(StatusCode, Json<Order>)> {
    let order = orders::update_order(&state, &user, id, OrderUpdate::Patch(payload)).await?;
    Ok((StatusCode::RESET_CONTENT, Json(order)))
}

/// DELETE /api/orders/{id}
pub async fn delete(
    State(state): State<ServerState>,
    user: CurrentUser,
    Path(id): Path<i64>,
) -> AppResult<StatusCode> {
    orders::delete_order(&state, &user, id).await?;
    Ok(StatusCode::NO_CONTENT)
}
