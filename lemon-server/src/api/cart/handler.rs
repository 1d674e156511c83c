//! Cart API Handlers

use axum::extract::State;
use http::StatusCode;
use shared::models::{CartAdd, CartEntry};

use crate::auth::CurrentUser;
use crate::cart;
use crate::core::ServerState;
use crate::utils::extract::Json;
use crate::utils::{ApiResponse, AppResult};

/// GET /api/cart/menu-items
pub async fn get_cart(
    State(state): State<ServerState>,
    user: CurrentUser,
) -> AppResult<Json<CartEntry>> {
    Ok(Json(cart::get_cart(&state, &user).await?))
}

/// POST /api/cart/menu-items
pub async fn add_item(
    State(state): State<ServerState>,
    user: CurrentUser,
    Json(payload): Json<CartAdd>,
) -> AppResult<(StatusCode, Json<ApiResponse<()>>)> {
    cart::add_item(&state, &user, payload.menuitem, payload.quantity).await?;
    Ok((StatusCode::CREATED, Json(ApiResponse::message("Cart is created."))))
}

/// DELETE /api/cart/menu-items
pub async fn clear_cart(
    State(state): State<ServerState>,
    user: CurrentUser,
) -> AppResult<StatusCode> {
    cart::clear_cart(&state, &user).await?;
    Ok(StatusCode::NO_CONTENT)
}
