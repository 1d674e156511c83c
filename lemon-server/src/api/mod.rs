//! HTTP API
//!
//! - [`health`] - liveness (public)
//! - [`auth`] - register, login, logout, profile
//! - [`categories`] - menu categories
//! - [`menu`] - menu items
//! - [`cart`] - the caller's cart
//! - [`orders`] - checkout and order lifecycle
//! - [`bookings`] - table reservations
//! - [`groups`] - Manager / Delivery crew membership

pub mod auth;
pub mod bookings;
pub mod cart;
pub mod categories;
pub mod groups;
pub mod health;
pub mod menu;
pub mod orders;

use axum::Router;
use axum::routing::MethodRouter;

use crate::core::ServerState;

/// Register `path` both with and without a trailing slash
pub(crate) fn route_with_slash(
    router: Router<ServerState>,
    path: &str,
    method: MethodRouter<ServerState>,
) -> Router<ServerState> {
    let bare = path.trim_end_matches('/');
    router
        .route(bare, method.clone())
        .route(&format!("{bare}/"), method)
}
