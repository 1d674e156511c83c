//! Cart API
//!
//! | Path | Methods | Gate |
//! |------|---------|------|
//! | /api/cart/menu-items | GET, POST, DELETE | the caller's own cart |

mod handler;

use axum::{Router, routing::get};

use super::route_with_slash;
use crate::core::ServerState;

pub fn router() -> Router<ServerState> {
    route_with_slash(
        Router::new(),
        "/api/cart/menu-items",
        get(handler::get_cart)
            .post(handler::add_item)
            .delete(handler::clear_cart),
    )
}
