//! Group membership API
//!
//! `{group}` is `manager` or `delivery-crew`.
//!
//! | Path | Methods | Gate |
//! |------|---------|------|
//! | /api/groups/{group}/users | GET, POST | Manager or admin |
//! | /api/groups/{group}/users/{id} | DELETE | Manager or admin |

mod handler;

use axum::{Router, routing::delete, routing::get};

use super::route_with_slash;
use crate::core::ServerState;

pub fn router() -> Router<ServerState> {
    let router = route_with_slash(
        Router::new(),
        "/api/groups/{group}/users",
        get(handler::list_members).post(handler::add_member),
    );
    route_with_slash(
        router,
        "/api/groups/{group}/users/{id}",
        delete(handler::remove_member),
    )
}
