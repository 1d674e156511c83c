//! Order API
//!
//! | Path | Methods | Gate |
//! |------|---------|------|
//! | /api/orders | GET, POST | list scoped by role; checkout: any |
//! | /api/orders/{id} | GET | owning customer |
//! | /api/orders/{id} | PUT, DELETE | Manager |
//! | /api/orders/{id} | PATCH | Manager, or assigned crew (status only) |

mod handler;

use axum::{Router, routing::get};

use super::route_with_slash;
use crate::core::ServerState;

pub fn router() -> Router<ServerState> {
    let router = route_with_slash(
        Router::new(),
        "/api/orders",
        get(handler::list).post(handler::place),
    );
    route_with_slash(
        router,
        "/api/orders/{id}",
        get(handler::get_by_id)
            .put(handler::replace)
            .patch(handler::update)
            .delete(handler::delete),
    )
}
