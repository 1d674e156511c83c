//! Booking API
//!
//! | Path | Methods | Gate |
//! |------|---------|------|
//! | /api/bookings/ | GET, POST | any (list scoped to owner unless Manager) |
//! | /api/bookings/{id} | GET, PUT, PATCH, DELETE | owner or Manager |

mod handler;

use axum::{Router, routing::get};

use super::route_with_slash;
use crate::core::ServerState;

pub fn router() -> Router<ServerState> {
    let router = route_with_slash(
        Router::new(),
        "/api/bookings",
        get(handler::list).post(handler::create),
    );
    route_with_slash(
        router,
        "/api/bookings/{id}",
        get(handler::get_by_id)
            .put(handler::replace)
            .patch(handler::update)
            .delete(handler::delete),
    )
}
