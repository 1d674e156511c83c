//! Category API
//!
//! | Path | Methods | Gate |
//! |------|---------|------|
//! | /api/category | GET, POST | read: any, write: Manager |
//! | /api/category/{id} | GET, PUT, PATCH, DELETE | read: any, write: Manager |

mod handler;

use axum::{Router, routing::get};

use super::route_with_slash;
use crate::core::ServerState;

pub fn router() -> Router<ServerState> {
    let router = route_with_slash(
        Router::new(),
        "/api/category",
        get(handler::list).post(handler::create),
    );
    route_with_slash(
        router,
        "/api/category/{id}",
        get(handler::get_by_id)
            .post(handler::create_on_item)
            .put(handler::replace)
            .patch(handler::update)
            .delete(handler::delete),
    )
}
