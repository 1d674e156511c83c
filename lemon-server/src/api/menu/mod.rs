//! Menu item API
//!
//! | Path | Methods | Gate |
//! |------|---------|------|
//! | /api/menu/ | GET, POST | read: any, write: Manager |
//! | /api/menu/{id} | GET, PUT, PATCH, DELETE | read: any, write: Manager |
//!
//! List query: `category` (id or title), `featured`, `to_price`, `search`,
//! `ordering`, `perpage` / `page_size`, `page`.

mod handler;

use axum::{Router, routing::get};

use super::route_with_slash;
use crate::core::ServerState;

pub fn router() -> Router<ServerState> {
    let router = route_with_slash(
        Router::new(),
        "/api/menu",
        get(handler::list).post(handler::create),
    );
    route_with_slash(
        router,
        "/api/menu/{id}",
        get(handler::get_by_id)
            .put(handler::replace)
            .patch(handler::update)
            .delete(handler::delete),
    )
}
