//! Authentication Routes
//!
//! - register / login: public
//! - logout / profile: token required

mod handler;

use axum::{Router, routing::get, routing::post};

use super::route_with_slash;
use crate::core::ServerState;

pub fn router() -> Router<ServerState> {
    let router = Router::new();
    let router = route_with_slash(router, "/api/auth/register", post(handler::register));
    let router = route_with_slash(router, "/api/auth/login", post(handler::login));
    let router = route_with_slash(router, "/api/auth/logout", post(handler::logout));
    route_with_slash(
        router,
        "/api/auth/profile",
        get(handler::profile)
            .put(handler::update_profile)
            .patch(handler::update_profile),
    )
}
