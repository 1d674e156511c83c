//! CurrentUser extractor
//!
//! Handlers take `user: CurrentUser` as an argument. The middleware has
//! normally resolved it already; otherwise the header is checked here.

use axum::{extract::FromRequestParts, http::request::Parts};

use crate::auth::CurrentUser;
use crate::auth::middleware::authenticate;
use crate::core::ServerState;
use crate::utils::AppError;

impl FromRequestParts<ServerState> for CurrentUser {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &ServerState,
    ) -> Result<Self, Self::Rejection> {
        if let Some(user) = parts.extensions.get::<CurrentUser>() {
            return Ok(user.clone());
        }

        let path = parts.uri.path().to_string();
        let user = authenticate(state, &parts.headers, &path).await?;
        parts.extensions.insert(user.clone());
        Ok(user)
    }
}
