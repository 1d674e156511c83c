//! Authentication middleware
//!
//! Resolves the `Authorization` header to a [`CurrentUser`], including its
//! group memberships, once per request.

use axum::{
    extract::{Request, State},
    middleware::Next,
    response::Response,
};
use http::HeaderMap;

use crate::auth::{CurrentUser, RoleSet, token};
use crate::core::ServerState;
use crate::db::repository::{token as token_repo, user as user_repo};
use crate::security_log;
use crate::utils::{AppError, AppResult, ErrorCode};

/// Paths reachable without a token
const PUBLIC_PATHS: &[&str] = &["/api/auth/register", "/api/auth/login", "/api/health"];

/// Authentication middleware - requires a valid token
///
/// On success the [`CurrentUser`] is inserted into the request extensions.
///
/// # Skipped
///
/// - `OPTIONS *` (CORS preflight)
/// - paths outside `/api/` (left to 404)
/// - register, login and health
///
/// # Errors
///
/// | Error | HTTP |
/// |-------|------|
/// | no / malformed header | 401 |
/// | unknown token | 401 |
/// | inactive account | 401 |
pub async fn require_auth(
    State(state): State<ServerState>,
    mut req: Request,
    next: Next,
) -> Result<Response, AppError> {
    if req.method() == http::Method::OPTIONS {
        return Ok(next.run(req).await);
    }

    let path = req.uri().path();
    if !path.starts_with("/api/") || PUBLIC_PATHS.contains(&path.trim_end_matches('/')) {
        return Ok(next.run(req).await);
    }

    let user = authenticate(&state, req.headers(), path).await?;
    req.extensions_mut().insert(user);
    Ok(next.run(req).await)
}

/// Resolve the caller from request headers
pub(crate) async fn authenticate(
    state: &ServerState,
    headers: &HeaderMap,
    path: &str,
) -> AppResult<CurrentUser> {
    let header = headers
        .get(http::header::AUTHORIZATION)
        .and_then(|h| h.to_str().ok());

    let key = match header {
        Some(header) => token::extract_from_header(header)
            .ok_or_else(|| AppError::invalid_token("Invalid authorization header"))?,
        None => {
            security_log!("WARN", "auth_missing", path = path.to_string());
            return Err(AppError::not_authenticated());
        }
    };

    let Some(user) = token_repo::find_user(&state.pool, &token::hash_key(key)).await? else {
        security_log!("WARN", "auth_failed", path = path.to_string());
        return Err(AppError::invalid_token("Invalid token."));
    };

    if !user.is_active {
        security_log!("WARN", "auth_inactive", user_id = user.id, path = path.to_string());
        return Err(AppError::new(ErrorCode::AccountDisabled));
    }

    let groups = user_repo::group_names(&state.pool, user.id).await?;
    Ok(CurrentUser {
        id: user.id,
        username: user.username,
        roles: RoleSet::from_groups(&groups, user.is_staff),
    })
}
