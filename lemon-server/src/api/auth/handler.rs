//! Authentication Handlers
//!
//! Register, login, logout and the caller's profile.

use axum::extract::State;
use http::StatusCode;
use shared::models::{AuthResponse, LoginRequest, ProfileUpdate, RegisterRequest, UserProfile};

use crate::auth::password::{hash_password, verify_password};
use crate::auth::{CurrentUser, token};
use crate::core::ServerState;
use crate::db::repository::user::NewUser;
use crate::db::repository::{RepoError, token as token_repo, user as user_repo};
use crate::security_log;
use crate::utils::extract::Json;
use crate::utils::validation::{
    MAX_PERSON_NAME_LEN, validate_email, validate_optional_text, validate_password,
    validate_username,
};
use crate::utils::{ApiResponse, AppError, AppResult, ErrorCode};

/// Issue a fresh key for the user, replacing any previous one
async fn issue_token(state: &ServerState, user_id: i64) -> AppResult<String> {
    let key = token::generate_key();
    token_repo::replace(&state.pool, user_id, &token::hash_key(&key)).await?;
    Ok(key)
}

/// POST /api/auth/register
pub async fn register(
    State(state): State<ServerState>,
    Json(req): Json<RegisterRequest>,
) -> AppResult<(StatusCode, Json<AuthResponse>)> {
    let username = req.username.trim().to_string();
    validate_username(&username)?;
    validate_email(req.email.trim(), "email")?;
    validate_optional_text(&Some(req.first_name.clone()), "first_name", MAX_PERSON_NAME_LEN)?;
    validate_optional_text(&Some(req.last_name.clone()), "last_name", MAX_PERSON_NAME_LEN)?;
    if req.password != req.password_confirm {
        return Err(AppError::new(ErrorCode::PasswordMismatch).with_detail("field", "password"));
    }
    validate_password(&req.password, &username)?;

    if user_repo::find_by_username(&state.pool, &username).await?.is_some() {
        return Err(AppError::new(ErrorCode::UsernameExists).with_detail("field", "username"));
    }

    let new_user = NewUser {
        username: username.clone(),
        email: req.email.trim().to_string(),
        first_name: req.first_name,
        last_name: req.last_name,
        password_hash: hash_password(&req.password)?,
        is_staff: false,
    };
    let user = match user_repo::create(&state.pool, new_user).await {
        Ok(user) => user,
        // Lost a race with a concurrent registration of the same name
        Err(RepoError::Duplicate(_)) => return Err(AppError::new(ErrorCode::UsernameExists)),
        Err(e) => return Err(e.into()),
    };
    let key = issue_token(&state, user.id).await?;

    tracing::info!(user_id = user.id, username = %user.username, "User registered");
    Ok((
        StatusCode::CREATED,
        Json(AuthResponse {
            message: "User created successfully".to_string(),
            user_id: user.id,
            username: user.username,
            email: user.email,
            token: key,
        }),
    ))
}

/// POST /api/auth/login
pub async fn login(
    State(state): State<ServerState>,
    Json(req): Json<LoginRequest>,
) -> AppResult<Json<AuthResponse>> {
    if req.username.trim().is_empty() {
        return Err(AppError::required("username"));
    }
    if req.password.is_empty() {
        return Err(AppError::required("password"));
    }

    let Some((user, hash)) = user_repo::find_credentials(&state.pool, req.username.trim()).await?
    else {
        security_log!("WARN", "login_failed", username = req.username.clone(), reason = "unknown_user");
        return Err(AppError::invalid_credentials());
    };
    if !verify_password(&req.password, &hash) {
        security_log!("WARN", "login_failed", username = req.username.clone(), reason = "bad_password");
        return Err(AppError::invalid_credentials());
    }
    if !user.is_active {
        security_log!("WARN", "login_failed", username = req.username.clone(), reason = "inactive");
        return Err(AppError::new(ErrorCode::AccountDisabled));
    }

    let key = issue_token(&state, user.id).await?;
    tracing::info!(user_id = user.id, username = %user.username, "User logged in");
    Ok(Json(AuthResponse {
        message: "Login successful".to_string(),
        user_id: user.id,
        username: user.username,
        email: user.email,
        token: key,
    }))
}

/// POST /api/auth/logout
pub async fn logout(
    State(state): State<ServerState>,
    user: CurrentUser,
) -> AppResult<Json<ApiResponse<()>>> {
    if !token_repo::delete_for_user(&state.pool, user.id).await? {
        return Err(AppError::new(ErrorCode::NoActiveToken));
    }
    tracing::info!(user_id = user.id, username = %user.username, "User logged out");
    Ok(Json(ApiResponse::message("Successfully logged out")))
}

async fn load_profile(state: &ServerState, user_id: i64) -> AppResult<UserProfile> {
    let user = user_repo::find_by_id(&state.pool, user_id)
        .await?
        .ok_or_else(|| AppError::new(ErrorCode::UserNotFound))?;
    let groups = user_repo::group_names(&state.pool, user_id).await?;
    Ok(UserProfile::new(user, groups))
}

/// GET /api/auth/profile
pub async fn profile(
    State(state): State<ServerState>,
    user: CurrentUser,
) -> AppResult<Json<UserProfile>> {
    Ok(Json(load_profile(&state, user.id).await?))
}

/// PUT/PATCH /api/auth/profile - email, first_name, last_name
pub async fn update_profile(
    State(state): State<ServerState>,
    user: CurrentUser,
    Json(req): Json<ProfileUpdate>,
) -> AppResult<Json<UserProfile>> {
    let email = req.email.as_deref().map(str::trim);
    if let Some(email) = email {
        validate_email(email, "email")?;
    }
    validate_optional_text(&req.first_name, "first_name", MAX_PERSON_NAME_LEN)?;
    validate_optional_text(&req.last_name, "last_name", MAX_PERSON_NAME_LEN)?;

    user_repo::update_profile(
        &state.pool,
        user.id,
        email,
        req.first_name.as_deref(),
        req.last_name.as_deref(),
    )
    .await?;
    tracing::info!(user_id = user.id, "Profile updated");
    Ok(Json(load_profile(&state, user.id).await?))
}
