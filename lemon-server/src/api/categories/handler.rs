//! Category API Handlers

use axum::extract::State;
use http::StatusCode;
use shared::models::{Category, CategoryCreate, CategoryUpdate};

use crate::auth::{Action, CurrentUser, Resource};
use crate::core::ServerState;
use crate::db::repository::{RepoError, category as category_repo};
use crate::utils::extract::{Json, Path};
use crate::utils::validation::{MAX_NAME_LEN, validate_required_text, validate_slug};
use crate::utils::{AppError, AppResult, ErrorCode};

fn not_found(id: i64) -> AppError {
    AppError::new(ErrorCode::CategoryNotFound).with_detail("category_id", id)
}

fn validate(slug: &str, title: &str) -> AppResult<()> {
    validate_slug(slug)?;
    validate_required_text(title, "title", MAX_NAME_LEN)
}

/// GET /api/category - all categories by id
pub async fn list(
    State(state): State<ServerState>,
    user: CurrentUser,
) -> AppResult<Json<Vec<Category>>> {
    state
        .policy()
        .authorize(&user, Resource::Catalog, Action::List, None)?;
    Ok(Json(category_repo::find_all(&state.pool).await?))
}

/// GET /api/category/{id}
pub async fn get_by_id(
    State(state): State<ServerState>,
    user: CurrentUser,
    Path(id): Path<i64>,
) -> AppResult<Json<Category>> {
    state
        .policy()
        .authorize(&user, Resource::Catalog, Action::Read, None)?;
    let category = category_repo::find_by_id(&state.pool, id)
        .await?
        .ok_or_else(|| not_found(id))?;
    Ok(Json(category))
}

/// POST /api/category
pub async fn create(
    State(state): State<ServerState>,
    user: CurrentUser,
    Json(payload): Json<CategoryCreate>,
) -> AppResult<(StatusCode, Json<Category>)> {
    state
        .policy()
        .authorize(&user, Resource::Catalog, Action::Create, None)?;
    validate(&payload.slug, &payload.title)?;

    let category = category_repo::create(&state.pool, &payload.slug, &payload.title).await?;
    tracing::info!(category_id = category.id, slug = %category.slug, "Category created");
    Ok((StatusCode::CREATED, Json(category)))
}

/// POST /api/category/{id} - not allowed for anyone
pub async fn create_on_item(user: CurrentUser, Path(id): Path<i64>) -> AppResult<StatusCode> {
    tracing::warn!(user_id = user.id, category_id = id, "POST on a category item rejected");
    Err(AppError::forbidden("Creating a category on an existing id is not allowed"))
}

/// PUT /api/category/{id} - 205 Reset Content
pub async fn replace(
    State(state): State<ServerState>,
    user: CurrentUser,
    Path(id): Path<i64>,
    Json(payload): Json<CategoryCreate>,
) -> AppResult<(StatusCode, Json<Category>)> {
    state
        .policy()
        .authorize(&user, Resource::Catalog, Action::Replace, None)?;
    validate(&payload.slug, &payload.title)?;
    save(&state, id, &payload.slug, &payload.title).await
}

/// PATCH /api/category/{id} - 205 Reset Content
pub async fn update(
    State(state): State<ServerState>,
    user: CurrentUser,
    Path(id): Path<i64>,
    Json(payload): Json<CategoryUpdate>,
) -> AppResult<(StatusCode, Json<Category>)> {
    state
        .policy()
        .authorize(&user, Resource::Catalog, Action::Patch, None)?;
    let existing = category_repo::find_by_id(&state.pool, id)
        .await?
        .ok_or_else(|| not_found(id))?;
    let slug = payload.slug.unwrap_or(existing.slug);
    let title = payload.title.unwrap_or(existing.title);
    validate(&slug, &title)?;
    save(&state, id, &slug, &title).await
}

async fn save(
    state: &ServerState,
    id: i64,
    slug: &str,
    title: &str,
) -> AppResult<(StatusCode, Json<Category>)> {
    let category = match category_repo::update(&state.pool, id, slug, title).await {
        Ok(category) => category,
        Err(RepoError::NotFound(_)) => return Err(not_found(id)),
        Err(e) => return Err(e.into()),
    };
    tracing::info!(category_id = id, "Category updated");
    Ok((StatusCode::RESET_CONTENT, Json(category)))
}

/// DELETE /api/category/{id} - refused while menu items use it
pub async fn delete(
    State(state): State<ServerState>,
    user: CurrentUser,
    Path(id): Path<i64>,
) -> AppResult<StatusCode> {
    state
        .policy()
        .authorize(&user, Resource::Catalog, Action::Delete, None)?;

    let in_use = category_repo::menu_item_count(&state.pool, id).await?;
    if in_use > 0 {
        return Err(AppError::new(ErrorCode::CategoryHasMenuItems).with_detail("menu_items", in_use));
    }
    match category_repo::delete(&state.pool, id).await {
        Ok(true) => {}
        Ok(false) => return Err(not_found(id)),
        // A menu item was filed under it after the count
        Err(RepoError::Validation(_)) => return Err(AppError::new(ErrorCode::CategoryHasMenuItems)),
        Err(e) => return Err(e.into()),
    }
    tracing::info!(category_id = id, "Category deleted");
    Ok(StatusCode::NO_CONTENT)
}
