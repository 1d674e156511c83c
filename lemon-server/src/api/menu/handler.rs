//! Menu item API Handlers

use axum::extract::State;
use http::StatusCode;
use serde::Deserialize;
use shared::models::{DEFAULT_DESCRIPTION, MenuItem, MenuItemCreate, MenuItemUpdate};
use shared::money::validate_amount;
use shared::response::PaginatedResponse;

use crate::auth::{Action, CurrentUser, Resource};
use crate::core::ServerState;
use crate::db::repository::menu_item::MenuItemFields;
use crate::db::repository::{
    RepoError, SqlFilter, category as category_repo, menu_item as menu_item_repo,
};
use crate::utils::extract::{Json, Path, Query};
use crate::utils::listing::{OrderField, PageRequest, parse_amount, parse_flag, parse_ordering};
use crate::utils::validation::{MAX_NAME_LEN, validate_required_text};
use crate::utils::{AppError, AppResult, ErrorCode};

const MENU_FIELDS: &[OrderField] = &[
    ("id", "m.id"),
    ("name", "m.name"),
    ("price", "m.price_cents"),
    ("featured", "m.featured"),
    ("category", "c.title"),
];

#[derive(Debug, Default, Deserialize)]
pub struct MenuListQuery {
    pub category: Option<String>,
    pub featured: Option<String>,
    pub to_price: Option<String>,
    pub search: Option<String>,
    pub ordering: Option<String>,
    #[serde(alias = "page_size")]
    pub perpage: Option<String>,
    pub page: Option<String>,
}

fn not_found(id: i64) -> AppError {
    AppError::new(ErrorCode::MenuItemNotFound).with_detail("menuitem", id)
}

/// Validate a full set of menu item fields
async fn check_fields(state: &ServerState, fields: MenuItemFields) -> AppResult<MenuItemFields> {
    validate_required_text(&fields.name, "name", MAX_NAME_LEN)?;
    let price = validate_amount(fields.price, "price").map_err(|e| {
        AppError::with_message(ErrorCode::MenuItemInvalidPrice, e.to_string())
            .with_detail("field", "price")
    })?;
    if category_repo::find_by_id(&state.pool, fields.category_id)
        .await?
        .is_none()
    {
        return Err(AppError::new(ErrorCode::MenuItemCategoryInvalid)
            .with_detail("category_id", fields.category_id));
    }
    Ok(MenuItemFields { price, ..fields })
}

fn map_write_error(err: RepoError, id: Option<i64>) -> AppError {
    match (err, id) {
        (RepoError::NotFound(_), Some(id)) => not_found(id),
        (RepoError::Validation(_), _) => AppError::new(ErrorCode::MenuItemCategoryInvalid),
        (e, _) => e.into(),
    }
}

/// GET /api/menu/ - filtered, ordered, paginated
pub async fn list(
    State(state): State<ServerState>,
    user: CurrentUser,
    Query(query): Query<MenuListQuery>,
) -> AppResult<Json<PaginatedResponse<MenuItem>>> {
    state
        .policy()
        .authorize(&user, Resource::Catalog, Action::List, None)?;

    let mut filter = SqlFilter::new();
    if let Some(raw) = query.category.as_deref().map(str::trim).filter(|s| !s.is_empty()) {
        match raw.parse::<i64>() {
            Ok(id) => filter.eq_i64("m.category_id", id),
            Err(_) => filter.eq_text("c.title", raw),
        };
    }
    if let Some(featured) = parse_flag(query.featured.as_deref(), "featured")? {
        filter.eq_i64("m.featured", i64::from(featured));
    }
    if let Some(max) = parse_amount(query.to_price.as_deref(), "to_price")? {
        filter.amount_at_most("m.price_cents", max);
    }
    if let Some(term) = query.search.as_deref().map(str::trim).filter(|s| !s.is_empty()) {
        filter.search(&["m.name", "m.description"], term);
    }

    let order_by = parse_ordering(query.ordering.as_deref(), MENU_FIELDS, "name", "m.id")?;
    let page = PageRequest::parse(
        query.page.as_deref(),
        query.perpage.as_deref(),
        state.config.menu_page_size,
        state.config.max_page_size,
    )?;

    let (items, total) = menu_item_repo::list(&state.pool, &filter, &order_by, page).await?;
    Ok(Json(PaginatedResponse::new(
        items,
        page.page,
        page.per_page,
        total.max(0) as u64,
    )))
}

/// GET /api/menu/{id}
pub async fn get_by_id(
    State(state): State<ServerState>,
    user: CurrentUser,
    Path(id): Path<i64>,
) -> AppResult<Json<MenuItem>> {
    state
        .policy()
        .authorize(&user, Resource::Catalog, Action::Read, None)?;
    let item = menu_item_repo::find_by_id(&state.pool, id)
        .await?
        .ok_or_else(|| not_found(id))?;
    Ok(Json(item))
}

/// POST /api/menu/
pub async fn create(
    State(state): State<ServerState>,
    user: CurrentUser,
    Json(payload): Json<MenuItemCreate>,
) -> AppResult<(StatusCode, Json<MenuItem>)> {
    state
        .policy()
        .authorize(&user, Resource::Catalog, Action::Create, None)?;

    let fields = check_fields(
        &state,
        MenuItemFields {
            name: payload.name,
            price: payload.price,
            description: payload
                .description
                .filter(|d| !d.trim().is_empty())
                .unwrap_or_else(|| DEFAULT_DESCRIPTION.to_string()),
            featured: payload.featured,
            category_id: payload.category_id,
        },
    )
    .await?;

    let item = menu_item_repo::create(&state.pool, &fields)
        .await
        .map_err(|e| map_write_error(e, None))?;
    tracing::info!(menuitem_id = item.id, name = %item.name, price = %item.price, "Menu item created");
    Ok((StatusCode::CREATED, Json(item)))
}

/// PUT /api/menu/{id}
pub async fn replace(
    State(state): State<ServerState>,
    user: CurrentUser,
    Path(id): Path<i64>,
    Json(payload): Json<MenuItemCreate>,
) -> AppResult<Json<MenuItem>> {
    state
        .policy()
        .authorize(&user, Resource::Catalog, Action::Replace, None)?;
    let fields = MenuItemFields {
        name: payload.name,
        price: payload.price,
        description: payload
            .description
            .filter(|d| !d.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_DESCRIPTION.to_string()),
        featured: payload.featured,
        category_id: payload.category_id,
    };
    save(&state, id, fields).await
}

/// PATCH /api/menu/{id}
pub async fn update(
    State(state): State<ServerState>,
    user: CurrentUser,
    Path(id): Path<i64>,
    Json(payload): Json<MenuItemUpdate>,
) -> AppResult<Json<MenuItem>> {
    state
        .policy()
        .authorize(&user, Resource::Catalog, Action::Patch, None)?;
    let existing = menu_item_repo::find_by_id(&state.pool, id)
        .await?
        .ok_or_else(|| not_found(id))?;
    let fields = MenuItemFields {
        name: payload.name.unwrap_or(existing.name),
        price: payload.price.unwrap_or(existing.price),
        description: payload.description.unwrap_or(existing.description),
        featured: payload.featured.unwrap_or(existing.featured),
        category_id: payload.category_id.unwrap_or(existing.category.id),
    };
    save(&state, id, fields).await
}

async fn save(state: &ServerState, id: i64, fields: MenuItemFields) -> AppResult<Json<MenuItem>> {
    let fields = check_fields(state, fields).await?;
    let item = menu_item_repo::update(&state.pool, id, &fields)
        .await
        .map_err(|e| map_write_error(e, Some(id)))?;
    tracing::info!(menuitem_id = id, price = %item.price, "Menu item updated");
    Ok(Json(item))
}

/// DELETE /api/menu/{id}
pub async fn delete(
    State(state): State<ServerState>,
    user: CurrentUser,
    Path(id): Path<i64>,
) -> AppResult<StatusCode> {
    state
        .policy()
        .authorize(&user, Resource::Catalog, Action::Delete, None)?;
    if !menu_item_repo::delete(&state.pool, id).await? {
        return Err(not_found(id));
    }
    tracing::info!(menuitem_id = id, "Menu item deleted");
    Ok(StatusCode::NO_CONTENT)
}
