//! Cart Manager
//!
//! A user holds at most one pending cart line. The line snapshots the menu
//! item's price when it is added; later price changes do not touch it.

use shared::models::CartEntry;
use shared::money::line_total;

use crate::auth::{Action, CurrentUser, Owner, Resource};
use crate::core::ServerState;
use crate::db::repository::{cart as cart_repo, menu_item as menu_item_repo};
use crate::utils::validation::validate_quantity;
use crate::utils::{AppError, AppResult, ErrorCode};

/// Add a line to the caller's cart
///
/// Fails with `CartAlreadyExists` when the caller already has one.
pub async fn add_item(
    state: &ServerState,
    user: &CurrentUser,
    menuitem_id: i64,
    quantity: i64,
) -> AppResult<()> {
    state
        .policy()
        .authorize(user, Resource::Cart, Action::Create, Some(Owner::User(user.id)))?;
    validate_quantity(quantity)?;
    if cart_repo::exists_for_user(&state.pool, user.id).await? {
        return Err(AppError::new(ErrorCode::CartAlreadyExists));
    }

    let item = menu_item_repo::find_by_id(&state.pool, menuitem_id)
        .await?
        .ok_or_else(|| {
            AppError::new(ErrorCode::MenuItemNotFound).with_detail("menuitem", menuitem_id)
        })?;
    let price = line_total(item.price, quantity)?;

    let inserted =
        cart_repo::insert_if_absent(&state.pool, user.id, item.id, quantity, item.price, price)
            .await?;
    // A concurrent add may have won since the check above
    if !inserted {
        return Err(AppError::new(ErrorCode::CartAlreadyExists));
    }

    tracing::info!(
        user_id = user.id,
        menuitem_id = item.id,
        quantity,
        price = %price,
        "Cart created"
    );
    Ok(())
}

/// The caller's cart line; an empty cart is a bad request, not a 404
pub async fn get_cart(state: &ServerState, user: &CurrentUser) -> AppResult<CartEntry> {
    state
        .policy()
        .authorize(user, Resource::Cart, Action::Read, Some(Owner::User(user.id)))?;
    cart_repo::find_for_user(&state.pool, user.id)
        .await?
        .ok_or_else(|| AppError::new(ErrorCode::CartEmpty))
}

/// Remove the caller's cart line(s)
pub async fn clear_cart(state: &ServerState, user: &CurrentUser) -> AppResult<()> {
    state
        .policy()
        .authorize(user, Resource::Cart, Action::Delete, Some(Owner::User(user.id)))?;
    let removed = cart_repo::delete_for_user(&state.pool, user.id).await?;
    if removed == 0 {
        return Err(AppError::new(ErrorCode::CartNotFound));
    }
    tracing::info!(user_id = user.id, removed, "Cart cleared");
    Ok(())
}
