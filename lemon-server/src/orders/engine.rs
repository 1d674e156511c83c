//! Checkout and per-order operations

use chrono::{Local, NaiveDate};
use shared::models::{Order, OrderPatch, OrderPlaced, OrderReplace};
use shared::money::from_cents;

use super::OrderError;
use crate::auth::{Action, CurrentUser, Owner, Resource};
use crate::core::ServerState;
use crate::db::repository::order::NewOrderItem;
use crate::db::repository::{RepoError, cart as cart_repo, order as order_repo, user as user_repo};
use crate::utils::AppResult;

/// Requested change to an order
#[derive(Debug, Clone)]
pub enum OrderUpdate {
    /// PUT: both fields replaced
    Replace(OrderReplace),
    /// PATCH: any subset
    Patch(OrderPatch),
}

impl OrderUpdate {
    fn action(&self) -> Action {
        match self {
            OrderUpdate::Replace(_) => Action::Replace,
            OrderUpdate::Patch(_) => Action::Patch,
        }
    }
}

fn today() -> NaiveDate {
    Local::now().date_naive()
}

fn owner_of(order: &Order) -> Owner<'static> {
    Owner::Order {
        customer: order.user_id,
        delivery_crew: order.delivery_crew,
    }
}

/// Turn the caller's cart line into an order
///
/// ```text
/// begin
///   ├─ 1. claim cart row (DELETE … RETURNING)  none → CartNotFound
///   ├─ 2. insert order item                    duplicate → rollback, OrderItemExists
///   ├─ 3. insert order (pending, unassigned, today)
/// commit
/// ```
///
/// Every statement runs on the transaction's connection, so a failure at any
/// step leaves the cart in place.
pub async fn place_order(state: &ServerState, user: &CurrentUser) -> AppResult<OrderPlaced> {
    state
        .policy()
        .authorize(user, Resource::Order, Action::Create, None)?;

    let mut tx = state.pool.begin().await.map_err(RepoError::from)?;

    let Some(line) = cart_repo::take_for_user(&mut *tx, user.id).await? else {
        return Err(OrderError::CartNotFound.into());
    };

    let item = NewOrderItem {
        user_id: line.user_id,
        menuitem_id: line.menuitem_id,
        quantity: line.quantity,
        unit_price_cents: line.unit_price_cents,
        price_cents: line.price_cents,
    };
    let orderitem_id = match order_repo::insert_order_item(&mut *tx, &item).await {
        Ok(id) => id,
        Err(RepoError::Duplicate(_)) => {
            tx.rollback().await.map_err(RepoError::from)?;
            tracing::warn!(
                user_id = user.id,
                menuitem_id = line.menuitem_id,
                "Checkout rejected: menu item already ordered"
            );
            return Err(OrderError::OrderItemExists(line.menuitem_id).into());
        }
        Err(e) => return Err(e.into()),
    };

    let order_id =
        order_repo::insert_order(&mut *tx, line.user_id, orderitem_id, line.price_cents, today())
            .await?;

    tx.commit().await.map_err(RepoError::from)?;

    let total = from_cents(line.price_cents);
    tracing::info!(
        order_id,
        orderitem_id,
        user_id = user.id,
        total = %total,
        "Order placed"
    );
    Ok(OrderPlaced {
        order_id,
        orderitem_id,
        total,
    })
}

/// Order detail, readable by the owning customer only
pub async fn get_order(state: &ServerState, user: &CurrentUser, id: i64) -> AppResult<Order> {
    let order = order_repo::find_by_id(&state.pool, id)
        .await?
        .ok_or(OrderError::NotFound(id))?;
    state
        .policy()
        .authorize(user, Resource::Order, Action::Read, Some(owner_of(&order)))?;
    Ok(order)
}

/// Apply a PUT or PATCH
///
/// Managers may set any combination of status and crew. A delivery crew
/// member assigned to the order may only set `status`; other fields in the
/// payload are ignored. The order date is restamped on every save.
pub async fn update_order(
    state: &ServerState,
    user: &CurrentUser,
    id: i64,
    update: OrderUpdate,
) -> AppResult<Order> {
    let order = order_repo::find_by_id(&state.pool, id)
        .await?
        .ok_or(OrderError::NotFound(id))?;
    state
        .policy()
        .authorize(user, Resource::Order, update.action(), Some(owner_of(&order)))?;

    let (status, delivery_crew) = match update {
        OrderUpdate::Replace(full) => (full.status, full.delivery_crew),
        OrderUpdate::Patch(patch) if user.is_manager() => (
            patch.status.unwrap_or(order.status),
            patch.delivery_crew.unwrap_or(order.delivery_crew),
        ),
        OrderUpdate::Patch(patch) => {
            let status = patch.status.ok_or(OrderError::StatusRequired)?;
            (status, order.delivery_crew)
        }
    };

    if let Some(crew) = delivery_crew {
        if delivery_crew != order.delivery_crew && !user_repo::exists(&state.pool, crew).await? {
            return Err(OrderError::DeliveryCrewNotFound(crew).into());
        }
    }

    let updated = order_repo::update(&state.pool, id, status, delivery_crew, today()).await?;
    tracing::info!(
        order_id = id,
        user_id = user.id,
        role = user.role().as_str(),
        status,
        delivery_crew = ?delivery_crew,
        "Order updated"
    );
    Ok(updated)
}

/// Hard delete (Manager only); the order item row is left behind
pub async fn delete_order(state: &ServerState, user: &CurrentUser, id: i64) -> AppResult<()> {
    state
        .policy()
        .authorize(user, Resource::Order, Action::Delete, None)?;
    if !order_repo::delete(&state.pool, id).await? {
        return Err(OrderError::NotFound(id).into());
    }
    tracing::info!(order_id = id, user_id = user.id, "Order deleted");
    Ok(())
}
