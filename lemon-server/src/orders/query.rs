//! Role-scoped order listing
//!
//! - Manager: every order, with `to_price`, `search`, `ordering`, `perpage`, `page`
//! - Delivery crew: orders assigned to them
//! - Customer: their own orders, `NoOrdersFound` when there are none

use serde::Deserialize;
use shared::models::Order;

use super::OrderError;
use crate::auth::{Action, CurrentUser, Resource, Role};
use crate::core::ServerState;
use crate::db::repository::{SqlFilter, order as order_repo};
use crate::utils::AppResult;
use crate::utils::listing::{OrderField, PageRequest, parse_amount, parse_ordering};

const ORDER_FIELDS: &[OrderField] = &[
    ("id", "o.id"),
    ("user_id", "o.user_id"),
    ("delivery_crew", "o.delivery_crew_id"),
    ("status", "o.status"),
    ("total", "o.total_cents"),
    ("date", "o.date"),
];

/// Raw list parameters, parsed once the caller's role is known
#[derive(Debug, Clone, Default, Deserialize)]
pub struct OrderListQuery {
    pub to_price: Option<String>,
    pub search: Option<String>,
    pub ordering: Option<String>,
    pub perpage: Option<String>,
    pub page: Option<String>,
}

impl OrderListQuery {
    fn manager_filter(&self) -> AppResult<SqlFilter> {
        let mut filter = SqlFilter::new();

        if let Some(max) = parse_amount(self.to_price.as_deref(), "to_price")? {
            filter.amount_at_most("o.total_cents", max);
        }

        if let Some(term) = self.search.as_deref().map(str::trim).filter(|s| !s.is_empty()) {
            match term.to_ascii_lowercase().as_str() {
                "1" | "true" => filter.eq_i64("o.status", 1),
                "0" | "false" => filter.eq_i64("o.status", 0),
                _ => filter.never(),
            };
        }

        Ok(filter)
    }
}

/// Orders visible to the caller
pub async fn list_orders(
    state: &ServerState,
    user: &CurrentUser,
    query: &OrderListQuery,
) -> AppResult<Vec<Order>> {
    state
        .policy()
        .authorize(user, Resource::Order, Action::List, None)?;

    match user.role() {
        Role::Manager => {
            let filter = query.manager_filter()?;
            let order_by = parse_ordering(query.ordering.as_deref(), ORDER_FIELDS, "id", "o.id")?;
            let page = PageRequest::parse(
                query.page.as_deref(),
                query.perpage.as_deref(),
                state.config.order_page_size,
                state.config.max_page_size,
            )?;
            Ok(order_repo::list_page(&state.pool, &filter, &order_by, page).await?)
        }
        Role::DeliveryCrew => {
            let mut filter = SqlFilter::new();
            filter.eq_i64("o.delivery_crew_id", user.id);
            Ok(order_repo::list_all(&state.pool, &filter, "o.id ASC").await?)
        }
        Role::Customer => {
            let mut filter = SqlFilter::new();
            filter.eq_i64("o.user_id", user.id);
            let orders = order_repo::list_all(&state.pool, &filter, "o.id ASC").await?;
            if orders.is_empty() {
                return Err(OrderError::NoOrders.into());
            }
            Ok(orders)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn to_price_bounds_total_cents() {
        let q = OrderListQuery {
            to_price: Some("25".into()),
            ..Default::default()
        };
        assert_eq!(q.manager_filter().unwrap().where_clause(), " WHERE o.total_cents <= ?");

        let q = OrderListQuery {
            to_price: Some("-1".into()),
            ..Default::default()
        };
        assert_eq!(q.manager_filter().unwrap().where_clause(), " WHERE 0 = 1");
    }

    #[test]
    fn huge_to_price_leaves_orders_unfiltered() {
        let q = OrderListQuery {
            to_price: Some("79228162514264337593543950335".into()),
            ..Default::default()
        };
        assert_eq!(q.manager_filter().unwrap().where_clause(), "");
    }

    #[test]
    fn search_maps_status_text() {
        let q = OrderListQuery {
            search: Some("True".into()),
            ..Default::default()
        };
        assert_eq!(q.manager_filter().unwrap().where_clause(), " WHERE o.status = ?");

        let q = OrderListQuery {
            search: Some("pizza".into()),
            ..Default::default()
        };
        assert_eq!(q.manager_filter().unwrap().where_clause(), " WHERE 0 = 1");
    }

    #[test]
    fn bad_to_price_is_rejected() {
        let q = OrderListQuery {
            to_price: Some("cheap".into()),
            ..Default::default()
        };
        assert!(q.manager_filter().is_err());
    }
}
