//! Order Lifecycle Engine
//!
//! Conceptual states (only `status` and `delivery_crew` are stored):
//!
//! ```text
//! Placed (status=false, no crew)
//!     └─ Assigned (status=false, crew set)      manager sets delivery_crew
//!           └─ Delivered (status=true)          manager or assigned crew sets status
//! ```
//!
//! - [`engine`] - checkout, detail, update, delete
//! - [`query`] - role-scoped listing

pub mod engine;
pub mod query;

pub use engine::{OrderUpdate, delete_order, get_order, place_order, update_order};
pub use query::{OrderListQuery, list_orders};

use thiserror::Error;

use crate::utils::{AppError, ErrorCode};

/// Order lifecycle failures
#[derive(Debug, Error)]
pub enum OrderError {
    #[error("The user has no cart")]
    CartNotFound,

    #[error("Menu item {0} has already been ordered by this user")]
    OrderItemExists(i64),

    #[error("Order {0} not found")]
    NotFound(i64),

    #[error("No orders found for this user")]
    NoOrders,

    #[error("Delivery crew user {0} not found")]
    DeliveryCrewNotFound(i64),

    #[error("Delivery crew may only update the status field")]
    StatusRequired,
}

impl From<OrderError> for AppError {
    fn from(err: OrderError) -> Self {
        let message = err.to_string();
        match err {
            OrderError::CartNotFound => AppError::with_message(ErrorCode::CartNotFound, message),
            OrderError::OrderItemExists(menuitem) => {
                AppError::with_message(ErrorCode::OrderItemExists, message)
                    .with_detail("menuitem", menuitem)
            }
            OrderError::NotFound(id) => {
                AppError::with_message(ErrorCode::OrderNotFound, message).with_detail("order_id", id)
            }
            OrderError::NoOrders => AppError::with_message(ErrorCode::NoOrdersFound, message),
            OrderError::DeliveryCrewNotFound(id) => {
                AppError::with_message(ErrorCode::DeliveryCrewNotFound, message)
                    .with_detail("delivery_crew", id)
            }
            OrderError::StatusRequired => {
                AppError::with_message(ErrorCode::OrderStatusRequired, message)
                    .with_detail("field", "status")
            }
        }
    }
}
