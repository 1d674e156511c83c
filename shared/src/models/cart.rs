//! Cart Model

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::{MenuItem, UserSummary};

/// The single pending cart line of a user
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CartEntry {
    pub user: UserSummary,
    pub menuitem: MenuItem,
    pub quantity: i64,
    /// Menu item price captured when the line was added
    pub unit_price: Decimal,
    /// `unit_price * quantity`
    pub price: Decimal,
}

/// Add-to-cart payload
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CartAdd {
    #[serde(alias = "menuitem_id")]
    pub menuitem: i64,
    pub quantity: i64,
}
