//! Menu Item Model

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::Category;

/// Description stored when the client sends none
pub const DEFAULT_DESCRIPTION: &str = "No description available";

/// Menu item with its category expanded
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MenuItem {
    pub id: i64,
    pub name: String,
    pub price: Decimal,
    pub description: String,
    pub featured: bool,
    pub category: Category,
}

/// Create / full-replace menu item payload
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MenuItemCreate {
    pub name: String,
    pub price: Decimal,
    pub description: Option<String>,
    pub category_id: i64,
    #[serde(default)]
    pub featured: bool,
}

/// Partial update payload
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct MenuItemUpdate {
    pub name: Option<String>,
    pub price: Option<Decimal>,
    pub description: Option<String>,
    pub category_id: Option<i64>,
    pub featured: Option<bool>,
}
