//! Order and OrderItem Models

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::MenuItem;

/// Snapshot of a cart line taken at checkout
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OrderItem {
    pub id: i64,
    pub user_id: i64,
    pub menuitem: MenuItem,
    pub quantity: i64,
    pub unit_price: Decimal,
    pub price: Decimal,
}

/// Customer order
///
/// `status == false` means placed / out for delivery, `true` means delivered.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Order {
    pub id: i64,
    pub user_id: i64,
    pub delivery_crew: Option<i64>,
    pub status: bool,
    pub total: Decimal,
    /// Restamped with the current date on every save
    pub date: NaiveDate,
    pub orderitem: Option<OrderItem>,
}

/// Full replacement (PUT) of the mutable order fields
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OrderReplace {
    pub status: bool,
    #[serde(default)]
    pub delivery_crew: Option<i64>,
}

/// Partial update (PATCH) of the mutable order fields
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct OrderPatch {
    pub status: Option<bool>,
    /// Absent leaves the assignment alone, `null` unassigns
    #[serde(default, deserialize_with = "super::double_option")]
    pub delivery_crew: Option<Option<i64>>,
}

/// Checkout result
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OrderPlaced {
    pub order_id: i64,
    pub orderitem_id: i64,
    pub total: Decimal,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn patch_distinguishes_absent_and_null_crew() {
        let p: OrderPatch = serde_json::from_str(r#"{"status": true}"#).unwrap();
        assert_eq!(p.status, Some(true));
        assert_eq!(p.delivery_crew, None);

        let p: OrderPatch = serde_json::from_str(r#"{"delivery_crew": null}"#).unwrap();
        assert_eq!(p.delivery_crew, Some(None));

        let p: OrderPatch = serde_json::from_str(r#"{"delivery_crew": 4}"#).unwrap();
        assert_eq!(p.delivery_crew, Some(Some(4)));
    }

    #[test]
    fn replace_requires_status() {
        assert!(serde_json::from_str::<OrderReplace>(r#"{"delivery_crew": 3}"#).is_err());
        let r: OrderReplace = serde_json::from_str(r#"{"status": false}"#).unwrap();
        assert_eq!(r.delivery_crew, None);
    }
}
