//! Data models
//!
//! Shared between the server and its API clients.
//! DB row types use `#[cfg_attr(feature = "db", derive(sqlx::FromRow))]`.
//! All IDs are `i64` (SQLite INTEGER PRIMARY KEY). Money is [`rust_decimal::Decimal`]
//! with two fractional digits, serialized as a string (`"12.50"`).

pub mod booking;
pub mod cart;
pub mod category;
pub mod menu_item;
pub mod order;
pub mod user;

// Re-exports
pub use booking::*;
pub use cart::*;
pub use category::*;
pub use menu_item::*;
pub use order::*;
pub use user::*;

/// Deserialize a field that distinguishes "absent" from an explicit `null`.
///
/// Use with `#[serde(default, deserialize_with = "double_option")]`:
/// absent → `None`, `null` → `Some(None)`, value → `Some(Some(v))`.
pub(crate) fn double_option<'de, D, T>(deserializer: D) -> Result<Option<Option<T>>, D::Error>
where
    D: serde::Deserializer<'de>,
    T: serde::Deserialize<'de>,
{
    serde::Deserialize::deserialize(deserializer).map(Some)
}
