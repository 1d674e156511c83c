//! Category Model

use serde::{Deserialize, Serialize};

/// Menu category (`Starters`, `Mains`, ...)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "db", derive(sqlx::FromRow))]
pub struct Category {
    pub id: i64,
    pub slug: String,
    pub title: String,
}

/// Create / full-replace category payload
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CategoryCreate {
    pub slug: String,
    pub title: String,
}

/// Partial update payload
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CategoryUpdate {
    pub slug: Option<String>,
    pub title: Option<String>,
}
