//! User, group and authentication models

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Group granting the Manager role
pub const MANAGER_GROUP: &str = "Manager";
/// Group granting the Delivery Crew role
pub const DELIVERY_CREW_GROUP: &str = "Delivery crew";

/// Registered user (password hash is never part of this type)
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "db", derive(sqlx::FromRow))]
pub struct User {
    pub id: i64,
    pub username: String,
    pub email: String,
    pub first_name: String,
    pub last_name: String,
    /// Site administrator
    pub is_staff: bool,
    pub is_active: bool,
    pub date_joined: DateTime<Utc>,
}

/// Group reference as rendered inside user payloads
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GroupRef {
    pub name: String,
}

/// Compact user embedded in cart rows
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserSummary {
    pub id: i64,
    pub username: String,
    pub email: String,
}

/// Group member listing entry
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GroupMember {
    pub id: i64,
    pub username: String,
    pub email: String,
    pub groups: Vec<GroupRef>,
}

/// Profile of the authenticated user
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserProfile {
    pub id: i64,
    pub username: String,
    pub email: String,
    pub first_name: String,
    pub last_name: String,
    pub groups: Vec<GroupRef>,
    pub date_joined: DateTime<Utc>,
    pub is_active: bool,
}

impl UserProfile {
    pub fn new(user: User, groups: Vec<String>) -> Self {
        Self {
            id: user.id,
            username: user.username,
            email: user.email,
            first_name: user.first_name,
            last_name: user.last_name,
            groups: groups.into_iter().map(|name| GroupRef { name }).collect(),
            date_joined: user.date_joined,
            is_active: user.is_active,
        }
    }
}

/// Registration payload
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RegisterRequest {
    pub username: String,
    pub email: String,
    #[serde(default)]
    pub first_name: String,
    #[serde(default)]
    pub last_name: String,
    pub password: String,
    pub password_confirm: String,
}

/// Login payload
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginRequest {
    #[serde(default)]
    pub username: String,
    #[serde(default)]
    pub password: String,
}

/// Register / login response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthResponse {
    pub message: String,
    pub user_id: i64,
    pub username: String,
    pub email: String,
    pub token: String,
}

/// Profile update payload; username is read-only
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ProfileUpdate {
    pub email: Option<String>,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
}

/// Add-to-group payload; `username` wins when both are given
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct GroupMemberAdd {
    #[serde(default)]
    pub username: Option<String>,
    #[serde(default)]
    pub user_id: Option<i64>,
}
