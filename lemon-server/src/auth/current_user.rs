//! Authenticated caller and its roles

use shared::models::{DELIVERY_CREW_GROUP, MANAGER_GROUP};

/// Effective role of a caller
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Role {
    Customer,
    DeliveryCrew,
    Manager,
}

impl Role {
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Customer => "customer",
            Role::DeliveryCrew => "delivery_crew",
            Role::Manager => "manager",
        }
    }
}

/// Group memberships resolved once at authentication time
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RoleSet {
    pub manager: bool,
    pub delivery_crew: bool,
    /// Site administrator (`is_staff`)
    pub admin: bool,
}

impl RoleSet {
    pub fn from_groups<S: AsRef<str>>(groups: &[S], is_staff: bool) -> Self {
        let has = |name: &str| groups.iter().any(|g| g.as_ref() == name);
        Self {
            manager: has(MANAGER_GROUP),
            delivery_crew: has(DELIVERY_CREW_GROUP),
            admin: is_staff,
        }
    }

    /// Manager > Delivery Crew > Customer
    pub fn primary(&self) -> Role {
        if self.manager {
            Role::Manager
        } else if self.delivery_crew {
            Role::DeliveryCrew
        } else {
            Role::Customer
        }
    }
}

/// Caller context injected by [`crate::auth::require_auth`]
#[derive(Debug, Clone)]
pub struct CurrentUser {
    pub id: i64,
    pub username: String,
    pub roles: RoleSet,
}

impl CurrentUser {
    pub fn role(&self) -> Role {
        self.roles.primary()
    }

    pub fn is_manager(&self) -> bool {
        self.roles.manager
    }

    pub fn is_delivery_crew(&self) -> bool {
        self.roles.delivery_crew
    }

    pub fn is_admin(&self) -> bool {
        self.roles.admin
    }
}
