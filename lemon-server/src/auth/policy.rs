//! Authorization Policy
//!
//! One capability table for every access decision. Handlers resolve the
//! record being touched, describe its ownership with [`Owner`] and ask
//! [`Policy::authorize`] before any write happens.
//!
//! | Resource | Read | Write |
//! |----------|------|-------|
//! | Catalog | anyone | Manager |
//! | Cart | owner | owner |
//! | Order | list: anyone (scoped by role), detail: owning customer | PUT/DELETE: Manager, PATCH: Manager or assigned crew |
//! | Booking | Manager or owner | Manager or owner; create: anyone |
//! | Group membership | Manager or admin | Manager or admin |

use crate::auth::CurrentUser;
use crate::security_log;
use crate::utils::{AppError, AppResult, ErrorCode};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Resource {
    /// Categories and menu items
    Catalog,
    Cart,
    Order,
    Booking,
    GroupMembership,
}

impl Resource {
    pub fn as_str(&self) -> &'static str {
        match self {
            Resource::Catalog => "catalog",
            Resource::Cart => "cart",
            Resource::Order => "order",
            Resource::Booking => "booking",
            Resource::GroupMembership => "group_membership",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    List,
    Read,
    Create,
    /// Full replacement (PUT)
    Replace,
    /// Partial update (PATCH)
    Patch,
    Delete,
}

impl Action {
    pub fn as_str(&self) -> &'static str {
        match self {
            Action::List => "list",
            Action::Read => "read",
            Action::Create => "create",
            Action::Replace => "replace",
            Action::Patch => "patch",
            Action::Delete => "delete",
        }
    }

    fn is_write(&self) -> bool {
        !matches!(self, Action::List | Action::Read)
    }
}

/// Ownership of the record an action targets
#[derive(Debug, Clone, Copy)]
pub enum Owner<'a> {
    /// Record owned by a user id (cart lines)
    User(i64),
    Order {
        customer: i64,
        delivery_crew: Option<i64>,
    },
    Booking {
        customer_name: &'a str,
        owner_id: Option<i64>,
    },
}

/// Access decisions
#[derive(Debug, Clone, Copy, Default)]
pub struct Policy {
    /// Booking ownership also requires the stored creator id to match
    pub strict_booking_ownership: bool,
}

impl Policy {
    pub fn new(strict_booking_ownership: bool) -> Self {
        Self {
            strict_booking_ownership,
        }
    }

    /// Whether `user` may perform `action` on `resource`
    ///
    /// `owner` describes the targeted record; `None` for collection-level
    /// actions (list, create).
    pub fn can_access(
        &self,
        user: &CurrentUser,
        resource: Resource,
        action: Action,
        owner: Option<Owner<'_>>,
    ) -> bool {
        self.check(user, resource, action, owner).is_ok()
    }

    /// Like [`Policy::can_access`], returning the Forbidden error to send
    pub fn authorize(
        &self,
        user: &CurrentUser,
        resource: Resource,
        action: Action,
        owner: Option<Owner<'_>>,
    ) -> AppResult<()> {
        self.check(user, resource, action, owner).map_err(|code| {
            security_log!(
                "WARN",
                "permission_denied",
                user_id = user.id,
                username = user.username.clone(),
                role = user.role().as_str(),
                resource = resource.as_str(),
                action = action.as_str()
            );
            AppError::new(code)
        })
    }

    fn check(
        &self,
        user: &CurrentUser,
        resource: Resource,
        action: Action,
        owner: Option<Owner<'_>>,
    ) -> Result<(), ErrorCode> {
        let manager = user.is_manager();
        match resource {
            Resource::Catalog => {
                if !action.is_write() || manager {
                    Ok(())
                } else {
                    Err(ErrorCode::ManagerRequired)
                }
            }

            Resource::Cart => match owner {
                None => Ok(()),
                Some(Owner::User(id)) if id == user.id => Ok(()),
                Some(_) => Err(ErrorCode::PermissionDenied),
            },

            Resource::Order => match action {
                // Placing an order and listing are open; the list is scoped by role
                Action::List | Action::Create => Ok(()),
                Action::Read => match owner {
                    Some(Owner::Order { customer, .. }) if customer == user.id => Ok(()),
                    _ => Err(ErrorCode::NotOrderOwner),
                },
                Action::Replace | Action::Delete => {
                    if manager {
                        Ok(())
                    } else {
                        Err(ErrorCode::ManagerRequired)
                    }
                }
                Action::Patch => {
                    if manager {
                        return Ok(());
                    }
                    if !user.is_delivery_crew() {
                        return Err(ErrorCode::ManagerRequired);
                    }
                    match owner {
                        Some(Owner::Order {
                            delivery_crew: Some(crew),
                            ..
                        }) if crew == user.id => Ok(()),
                        _ => Err(ErrorCode::NotAssignedCrew),
                    }
                }
            },

            Resource::Booking => match action {
                Action::List | Action::Create => Ok(()),
                _ if manager => Ok(()),
                _ => match owner {
                    Some(Owner::Booking {
                        customer_name,
                        owner_id,
                    }) if self.owns_booking(user, customer_name, owner_id) => Ok(()),
                    _ => Err(ErrorCode::NotBookingOwner),
                },
            },

            Resource::GroupMembership => {
                if manager || user.is_admin() {
                    Ok(())
                } else {
                    Err(ErrorCode::AdminRequired)
                }
            }
        }
    }

    fn owns_booking(&self, user: &CurrentUser, customer_name: &str, owner_id: Option<i64>) -> bool {
        if customer_name != user.username {
            return false;
        }
        !self.strict_booking_ownership || owner_id == Some(user.id)
    }
}
