//! Authentication and authorization
//!
//! - [`token`] - opaque API keys and the `Authorization` header
//! - [`password`] - argon2 password hashes
//! - [`CurrentUser`] - authenticated caller with its resolved [`RoleSet`]
//! - [`require_auth`] - authentication middleware
//! - [`Policy`] - the capability table every handler consults

pub mod current_user;
pub mod extractor;
pub mod middleware;
pub mod password;
pub mod policy;
pub mod token;

pub use current_user::{CurrentUser, Role, RoleSet};
pub use middleware::require_auth;
pub use policy::{Action, Owner, Policy, Resource};
